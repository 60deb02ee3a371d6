use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Intervalo de sondeo inválido: {0} ms")]
    InvalidInterval(u64),
}

/// Configuración del daemon. Se valida aquí, al cargar; el núcleo del
/// decodificador no conoce esta superficie.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    /// MAC del dispositivo BLE de la plantilla (puede venir de argv)
    pub device_mac: String,
    /// Característica GATT de notificación (canal TX de la plantilla)
    pub tx_char: String,
    /// Característica GATT de escritura (canal RX, comandos opcionales)
    pub rx_char: String,
    /// Intervalo del bucle cooperativo de sondeo, en milisegundos
    pub poll_interval_ms: u64,
    /// Enviar el comando de solicitud de stream al conectar
    pub request_stream: bool,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            device_mac: String::new(),
            tx_char: "service0001/char0002".to_string(),
            rx_char: "service0001/char0004".to_string(),
            poll_interval_ms: 20,
            request_stream: false,
        }
    }
}

impl DaemonConfig {
    /// Carga y valida la configuración desde un archivo JSON
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: DaemonConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidInterval(self.poll_interval_ms));
        }
        Ok(())
    }
}
