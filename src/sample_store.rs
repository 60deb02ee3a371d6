use std::sync::Mutex;

use crate::types::PressureSample;

/// Última muestra válida, con un único escritor (el camino de
/// decodificación) y cualquier número de lectores.
///
/// El reemplazo es siempre de la muestra completa: un lector ve la muestra
/// vieja o la nueva, nunca una mezcla. Los lectores reciben una
/// instantánea, no una referencia viva.
pub struct SampleStore {
    latest: Mutex<Option<PressureSample>>,
}

impl SampleStore {
    pub fn new() -> Self {
        Self {
            latest: Mutex::new(None),
        }
    }

    /// Publica una muestra recién decodificada, reemplazando la anterior
    pub fn publish(&self, sample: PressureSample) {
        *self.latest.lock().unwrap() = Some(sample);
    }

    /// Instantánea de la última muestra válida
    /// (`None` antes de la primera trama)
    pub fn current(&self) -> Option<PressureSample> {
        *self.latest.lock().unwrap()
    }

    /// Valor del punto en posición 1..18 de la última muestra;
    /// 0 fuera de rango o sin muestra todavía
    pub fn point_value(&self, position: usize) -> u16 {
        self.current()
            .map(|sample| sample.point_value(position))
            .unwrap_or(0)
    }
}

impl Default for SampleStore {
    fn default() -> Self {
        Self::new()
    }
}
