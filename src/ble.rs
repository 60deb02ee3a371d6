use dbus::arg::{PropMap, RefArg, Variant};
use dbus::blocking::Connection;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;

use crate::config::DaemonConfig;
use crate::decoder::FrameScanner;
use crate::sample_store::SampleStore;
use crate::types::PressureSample;

/// Comando opcional de solicitud de stream continuo. El protocolo por
/// defecto no lo necesita: la plantilla emite sola al conectar.
pub const REQUEST_STREAM_CMD: [u8; 1] = [0x55];

/// Estadísticas del enlace con la plantilla
#[derive(Debug, Clone, Default)]
pub struct LinkStats {
    pub valid_frames: u32,
    pub checksum_errors: u32,
}

// Contadores globales para estadísticas
static VALID_FRAMES: AtomicU32 = AtomicU32::new(0);
static CHECKSUM_ERRORS: AtomicU32 = AtomicU32::new(0);

/// Conecta a la plantilla BLE y comienza a recibir tramas de presión.
/// Cada notificación GATT se pasa tal cual al sincronizador de tramas;
/// las muestras válidas se publican en el store y se envían por el canal.
pub fn start_insole_receiver(
    target_mac: &str,
    config: &DaemonConfig,
    store: Arc<SampleStore>,
    tx: Sender<PressureSample>,
) -> Result<(), Box<dyn std::error::Error>> {
    let conn = Connection::new_system()?;
    println!("🔌 Conectado a D-Bus del sistema");

    // Encender el adaptador Bluetooth
    let adapter_proxy = conn.with_proxy("org.bluez", "/org/bluez/hci0", Duration::from_secs(5));

    let _: () = adapter_proxy.method_call(
        "org.freedesktop.DBus.Properties",
        "Set",
        ("org.bluez.Adapter1", "Powered", Variant(true)),
    )?;
    println!("✅ Adaptador Bluetooth encendido");

    // Detener cualquier descubrimiento previo
    let stop_result: Result<(), _> =
        adapter_proxy.method_call("org.bluez.Adapter1", "StopDiscovery", ());
    if let Err(e) = stop_result {
        if !format!("{}", e).contains("No discovery started") {
            println!("⚠️  Error al detener el descubrimiento: {}", e);
        }
    }

    // Construir la ruta del dispositivo basada en la MAC
    let device_path_str = format!("/org/bluez/hci0/dev_{}", target_mac.replace(':', "_"));
    println!("🔍 Buscando plantilla en: {}", device_path_str);

    // Intentar conectar al dispositivo específico
    let device_proxy = conn.with_proxy("org.bluez", &device_path_str, Duration::from_secs(10));

    match device_proxy.method_call::<(), _, _, _>("org.bluez.Device1", "Connect", ()) {
        Ok(_) => {
            println!("✅ Conectado exitosamente a la plantilla {}", target_mac);
            std::thread::sleep(Duration::from_secs(2));
        }
        Err(e) => {
            println!("❌ No se pudo conectar a la plantilla {}: {}", target_mac, e);
            println!("⏳ Reintentando en 3 segundos...");
            std::thread::sleep(Duration::from_secs(3));

            device_proxy.method_call::<(), _, _, _>("org.bluez.Device1", "Connect", ())?;
            println!("✅ Conectado en segundo intento");
            std::thread::sleep(Duration::from_secs(2));
        }
    }

    // Configurar notificaciones en la característica TX
    let char_path = format!("{}/{}", device_path_str, config.tx_char);
    let char_proxy = conn.with_proxy("org.bluez", &char_path, Duration::from_secs(5));

    char_proxy.method_call::<(), _, _, _>("org.bluez.GattCharacteristic1", "StartNotify", ())?;
    println!("📡 Notificaciones BLE iniciadas en {}", char_path);

    if config.request_stream {
        request_stream(&conn, &device_path_str, &config.rx_char);
    }

    // Sincronizador de tramas con los eventos cableados al store y al canal
    let mut scanner = FrameScanner::new();

    let tx_clone = tx.clone();
    let store_clone = Arc::clone(&store);
    scanner.on_frame_valid(move |sample| {
        VALID_FRAMES.fetch_add(1, Ordering::Relaxed);
        store_clone.publish(*sample);
        let _ = tx_clone.send(*sample);
    });

    scanner.on_checksum_error(|| {
        CHECKSUM_ERRORS.fetch_add(1, Ordering::Relaxed);
    });

    // Preparar el handler de notificaciones
    use dbus::blocking::stdintf::org_freedesktop_dbus::PropertiesPropertiesChanged as PC;
    use dbus::message::SignalArgs;

    let char_path_clone = char_path.clone();

    let mr = PC::match_rule(None, None);
    conn.add_match(mr, move |pc: PC, _, msg| {
        if msg.path().map(|p| p.to_string()) != Some(char_path_clone.clone()) {
            return true;
        }

        if let Some(value_var) = pc.changed_properties.get("Value") {
            if let Some(chunk) = value_var.0.as_iter().and_then(|iter| {
                let v: Vec<u8> = iter.filter_map(|item| item.as_u64().map(|b| b as u8)).collect();
                Some(v)
            }) {
                scanner.feed(&chunk);
            }
        }
        true
    })?;

    println!("🦶 Recibiendo tramas de presión en tiempo real...\n");

    let poll = Duration::from_millis(config.poll_interval_ms);
    loop {
        conn.process(poll)?;
    }
}

/// Escribe el comando de solicitud en la característica RX (mejor esfuerzo)
fn request_stream(conn: &Connection, device_path: &str, rx_char: &str) {
    let rx_path = format!("{}/{}", device_path, rx_char);
    let rx_proxy = conn.with_proxy("org.bluez", &rx_path, Duration::from_secs(5));

    let options = PropMap::new();
    let result: Result<(), _> = rx_proxy.method_call(
        "org.bluez.GattCharacteristic1",
        "WriteValue",
        (REQUEST_STREAM_CMD.to_vec(), options),
    );

    match result {
        Ok(_) => println!("📤 Comando de solicitud de stream enviado"),
        Err(e) => println!("⚠️  No se pudo enviar el comando de solicitud: {}", e),
    }
}

/// Obtiene las estadísticas actuales del enlace
pub fn get_stats() -> LinkStats {
    LinkStats {
        valid_frames: VALID_FRAMES.load(Ordering::Relaxed),
        checksum_errors: CHECKSUM_ERRORS.load(Ordering::Relaxed),
    }
}
