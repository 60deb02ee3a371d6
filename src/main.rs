/*
Podoscopio - Plantilla de presión plantar BLE en Rust Puro

Daemon que:
1. Recibe tramas de 39 bytes desde la plantilla BLE (18 puntos de presión)
2. Valida checksum y decodifica cada trama en una PressureSample
3. Calcula el centro de presión (CoP) y agregados por región anatómica

Para compilar y ejecutar:
    ./target/release/podoscopio 28:CD:C1:08:37:69

Modo debug sin hardware (reproduce una captura aleatoria de capturas/):
    ./target/debug/podoscopio
*/

use anyhow::Result;
use crossbeam_channel::{bounded, select};
use std::env;
use std::path::Path;
use std::sync::Arc;

use podoscopio::ble::{get_stats, start_insole_receiver};
use podoscopio::config::DaemonConfig;
use podoscopio::cop::center_of_pressure;
use podoscopio::csv_loader::load_samples_from_csv;
use podoscopio::foot_model::NAMED_REGIONS;
use podoscopio::regions::{region_average, region_max, region_normalized_sum, region_sum};
use podoscopio::sample_store::SampleStore;
use podoscopio::types::PressureSample;

const CONFIG_PATH: &str = "podoscopio.json";
const STATUS_EVERY_FRAMES: u32 = 50; // A 50 Hz, un resumen por segundo

fn main() -> Result<()> {
    println!("🦶 Podoscopio - Plantilla de presión plantar\n");

    // Obtener MAC address desde argumentos (opcional)
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        println!("🔧 Modo: DEBUG - Captura aleatoria\n");
        return debug_mode();
    }

    let target_mac = &args[1];
    println!("🔧 Modo: BLE Real-Time");
    println!("🎯 Objetivo BLE: {}\n", target_mac);

    let config = if Path::new(CONFIG_PATH).exists() {
        let config = DaemonConfig::load(CONFIG_PATH)?;
        println!("⚙️  Configuración cargada de {}", CONFIG_PATH);
        config
    } else {
        DaemonConfig::default()
    };

    let store = Arc::new(SampleStore::new());

    // Canal para recibir muestras decodificadas
    let (tx, rx) = bounded::<PressureSample>(100);

    // Lanzar hilo BLE en segundo plano
    let target_mac_clone = target_mac.to_string();
    let config_clone = config.clone();
    let store_clone = Arc::clone(&store);
    std::thread::spawn(move || {
        if let Err(e) = start_insole_receiver(&target_mac_clone, &config_clone, store_clone, tx) {
            eprintln!("❌ Error en BLE: {}", e);
        }
    });

    println!("🎬 Esperando tramas de la plantilla...\n");

    let mut frames_received = 0u32;

    loop {
        select! {
            recv(rx) -> msg => {
                match msg {
                    Ok(sample) => {
                        frames_received += 1;

                        if frames_received % STATUS_EVERY_FRAMES == 0 {
                            let cop = center_of_pressure(&sample);
                            println!("[CoP][{:?}] {}", sample.side, cop.format_full());
                            print_region_summary(&sample);

                            let stats = get_stats();
                            if stats.checksum_errors > 0 {
                                println!("⚠️  Tramas con checksum inválido: {}", stats.checksum_errors);
                            }
                        }
                    }
                    Err(e) => {
                        eprintln!("❌ Error recibiendo muestra: {}", e);
                        return Ok(());
                    }
                }
            }
        }
    }
}

fn print_region_summary(sample: &PressureSample) {
    for (name, range) in NAMED_REGIONS {
        println!(
            "  {:<10} suma={:>6} media={:>5} máx={:>5} carga={:>5.1}%",
            name,
            region_sum(&sample.points, range),
            region_average(&sample.points, range),
            region_max(&sample.points, range),
            region_normalized_sum(&sample.points, range) * 100.0
        );
    }
}

/// Modo DEBUG: reproduce una captura CSV aleatoria de capturas/
fn debug_mode() -> Result<()> {
    use rand::Rng;
    use std::fs;
    use std::path::PathBuf;

    let captures_dir = Path::new("capturas");
    if !captures_dir.exists() {
        anyhow::bail!("No existe la carpeta capturas/ (graba una captura primero)");
    }

    let csv_files: Vec<PathBuf> = fs::read_dir(captures_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("csv"))
                .unwrap_or(false)
        })
        .collect();

    if csv_files.is_empty() {
        anyhow::bail!("No hay archivos CSV en capturas/");
    }

    let random_idx = rand::thread_rng().gen_range(0..csv_files.len());
    let csv_path = &csv_files[random_idx];
    println!("📄 Reproduciendo {:?}\n", csv_path);

    let samples = load_samples_from_csv(csv_path)?;
    let store = SampleStore::new();

    for (idx, sample) in samples.iter().enumerate() {
        store.publish(*sample);
        let cop = center_of_pressure(sample);
        println!("{:>4}: [{:?}] {}", idx, sample.side, cop.format_xy());
    }

    if let Some(last) = store.current() {
        println!("\n📊 Resumen de regiones (última muestra):");
        print_region_summary(&last);
    }

    Ok(())
}
