use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use podoscopio::cop::center_of_pressure;
use podoscopio::csv_loader::load_samples_from_csv;
use podoscopio::foot_model::{
    PointRange, EVEN_POINTS, FRONT_THIRD, HEEL_THIRD, MIDDLE_THIRD, NAMED_REGIONS, ODD_POINTS,
};
use podoscopio::regions::{region_average, region_max, region_normalized_sum, region_sum};
use podoscopio::types::{PressureSample, NUM_POINTS};

struct ReplayOptions {
    dump_points: bool,
    dump_regions: bool,
}

fn parse_args() -> Result<(PathBuf, ReplayOptions)> {
    let mut dump_points = false;
    let mut dump_regions = false;
    let mut csv_path: Option<PathBuf> = None;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--dump-points" => dump_points = true,
            "--dump-regions" => dump_regions = true,
            _ => {
                if csv_path.is_some() {
                    bail!("Uso: replay_csv [--dump-points] [--dump-regions] <captura.csv>");
                }
                csv_path = Some(PathBuf::from(arg));
            }
        }
    }

    let csv_path = csv_path.ok_or_else(|| anyhow!("Debes especificar un archivo CSV"))?;
    Ok((
        csv_path,
        ReplayOptions {
            dump_points,
            dump_regions,
        },
    ))
}

fn print_region_table(sample: &PressureSample, groups: &[(&str, PointRange)]) {
    for (name, range) in groups {
        println!(
            "  {:<15} suma={:>6} media={:>5} máx={:>5} carga={:>5.1}%",
            name,
            region_sum(&sample.points, *range),
            region_average(&sample.points, *range),
            region_max(&sample.points, *range),
            region_normalized_sum(&sample.points, *range) * 100.0
        );
    }
}

fn main() -> Result<()> {
    let (csv_path, opts) = parse_args()?;
    println!("🎞️  Reproduciendo captura desde {:?}", csv_path);

    let samples = load_samples_from_csv(&csv_path)?;
    println!("ℹ️  {} muestras cargadas\n", samples.len());

    for (idx, sample) in samples.iter().enumerate() {
        let cop = center_of_pressure(sample);
        println!("{:>4}: [{:?}] {}", idx, sample.side, cop.format_full());

        if opts.dump_points {
            for position in 1..=NUM_POINTS {
                println!("      p{:02} = {:>5}", position, sample.point_value(position));
            }
        }
    }

    let last = samples
        .last()
        .ok_or_else(|| anyhow!("La captura está vacía"))?;

    println!("\n📊 Regiones anatómicas (última muestra):");
    print_region_table(last, &NAMED_REGIONS);

    if opts.dump_regions {
        println!("\n📊 Tercios y paridad (última muestra):");
        print_region_table(
            last,
            &[
                ("tercio-frontal", FRONT_THIRD),
                ("tercio-medio", MIDDLE_THIRD),
                ("tercio-talón", HEEL_THIRD),
                ("pares", EVEN_POINTS),
                ("impares", ODD_POINTS),
            ],
        );
    }

    Ok(())
}
