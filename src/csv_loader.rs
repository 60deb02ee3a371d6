use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{anyhow, bail, ensure, Context, Result};
use csv::ReaderBuilder;

use crate::types::{FootSide, PressureSample, NUM_POINTS};

/// Carga una captura de muestras desde un CSV en el formato
/// sample,side,p1,...,p18 ordenado por sample
/// (side = etiqueta del protocolo: 1 = izquierdo, 2 = derecho).
pub fn load_samples_from_csv(path: impl AsRef<Path>) -> Result<Vec<PressureSample>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("No se pudo abrir el CSV {:?}", path))?;

    let mut rows: BTreeMap<usize, PressureSample> = BTreeMap::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record =
            result.with_context(|| format!("Fila {} inválida en {:?}", row_idx + 1, path))?;
        if record.len() < 2 + NUM_POINTS {
            bail!("La fila {} no tiene {} columnas", row_idx + 1, 2 + NUM_POINTS);
        }

        let sample: usize = record[0]
            .parse()
            .with_context(|| format!("sample inválido en fila {}", row_idx + 1))?;
        let tag: u8 = record[1]
            .parse()
            .with_context(|| format!("side inválido en fila {}", row_idx + 1))?;

        let mut points = [0u16; NUM_POINTS];
        for (i, point) in points.iter_mut().enumerate() {
            *point = record[2 + i]
                .parse()
                .with_context(|| format!("p{} inválido en fila {}", i + 1, row_idx + 1))?;
        }

        rows.insert(sample, PressureSample::new(FootSide::from_tag(tag), points));
    }

    if rows.is_empty() {
        return Err(anyhow!("El CSV {:?} no contiene datos", path));
    }

    let (&min_sample, _) = rows.iter().next().unwrap();
    ensure!(
        min_sample == 0,
        "El CSV debe iniciar en sample=0 (encontrado sample={})",
        min_sample
    );
    let max_sample = *rows.keys().max().unwrap();

    let mut samples = Vec::with_capacity(max_sample + 1);
    let mut last = *rows.get(&0).unwrap();
    for sample_idx in 0..=max_sample {
        if let Some(sample) = rows.get(&sample_idx) {
            last = *sample;
        }
        // Rellenar huecos repitiendo la última muestra válida
        samples.push(last);
    }

    Ok(samples)
}
