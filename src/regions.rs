use crate::foot_model::PointRange;
use crate::types::NUM_POINTS;

/// Reductores puros sobre la muestra actual; no retienen estado entre
/// llamadas. El descriptor selecciona índices 0..17 (fin inclusivo).

/// Suma de los valores seleccionados
pub fn region_sum(points: &[u16; NUM_POINTS], range: PointRange) -> u32 {
    range.indices().map(|i| u32::from(points[i])).sum()
}

/// Media redondeada a entero (0 si el grupo fuera vacío, cosa que no
/// ocurre con los grupos predefinidos)
pub fn region_average(points: &[u16; NUM_POINTS], range: PointRange) -> u16 {
    let count = range.count() as u32;
    if count == 0 {
        return 0;
    }
    ((region_sum(points, range) + count / 2) / count) as u16
}

/// Máximo de los valores seleccionados (0 si todos son cero)
pub fn region_max(points: &[u16; NUM_POINTS], range: PointRange) -> u16 {
    range.indices().map(|i| points[i]).max().unwrap_or(0)
}

/// Suma normalizada: sum / (máximo global × n puntos del grupo).
/// 0 si el máximo global de la muestra es 0.
pub fn region_normalized_sum(points: &[u16; NUM_POINTS], range: PointRange) -> f32 {
    let overall_max = points.iter().copied().max().unwrap_or(0);
    if overall_max == 0 {
        return 0.0;
    }
    region_sum(points, range) as f32 / (f32::from(overall_max) * range.count() as f32)
}
