use crate::types::{FootSide, NUM_POINTS};

/// Coordenadas normalizadas (x, y) de los 18 puntos para el pie IZQUIERDO,
/// con y = 1 hacia los dedos y x = 1 hacia el borde medial. La tabla del pie
/// derecho es esta misma espejada en x (x' = 1 - x). Inmutable, fijada por
/// la geometría de la plantilla.
pub const LEFT_COORDS: [(f32, f32); NUM_POINTS] = [
    (0.72, 0.95), // 1  dedo gordo
    (0.52, 0.97), // 2  dedos centrales
    (0.33, 0.93), // 3  dedos laterales
    (0.70, 0.78), // 4  metatarso 1
    (0.55, 0.80), // 5  metatarso 2
    (0.42, 0.79), // 6  metatarso 3
    (0.30, 0.76), // 7  metatarso 4
    (0.18, 0.72), // 8  metatarso 5
    (0.45, 0.70), // 9  centro del antepié
    (0.55, 0.55), // 10 mediopié medial
    (0.38, 0.52), // 11 mediopié central
    (0.22, 0.50), // 12 mediopié lateral
    (0.60, 0.40), // 13 arco medial
    (0.45, 0.38), // 14 arco central
    (0.55, 0.20), // 15 talón medial
    (0.32, 0.20), // 16 talón lateral
    (0.44, 0.12), // 17 talón central
    (0.43, 0.04), // 18 talón posterior
];

/// Tabla de coordenadas apropiada para el lado dado.
/// `Left` y `Unknown` usan la tabla base; `Right` la espeja en x.
pub fn coordinates_for(side: FootSide) -> [(f32, f32); NUM_POINTS] {
    match side {
        FootSide::Right => {
            let mut mirrored = LEFT_COORDS;
            for coord in &mut mirrored {
                coord.0 = 1.0 - coord.0;
            }
            mirrored
        }
        FootSide::Left | FootSide::Unknown => LEFT_COORDS,
    }
}

/// Descriptor {inicio, fin, paso} de un grupo de puntos.
/// Índices 0..17, fin inclusivo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointRange {
    pub start: usize,
    pub end: usize,
    pub step: usize,
}

impl PointRange {
    pub const fn new(start: usize, end: usize, step: usize) -> Self {
        Self { start, end, step }
    }

    /// Índices seleccionados por el descriptor, en orden ascendente
    pub fn indices(self) -> impl Iterator<Item = usize> {
        (self.start..=self.end).step_by(self.step)
    }

    /// Cantidad de índices seleccionados
    pub fn count(self) -> usize {
        if self.end < self.start {
            0
        } else {
            (self.end - self.start) / self.step + 1
        }
    }

    pub fn contains(self, index: usize) -> bool {
        index >= self.start && index <= self.end && (index - self.start) % self.step == 0
    }
}

// Regiones anatómicas fijas (cada una con al menos 2 puntos)
pub const TOE_REGION: PointRange = PointRange::new(0, 2, 1);
pub const FOREFOOT_REGION: PointRange = PointRange::new(3, 8, 1);
pub const MIDFOOT_REGION: PointRange = PointRange::new(9, 11, 1);
pub const ARCH_REGION: PointRange = PointRange::new(12, 13, 1);
pub const HEEL_REGION: PointRange = PointRange::new(14, 17, 1);

// Tercios contiguos de la plantilla
pub const FRONT_THIRD: PointRange = PointRange::new(0, 5, 1);
pub const MIDDLE_THIRD: PointRange = PointRange::new(6, 11, 1);
pub const HEEL_THIRD: PointRange = PointRange::new(12, 17, 1);

// Subconjuntos por paridad de índice
pub const EVEN_POINTS: PointRange = PointRange::new(0, 16, 2);
pub const ODD_POINTS: PointRange = PointRange::new(1, 17, 2);

/// Regiones anatómicas con nombre, en orden dedos → talón
pub const NAMED_REGIONS: [(&str, PointRange); 5] = [
    ("dedos", TOE_REGION),
    ("metatarso", FOREFOOT_REGION),
    ("mediopié", MIDFOOT_REGION),
    ("arco", ARCH_REGION),
    ("talón", HEEL_REGION),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_stay_in_unit_square() {
        for &(x, y) in &LEFT_COORDS {
            assert!((0.0..=1.0).contains(&x));
            assert!((0.0..=1.0).contains(&y));
        }
    }

    #[test]
    fn right_table_is_x_mirrored() {
        let right = coordinates_for(FootSide::Right);
        for (i, &(x, y)) in LEFT_COORDS.iter().enumerate() {
            assert!((right[i].0 - (1.0 - x)).abs() < 1e-6);
            assert_eq!(right[i].1, y);
        }
    }

    #[test]
    fn unknown_side_uses_base_table() {
        assert_eq!(coordinates_for(FootSide::Unknown), LEFT_COORDS);
        assert_eq!(coordinates_for(FootSide::Left), LEFT_COORDS);
    }

    #[test]
    fn named_regions_partition_all_points() {
        let mut coverage = [0usize; NUM_POINTS];
        for (_, range) in NAMED_REGIONS {
            assert!(range.count() >= 2);
            for idx in range.indices() {
                coverage[idx] += 1;
            }
        }
        assert!(coverage.iter().all(|&c| c == 1));
    }

    #[test]
    fn thirds_partition_all_points() {
        let mut coverage = [0usize; NUM_POINTS];
        for range in [FRONT_THIRD, MIDDLE_THIRD, HEEL_THIRD] {
            assert_eq!(range.count(), 6);
            for idx in range.indices() {
                coverage[idx] += 1;
            }
        }
        assert!(coverage.iter().all(|&c| c == 1));
    }

    #[test]
    fn parity_subsets_partition_all_points() {
        let mut coverage = [0usize; NUM_POINTS];
        for range in [EVEN_POINTS, ODD_POINTS] {
            assert_eq!(range.count(), 9);
            for idx in range.indices() {
                coverage[idx] += 1;
            }
        }
        assert!(coverage.iter().all(|&c| c == 1));
        assert!(EVEN_POINTS.contains(16));
        assert!(!EVEN_POINTS.contains(15));
        assert!(ODD_POINTS.contains(17));
    }
}
