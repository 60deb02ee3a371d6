use crate::foot_model::coordinates_for;
use crate::types::{PressureSample, NUM_POINTS};

/// Medio rango de la escala de presentación: [0,1] por eje → [-10,10]
const DISPLAY_HALF_RANGE: f32 = 10.0;

/// Centro de presión en coordenadas de presentación [-10,10] por eje,
/// con la presión agregada normalizada en [0,1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterOfPressure {
    pub x: f32,
    pub y: f32,
    /// Carga media fraccional respecto al punto más cargado
    pub pressure: f32,
}

impl CenterOfPressure {
    /// Solo coordenadas
    pub fn xy(self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Presión en escala entera 0–100. El redondeo ocurre aquí, en la
    /// frontera de presentación, nunca antes de agregar.
    pub fn pressure_percent(self) -> u8 {
        (self.pressure * 100.0).round() as u8
    }

    /// Coordenadas con 2 decimales
    pub fn format_xy(self) -> String {
        format!("x={:.2} y={:.2}", self.x, self.y)
    }

    /// Coordenadas con 2 decimales y presión porcentual con 1 decimal
    pub fn format_full(self) -> String {
        format!(
            "x={:.2} y={:.2} presión={:.1}%",
            self.x,
            self.y,
            self.pressure * 100.0
        )
    }
}

/// Centroide de los 18 puntos ponderado por presión, sobre la tabla de
/// coordenadas del lado de la muestra.
///
/// Con presión total cero devuelve el punto central (0, 0) con presión
/// cero; el caso se trata explícitamente para no dividir por cero.
pub fn center_of_pressure(sample: &PressureSample) -> CenterOfPressure {
    let total = sample.total() as f32;
    if total == 0.0 {
        return CenterOfPressure {
            x: 0.0,
            y: 0.0,
            pressure: 0.0,
        };
    }

    let coords = coordinates_for(sample.side);
    let mut weighted_x = 0.0f32;
    let mut weighted_y = 0.0f32;
    for i in 0..NUM_POINTS {
        let p = sample.points[i] as f32;
        weighted_x += p * coords[i].0;
        weighted_y += p * coords[i].1;
    }

    let raw_x = weighted_x / total;
    let raw_y = weighted_y / total;

    let max = sample.max_point() as f32;
    let pressure = total / (max * NUM_POINTS as f32);

    CenterOfPressure {
        x: (raw_x - 0.5) * (2.0 * DISPLAY_HALF_RANGE),
        y: (raw_y - 0.5) * (2.0 * DISPLAY_HALF_RANGE),
        pressure,
    }
}
