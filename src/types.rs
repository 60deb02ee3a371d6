use std::time::Instant;

/// Número de puntos de presión de la plantilla (fijo por hardware)
pub const NUM_POINTS: usize = 18;

/// Longitud fija de una trama: cabecera + lado + 18 × u16 + checksum
pub const FRAME_LEN: usize = 39;

/// Byte centinela que abre cada trama
pub const FRAME_HEADER: u8 = 0xAA;

/// Etiqueta de lado en el byte 1 de la trama
pub const TAG_LEFT: u8 = 0x01;
pub const TAG_RIGHT: u8 = 0x02;

/// Offset del byte de checksum (suma mod 256 de los bytes 0..38)
pub const CHECKSUM_OFFSET: usize = FRAME_LEN - 1;

/// Trama cruda de 39 bytes tal y como llega del stream
pub type RawFrame = [u8; FRAME_LEN];

/// Lado del pie que originó la trama
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FootSide {
    Left,
    Right,
    Unknown,
}

impl FootSide {
    /// Interpreta el byte de etiqueta; fuera de {0x01, 0x02} degrada a `Unknown`
    pub fn from_tag(tag: u8) -> Self {
        match tag {
            TAG_LEFT => FootSide::Left,
            TAG_RIGHT => FootSide::Right,
            _ => FootSide::Unknown,
        }
    }

    pub fn tag(self) -> u8 {
        match self {
            FootSide::Left => TAG_LEFT,
            FootSide::Right => TAG_RIGHT,
            FootSide::Unknown => 0x00,
        }
    }
}

/// Una lectura completa y validada de los 18 puntos de presión
#[derive(Debug, Clone, Copy)]
pub struct PressureSample {
    pub side: FootSide,
    /// Magnitudes crudas tipo ADC; índice 0..17 = posiciones 1..18
    pub points: [u16; NUM_POINTS],
    /// Instante monotónico de decodificación
    pub captured_at: Instant,
}

impl PressureSample {
    pub fn new(side: FootSide, points: [u16; NUM_POINTS]) -> Self {
        Self {
            side,
            points,
            captured_at: Instant::now(),
        }
    }

    /// Valor del punto en posición 1..18; fuera de rango devuelve 0
    pub fn point_value(&self, position: usize) -> u16 {
        if (1..=NUM_POINTS).contains(&position) {
            self.points[position - 1]
        } else {
            0
        }
    }

    /// Suma total de los 18 puntos
    pub fn total(&self) -> u32 {
        self.points.iter().map(|&p| u32::from(p)).sum()
    }

    /// Máximo de los 18 puntos
    pub fn max_point(&self) -> u16 {
        self.points.iter().copied().max().unwrap_or(0)
    }
}
