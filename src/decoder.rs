use crate::types::{
    FootSide, PressureSample, RawFrame, CHECKSUM_OFFSET, FRAME_HEADER, FRAME_LEN, NUM_POINTS,
};

/// Suma mod 256 de los bytes 0..38 de la trama. Pura y determinista.
pub fn frame_checksum(frame: &RawFrame) -> u8 {
    frame[..CHECKSUM_OFFSET]
        .iter()
        .fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Compara el checksum calculado con el byte final de la trama
pub fn checksum_ok(frame: &RawFrame) -> bool {
    frame_checksum(frame) == frame[CHECKSUM_OFFSET]
}

/// Decodifica una trama que ya pasó el checksum. Nunca falla: una etiqueta
/// de lado desconocida degrada a `FootSide::Unknown`, no a error.
pub fn decode_frame(frame: &RawFrame) -> PressureSample {
    let side = FootSide::from_tag(frame[1]);

    let mut points = [0u16; NUM_POINTS];
    for (i, point) in points.iter_mut().enumerate() {
        // Big-endian: byte alto primero, igual que el firmware
        *point = u16::from_be_bytes([frame[2 + 2 * i], frame[3 + 2 * i]]);
    }

    PressureSample::new(side, points)
}

/// Construye una trama de 39 bytes con checksum correcto a partir de lado
/// y valores (pruebas de ida y vuelta, generación sintética).
pub fn encode_frame(side: FootSide, points: &[u16; NUM_POINTS]) -> RawFrame {
    let mut frame = [0u8; FRAME_LEN];
    frame[0] = FRAME_HEADER;
    frame[1] = side.tag();

    for (i, &point) in points.iter().enumerate() {
        let be = point.to_be_bytes();
        frame[2 + 2 * i] = be[0];
        frame[3 + 2 * i] = be[1];
    }

    frame[CHECKSUM_OFFSET] = frame_checksum(&frame);
    frame
}

/// Estados del sincronizador de tramas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Buscando la cabecera 0xAA
    Idle,
    /// Acumulando los 39 bytes de la trama candidata
    Collecting,
}

/// Sincronizador de tramas sobre un stream de bytes poco fiable.
///
/// Mantiene estado entre llamadas a `feed`: una trama puede llegar repartida
/// entre varias notificaciones. Solo retiene una trama candidata a la vez;
/// un 0xAA espurio en medio del payload desincroniza el parser hasta la
/// siguiente cabecera genuina (comportamiento aceptado del protocolo).
///
/// Al completar cada trama emite exactamente un evento terminal: trama
/// válida decodificada o error de checksum.
pub struct FrameScanner {
    state: ScanState,
    buf: RawFrame,
    fill: usize,
    on_frame: Vec<Box<dyn FnMut(&PressureSample) + Send>>,
    on_checksum_error: Vec<Box<dyn FnMut() + Send>>,
}

impl FrameScanner {
    pub fn new() -> Self {
        Self {
            state: ScanState::Idle,
            buf: [0u8; FRAME_LEN],
            fill: 0,
            on_frame: Vec::new(),
            on_checksum_error: Vec::new(),
        }
    }

    /// Suscribe un callback para cada trama válida decodificada.
    /// Se invoca de forma síncrona al cierre de la trama; no debe bloquear.
    pub fn on_frame_valid<F>(&mut self, callback: F)
    where
        F: FnMut(&PressureSample) + Send + 'static,
    {
        self.on_frame.push(Box::new(callback));
    }

    /// Suscribe un callback para cada trama con checksum inválido
    pub fn on_checksum_error<F>(&mut self, callback: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.on_checksum_error.push(Box::new(callback));
    }

    /// Procesa un trozo de bytes de longitud arbitraria (posiblemente vacío)
    pub fn feed(&mut self, chunk: &[u8]) {
        for &byte in chunk {
            self.push_byte(byte);
        }
    }

    fn push_byte(&mut self, byte: u8) {
        match self.state {
            ScanState::Idle => {
                if byte == FRAME_HEADER {
                    self.buf[0] = byte;
                    self.fill = 1;
                    self.state = ScanState::Collecting;
                }
            }
            ScanState::Collecting => {
                // Una ristra de centinelas re-ancla al último 0xAA: con solo
                // la cabecera acumulada, otro 0xAA reinicia el intento y
                // descarta el parcial anterior. Una trama cuyo byte de lado
                // sea literalmente 0xAA se re-ancla en vez de decodificarse
                // como Unknown; fragilidad inherente al protocolo.
                if self.fill == 1 && byte == FRAME_HEADER {
                    return;
                }

                self.buf[self.fill] = byte;
                self.fill += 1;

                if self.fill == FRAME_LEN {
                    self.finish_frame();
                }
            }
        }
    }

    fn finish_frame(&mut self) {
        // La candidata se consume entera, valga o no: el siguiente 0xAA del
        // stream abre un intento nuevo.
        self.state = ScanState::Idle;
        self.fill = 0;

        if checksum_ok(&self.buf) {
            let sample = decode_frame(&self.buf);
            for callback in &mut self.on_frame {
                callback(&sample);
            }
        } else {
            for callback in &mut self.on_checksum_error {
                callback();
            }
        }
    }
}

impl Default for FrameScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TAG_LEFT;
    use std::sync::{Arc, Mutex};

    fn test_points() -> [u16; NUM_POINTS] {
        let mut points = [0u16; NUM_POINTS];
        for (i, point) in points.iter_mut().enumerate() {
            *point = (i as u16 + 1) * 100;
        }
        // Valor con byte alto 0xAA: un centinela dentro del payload no debe
        // romper una trama bien alineada
        points[7] = 0xAA0F;
        points
    }

    fn wired_scanner() -> (FrameScanner, Arc<Mutex<Vec<PressureSample>>>, Arc<Mutex<u32>>) {
        let mut scanner = FrameScanner::new();
        let valid = Arc::new(Mutex::new(Vec::new()));
        let errors = Arc::new(Mutex::new(0u32));

        let valid_clone = Arc::clone(&valid);
        scanner.on_frame_valid(move |sample| valid_clone.lock().unwrap().push(*sample));

        let errors_clone = Arc::clone(&errors);
        scanner.on_checksum_error(move || *errors_clone.lock().unwrap() += 1);

        (scanner, valid, errors)
    }

    #[test]
    fn valid_frame_emits_single_sample() {
        let (mut scanner, valid, errors) = wired_scanner();
        let frame = encode_frame(FootSide::Left, &test_points());

        scanner.feed(&frame);

        let valid = valid.lock().unwrap();
        assert_eq!(valid.len(), 1);
        assert_eq!(*errors.lock().unwrap(), 0);
        assert_eq!(valid[0].side, FootSide::Left);
        assert_eq!(valid[0].points, test_points());
    }

    #[test]
    fn frame_split_across_feeds_survives() {
        let (mut scanner, valid, errors) = wired_scanner();
        let frame = encode_frame(FootSide::Right, &test_points());

        scanner.feed(&frame[..10]);
        assert!(valid.lock().unwrap().is_empty());
        scanner.feed(&frame[10..]);

        let valid = valid.lock().unwrap();
        assert_eq!(valid.len(), 1);
        assert_eq!(*errors.lock().unwrap(), 0);
        assert_eq!(valid[0].side, FootSide::Right);
    }

    #[test]
    fn empty_chunk_is_a_noop() {
        let (mut scanner, valid, errors) = wired_scanner();

        scanner.feed(&[]);
        let frame = encode_frame(FootSide::Left, &test_points());
        scanner.feed(&frame);

        assert_eq!(valid.lock().unwrap().len(), 1);
        assert_eq!(*errors.lock().unwrap(), 0);
    }

    #[test]
    fn corrupted_byte_reports_checksum_error() {
        let (mut scanner, valid, errors) = wired_scanner();
        let mut frame = encode_frame(FootSide::Left, &test_points());
        frame[5] ^= 0xFF;

        scanner.feed(&frame);

        assert!(valid.lock().unwrap().is_empty());
        assert_eq!(*errors.lock().unwrap(), 1);
    }

    #[test]
    fn retained_sample_survives_checksum_error() {
        let (mut scanner, valid, errors) = wired_scanner();
        let good = encode_frame(FootSide::Left, &test_points());
        let mut bad = good;
        bad[20] ^= 0x5A;

        scanner.feed(&good);
        scanner.feed(&bad);

        let valid = valid.lock().unwrap();
        assert_eq!(valid.len(), 1);
        assert_eq!(*errors.lock().unwrap(), 1);
        assert_eq!(valid[0].points, test_points());
    }

    #[test]
    fn unknown_tag_still_publishes_sample() {
        let (mut scanner, valid, errors) = wired_scanner();
        let mut frame = encode_frame(FootSide::Left, &test_points());
        frame[1] = 0x7F;
        frame[CHECKSUM_OFFSET] = frame_checksum(&frame);

        scanner.feed(&frame);

        let valid = valid.lock().unwrap();
        assert_eq!(valid.len(), 1);
        assert_eq!(*errors.lock().unwrap(), 0);
        assert_eq!(valid[0].side, FootSide::Unknown);
        assert_eq!(valid[0].points, test_points());
    }

    #[test]
    fn garbage_before_header_is_ignored() {
        let (mut scanner, valid, errors) = wired_scanner();
        let frame = encode_frame(FootSide::Left, &test_points());

        let mut stream = vec![0x00, 0x13, 0x37, 0x42];
        stream.extend_from_slice(&frame);
        scanner.feed(&stream);

        assert_eq!(valid.lock().unwrap().len(), 1);
        assert_eq!(*errors.lock().unwrap(), 0);
    }

    #[test]
    fn double_header_resyncs_to_second() {
        let (mut scanner, valid, errors) = wired_scanner();
        let frame = encode_frame(FootSide::Left, &test_points());

        // Centinela extra delante de la trama real: el intento parcial se
        // descarta y la trama se ancla en la segunda cabecera
        let mut stream = vec![FRAME_HEADER];
        stream.extend_from_slice(&frame);
        scanner.feed(&stream);

        let valid = valid.lock().unwrap();
        assert_eq!(valid.len(), 1);
        assert_eq!(*errors.lock().unwrap(), 0);
        assert_eq!(valid[0].side, FootSide::Left);
        assert_eq!(valid[0].points, test_points());
    }

    #[test]
    fn back_to_back_frames_decode_independently() {
        let (mut scanner, valid, errors) = wired_scanner();
        let first = encode_frame(FootSide::Left, &test_points());
        let second = encode_frame(FootSide::Right, &[7u16; NUM_POINTS]);

        let mut stream = Vec::new();
        stream.extend_from_slice(&first);
        stream.extend_from_slice(&second);
        scanner.feed(&stream);

        let valid = valid.lock().unwrap();
        assert_eq!(valid.len(), 2);
        assert_eq!(*errors.lock().unwrap(), 0);
        assert_eq!(valid[0].side, FootSide::Left);
        assert_eq!(valid[1].side, FootSide::Right);
        assert_eq!(valid[1].points, [7u16; NUM_POINTS]);
    }

    #[test]
    fn checksum_roundtrip_matches_reencoding() {
        let frame = encode_frame(FootSide::Left, &test_points());
        assert!(checksum_ok(&frame));

        let sample = decode_frame(&frame);
        let reencoded = encode_frame(sample.side, &sample.points);
        assert_eq!(reencoded, frame);
        assert_eq!(reencoded[CHECKSUM_OFFSET], frame[CHECKSUM_OFFSET]);
    }

    #[test]
    fn checksum_of_known_frame() {
        // Trama en ceros salvo cabecera y etiqueta: suma = 0xAA + 0x01
        let frame = encode_frame(FootSide::Left, &[0u16; NUM_POINTS]);
        assert_eq!(frame[CHECKSUM_OFFSET], FRAME_HEADER.wrapping_add(TAG_LEFT));
    }
}
