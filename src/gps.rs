use core::fmt::Write;

use crate::nmea::{NmeaError, NmeaParser, Sentence, TimeFix, SCRATCH_CAPACITY};
use crate::FmtBuf;

/// Consumer side of the parser: remembers the latest results so a display or
/// logging task can pick them up whenever it runs.
pub struct Gps<const N: usize = SCRATCH_CAPACITY> {
    pub parser: NmeaParser<N>,

    pub last_sentence: Option<Result<Sentence, NmeaError>>,
    pub last_time: Option<TimeFix>,
    pub last_satellites: Option<u8>,
    pub count: usize,
}

impl<const N: usize> Default for Gps<N> {
    fn default() -> Self {
        Self::new(NmeaParser::new())
    }
}

impl<const N: usize> Gps<N> {
    pub fn new(parser: NmeaParser<N>) -> Self {
        Self {
            parser,
            last_sentence: None,
            last_time: None,
            last_satellites: None,
            count: 0,
        }
    }

    pub fn handle(&mut self, b: u8) {
        self.count = self.count.wrapping_add(1);
        if let Some(r) = self.parser.process_byte(b) {
            match r {
                Ok(Sentence::Rmc(fix)) => self.last_time = Some(fix),
                Ok(Sentence::Gga { satellites }) => self.last_satellites = Some(satellites),
                Ok(Sentence::Other) => {}
                Err(e) => debug!("dropped nmea sentence: {}", e),
            }
            self.last_sentence = Some(r);
        }
    }

    pub fn handle_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.handle(b);
        }
    }

    /// One line summary, e.g. `12:35:19 23/03/94 A 9sv`.
    pub fn status_line(&self) -> FmtBuf<32> {
        let mut txt = FmtBuf::new();
        let _ = match self.last_time {
            Some(t) => write!(
                txt,
                "{:02}:{:02}:{:02} {:02}/{:02}/{:02} {}",
                t.hour,
                t.minute,
                t.second,
                t.day,
                t.month,
                t.year,
                if t.is_valid() { 'A' } else { 'V' }
            ),
            None => write!(txt, "--:--:-- --/--/-- -"),
        };
        let _ = match self.last_satellites {
            Some(n) => write!(txt, " {}sv", n),
            None => write!(txt, " -sv"),
        };
        txt
    }
}
