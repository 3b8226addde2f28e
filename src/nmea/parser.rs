use super::{
    decimal, hex_nibble, NmeaBuf, NmeaChecksum, NmeaError, ParserConfig, Sentence, SentenceKind,
    TimeFix, SCRATCH_CAPACITY,
};

// States are named for the portion of the sentence currently being read
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ParserState {
    Wait,
    Id,
    Data,
    Checksum,
}
use ParserState::*;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParserStats {
    /// Sentences of any kind that passed their checksum
    pub sentences: u32,
    pub checksum_errors: u32,
    /// Sentences abandoned because a new `$` arrived first
    pub interrupted: u32,
    /// Fields that were truncated to fit the scratch buffer
    pub overflows: u32,
}

/// Byte-at-a-time NMEA 0183 parser for RMC time/date and GGA satellite count.
///
/// Feed it every byte received from the GPS, in order. After each byte the
/// ready flags and their field groups can be read. A flag means "a verified
/// sentence of this kind completed since the last `$`"; it is cleared by the
/// next sentence start of any kind. Field values survive until another
/// verified sentence of the same kind replaces them.
///
/// `N` is the scratch buffer capacity. Bytes beyond it in a single field are
/// dropped, while delimiters and the checksum are still tracked.
pub struct NmeaParser<const N: usize = SCRATCH_CAPACITY> {
    config: ParserConfig,

    state: ParserState,
    kind: SentenceKind,
    checksum: NmeaChecksum,
    received: u8,
    digits: u8,
    bad_digit: Option<u8>,
    field: u8,
    buf: NmeaBuf<N>,
    overflowed: bool,

    // Decoded from the sentence in progress, committed once its checksum verifies
    pending_time: TimeFix,
    pending_satellites: u8,

    time: TimeFix,
    time_ready: bool,
    satellites: u8,
    satellites_ready: bool,

    stats: ParserStats,
}

impl<const N: usize> Default for NmeaParser<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> NmeaParser<N> {
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            state: Wait,
            kind: SentenceKind::Other,
            checksum: NmeaChecksum::new(),
            received: 0,
            digits: 0,
            bad_digit: None,
            field: 0,
            buf: NmeaBuf::default(),
            overflowed: false,
            pending_time: TimeFix::default(),
            pending_satellites: 0,
            time: TimeFix::default(),
            time_ready: false,
            satellites: 0,
            satellites_ready: false,
            stats: ParserStats::default(),
        }
    }

    pub fn config(&self) -> ParserConfig {
        self.config
    }

    pub fn stats(&self) -> ParserStats {
        self.stats
    }

    /// Last verified RMC time and date.
    pub fn time(&self) -> TimeFix {
        self.time
    }

    pub fn time_ready(&self) -> bool {
        self.time_ready
    }

    /// Last verified GGA satellite count.
    pub fn satellites(&self) -> u8 {
        self.satellites
    }

    pub fn satellites_ready(&self) -> bool {
        self.satellites_ready
    }

    /// Consumes one byte of the stream.
    pub fn feed(&mut self, b: u8) {
        let _ = self.process_byte(b);
    }

    pub fn feed_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.feed(b);
        }
    }

    /// Same as [`feed`](Self::feed), but reports how a sentence ended.
    ///
    /// Returns `None` until a sentence terminates or is interrupted.
    pub fn process_byte(&mut self, b: u8) -> Option<Result<Sentence, NmeaError>> {
        if b == b'$' {
            let interrupted = self.state != Wait;
            self.reset();
            self.state = Id;
            trace!("nmea sentence start");
            if interrupted {
                self.stats.interrupted = self.stats.interrupted.wrapping_add(1);
                return Some(Err(NmeaError::Interrupted));
            }
            return None;
        }

        match self.state {
            Wait => None,
            Id | Data if b == b'*' => {
                if self.state == Data {
                    self.end_field();
                }
                self.clear_buf();
                self.state = Checksum;
                None
            }
            Checksum => self.checksum_byte(b),
            Id => {
                self.checksum = self.checksum.next(b);
                if b == b',' {
                    self.kind = SentenceKind::resolve(&self.buf, self.config);
                    self.clear_buf();
                    self.state = Data;
                } else {
                    self.push(b);
                }
                None
            }
            Data => {
                self.checksum = self.checksum.next(b);
                if b == b',' {
                    self.end_field();
                } else {
                    self.push(b);
                }
                None
            }
        }
    }

    fn reset(&mut self) {
        self.clear_buf();
        self.state = Wait;
        self.kind = SentenceKind::Other;
        self.checksum = NmeaChecksum::new();
        self.received = 0;
        self.digits = 0;
        self.bad_digit = None;
        self.field = 0;

        self.pending_time = self.time;
        self.pending_satellites = self.satellites;
        self.time_ready = false;
        self.satellites_ready = false;
    }

    fn clear_buf(&mut self) {
        self.buf.clear();
        self.overflowed = false;
    }

    fn push(&mut self, b: u8) {
        if self.buf.try_push(b).is_some() && !self.overflowed {
            self.overflowed = true;
            self.stats.overflows = self.stats.overflows.wrapping_add(1);
            warn!("nmea field {} longer than {} bytes, truncating", self.field, N);
        }
    }

    fn end_field(&mut self) {
        // Empty fields leave the previous value in place
        if !self.buf.is_empty() {
            match (self.kind, self.field) {
                (SentenceKind::Rmc, 0) => self.pending_time.decode_time(&self.buf),
                (SentenceKind::Rmc, 1) => self.pending_time.valid = self.buf[0],
                (SentenceKind::Rmc, 8) => self.pending_time.decode_date(&self.buf),
                (SentenceKind::Gga, 6) => {
                    let len = self.buf.len().min(2);
                    self.pending_satellites = decimal(&self.buf[..len]);
                }
                _ => {}
            }
        }
        self.field = self.field.saturating_add(1);
        self.clear_buf();
    }

    fn checksum_byte(&mut self, b: u8) -> Option<Result<Sentence, NmeaError>> {
        if b == b'\r' || b == b'\n' {
            let result = self.finish();
            self.received = 0;
            self.digits = 0;
            self.bad_digit = None;
            self.state = Wait;
            return Some(result);
        }

        match hex_nibble(b) {
            Some(nibble) => {
                self.received = (self.received << 4) | nibble;
                self.digits = self.digits.saturating_add(1);
            }
            None => {
                self.bad_digit.get_or_insert(b);
            }
        }
        None
    }

    fn finish(&mut self) -> Result<Sentence, NmeaError> {
        if let Some(digit) = self.bad_digit {
            self.stats.checksum_errors = self.stats.checksum_errors.wrapping_add(1);
            warn!("nmea checksum has non-hex byte {}", digit);
            return Err(NmeaError::BadChecksumDigit(digit));
        }
        if self.digits != 2 {
            self.stats.checksum_errors = self.stats.checksum_errors.wrapping_add(1);
            warn!("nmea checksum has {} hex digits", self.digits);
            return Err(NmeaError::ChecksumLength(self.digits));
        }
        if self.checksum != self.received {
            self.stats.checksum_errors = self.stats.checksum_errors.wrapping_add(1);
            warn!(
                "nmea checksum mismatch: computed {}, received {}",
                self.checksum.0,
                self.received
            );
            return Err(NmeaError::BadChecksum {
                expect: self.checksum.0,
                saw: self.received,
            });
        }

        self.stats.sentences = self.stats.sentences.wrapping_add(1);
        debug!("nmea sentence verified, {} fields", self.field);
        match self.kind {
            SentenceKind::Rmc => {
                self.time = self.pending_time;
                self.time_ready = true;
                Ok(Sentence::Rmc(self.time))
            }
            SentenceKind::Gga => {
                self.satellites = self.pending_satellites;
                self.satellites_ready = true;
                Ok(Sentence::Gga {
                    satellites: self.satellites,
                })
            }
            SentenceKind::Other => Ok(Sentence::Other),
        }
    }
}
