use tinyvec::ArrayVec;

pub mod fix;
pub mod parser;

pub use fix::TimeFix;
pub use parser::{NmeaParser, ParserStats};

/// Default capacity of the per-field scratch buffer. No standard RMC or GGA
/// field comes close to it; longer fields are truncated.
pub const SCRATCH_CAPACITY: usize = 64;

#[derive(Default, Debug, Clone)]
pub struct NmeaBuf<const N: usize>(pub ArrayVec<[u8; N]>);

#[cfg(feature = "defmt")]
impl<const N: usize> defmt::Format for NmeaBuf<N> {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.0.as_slice())
    }
}

impl<const N: usize> core::ops::Deref for NmeaBuf<N> {
    type Target = ArrayVec<[u8; N]>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> core::ops::DerefMut for NmeaBuf<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// XOR of every byte between `$` and `*`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct NmeaChecksum(pub u8);
impl NmeaChecksum {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn next(self, byte: u8) -> Self {
        Self(self.0 ^ byte)
    }
}

impl PartialEq<u8> for NmeaChecksum {
    fn eq(&self, other: &u8) -> bool {
        self.0 == *other
    }
}

#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NmeaError {
    #[error("checksum mismatch: computed {expect:#04x}, received {saw:#04x}")]
    BadChecksum { expect: u8, saw: u8 },
    #[error("non-hex byte {0:#04x} in checksum")]
    BadChecksumDigit(u8),
    #[error("checksum has {0} hex digits, expected 2")]
    ChecksumLength(u8),
    #[error("sentence abandoned by a new `$`")]
    Interrupted,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SentenceKind {
    Other,
    Rmc,
    Gga,
}

impl SentenceKind {
    /// Resolves the address field (talker + sentence id, e.g. `GPRMC`).
    ///
    /// GPS, GLONASS, Galileo and multi-GNSS talkers are treated alike.
    pub fn resolve(address: &[u8], config: ParserConfig) -> Self {
        match address {
            [b'G', b'A' | b'L' | b'N' | b'P', b'R', b'M', b'C'] => SentenceKind::Rmc,
            [b'G', b'A' | b'L' | b'N' | b'P', b'G', b'G', b'A'] if config.gga => {
                SentenceKind::Gga
            }
            _ => SentenceKind::Other,
        }
    }
}

/// A sentence that terminated with a verified checksum.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sentence {
    Rmc(TimeFix),
    Gga { satellites: u8 },
    Other,
}

/// Which sentence kinds are decoded. Anything disabled is parsed and
/// checksummed but never touches the output fields.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParserConfig {
    pub gga: bool,
}

impl ParserConfig {
    pub const fn rmc_only() -> Self {
        Self { gga: false }
    }

    pub const fn all() -> Self {
        Self { gga: true }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            gga: cfg!(feature = "gga"),
        }
    }
}

/// Decodes ASCII decimal digits. No validation is done: anything outside
/// `0..=9` produces wrapped garbage, never a panic.
pub fn decimal(digits: &[u8]) -> u8 {
    digits
        .iter()
        .fold(0u8, |acc, d| acc.wrapping_mul(10).wrapping_add(d.wrapping_sub(b'0')))
}

pub fn hex_nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}
