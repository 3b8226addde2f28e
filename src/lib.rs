#![cfg_attr(not(test), no_std)]

use core::fmt::{self, Write};
use tinyvec::ArrayVec; // memory layout

#[macro_use]
mod macros;

pub mod gps;
pub mod nmea;

pub use gps::Gps;
pub use nmea::{
    NmeaError, NmeaParser, ParserConfig, ParserStats, Sentence, SentenceKind, TimeFix,
    SCRATCH_CAPACITY,
};

/// Fixed-capacity text sink. Output past the capacity is dropped.
pub struct FmtBuf<const N: usize = 256>(pub ArrayVec<[u8; N]>);

impl<const N: usize> Write for FmtBuf<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for b in s.bytes() {
            let _ = self.0.try_push(b);
        }
        Ok(())
    }
}

impl<const N: usize> FmtBuf<N> {
    /// `None` if truncation split a multi-byte character.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(self.0.as_slice()).ok()
    }

    pub fn new() -> Self {
        Self(Default::default())
    }
}

impl<const N: usize> Default for FmtBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}
