use core::fmt;

use chrono::{NaiveDate, NaiveDateTime};

use super::decimal;

/// Two-digit years at or above this are taken to be in the 1900s.
pub const CENTURY_PIVOT: u8 = 80;

/// Time and date group carried by RMC sentences.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeFix {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Hundredths of a second
    pub sub_sec: u8,

    pub day: u8,
    pub month: u8,
    /// Two-digit year, as transmitted
    pub year: u8,

    /// Raw status character: `b'A'` for a valid fix, `b'V'` otherwise
    pub valid: u8,
}

impl TimeFix {
    pub fn is_valid(&self) -> bool {
        self.valid == b'A'
    }

    /// Decodes `hhmmss[.ss]`. Fields too short to hold a time are ignored.
    pub fn decode_time(&mut self, field: &[u8]) {
        if field.len() < 6 {
            return;
        }
        self.hour = decimal(&field[0..2]);
        self.minute = decimal(&field[2..4]);
        self.second = decimal(&field[4..6]);
        // Offset 6 is the decimal point
        self.sub_sec = match field.get(7..) {
            Some([d0, d1, ..]) => decimal(&[*d0, *d1]),
            Some([tenths]) => decimal(&[*tenths]).wrapping_mul(10),
            _ => 0,
        };
    }

    /// Decodes `ddmmyy`. Fields too short to hold a date are ignored.
    pub fn decode_date(&mut self, field: &[u8]) {
        if field.len() < 6 {
            return;
        }
        self.day = decimal(&field[0..2]);
        self.month = decimal(&field[2..4]);
        self.year = decimal(&field[4..6]);
    }

    pub fn full_year(&self) -> i32 {
        let century = if self.year >= CENTURY_PIVOT { 1900 } else { 2000 };
        century + i32::from(self.year)
    }

    /// `None` if the fields don't form a real calendar date and time.
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.full_year(), self.month.into(), self.day.into())?
            .and_hms_milli_opt(
                self.hour.into(),
                self.minute.into(),
                self.second.into(),
                u32::from(self.sub_sec) * 10,
            )
    }
}

impl fmt::Display for TimeFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:02} {:02}/{:02}/{:02}",
            self.hour, self.minute, self.second, self.sub_sec, self.day, self.month, self.year
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn time_with_hundredths() {
        let mut fix = TimeFix::default();
        fix.decode_time(b"225446.50");
        assert_eq!((fix.hour, fix.minute, fix.second, fix.sub_sec), (22, 54, 46, 50));
    }

    #[test]
    fn time_without_fraction() {
        let mut fix = TimeFix {
            sub_sec: 99,
            ..Default::default()
        };
        fix.decode_time(b"123519");
        assert_eq!((fix.hour, fix.minute, fix.second, fix.sub_sec), (12, 35, 19, 0));
    }

    #[test]
    fn time_with_tenths_only() {
        let mut fix = TimeFix::default();
        fix.decode_time(b"123519.5");
        assert_eq!(fix.sub_sec, 50);
    }

    #[test]
    fn time_with_millis_keeps_hundredths() {
        let mut fix = TimeFix::default();
        fix.decode_time(b"092750.123");
        assert_eq!(fix.sub_sec, 12);
    }

    #[test]
    fn short_fields_are_ignored() {
        let mut fix = TimeFix {
            hour: 1,
            day: 2,
            ..Default::default()
        };
        fix.decode_time(b"1235");
        fix.decode_date(b"2303");
        assert_eq!(fix.hour, 1);
        assert_eq!(fix.day, 2);
    }

    #[test]
    fn date() {
        let mut fix = TimeFix::default();
        fix.decode_date(b"230394");
        assert_eq!((fix.day, fix.month, fix.year), (23, 3, 94));
    }

    #[test]
    fn century_pivot() {
        let mut fix = TimeFix::default();
        fix.year = 94;
        assert_eq!(fix.full_year(), 1994);
        fix.year = 24;
        assert_eq!(fix.full_year(), 2024);
        fix.year = 80;
        assert_eq!(fix.full_year(), 1980);
    }

    #[test]
    fn converts_to_chrono() {
        let fix = TimeFix {
            hour: 12,
            minute: 35,
            second: 19,
            sub_sec: 25,
            day: 23,
            month: 3,
            year: 94,
            valid: b'A',
        };
        let dt = fix.to_datetime().unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (1994, 3, 23));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (12, 35, 19));
        assert_eq!(dt.nanosecond(), 250_000_000);
    }

    #[test]
    fn impossible_dates_dont_convert() {
        // Nothing received yet
        assert_eq!(TimeFix::default().to_datetime(), None);

        let fix = TimeFix {
            day: 31,
            month: 2,
            year: 24,
            ..Default::default()
        };
        assert_eq!(fix.to_datetime(), None);
    }

    #[test]
    fn display() {
        let fix = TimeFix {
            hour: 1,
            minute: 2,
            second: 3,
            sub_sec: 4,
            day: 31,
            month: 12,
            year: 24,
            valid: b'V',
        };
        assert_eq!(format!("{}", fix), "01:02:03.04 31/12/24");
        assert!(!fix.is_valid());
    }
}
