#![allow(dead_code)]

/// Frames `body` as `$body*HH\r\n` with a correct checksum.
pub fn sentence(body: &str) -> Vec<u8> {
    format!("${}*{:02X}\r\n", body, checksum(body)).into_bytes()
}

/// Same as [`sentence`], but with the checksum deliberately wrong.
pub fn corrupted(body: &str) -> Vec<u8> {
    format!("${}*{:02X}\r\n", body, checksum(body) ^ 0x01).into_bytes()
}

pub fn checksum(body: &str) -> u8 {
    body.bytes().fold(0, |acc, b| acc ^ b)
}

pub const RMC: &[u8] =
    b"$GPRMC,123519.00,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*44\r\n";
pub const GGA: &[u8] =
    b"$GPGGA,092750.000,5321.6802,N,00630.3372,W,1,09,1.03,61.7,M,55.2,M,,*47\r\n";
pub const VTG: &[u8] = b"$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K*48\r\n";
