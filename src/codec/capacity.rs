//! Carrier capacity calculation.

use serde::Serialize;

use super::frame::HEADER_LEN;

/// LSB slots per pixel: one each in R, G and B.
pub const BITS_PER_PIXEL: u64 = 3;

/// How much a carrier image of a given size can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capacity {
    pub width: u32,
    pub height: u32,
    /// Total LSB slots (`3 * width * height`).
    pub available_bits: u64,
    /// Largest message, in bytes, that still fits after the frame header.
    pub max_message_bytes: u64,
}

impl Capacity {
    pub fn of(width: u32, height: u32) -> Self {
        let available_bits = width as u64 * height as u64 * BITS_PER_PIXEL;
        Self {
            width,
            height,
            available_bits,
            max_message_bytes: (available_bits / 8).saturating_sub(HEADER_LEN as u64),
        }
    }

    /// Whether a message of `message_len` bytes fits.
    pub fn fits(&self, message_len: usize) -> bool {
        (message_len as u64) <= self.max_message_bytes
    }
}
