//! Error types for the steganography codec.
//!
//! Only the encode path can fail. A decode that finds nothing is a normal
//! negative result and is reported as `None`, never as an error.

use thiserror::Error;

/// Errors that can occur while hiding a message in an image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StegoError {
    /// The framed message needs more LSB slots than the image has.
    #[error("image too small to hide message: need {required_bits} bits, have {available_bits}")]
    Capacity {
        required_bits: u64,
        available_bits: u64,
    },

    /// The pixel count does not fit the 32-bit index space of the pixel order.
    #[error("image too large: {width}x{height} pixels exceeds the addressable pixel range")]
    ImageTooLarge { width: u32, height: u32 },
}

impl StegoError {
    /// How many more bits the carrier would need, or 0 for non-capacity errors.
    pub fn missing_bits(&self) -> u64 {
        match self {
            Self::Capacity {
                required_bits,
                available_bits,
            } => required_bits.saturating_sub(*available_bits),
            Self::ImageTooLarge { .. } => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_message_reports_both_counts() {
        let err = StegoError::Capacity {
            required_bits: 104,
            available_bits: 96,
        };
        assert_eq!(
            err.to_string(),
            "image too small to hide message: need 104 bits, have 96"
        );
        assert_eq!(err.missing_bits(), 8);
    }
}
