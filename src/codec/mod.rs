//! # LSB Steganography Codec
//!
//! Hides a message in the least significant bits of an RGB image and
//! recovers it again.
//!
//! ## Frame
//!
//! ```text
//! "SSSTEGO" (7 bytes) | length (4 bytes, LE u32) | payload (length bytes)
//! ```
//!
//! Each frame byte is split into bits, least significant first, and written
//! one bit per colour channel (R, G, B) of successive pixels.
//!
//! ## Pixel order
//!
//! Pixels are visited in raster order, or in a password-seeded permutation
//! when a password is given (see [`pixel_order`]). The password only decides
//! *where* bits go; the payload itself is stored in clear.
//!
//! ## Capacity
//!
//! An image holds `3 * width * height` bits, of which 88 go to the header.
//! Example: an 800x600 image can carry roughly 175 KB of text.
//!
//! All functions here are pure: no I/O, no shared state. Image loading and
//! saving live in [`crate::io`].

pub mod capacity;
pub mod embed;
pub mod error;
pub mod extract;
pub mod frame;
pub mod pixel_order;

/// Emit a debug progress line every this many pixels.
pub(crate) const PROGRESS_INTERVAL: usize = 10_000;

pub use capacity::Capacity;
pub use embed::{encode, encode_in_place};
pub use error::StegoError;
pub use extract::{decode, decode_detailed, PayloadKind, Recovered, Traversal};
pub use frame::{build_frame, HEADER_LEN, MARKER};
pub use pixel_order::{password_seed, pixel_order, PixelOrder};
