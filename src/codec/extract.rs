//! Decode path: locate and read a framed message from pixel LSBs.
//!
//! A single attempt walks the pixel order for one password:
//!
//! 1. read LSBs until the 11 header bytes are complete
//! 2. check the marker
//! 3. sanity-check the length (`0 < length <= width * height`)
//! 4. keep walking the same order until the whole payload is read
//! 5. return the payload as UTF-8, or as base64 if it is not valid UTF-8
//!
//! If the attempt with a password finds nothing, a second attempt is made in
//! raster order, so images hidden without a password are still found.
//!
//! The length bound in step 3 is deliberately looser than the real bit
//! capacity. A length that passes it but overruns the image is caught in
//! step 4 when the pixel order runs out.

use std::time::Instant;

use base64::{engine::general_purpose, Engine as _};
use image::RgbImage;
use log::{debug, info};
use serde::Serialize;

use super::frame::{frame_bits, parse_header, BitAccumulator, HEADER_LEN};
use super::pixel_order::{effective_password, Coords, PixelOrder};
use super::PROGRESS_INTERVAL;

/// How the recovered payload bytes were turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    Utf8,
    /// Payload was not valid UTF-8 and is returned base64-encoded.
    Base64,
}

/// Which pixel order located the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Traversal {
    Password,
    Natural,
}

/// A message found in an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recovered {
    pub text: String,
    pub kind: PayloadKind,
    pub traversal: Traversal,
}

/// Reads LSBs from successive pixels of one traversal, R then G then B.
struct LsbReader<'a> {
    image: &'a RgbImage,
    coords: Coords<'a>,
    bits: BitAccumulator,
    pixels_read: usize,
}

impl<'a> LsbReader<'a> {
    fn new(image: &'a RgbImage, order: &'a PixelOrder) -> Self {
        Self {
            image,
            coords: order.iter(),
            bits: BitAccumulator::new(),
            pixels_read: 0,
        }
    }

    /// Read whole pixels until at least `target_bits` bits are collected.
    ///
    /// Returns `false` if the traversal ends first.
    fn read_until(&mut self, target_bits: u64) -> bool {
        while self.bits.bit_count() < target_bits {
            let Some((x, y)) = self.coords.next() else {
                return false;
            };

            let pixel = self.image.get_pixel(x, y);
            for channel in 0..3 {
                self.bits.push(pixel[channel] & 1);
            }

            self.pixels_read += 1;
            if self.pixels_read % PROGRESS_INTERVAL == 0 {
                debug!("Processed {} pixels...", self.pixels_read);
            }
        }
        true
    }

    fn bytes(&self) -> &[u8] {
        self.bits.complete_bytes()
    }
}

fn payload_to_text(payload: &[u8]) -> (String, PayloadKind) {
    match std::str::from_utf8(payload) {
        Ok(text) => (text.to_owned(), PayloadKind::Utf8),
        Err(_) => {
            debug!("Failed to decode as UTF-8, returning base64");
            (general_purpose::STANDARD.encode(payload), PayloadKind::Base64)
        }
    }
}

/// One decode attempt with a single pixel order.
fn decode_attempt(image: &RgbImage, password: Option<&str>) -> Option<(String, PayloadKind)> {
    let (width, height) = image.dimensions();
    let order = match PixelOrder::new(width, height, password) {
        Ok(order) => order,
        Err(e) => {
            debug!("Cannot build pixel order: {}", e);
            return None;
        }
    };

    let mut reader = LsbReader::new(image, &order);

    if !reader.read_until(frame_bits(0)) {
        debug!("Image too small to hold a frame header");
        return None;
    }

    let Some(header) = parse_header(reader.bytes()) else {
        debug!("Marker not found in image");
        return None;
    };

    let length = header.length;
    if length == 0 || length as u64 > width as u64 * height as u64 {
        debug!("Invalid message length: {}", length);
        return None;
    }
    debug!("Found valid marker. Message length: {} bytes", length);

    let total_bits = frame_bits(length as usize);
    if !reader.read_until(total_bits) {
        debug!(
            "Not enough bits in image: {} < {}",
            reader.bits.bit_count(),
            total_bits
        );
        return None;
    }

    let payload = &reader.bytes()[HEADER_LEN..HEADER_LEN + length as usize];
    Some(payload_to_text(payload))
}

/// Recover a hidden message along with how it was found.
///
/// # Arguments
/// - `image`: carrier image as RGB8
/// - `password`: password used at encode time; `None` or `Some("")` means raster order
///
/// # Returns
/// - `Some(Recovered)`: a valid frame was found
/// - `None`: no frame under the password, nor in raster order
pub fn decode_detailed(image: &RgbImage, password: Option<&str>) -> Option<Recovered> {
    let start = Instant::now();
    let password = effective_password(password);
    let (width, height) = image.dimensions();
    debug!("Decoding image: {}x{} pixels", width, height);

    let first = if password.is_some() {
        Traversal::Password
    } else {
        Traversal::Natural
    };

    if let Some((text, kind)) = decode_attempt(image, password) {
        debug!("Decoding successful in {:.2?}", start.elapsed());
        return Some(Recovered {
            text,
            kind,
            traversal: first,
        });
    }

    if password.is_some() {
        info!("Decoding with password failed. Trying without password...");
        if let Some((text, kind)) = decode_attempt(image, None) {
            debug!("Decoding successful in {:.2?}", start.elapsed());
            return Some(Recovered {
                text,
                kind,
                traversal: Traversal::Natural,
            });
        }
    }

    debug!("Decoding failed after {:.2?}", start.elapsed());
    None
}

/// Recover a hidden message, or `None` if the image carries none.
///
/// # Example
/// ```ignore
/// let stego = image::open("photo_stego.png")?.to_rgb8();
/// if let Some(message) = decode(&stego, Some("hunter2")) {
///     println!("{message}");
/// }
/// ```
pub fn decode(image: &RgbImage, password: Option<&str>) -> Option<String> {
    decode_detailed(image, password).map(|recovered| recovered.text)
}
