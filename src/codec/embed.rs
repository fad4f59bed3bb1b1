//! Encode path: write a framed message into pixel LSBs.

use image::RgbImage;
use log::{debug, warn};

use super::capacity::Capacity;
use super::error::StegoError;
use super::frame::{bits_lsb_first, build_frame, frame_bits};
use super::pixel_order::PixelOrder;
use super::PROGRESS_INTERVAL;

/// Replace the least significant bit of `value` with `bit`.
#[inline]
fn embed_bit(value: u8, bit: u8) -> u8 {
    (value & 0xFE) | (bit & 1)
}

/// Hide `message` in `image`, modifying it in place.
///
/// The capacity check runs before anything is written, so on error the
/// image is untouched. Pixels after the last embedded bit, and the channels
/// after it within the final pixel, keep their original values.
///
/// # Errors
/// - [`StegoError::Capacity`]: the frame needs more bits than `3 * width * height`
/// - [`StegoError::ImageTooLarge`]: the pixel count does not fit in `u32`
pub fn encode_in_place(
    image: &mut RgbImage,
    message: &[u8],
    password: Option<&str>,
) -> Result<(), StegoError> {
    let (width, height) = image.dimensions();
    let capacity = Capacity::of(width, height);
    let required_bits = frame_bits(message.len());

    if required_bits > capacity.available_bits {
        return Err(StegoError::Capacity {
            required_bits,
            available_bits: capacity.available_bits,
        });
    }
    if message.is_empty() {
        warn!("Embedding an empty message; decoders will report no message");
    }

    let order = PixelOrder::new(width, height, password)?;
    let frame = build_frame(message);

    debug!(
        "Message size: {} bytes / {} bits",
        frame.len(),
        required_bits
    );
    debug!(
        "Image capacity: {}x{} pixels / {} bits ({} order)",
        width,
        height,
        capacity.available_bits,
        if order.is_shuffled() { "password" } else { "raster" }
    );

    let mut bits = bits_lsb_first(&frame).peekable();
    for (visited, (x, y)) in order.iter().enumerate() {
        if bits.peek().is_none() {
            break;
        }

        let pixel = image.get_pixel_mut(x, y);
        for channel in 0..3 {
            match bits.next() {
                Some(bit) => pixel[channel] = embed_bit(pixel[channel], bit),
                None => break,
            }
        }

        if visited > 0 && visited % PROGRESS_INTERVAL == 0 {
            debug!("Embedded into {} pixels...", visited);
        }
    }

    Ok(())
}

/// Hide `message` in a copy of `image` and return the copy.
///
/// # Example
/// ```ignore
/// let carrier = image::open("photo.png")?.to_rgb8();
/// let stego = encode(&carrier, "meet at dawn".as_bytes(), Some("hunter2"))?;
/// ```
pub fn encode(
    image: &RgbImage,
    message: &[u8],
    password: Option<&str>,
) -> Result<RgbImage, StegoError> {
    let mut stego = image.clone();
    encode_in_place(&mut stego, message, password)?;
    Ok(stego)
}
