//! # Pixel Order Generator
//!
//! Produces the traversal order over image pixels that both the encoder and
//! the decoder walk. Without a password the order is plain raster order
//! (row by row, left to right). With a password the linear pixel indices are
//! shuffled by a password-seeded Fisher-Yates permutation.
//!
//! ## Portability
//!
//! A message hidden on one machine must be found on another, so every step of
//! the permutation is pinned:
//!
//! 1. `seed = u32::from_be_bytes(SHA-256(password)[0..4])`
//! 2. A ChaCha20 generator is keyed with `seed.to_be_bytes()` followed by 28
//!    zero bytes. A fresh generator is built on every call.
//! 3. Indices `0..n` are shuffled with a descending Fisher-Yates pass: for
//!    `i` in `n-1..=1`, `j = gen_range(0..=i)` drawn as a `u32`, then swap.
//!    Drawing `u32` rather than `usize` keeps 32-bit and 64-bit targets on
//!    the same random stream.
//! 4. Index `i` maps to the coordinate `(i % width, i / width)`.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};

use super::error::StegoError;

/// Treat an empty password the same as no password.
pub(crate) fn effective_password(password: Option<&str>) -> Option<&str> {
    password.filter(|p| !p.is_empty())
}

/// Derive the 32-bit shuffle seed from a password.
///
/// # Example
/// ```ignore
/// assert_eq!(password_seed("secret"), 0x2bb8_0d53);
/// ```
pub fn password_seed(password: &str) -> u32 {
    let digest = Sha256::digest(password.as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

fn seeded_rng(seed: u32) -> ChaCha20Rng {
    let mut key = [0u8; 32];
    key[..4].copy_from_slice(&seed.to_be_bytes());
    ChaCha20Rng::from_seed(key)
}

fn shuffled_indices(count: u32, seed: u32) -> Vec<u32> {
    let mut indices: Vec<u32> = (0..count).collect();
    let mut rng = seeded_rng(seed);
    for i in (1..count).rev() {
        let j = rng.gen_range(0..=i);
        indices.swap(i as usize, j as usize);
    }
    indices
}

/// A deterministic traversal over every pixel of a `width x height` image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelOrder {
    width: u32,
    count: u32,
    /// `None` means natural raster order.
    shuffled: Option<Vec<u32>>,
}

impl PixelOrder {
    /// Build the pixel order for the given dimensions and optional password.
    ///
    /// # Arguments
    /// - `width`, `height`: image dimensions in pixels
    /// - `password`: optional password; `None` or `Some("")` gives raster order
    ///
    /// # Returns
    /// - `Ok(PixelOrder)`: a permutation covering every pixel exactly once
    /// - `Err(StegoError::ImageTooLarge)`: pixel count does not fit in `u32`
    pub fn new(width: u32, height: u32, password: Option<&str>) -> Result<Self, StegoError> {
        let count = u32::try_from(width as u64 * height as u64)
            .map_err(|_| StegoError::ImageTooLarge { width, height })?;

        let shuffled = effective_password(password)
            .map(|password| shuffled_indices(count, password_seed(password)));

        Ok(Self {
            width,
            count,
            shuffled,
        })
    }

    /// Number of pixels in the traversal.
    pub fn len(&self) -> usize {
        self.count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled.is_some()
    }

    /// Iterate over `(x, y)` coordinates in traversal order.
    pub fn iter(&self) -> Coords<'_> {
        Coords {
            order: self,
            position: 0,
        }
    }
}

/// Iterator over the coordinates of a [`PixelOrder`].
#[derive(Debug, Clone)]
pub struct Coords<'a> {
    order: &'a PixelOrder,
    position: u32,
}

impl Iterator for Coords<'_> {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.order.count {
            return None;
        }

        let index = match &self.order.shuffled {
            Some(indices) => indices[self.position as usize],
            None => self.position,
        };
        self.position += 1;

        Some((index % self.order.width, index / self.order.width))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.order.count - self.position) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Coords<'_> {}

/// Collect the full coordinate sequence for `(width, height, password)`.
pub fn pixel_order(
    width: u32,
    height: u32,
    password: Option<&str>,
) -> Result<Vec<(u32, u32)>, StegoError> {
    Ok(PixelOrder::new(width, height, password)?.iter().collect())
}
