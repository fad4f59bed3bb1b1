//! # SS Steganography
//!
//! Hide text in the pixels of a raster image with LSB substitution, and get
//! it back out.
//!
//! - [`codec`]: the pure encode/decode functions and the pixel-order generator
//! - [`io`]: loading carriers as RGB and saving results as PNG
//! - [`service`]: async, file-level wrapper running the codec off the runtime
//! - [`common`]: configuration and logging shared with the `ss-stego` binary
//!
//! The optional password only scrambles which pixels are used. It is not
//! encryption: anyone decoding without a password can still read a message
//! hidden without one, and the payload bits are stored in clear.

pub mod codec;
pub mod common;
pub mod io;
pub mod service;

pub use codec::{decode, encode, Capacity, StegoError};
pub use service::StegoService;
