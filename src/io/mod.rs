//! # Image and Message I/O
//!
//! File and byte-level wrappers around the pure [`codec`](crate::codec),
//! plus reading the message text to hide.

pub mod image_io;
pub mod message;

pub use image_io::{
    default_output_path, embed_text_bytes, encode_png, extract_text_bytes, load_rgb,
    load_rgb_from_memory, save_png,
};
pub use message::{normalize_message, read_message_file};
