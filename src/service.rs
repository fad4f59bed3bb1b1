//! # Stego Service - File-level Encode/Decode Worker
//!
//! Wraps the codec for async hosts. The codec is CPU-bound and synchronous,
//! so every call runs on tokio's blocking thread pool to keep the runtime
//! free for other work (a UI event loop, a web handler, ...).
//!
//! Each call loads its own copy of the image, so an abandoned call never
//! leaves a half-written file behind: the output is only saved after the
//! whole message has been embedded.

use anyhow::Result;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::codec;
use crate::common::config::StegoConfig;
use crate::io;

/// Runs encode and decode jobs against image files.
///
/// The service holds only its configuration; it is cheap to clone and safe to
/// share between tasks.
#[derive(Debug, Clone, Default)]
pub struct StegoService {
    config: StegoConfig,
}

impl StegoService {
    /// Create a new service with the given configuration.
    ///
    /// # Example
    /// ```ignore
    /// let service = StegoService::new(StegoConfig::default());
    /// ```
    pub fn new(config: StegoConfig) -> Self {
        Self { config }
    }

    /// Hide `message` in the image at `input` and save the result as PNG.
    ///
    /// # Arguments
    /// - `input`: Path to the carrier image (any readable format)
    /// - `message`: Text to hide
    /// - `password`: Optional password selecting the pixel order
    /// - `output`: Destination path; defaults to `<stem><suffix>.png`
    ///
    /// # Returns
    /// - `Ok(PathBuf)`: Where the encoded image was written
    /// - `Err`: Image could not be read or written, or the message does not fit
    pub async fn encode_file(
        &self,
        input: impl AsRef<Path>,
        message: String,
        password: Option<String>,
        output: Option<PathBuf>,
    ) -> Result<PathBuf> {
        let input = input.as_ref().to_path_buf();
        let output_path =
            output.unwrap_or_else(|| io::default_output_path(&input, &self.config.output));

        info!("📷 Encoding message into {}", input.display());
        let start = Instant::now();

        let destination = output_path.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut img = io::load_rgb(&input)?;
            codec::encode_in_place(&mut img, message.as_bytes(), password.as_deref())?;
            io::save_png(&img, &destination)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Encoding task panicked: {}", e))??;

        info!(
            "✅ Encoding completed in {:.2?}, saved to {}",
            start.elapsed(),
            output_path.display()
        );

        Ok(output_path)
    }

    /// Look for a hidden message in the image at `input`.
    ///
    /// # Returns
    /// - `Ok(Some(text))`: the recovered message
    /// - `Ok(None)`: no message found for this password (or without one)
    /// - `Err`: the image could not be read
    pub async fn decode_file(
        &self,
        input: impl AsRef<Path>,
        password: Option<String>,
    ) -> Result<Option<String>> {
        Ok(self
            .decode_file_detailed(input, password)
            .await?
            .map(|recovered| recovered.text))
    }

    /// Like [`decode_file`](Self::decode_file), also reporting how the message was found.
    pub async fn decode_file_detailed(
        &self,
        input: impl AsRef<Path>,
        password: Option<String>,
    ) -> Result<Option<codec::Recovered>> {
        let input = input.as_ref().to_path_buf();
        info!("🔍 Decoding {}", input.display());
        let start = Instant::now();

        let recovered = tokio::task::spawn_blocking(move || -> Result<Option<codec::Recovered>> {
            let img = io::load_rgb(&input)?;
            Ok(codec::decode_detailed(&img, password.as_deref()))
        })
        .await
        .map_err(|e| anyhow::anyhow!("Decoding task panicked: {}", e))??;

        match &recovered {
            Some(found) => info!(
                "✅ Decoding successful in {:.2?} ({} chars)",
                start.elapsed(),
                found.text.chars().count()
            ),
            None => warn!("❌ No hidden message found after {:.2?}", start.elapsed()),
        }

        Ok(recovered)
    }
}
