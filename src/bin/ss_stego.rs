//! # ss-stego Command Line Tool
//!
//! Thin wrapper around [`StegoService`] for hiding and recovering messages.
//!
//! ## Usage
//!
//! ```bash
//! ss-stego encode --image photo.jpg --message "meet at dawn" --password hunter2
//! ss-stego decode --image photo_stego.png --password hunter2
//! ss-stego capacity --image photo.jpg --json
//! ```
//!
//! `decode` exits with status 1 when no message is found.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

use ss_steganography::codec::{Capacity, StegoError};
use ss_steganography::common::config::{load_config, StegoConfig};
use ss_steganography::common::logging::init_logger;
use ss_steganography::io;
use ss_steganography::StegoService;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration file (optional)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hide a message in an image
    Encode {
        /// Carrier image (any format; output is always PNG)
        #[arg(short, long)]
        image: PathBuf,

        /// Message text to hide
        #[arg(short, long, required_unless_present = "message_file", conflicts_with = "message_file")]
        message: Option<String>,

        /// Read the message from a file instead
        #[arg(long)]
        message_file: Option<PathBuf>,

        /// Password selecting which pixels carry the message
        #[arg(short, long)]
        password: Option<String>,

        /// Output path (default: <image stem>_stego.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract a hidden message from an image
    Decode {
        #[arg(short, long)]
        image: PathBuf,

        #[arg(short, long)]
        password: Option<String>,

        /// Print the message and how it was found as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how much text an image can hold
    Capacity {
        #[arg(short, long)]
        image: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config: StegoConfig = match &args.config {
        Some(path) => load_config(path)?,
        None => StegoConfig::default(),
    };

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        config.logging.level_filter()?
    };
    init_logger(level);

    let service = StegoService::new(config);

    match args.command {
        Command::Encode {
            image,
            message,
            message_file,
            password,
            output,
        } => {
            let message = match (message, message_file) {
                (Some(message), _) => message,
                (None, Some(path)) => io::read_message_file(&path)?,
                (None, None) => bail!("either --message or --message-file is required"),
            };
            let message = io::normalize_message(&message)?;

            let output_path = match service.encode_file(&image, message, password, output).await {
                Ok(path) => path,
                Err(e) => {
                    if let Some(err) = e.downcast_ref::<StegoError>().filter(|err| err.missing_bits() > 0) {
                        bail!(
                            "{} ({} more bits needed; use a larger image or a shorter message)",
                            err,
                            err.missing_bits()
                        );
                    }
                    return Err(e);
                }
            };
            println!("Message hidden successfully! Image saved to: {}", output_path.display());
        }

        Command::Decode {
            image,
            password,
            json,
        } => match service.decode_file_detailed(&image, password).await? {
            Some(recovered) if json => println!("{}", serde_json::to_string_pretty(&recovered)?),
            Some(recovered) => println!("{}", recovered.text),
            None => {
                eprintln!("Failed to decode message. Invalid password or no message found.");
                std::process::exit(1);
            }
        },

        Command::Capacity { image, json } => {
            let img = io::load_rgb(&image)?;
            let capacity = Capacity::of(img.width(), img.height());
            if json {
                println!("{}", serde_json::to_string_pretty(&capacity)?);
            } else {
                println!(
                    "{}x{} pixels: {} bits available, up to {} bytes of message",
                    capacity.width,
                    capacity.height,
                    capacity.available_bits,
                    capacity.max_message_bytes
                );
            }
        }
    }

    Ok(())
}
