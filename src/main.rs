//! Undertone - hide RSA-encrypted messages inside WAV audio
//!
//! CLI for wavelet-domain audio steganography. Messages are encrypted with
//! the recipient's RSA public key, armored as a QR barcode, and embedded in
//! the least significant bits of the carrier's wavelet detail coefficients.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use std::path::PathBuf;

use undertone::crypto::{load_private_key, load_public_key, KeyPair};
use undertone::decoder::{decode_with_config, DecoderConfig};
use undertone::encoder::{encode_with_config, EncoderConfig};
use undertone::stego::{capacity_bits, AudioSignal};

/// Undertone - hide RSA-encrypted messages inside WAV audio
///
/// The carrier audio is never transmitted in the clear alongside the
/// message: the stego WAV is the only artifact, and only the holder of the
/// matching private key can recover the payload.
#[derive(Parser)]
#[command(name = "undertone")]
#[command(version = "0.3.0")]
#[command(about = "Hide RSA-encrypted messages in WAV audio via wavelet-domain steganography")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new RSA-2048 key pair
    Keygen {
        /// Output path for keys (creates .pub and .key files)
        #[arg(short, long, default_value = "undertone")]
        output: PathBuf,
    },

    /// Encode a message into a WAV carrier
    ///
    /// The carrier may be any WAV the audio codec can read (8/16/24/32-bit
    /// PCM or 32-bit float, mono or multi-channel). Multi-channel carriers
    /// are collapsed to mono; the stego output is always 16-bit PCM mono.
    Encode {
        /// Path to the carrier WAV file
        #[arg(short, long)]
        carrier: PathBuf,

        /// Message to hide (reads from stdin if not provided)
        #[arg(short, long)]
        message: Option<String>,

        /// Path to recipient's public key
        #[arg(short, long)]
        key: PathBuf,

        /// Output path for the stego WAV
        #[arg(short, long)]
        output: PathBuf,

        /// Also save the embedded barcode image (PNG) to this path
        #[arg(long)]
        barcode: Option<PathBuf>,

        /// Verbose output (shows pipeline stage sizes)
        #[arg(short, long)]
        verbose: bool,
    },

    /// Decode a message from a stego WAV
    ///
    /// Fails cleanly when the input carries no payload for the given key:
    /// extraction yields noise that the blob or barcode stage rejects.
    Decode {
        /// Path to the stego WAV file
        #[arg(short, long)]
        input: PathBuf,

        /// Path to your private key
        #[arg(short, long)]
        key: PathBuf,

        /// Extract at most this many bits (default: every coefficient)
        #[arg(long)]
        max_bits: Option<usize>,

        /// Also save the reconstructed barcode image (PNG) to this path
        #[arg(long)]
        barcode: Option<PathBuf>,

        /// Verbose output (shows pipeline stage sizes)
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create a silent WAV file to use as a carrier
    #[command(name = "make-carrier")]
    MakeCarrier {
        /// Output WAV path
        #[arg(short, long)]
        output: PathBuf,

        /// Duration in seconds
        #[arg(short, long, default_value = "5.0")]
        duration: f64,

        /// Sample rate in Hz
        #[arg(short, long, default_value = "44100")]
        sample_rate: u32,
    },

    /// Show how many payload bits a carrier can hold
    Capacity {
        /// Path to the carrier WAV file
        #[arg(short, long)]
        carrier: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Keygen { output } => keygen(&output)?,

        Commands::Encode {
            carrier,
            message,
            key,
            output,
            barcode,
            verbose,
        } => encode_cmd(&carrier, message, &key, &output, barcode.as_ref(), verbose)?,

        Commands::Decode {
            input,
            key,
            max_bits,
            barcode,
            verbose,
        } => decode_cmd(&input, &key, max_bits, barcode.as_ref(), verbose)?,

        Commands::MakeCarrier {
            output,
            duration,
            sample_rate,
        } => make_carrier(&output, duration, sample_rate)?,

        Commands::Capacity { carrier } => capacity(&carrier)?,
    }

    Ok(())
}

/// Generates a new key pair and saves it to files.
fn keygen(output: &PathBuf) -> Result<()> {
    println!("Generating RSA-2048 key pair (this can take a moment)...");

    let keypair = KeyPair::generate().context("Failed to generate key pair")?;
    keypair
        .save_to_files(output)
        .context("Failed to save key pair")?;

    println!("Key pair generated successfully:");
    println!("  Public key:  {}", output.with_extension("pub").display());
    println!("  Private key: {}", output.with_extension("key").display());
    println!();
    println!("Share your public key (.pub) with people who want to send you messages.");
    println!("Keep your private key (.key) secret and secure.");

    Ok(())
}

/// Encodes a message into a carrier WAV and writes the stego WAV.
fn encode_cmd(
    carrier_path: &PathBuf,
    message: Option<String>,
    key_path: &PathBuf,
    output: &PathBuf,
    barcode_path: Option<&PathBuf>,
    verbose: bool,
) -> Result<()> {
    let carrier = AudioSignal::from_file(carrier_path)
        .with_context(|| format!("Failed to read carrier from {}", carrier_path.display()))?;

    if verbose {
        eprintln!(
            "Loaded carrier: {} frames, {} channel(s), {} Hz",
            carrier.frame_count(),
            carrier.channels(),
            carrier.sample_rate()
        );
    }

    let public_key = load_public_key(key_path)
        .with_context(|| format!("Failed to load public key from {}", key_path.display()))?;

    let message = match message {
        Some(m) => m,
        None => {
            eprintln!("Reading message from stdin (Ctrl+D to finish):");
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read message from stdin")?;
            buffer.trim().to_string()
        }
    };

    if message.is_empty() {
        anyhow::bail!("Message cannot be empty");
    }

    let config = EncoderConfig {
        verbose,
        ..Default::default()
    };

    let encoded = encode_with_config(&message, &public_key, &carrier, &config)
        .context("Failed to encode message")?;

    encoded
        .stego
        .save(output)
        .with_context(|| format!("Failed to write stego audio to {}", output.display()))?;

    println!("Stego audio written to {}", output.display());

    if verbose {
        eprintln!(
            "Pipeline: {} ciphertext bytes -> {}x{} barcode -> {} blob bytes -> {} embedded bits",
            encoded.ciphertext_len,
            encoded.barcode.width(),
            encoded.barcode.height(),
            encoded.blob_len,
            encoded.bits_embedded
        );
    }

    if let Some(path) = barcode_path {
        encoded
            .barcode
            .to_luma()
            .save(path)
            .with_context(|| format!("Failed to save barcode image to {}", path.display()))?;
        eprintln!("Barcode image saved: {}", path.display());
    }

    Ok(())
}

/// Decodes a message from a stego WAV and prints it to stdout.
fn decode_cmd(
    input: &PathBuf,
    key_path: &PathBuf,
    max_bits: Option<usize>,
    barcode_path: Option<&PathBuf>,
    verbose: bool,
) -> Result<()> {
    let stego = AudioSignal::from_file(input)
        .with_context(|| format!("Failed to read stego audio from {}", input.display()))?;

    if verbose {
        eprintln!(
            "Loaded stego audio: {} frames, {} channel(s), {} Hz",
            stego.frame_count(),
            stego.channels(),
            stego.sample_rate()
        );
    }

    let private_key = load_private_key(key_path)
        .with_context(|| format!("Failed to load private key from {}", key_path.display()))?;

    let config = DecoderConfig {
        verbose,
        bit_budget: max_bits,
    };

    let decoded =
        decode_with_config(&stego, &private_key, &config).context("Failed to decode message")?;

    if let Some(path) = barcode_path {
        decoded
            .barcode
            .to_luma()
            .save(path)
            .with_context(|| format!("Failed to save barcode image to {}", path.display()))?;
        eprintln!("Reconstructed barcode saved: {}", path.display());
    }

    println!("{}", decoded.message);

    Ok(())
}

/// Creates a silent WAV carrier.
fn make_carrier(output: &PathBuf, duration: f64, sample_rate: u32) -> Result<()> {
    if duration <= 0.0 {
        anyhow::bail!("Duration must be positive");
    }
    if sample_rate == 0 {
        anyhow::bail!("Sample rate must be positive");
    }

    let carrier = AudioSignal::silence(duration, sample_rate);
    carrier
        .save(output)
        .with_context(|| format!("Failed to write carrier to {}", output.display()))?;

    println!("Carrier written to {}", output.display());
    println!(
        "  {} frames at {} Hz, room for {} payload bits",
        carrier.frame_count(),
        sample_rate,
        capacity_bits(&carrier)
    );

    Ok(())
}

/// Shows capacity information for a carrier file.
fn capacity(carrier_path: &PathBuf) -> Result<()> {
    let carrier = AudioSignal::from_file(carrier_path)
        .with_context(|| format!("Failed to read carrier from {}", carrier_path.display()))?;

    let bits = capacity_bits(&carrier);

    println!("Carrier capacity analysis");
    println!("=========================");
    println!(
        "  Frames: {} ({:.2}s at {} Hz)",
        carrier.frame_count(),
        carrier.duration_secs(),
        carrier.sample_rate()
    );
    println!("  Channels: {}", carrier.channels());
    println!("  Detail coefficients: {}", bits);
    println!("  Payload capacity: {} bits ({} bytes)", bits, bits / 8);
    if carrier.duration_secs() > 0.0 {
        println!(
            "  Throughput: {:.0} bits/second",
            bits as f64 / carrier.duration_secs()
        );
    }

    Ok(())
}
