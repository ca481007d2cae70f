use clap::{Parser, Subcommand};
use rkpi2::{Endianness, Header, SampleFormat, SampleRate};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rkpi2", about = "Inspect and build RKPI2 PCM headers")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode the header at the start of a file
    Inspect {
        input: PathBuf,
        /// Print the descriptor as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build a header and print (or write) its two bytes
    Make {
        /// Sample rate in Hz; must be one of the 14 table rates
        #[arg(short, long, default_value = "44100")]
        rate: u32,
        /// Sample format: s8, s16, f32, f64
        #[arg(short, long, default_value = "s16")]
        format: String,
        /// Payload byte order: be, le
        #[arg(short, long, default_value = "le")]
        endian: String,
        /// Channel count, 1-8
        #[arg(short, long, default_value = "2")]
        channels: u8,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the supported rates and formats
    List,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {

        // ── Inspect ──────────────────────────────────────────────────────────
        Commands::Inspect { input, json } => {
            let header = Header::read(File::open(&input)?)?;
            tracing::info!(path = %input.display(), "inspected header");
            if json {
                println!("{}", serde_json::to_string_pretty(&header)?);
            } else {
                println!("── RKPI2 Header ─────────────────────────────────────────");
                println!("  Path           {}", input.display());
                println!("  Bytes          {}", hex::encode(header.to_bytes()));
                println!("  Endianness     {}", header.endian);
                println!("  Format         {}", header.format);
                println!("  Rate           {}", header.rate);
                println!("  Channels       {}", header.channels);
                println!("  Frame size     {} B", header.bytes_per_frame());
                println!("  Byte rate      {} B/s", header.bytes_per_second());
            }
        }

        // ── Make ─────────────────────────────────────────────────────────────
        Commands::Make { rate, format, endian, channels, output } => {
            let rate = SampleRate::from_hz(rate)
                .ok_or_else(|| format!("Unsupported sample rate {} Hz (see `rkpi2 list`)", rate))?;
            let format = SampleFormat::from_name(&format)
                .ok_or_else(|| format!("Unknown sample format '{}'", format))?;
            let endian = Endianness::from_name(&endian)
                .ok_or_else(|| format!("Unknown endianness '{}'", endian))?;
            let header = Header::new(endian, format, rate, channels)?;

            println!("{}  {}", hex::encode(header.to_bytes()), header);
            if let Some(path) = output {
                let mut writer = BufWriter::new(File::create(&path)?);
                header.write(&mut writer)?;
                writer.flush()?;
                tracing::info!(path = %path.display(), "wrote header");
                println!("Created: {}", path.display());
            }
        }

        // ── List ─────────────────────────────────────────────────────────────
        Commands::List => {
            println!("{:>7}  {:>9}", "Ordinal", "Rate");
            for rate in SampleRate::ALL {
                println!("{:>7}  {:>9}", rate.ordinal(), rate.hz());
            }
            println!();
            println!("{:>7}  {:<6} {:>5}", "Ordinal", "Format", "Bytes");
            for fmt in SampleFormat::ALL {
                println!("{:>7}  {:<6} {:>5}", fmt.ordinal(), fmt.name(), fmt.bytes_per_sample());
            }
        }
    }

    Ok(())
}

// ── helpers ──────────────────────────────────────────────────────────────────

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
