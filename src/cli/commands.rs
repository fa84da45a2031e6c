use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tagwipe")]
#[command(version = "1.0")]
#[command(about = "Remove privacy-sensitive metadata from audio files", long_about = None)]
pub struct Cli {
    /// Input audio files (MP3, WAV or FLAC)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output file path; if omitted, the input is overwritten in place.
    /// Only valid with a single input file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Comma-separated metadata keys to keep (e.g. title,artist).
    /// Everything not listed is removed; omit to remove all metadata.
    #[arg(short, long, value_delimiter = ',')]
    pub keep: Vec<String>,

    /// Log file path; if omitted, log lines go to the console
    #[arg(short, long)]
    pub log_file: Option<PathBuf>,
}
