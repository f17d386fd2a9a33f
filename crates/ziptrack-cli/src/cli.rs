//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ziptrack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output and progress bars
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build or update a ZIP archive from files
    Build(BuildArgs),
    /// Extract archive contents
    Extract(ExtractArgs),
}

impl Commands {
    /// Operation name used in JSON output.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Build(_) => "build",
            Self::Extract(_) => "extract",
        }
    }
}

#[derive(clap::Args)]
pub struct BuildArgs {
    /// Archive to create, or to update if it already exists
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Files to add, in entry order
    #[arg(value_name = "SOURCE", required = true)]
    pub sources: Vec<PathBuf>,

    /// Store entries under their full path instead of the bare file name
    #[arg(long)]
    pub full_paths: bool,

    /// Compression level (0 = store, 1-9 = deflate)
    #[arg(short = 'l', long, default_value = "6", value_parser = clap::value_parser!(u8).range(0..=9))]
    pub compression_level: u8,

    /// Bytes per progress step (accepts K and M suffixes)
    #[arg(long, value_name = "SIZE", value_parser = parse_chunk_size)]
    pub chunk_size: Option<usize>,
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Output directory (default: current directory)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Recreate the directory structure stored in the archive
    #[arg(long)]
    pub respect_dirs: bool,

    /// Preserve file permissions from archive
    #[arg(long)]
    pub preserve_permissions: bool,

    /// Bytes per progress step (accepts K and M suffixes)
    #[arg(long, value_name = "SIZE", value_parser = parse_chunk_size)]
    pub chunk_size: Option<usize>,
}

/// Parse byte size with optional suffix (K, M, G)
#[allow(clippy::option_if_let_else)]
fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty byte size".to_string());
    }

    let (num_str, multiplier) = if let Some(stripped) = s.strip_suffix('G') {
        (stripped, 1024_u64.pow(3))
    } else if let Some(stripped) = s.strip_suffix('M') {
        (stripped, 1024_u64.pow(2))
    } else if let Some(stripped) = s.strip_suffix('K') {
        (stripped, 1024)
    } else {
        (s, 1)
    };

    num_str
        .parse::<u64>()
        .map_err(|_| format!("invalid byte size: {s}"))
        .and_then(|n| {
            n.checked_mul(multiplier)
                .ok_or_else(|| format!("byte size overflow: {s}"))
        })
}

/// Parse a non-zero chunk size that fits in memory
fn parse_chunk_size(s: &str) -> Result<usize, String> {
    let bytes = parse_byte_size(s)?;
    if bytes == 0 {
        return Err("chunk size must be at least 1 byte".to_string());
    }
    usize::try_from(bytes).map_err(|_| format!("chunk size too large: {s}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_byte_size() {
        assert_eq!(parse_byte_size("100").unwrap(), 100);
        assert_eq!(parse_byte_size("1K").unwrap(), 1024);
        assert_eq!(parse_byte_size("2M").unwrap(), 2 * 1024 * 1024);
        assert_eq!(parse_byte_size("3G").unwrap(), 3 * 1024 * 1024 * 1024);
        assert!(parse_byte_size("invalid").is_err());
        assert!(parse_byte_size("").is_err());
    }

    #[test]
    fn test_parse_byte_size_overflow() {
        assert!(parse_byte_size("18446744073709551615K").is_err());
        assert!(parse_byte_size("17592186044416G").is_err());
    }

    #[test]
    fn test_parse_chunk_size() {
        assert_eq!(parse_chunk_size("4K").unwrap(), 4096);
        assert!(parse_chunk_size("0").is_err());
    }

    #[test]
    fn test_build_args_parse() {
        let cli = Cli::try_parse_from(["ziptrack", "build", "out.zip", "a.txt", "b.txt", "-l", "0"])
            .unwrap();
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.sources.len(), 2);
                assert_eq!(args.compression_level, 0);
                assert!(!args.full_paths);
            }
            Commands::Extract(_) => panic!("expected build"),
        }
    }

    #[test]
    fn test_build_requires_source() {
        assert!(Cli::try_parse_from(["ziptrack", "build", "out.zip"]).is_err());
    }

    #[test]
    fn test_compression_level_range() {
        assert!(Cli::try_parse_from(["ziptrack", "build", "out.zip", "a", "-l", "10"]).is_err());
    }
}
