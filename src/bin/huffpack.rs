use clap::{Parser, Subcommand};
use huffpack::huffman::{code_to_string, decompress, unframe};
use huffpack::{table_format, Archive, ArchiveConfig};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Huffman compressor for single files.
#[derive(Parser, Debug)]
#[command(author, version, about = "Huffman file compressor", long_about = None)]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress FILE into <stem>.bin and <stem>_table.bin
    Compress {
        file: PathBuf,
        /// Strip trailing whitespace before compressing
        #[arg(long)]
        trim: bool,
    },
    /// Restore FILE from its payload and table into <stem>_decompressed.txt
    Decompress {
        file: PathBuf,
        /// Payload to read instead of <stem>.bin
        #[arg(long)]
        payload: Option<PathBuf>,
    },
    /// Show the header, code table and leading bytes of a payload
    Inspect {
        payload: PathBuf,
        #[arg(long)]
        table: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn inspect(payload_path: &Path, table_path: &Path) -> huffpack::Result<()> {
    let payload = std::fs::read(payload_path)?;
    let table = table_format::read_file(table_path)?;
    let data_bits = unframe(&payload)?.len();
    let symbols = decompress(&payload, &table)?;

    println!("payload:  {} bytes", payload.len());
    println!("padding:  {} bits", payload[0]);
    println!("data:     {} bits", data_bits);
    println!("symbols:  {}", symbols.len());
    println!("codes:    {}", table.len());
    for (code, symbol) in table.iter() {
        println!("  {:#04x} {:?} {}", symbol, symbol as char, code_to_string(code));
    }
    let head = &payload[..payload.len().min(32)];
    println!("head:     {}", hex::encode(head));
    Ok(())
}

fn run(cli: Cli) -> huffpack::Result<()> {
    match cli.command {
        Command::Compress { file, trim } => {
            let config = ArchiveConfig {
                trim_trailing_whitespace: trim,
                ..ArchiveConfig::default()
            };
            let output = Archive::new(&file, config).compress()?;
            println!("Compressed {}", output.display());
        }
        Command::Decompress { file, payload } => {
            let archive = Archive::new(&file, ArchiveConfig::default());
            let input = match payload {
                Some(path) => path,
                None => archive.payload_path()?,
            };
            let output = archive.decompress(&input)?;
            println!("Decompressed {}", output.display());
        }
        Command::Inspect { payload, table } => inspect(&payload, &table)?,
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("huffpack: {err}");
            ExitCode::FAILURE
        }
    }
}
