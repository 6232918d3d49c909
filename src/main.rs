mod logger;

use clap::{Parser, Subcommand, ValueEnum};
use huffman::store::{self, ArtifactPaths};
use huffman::{Error, Mode};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "huffman", version)]
#[command(about = "Static Huffman compression of text files.", long_about = None)]
struct Cli {
    /// Log every pipeline stage
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum SymbolModelArg {
    #[clap(help = "One symbol per character (Default).")]
    Char,
    #[clap(help = "Runs of ASCII letters are one symbol, other characters one each.")]
    Word,
}

impl From<SymbolModelArg> for Mode {
    fn from(arg: SymbolModelArg) -> Self {
        match arg {
            SymbolModelArg::Char => Mode::Char,
            SymbolModelArg::Word => Mode::Word,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compress INFILE into INFILE.bin and INFILE-symbol-model
    Compress {
        infile: PathBuf,
        #[arg(short, long, value_enum, default_value_t = SymbolModelArg::Char)]
        symbolmodel: SymbolModelArg,
    },
    /// Decompress a .bin payload using its sibling symbol model
    Decompress { infile: PathBuf },
}

fn compress(infile: &Path, mode: Mode) -> Result<(), Error> {
    let paths = ArtifactPaths::for_input(infile);
    let text = store::read_input(infile)?;

    let start = Instant::now();
    let compressed = huffman::compress(&text, mode)?;
    store::save_compressed(&paths, &compressed.payload, &compressed.table)?;
    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        payload = %paths.payload.display(),
        model = %paths.model.display(),
        "compression time"
    );
    Ok(())
}

fn decompress(infile: &Path) -> Result<(), Error> {
    let paths = ArtifactPaths::for_input(infile);

    let start = Instant::now();
    let payload = store::load_payload(infile)?;
    let table = store::load_model(&paths.model)?;
    let text = huffman::decompress(&payload, &table)?;

    store::write_output(&paths.output, &text)?;
    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        output = %paths.output.display(),
        "decompression time"
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let result = match cli.command {
        Commands::Compress {
            infile,
            symbolmodel,
        } => compress(&infile, symbolmodel.into()),
        Commands::Decompress { infile } => decompress(&infile),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
