mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "doorsched",
    version,
    about = "Extract door hardware line items from supplier schedules"
)]
struct Cli {
    /// Log extraction decisions (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one or more schedules (PDF or XLSX) into hardware records
    Parse {
        /// Paths to PDF or XLSX schedules
        #[arg(required = true)]
        input_files: Vec<PathBuf>,

        /// Supplier layout: auto (default), generic, allegion, dormakaba, ara, jk
        #[arg(short, long, default_value = "auto")]
        supplier: String,

        /// OCR every page, not just pages with little native text
        #[arg(long)]
        force_ocr: bool,

        /// Output format: table (default), json or jsonl
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write records to a file instead of stdout
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// JSON file overriding parse and extraction thresholds
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// List supported supplier layouts
    Suppliers,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match cli.command {
        Commands::Parse {
            input_files,
            supplier,
            force_ocr,
            output,
            out,
            config,
        } => commands::parse::run(commands::parse::ParseArgs {
            input_files,
            supplier,
            force_ocr,
            output_format: output,
            output_file: out,
            config_file: config,
        }),
        Commands::Suppliers => commands::suppliers::list(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
