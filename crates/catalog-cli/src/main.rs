mod commands;
mod output;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "catalog",
    version,
    about = "Price vendor PDF catalogs into spreadsheet-ready lines"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a catalog PDF into product records (without pricing)
    Parse {
        /// Path to the catalog PDF
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write parsed output to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Run pdftotext in -layout mode
        #[arg(long)]
        layout: bool,
    },
    /// Parse a catalog PDF and price every record using a settings workbook
    Process {
        /// Path to the catalog PDF
        input_file: PathBuf,

        /// Settings workbook (xlsx) with the settings and translator sheets
        #[arg(short, long, value_name = "XLSX", default_value = "settings.xlsx")]
        workbook: PathBuf,

        /// Write the priced lines to a text FILE instead of the workbook's work sheet
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Skip the online rate lookup and use the workbook rate
        #[arg(long)]
        offline: bool,

        /// Margin as a fraction (e.g. 0.03), overriding the workbook
        #[arg(long, value_name = "FRACTION")]
        margin: Option<Decimal>,

        /// Run pdftotext in -layout mode
        #[arg(long)]
        layout: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            input_file,
            output,
            out,
            layout,
        } => commands::parse::run(input_file, &output, out, layout),
        Commands::Process {
            input_file,
            workbook,
            out,
            offline,
            margin,
            layout,
        } => commands::process::run(commands::process::ProcessArgs {
            pdf_file: input_file,
            workbook,
            output_file: out,
            offline,
            margin,
            layout,
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
