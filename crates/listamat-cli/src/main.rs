mod commands;
mod logging;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "listamat",
    version,
    about = "Extract the material list (Lista de Materiais) from PDF drawings"
)]
struct Cli {
    /// Log extraction decisions to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the material list and print it
    Extract {
        /// Path to the PDF drawing
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// JSON file with extraction options
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Extract the material list and save it as a formatted xlsx workbook
    Export {
        /// Path to the PDF drawing
        input_file: PathBuf,

        /// Where to write the workbook (default: <input name>.xlsx next to the input)
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// JSON file with extraction options
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Print the default extraction options as JSON
    Config,
}

fn main() {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose);

    let result = match cli.command {
        Commands::Extract {
            input_file,
            output,
            config,
        } => commands::extract::run(&input_file, &output, config.as_deref()),
        Commands::Export {
            input_file,
            out,
            config,
        } => commands::export::run(&input_file, out, config.as_deref()),
        Commands::Config => commands::config::run(),
    };

    match result {
        Ok(commands::Outcome::Found) => {}
        Ok(commands::Outcome::Empty) => {
            eprintln!("Could not extract the material list. Check that the PDF contains the expected table.");
            std::process::exit(2);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
