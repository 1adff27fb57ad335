use clap::{Parser, Subcommand};
use colored::Colorize;
use merit_progression::cli::{self, ExtractOptions, Variant};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "merit-progression")]
#[command(about = "Extract merit-progression payroll records from .ods sheets into .xlsx import tables")]
#[command(long_about = "Merit Progression - payroll macro extraction
Fixed-layout .ods sheets in, bulk-import .xlsx tables out.

COMMANDS:
  extract   - Read every sheet of an .ods file and write the output tables
  layout    - Print a built-in layout as YAML (starting point for --layout)

RULES (built-in layouts):
  One output row per non-zero value column (J, N, S) of rows 13-63 / 71-121,
  only when column A or B of that row is filled.
  Shared fields come from C5 (MES/ANO), C6 (sequência), C9 (justificativa)
  and C10 (documento legal).

EXAMPLES:
  merit-progression extract folha.ods
  merit-progression extract folha.ods --variant single --open
  merit-progression extract folha.ods --dry-run --json
  merit-progression layout > my_layout.yaml")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Read every sheet of an .ods file and write the output tables.

The dual layout (default) writes two files next to the input:
  Progressão por Mérito UFGD.xlsx  (rows 13-63)
  Progressão por Mérito HU.xlsx    (rows 71-121)

The single layout writes resultado_progressao.xlsx with both row spans.

Per-sheet record counts and the written paths are reported at the end.")]
    /// Extract records from an .ods file
    Extract {
        /// Path to the source .ods file
        input: PathBuf,

        /// Built-in layout to use
        #[arg(long, value_enum, default_value_t = Variant::Dual)]
        variant: Variant,

        /// YAML layout file (replaces --variant)
        #[arg(short, long, env = "MERIT_LAYOUT")]
        layout: Option<PathBuf>,

        /// Folder for the output files (default: the input's folder)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Report what would be written without writing files
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Open the output folder when done
        #[arg(long)]
        open: bool,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print a built-in layout as YAML
    Layout {
        /// Built-in layout to print
        #[arg(long, value_enum, default_value_t = Variant::Dual)]
        variant: Variant,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input,
            variant,
            layout,
            output_dir,
            dry_run,
            json,
            open,
            verbose,
        } => {
            cli::init_tracing(verbose);
            cli::extract(ExtractOptions {
                input,
                variant,
                layout_file: layout,
                output_dir,
                dry_run,
                json,
                open_folder: open,
                verbose,
            })
        }

        Commands::Layout { variant } => {
            cli::init_tracing(false);
            cli::layout(variant)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let error = anyhow::Error::new(e).context("merit-progression failed");
            eprintln!("{} {:#}", "❌".red(), error);
            ExitCode::FAILURE
        }
    }
}
