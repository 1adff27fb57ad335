//! CLI command handlers

pub mod commands;

pub use commands::{
    extract, layout, load_layout, output_folder, run_extract, ExtractOptions, ExtractionReport,
    Variant,
};

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber; `RUST_LOG` overrides the default level
pub fn init_tracing(verbose: bool) {
    let default = if verbose {
        "merit_progression=debug"
    } else {
        "merit_progression=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed (tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
