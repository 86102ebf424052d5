use clap::Parser;
use lice_fixer::{Rewriter, TARGET_FILE};
use miette::Result;
use tracing::info;

/// lice-fixer - rewrite legacy LICE text calls in SnM/SnM_ModernPlaylistUI.cpp
#[derive(Parser, Debug)]
#[command(name = "lice-fixer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only errors are logged
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("lice-fixer v{}", env!("CARGO_PKG_VERSION"));

    let report = Rewriter::new(TARGET_FILE).run()?;
    if !report.changed {
        info!("No legacy calls found, file rewritten unchanged");
    }

    println!("{report}");

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // stdout carries only the status lines
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
