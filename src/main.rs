use clap::Parser;
use tracing_subscriber::EnvFilter;

use circos_mag::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Progress is reported at info level; --verbose adds per-contig detail
    let filter = if cli.verbose {
        EnvFilter::new("circos_mag=debug,info")
    } else if cli.quiet {
        EnvFilter::new("circos_mag=error")
    } else {
        EnvFilter::new("circos_mag=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Plot(args) => {
            cli::plot::run(args)?;
        }
        cli::Commands::Style(args) => {
            cli::style::run(args)?;
        }
    }

    Ok(())
}
