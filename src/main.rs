use clap::Parser;
use datefield::cli::commands::Cli;
use datefield::cli::handlers;
use datefield::logging;

fn main() {
    let cli = Cli::parse();

    if let Some(path) = &cli.log {
        if let Err(e) = logging::init(path, cli.trace) {
            eprintln!("error: could not open log {}: {}", path.display(), e);
            std::process::exit(1);
        }
        log::info!("datefield {} starting", env!("CARGO_PKG_VERSION"));
    }

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
