//! Catan board generator command-line tool.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod command;
mod render;
mod store;

use app::Settings;
use command::{Command, CommandError, USAGE};

fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for the board
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = match Command::parse(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(CommandError::Missing) => {
            eprintln!("{}", USAGE);
            return Ok(());
        }
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    let settings = Settings::from_env()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(app::run(command, &settings));
    // A generation that missed its deadline may still hold a blocking worker
    runtime.shutdown_background();

    println!("{}", result?);
    Ok(())
}
