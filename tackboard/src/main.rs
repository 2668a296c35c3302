use clap::Parser;
use color_eyre::eyre::{self, Context};
use std::path::PathBuf;
use tackboard_config::Configuration;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// TackBoard social bookmarking server
#[derive(Parser)]
#[command(about, author, version)]
struct Args {
    /// Path to the configuration file
    #[arg(long, short)]
    config: PathBuf,
}

async fn boot() -> eyre::Result<()> {
    let args = Args::parse();
    let config = Configuration::load(args.config)
        .await
        .wrap_err("Failed to load the configuration")?;
    tackboard_observability::initialise()?;

    let db_pool = tackboard_db::connect(&config.database)
        .await
        .map_err(tackboard_error::Error::into_error)
        .wrap_err("Failed to connect to and migrate the database")?;

    let state = tackboard::initialise_state(&config, db_pool)?;
    let shutdown_signal = tackboard::signal::shutdown();

    tokio::spawn(tackboard::http::run(
        state,
        config.server.clone(),
        shutdown_signal,
    ))
    .await??;

    Ok(())
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_stack_size(4 * 1024 * 1024) // Set the stack size to 4MiB
        .build()?;

    runtime.block_on(boot())
}
