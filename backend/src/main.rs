//! `wall` entry-point: loads configuration, opens the store and runs one
//! command against the wall.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use camino::Utf8PathBuf;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt};

use wall::WallSettings;
use wall::domain::WallService;
use wall::inbound::cli::{Cli, run};
use wall::outbound::storage::KeyValuePersistentStore;
use wall_store::DirStore;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let settings = WallSettings::load_from_iter([OsString::from("wall")])
        .wrap_err("failed to load wall settings")?;
    init_tracing(settings.log_json);

    let data_dir = utf8_dir(settings.data_dir(cli.data_dir))?;
    debug!(data_dir = %data_dir, "opening wall store");
    let store = DirStore::open(&data_dir).wrap_err("failed to open wall store")?;
    let wall = WallService::open(
        Arc::new(KeyValuePersistentStore::new(store)),
        Arc::new(DefaultClock),
    )
    .wrap_err("failed to load wall")?;

    let mut stdout = io::stdout().lock();
    run(&wall, cli.command, &mut stdout)?;
    Ok(())
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

fn utf8_dir(path: PathBuf) -> Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path)
        .map_err(|path| eyre!("data directory '{}' is not valid UTF-8", path.display()))
}
