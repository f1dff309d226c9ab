use std::env;
use anyhow::Context as _;
use log::{error, info};
use crate::config::load_config;
use crate::initialization::init;
use crate::logging::setup_logger;

mod config;
mod console;
mod context;
mod errors;
mod events;
mod feed;
mod initialization;
mod loading;
mod logging;
mod manager_backend;
mod models;
mod notices;
mod notification;
mod page;
mod profiles;
mod renderer;
mod scan;
mod scan_view;
mod scheduler;
mod status_table;
mod watch;
mod worker;

const DEFAULT_CONFIG_FILE: &str = "config.toml";

fn main() -> anyhow::Result<()> {
    let config_path = env::args().nth(1)
        .or_else(|| env::var("CONFIG_FILE").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

    let config = load_config(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path))?;

    let _handle = setup_logger(&config.general)
        .context("failed to set up logging")?;
    info!("mc3000-client {} starting", env!("CARGO_PKG_VERSION"));

    let (mut mgr, mut ctx, events) = init(&config)?;

    if let Err(e) = worker::run(&mut mgr, &mut ctx, events) {
        error!("{}", e);
        return Err(e.into());
    }
    info!("mc3000-client stopped");

    Ok(())
}
