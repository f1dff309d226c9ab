use std::io::{stdin, BufReader};
use std::sync::mpsc::{self, Receiver};
use log::{info, warn};
use crate::config::Config;
use crate::console::spawn_console;
use crate::context::Context;
use crate::errors::ClientInitError;
use crate::events::Event;
use crate::feed::DocumentFeed;
use crate::manager_backend::Backend;
use crate::scheduler::TaskKind;
use crate::watch::CONNECTION_CHECK_INTERVAL;

/// Managers living next to the page context on the event loop
pub struct Mgr {
    pub backend: Backend,
}

/// Builds the backend dispatcher, the document feed, the operator console and the
/// start page, and returns them together with the event loop receiver
///
/// # Arguments
///
/// * 'config' - the loaded configuration
pub fn init(config: &Config) -> Result<(Mgr, Context, Receiver<Event>), ClientInitError> {
    let (hub, events) = mpsc::channel();

    let backend = Backend::new(&config.backend, hub.clone());

    match &config.backend.feed_address {
        Some(address) => {
            DocumentFeed::new(hub.clone())
                .connect(address)
                .map_err(|e| ClientInitError(format!("{:#}", e)))?;
        },
        None => warn!("no feed address configured, telemetry will not be received"),
    }

    spawn_console(BufReader::new(stdin()), hub);

    let mut ctx = Context::new(&config.general.start_page, config.charger.slots);
    ctx.scheduler.schedule(TaskKind::ConnectionCheck, CONNECTION_CHECK_INTERVAL);
    info!("client for {} with {} slots, start page {}", config.backend.base_url, config.charger.slots, config.general.start_page);

    Ok((Mgr { backend }, ctx, events))
}
