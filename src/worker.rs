use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};
use chrono::Local;
use log::{debug, info, warn};
use crate::console::Action;
use crate::context::Context;
use crate::errors::ClientWorkerError;
use crate::events::Event;
use crate::initialization::Mgr;
use crate::notices::Severity;
use crate::notification::{dismiss, flash};
use crate::renderer::{self, Applied};
use crate::scheduler::TaskKind;
use crate::watch::{CONNECTION_CHECK_INTERVAL, CONNECTION_LOST_MESSAGE};
use crate::{loading, profiles, scan};

/// Longest wait for an event when no timer is pending
const IDLE_WAIT: Duration = Duration::from_secs(1);

/// Runs the event loop until the operator quits or all event sources are gone.
///
/// Events and timers are handled one at a time, each to completion. Time is brought
/// up to date before every event so handlers schedule from the actual time. A malformed
/// status document ends the loop with an error.
///
/// # Arguments
///
/// * 'mgr' - managers, i.e. the backend dispatcher
/// * 'ctx' - page context
/// * 'events' - receiving end of the hub
pub fn run(mgr: &mut Mgr, ctx: &mut Context, events: Receiver<Event>) -> Result<(), ClientWorkerError> {
    let start = Instant::now();
    on_load(mgr, ctx);
    print_page(ctx, "Loaded");

    loop {
        run_due_tasks(ctx, start.elapsed());
        follow_navigation(mgr, ctx);

        let wait = ctx.scheduler.time_to_next().unwrap_or(IDLE_WAIT).min(IDLE_WAIT);
        match events.recv_timeout(wait) {
            Ok(event) => {
                run_due_tasks(ctx, start.elapsed());
                if !handle_event(mgr, ctx, event)? {
                    info!("operator quit");
                    return Ok(());
                }
            },
            Err(RecvTimeoutError::Timeout) => {},
            Err(RecvTimeoutError::Disconnected) => {
                warn!("all event sources are gone");
                return Ok(());
            },
        }
    }
}

/// Handles a single event, returns false when the loop should stop
///
/// # Arguments
///
/// * 'mgr' - managers
/// * 'ctx' - page context
/// * 'event' - the event
pub fn handle_event(mgr: &mut Mgr, ctx: &mut Context, event: Event) -> Result<bool, ClientWorkerError> {
    match event {
        Event::Document(raw) => {
            let applied = renderer::apply(&raw, &mut ctx.page)
                .map_err(|e| ClientWorkerError::new(e.to_string(), &raw))?;

            match applied {
                Applied::Slot { slot, status } => {
                    if let Some(message) = ctx.watch.slot_updated(ctx.scheduler.now(), slot, &status) {
                        flash(ctx, &message, Severity::Warning);
                    }
                    // The charger reports slots in order, a full table is printed once per round
                    if ctx.slots.checked_sub(1) == Some(slot) {
                        print_page(ctx, "Status");
                    }
                },
                Applied::ScanResults => print_page(ctx, "Scan results"),
                Applied::Ignored => {},
            }
        },

        Event::Response { id, result } => {
            mgr.backend.complete(id, result, ctx);
        },

        Event::Operator(action) => {
            match action {
                Action::Scan => { scan::trigger(ctx, &mut mgr.backend); },
                Action::Select(entry) => { scan::select(ctx, &mut mgr.backend, entry); },
                Action::Assign { profile, slot } => { profiles::assign(&mut mgr.backend, &profile, slot); },
                Action::Dismiss(id) => { dismiss(ctx, id); },
                Action::Show => print_page(ctx, "Page"),
                Action::Quit => return Ok(false),
            }
        },

        Event::FeedClosed => warn!("document feed closed"),
    }

    Ok(true)
}

/// Moves the scheduler to the given time and runs whatever became due
///
/// # Arguments
///
/// * 'ctx' - page context
/// * 'now' - time since the loop started
pub fn run_due_tasks(ctx: &mut Context, now: Duration) {
    for task in ctx.scheduler.advance_to(now) {
        match task {
            TaskKind::LoadingStep => { loading::step(ctx); },
            TaskKind::DismissNotice(id) => { dismiss(ctx, id); },
            TaskKind::ConnectionCheck => {
                if ctx.watch.check(now) {
                    flash(ctx, CONNECTION_LOST_MESSAGE, Severity::Danger);
                    print_page(ctx, "Connection");
                }
                ctx.scheduler.schedule(TaskKind::ConnectionCheck, CONNECTION_CHECK_INTERVAL);
            },
        }
    }
}

/// Reloads the page if a handler asked for navigation
fn follow_navigation(mgr: &mut Mgr, ctx: &mut Context) {
    if let Some(path) = ctx.page.take_navigation() {
        ctx.reload(&path);
        on_load(mgr, ctx);
        print_page(ctx, "Loaded");
    }
}

/// A freshly loaded scan page starts scanning right away
fn on_load(mgr: &mut Mgr, ctx: &mut Context) {
    if ctx.page.scan.is_some() {
        debug!("scan view present, starting scan");
        scan::trigger(ctx, &mut mgr.backend);
    }
}

/// Prints the page with a caption
///
/// # Arguments
///
/// * 'ctx' - page context
/// * 'caption' - the caption to print
fn print_page(ctx: &Context, caption: &str) {
    let report_time = format!("{}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    let caption = format!("{} {} {} ", report_time, caption, ctx.page.path());

    println!("{:=<100}\n{}", caption, ctx.page);
}
