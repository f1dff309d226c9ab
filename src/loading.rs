use std::time::Duration;
use log::debug;
use crate::context::Context;
use crate::scheduler::TaskKind;

pub const LOADING_INTERVAL: Duration = Duration::from_millis(250);

/// Starts the dot animation unless it is already running
///
/// # Arguments
///
/// * 'ctx' - event loop context
pub fn start(ctx: &mut Context) {
    if ctx.animator.as_ref().is_some_and(|t| !t.is_cancelled()) && ctx.scheduler.is_pending(TaskKind::LoadingStep) {
        return;
    }
    ctx.animator = Some(ctx.scheduler.schedule(TaskKind::LoadingStep, LOADING_INTERVAL));
}

/// Runs one animation step. While the indicator is on the page the dots advance and
/// the next step is scheduled, otherwise the animation ends.
///
/// # Arguments
///
/// * 'ctx' - event loop context
pub fn step(ctx: &mut Context) -> bool {
    let Some(indicator) = ctx.page.scan.as_mut().and_then(|s| s.loading_mut()) else {
        debug!("loading indicator gone, animation stopped");
        ctx.animator = None;
        return false;
    };

    indicator.advance();
    ctx.animator = Some(ctx.scheduler.schedule(TaskKind::LoadingStep, LOADING_INTERVAL));

    true
}
