use std::time::Duration;
use log::{debug, info};
use crate::context::Context;
use crate::notices::{NoticeId, Severity};
use crate::scheduler::TaskKind;

pub const NOTICE_CLOSE_DELAY: Duration = Duration::from_millis(5000);

/// Posts a notice that removes itself after `NOTICE_CLOSE_DELAY`
///
/// # Arguments
///
/// * 'ctx' - event loop context
/// * 'message' - text of the notice
/// * 'severity' - styling of the notice
pub fn flash(ctx: &mut Context, message: &str, severity: Severity) -> NoticeId {
    info!("notice [{:?}] {}", severity, message);
    let id = ctx.page.notices.push(message, severity);
    ctx.scheduler.schedule(TaskKind::DismissNotice(id), NOTICE_CLOSE_DELAY);

    id
}

/// Removes a notice now. The pending timer is left in place and finds nothing
/// to remove when it fires.
///
/// # Arguments
///
/// * 'ctx' - event loop context
/// * 'id' - the notice
pub fn dismiss(ctx: &mut Context, id: NoticeId) -> bool {
    let removed = ctx.page.notices.remove(id);
    if !removed {
        debug!("notice {} already gone", id);
    }

    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::ROOT_PATH;

    fn fire_due(ctx: &mut Context, elapsed: Duration) {
        for task in ctx.scheduler.advance(elapsed) {
            if let TaskKind::DismissNotice(id) = task {
                dismiss(ctx, id);
            }
        }
    }

    #[test]
    fn notice_expires_after_delay() {
        let mut ctx = Context::new(ROOT_PATH, 4);
        let id = flash(&mut ctx, "Profile 'LiIon 2600' was successfully set to slot 1", Severity::Success);
        assert!(ctx.page.notices.contains(id));

        fire_due(&mut ctx, Duration::from_millis(4999));
        assert!(ctx.page.notices.contains(id));

        fire_due(&mut ctx, Duration::from_millis(1));
        assert!(!ctx.page.notices.contains(id));
    }

    #[test]
    fn manual_dismissal_before_timer_is_safe() {
        let mut ctx = Context::new(ROOT_PATH, 4);
        let id = flash(&mut ctx, "Charger not found", Severity::Danger);
        let other = flash(&mut ctx, "still here", Severity::Warning);

        assert!(dismiss(&mut ctx, id));
        assert!(!ctx.page.notices.contains(id));

        fire_due(&mut ctx, Duration::from_millis(5000));
        assert!(!ctx.page.notices.contains(id));
        assert!(!ctx.page.notices.contains(other));
        assert!(!dismiss(&mut ctx, id));
    }
}
