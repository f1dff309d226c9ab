use log::info;
use crate::page::Page;
use crate::scheduler::{CancelToken, Scheduler, TaskKind};
use crate::watch::ConnectionWatch;

/// Everything owned by the event loop thread: the loaded page, its timers and
/// the watchdog state that survives reloads
pub struct Context {
    pub page: Page,
    pub scheduler: Scheduler,
    pub watch: ConnectionWatch,
    pub slots: usize,
    pub(crate) animator: Option<CancelToken>,
}

impl Context {
    /// Returns a new context with the given page loaded
    ///
    /// # Arguments
    ///
    /// * 'path' - path of the start page
    /// * 'slots' - number of charger slots
    pub fn new(path: &str, slots: usize) -> Context {
        Context {
            page: Page::load(path, slots),
            scheduler: Scheduler::new(),
            watch: ConnectionWatch::new(),
            slots,
            animator: None,
        }
    }

    /// Replaces the page with a freshly loaded one. The old page's animation and notice
    /// timers are cancelled
    ///
    /// # Arguments
    ///
    /// * 'path' - path to load
    pub fn reload(&mut self, path: &str) {
        info!("loading page {}", path);
        if let Some(token) = self.animator.take() {
            token.cancel();
        }
        self.scheduler.cancel_matching(|k| matches!(k, TaskKind::DismissNotice(_)));
        self.page = Page::load(path, self.slots);
    }
}
