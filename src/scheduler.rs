use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use log::debug;
use crate::notices::NoticeId;

/// Available timer tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    LoadingStep,
    DismissNotice(NoticeId),
    ConnectionCheck,
}

/// Handle to a scheduled task, a cancelled task never runs
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

struct Task {
    seq: u64,
    due: Duration,
    kind: TaskKind,
    token: CancelToken,
}

/// Timer queue driven by the event loop.
///
/// Time is a monotonic offset owned by the scheduler and only moves forward through
/// `advance_to`, so tasks fire on the loop's thread and never in parallel with handlers.
#[derive(Default)]
pub struct Scheduler {
    now: Duration,
    seq: u64,
    tasks: Vec<Task>,
}

impl Scheduler {
    pub fn new() -> Scheduler {
        Scheduler::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedules a task to fire after a delay and returns its cancel token
    ///
    /// # Arguments
    ///
    /// * 'kind' - the task
    /// * 'delay' - time from now until it fires
    pub fn schedule(&mut self, kind: TaskKind, delay: Duration) -> CancelToken {
        let token = CancelToken::default();
        self.seq += 1;
        self.tasks.push(Task { seq: self.seq, due: self.now + delay, kind, token: token.clone() });
        debug!("scheduled {:?} in {:?}", kind, delay);

        token
    }

    /// True if a live task of the given kind is waiting
    pub fn is_pending(&self, kind: TaskKind) -> bool {
        self.tasks.iter().any(|t| t.kind == kind && !t.token.is_cancelled())
    }

    /// Drops every waiting task matching the predicate
    ///
    /// # Arguments
    ///
    /// * 'matches' - selects the tasks to drop
    pub fn cancel_matching<F: Fn(&TaskKind) -> bool>(&mut self, matches: F) {
        self.tasks.retain(|t| !matches(&t.kind));
    }

    /// Time left until the next live task is due, None if nothing is scheduled
    pub fn time_to_next(&self) -> Option<Duration> {
        self.tasks.iter()
            .filter(|t| !t.token.is_cancelled())
            .map(|t| t.due.saturating_sub(self.now))
            .min()
    }

    /// Moves time forward and returns the tasks that became due, in firing order.
    /// Cancelled tasks are dropped silently.
    ///
    /// # Arguments
    ///
    /// * 'now' - the new current time, earlier values are ignored
    pub fn advance_to(&mut self, now: Duration) -> Vec<TaskKind> {
        if now > self.now {
            self.now = now;
        }
        self.tasks.retain(|t| !t.token.is_cancelled());

        let mut due: Vec<Task> = Vec::new();
        let mut i = 0;
        while i < self.tasks.len() {
            if self.tasks[i].due <= self.now {
                due.push(self.tasks.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|t| (t.due, t.seq));

        due.into_iter().map(|t| t.kind).collect()
    }

    /// Advances time relative to now, see `advance_to`
    #[cfg(test)]
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TaskKind> {
        self.advance_to(self.now + elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_fire_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(TaskKind::DismissNotice(1), Duration::from_millis(500));
        scheduler.schedule(TaskKind::LoadingStep, Duration::from_millis(250));
        scheduler.schedule(TaskKind::DismissNotice(2), Duration::from_millis(500));

        assert_eq!(scheduler.time_to_next(), Some(Duration::from_millis(250)));
        assert!(scheduler.advance(Duration::from_millis(100)).is_empty());
        assert_eq!(scheduler.advance(Duration::from_millis(500)),
                   vec![TaskKind::LoadingStep, TaskKind::DismissNotice(1), TaskKind::DismissNotice(2)]);
        assert_eq!(scheduler.time_to_next(), None);
    }

    #[test]
    fn cancelled_tasks_never_fire() {
        let mut scheduler = Scheduler::new();
        let token = scheduler.schedule(TaskKind::LoadingStep, Duration::from_millis(250));
        assert!(scheduler.is_pending(TaskKind::LoadingStep));

        token.cancel();
        assert!(!scheduler.is_pending(TaskKind::LoadingStep));
        assert!(scheduler.advance(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn time_never_goes_back() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(Duration::from_secs(2));
        scheduler.advance_to(Duration::from_secs(1));
        assert_eq!(scheduler.now(), Duration::from_secs(2));
    }

    #[test]
    fn matching_tasks_can_be_dropped() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(TaskKind::DismissNotice(1), Duration::from_millis(500));
        scheduler.schedule(TaskKind::ConnectionCheck, Duration::from_secs(1));

        scheduler.cancel_matching(|k| matches!(k, TaskKind::DismissNotice(_)));
        assert_eq!(scheduler.advance(Duration::from_secs(1)), vec![TaskKind::ConnectionCheck]);
    }
}
