use std::collections::HashMap;
use std::time::Duration;
use log::{info, warn};

/// Time without telemetry after which the charger is considered lost
pub const CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);
/// How often the connection is checked
pub const CONNECTION_CHECK_INTERVAL: Duration = Duration::from_secs(1);
pub const CONNECTION_LOST_MESSAGE: &str = "Lost connection with charger!";

/// Statuses seen during normal operation, any other status is worth a notice
const REGULAR_STATUSES: [&str; 3] = ["standby", "charge", "discharge"];

/// Tracks telemetry arrival and per slot status changes
#[derive(Debug)]
pub struct ConnectionWatch {
    last_update: Option<Duration>,
    waiting: bool,
    previous: HashMap<usize, String>,
}

impl ConnectionWatch {
    pub fn new() -> ConnectionWatch {
        ConnectionWatch { last_update: None, waiting: true, previous: HashMap::new() }
    }

    /// Records a slot update and returns a message if the slot changed to an irregular status
    ///
    /// # Arguments
    ///
    /// * 'now' - event loop time of the update
    /// * 'slot' - 0-based slot index
    /// * 'status' - the reported status
    pub fn slot_updated(&mut self, now: Duration, slot: usize, status: &str) -> Option<String> {
        self.last_update = Some(now);

        let changed = self.previous.get(&slot).is_none_or(|p| p != status);
        if !changed {
            return None;
        }
        self.previous.insert(slot, status.to_string());

        if REGULAR_STATUSES.iter().any(|s| s.eq_ignore_ascii_case(status)) {
            None
        } else {
            let number = slot as u128 + 1;
            info!("slot {} changed status to {}", number, status);
            Some(format!("Slot {} changed status to '{}'", number, status))
        }
    }

    /// Checks for a telemetry gap, returns true only when the connection was just lost.
    /// Nothing is reported before the first update has arrived.
    ///
    /// # Arguments
    ///
    /// * 'now' - event loop time
    pub fn check(&mut self, now: Duration) -> bool {
        let Some(last_update) = self.last_update else {
            return false;
        };

        if now.saturating_sub(last_update) > CONNECTION_TIMEOUT {
            let newly_lost = !self.waiting;
            self.waiting = true;
            if newly_lost {
                warn!("no telemetry for {:?}", now.saturating_sub(last_update));
            }
            newly_lost
        } else {
            self.waiting = false;
            false
        }
    }
}

impl Default for ConnectionWatch {
    fn default() -> Self {
        ConnectionWatch::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn irregular_status_changes_are_reported_once() {
        let mut watch = ConnectionWatch::new();
        assert_eq!(watch.slot_updated(secs(0), 0, "Charge"), None);
        assert_eq!(watch.slot_updated(secs(1), 0, "Completed"), Some("Slot 1 changed status to 'Completed'".to_string()));
        assert_eq!(watch.slot_updated(secs(2), 0, "Completed"), None);
        assert_eq!(watch.slot_updated(secs(3), 1, "Battery too hot"), Some("Slot 2 changed status to 'Battery too hot'".to_string()));
        assert_eq!(watch.slot_updated(secs(4), 0, "Standby"), None);
    }

    #[test]
    fn nothing_is_lost_before_first_update() {
        let mut watch = ConnectionWatch::new();
        assert!(!watch.check(secs(60)));
    }

    #[test]
    fn loss_is_reported_once_per_outage() {
        let mut watch = ConnectionWatch::new();
        watch.slot_updated(secs(0), 0, "Charge");
        assert!(!watch.check(secs(1)));
        assert!(watch.check(secs(12)));
        assert!(!watch.check(secs(13)));

        watch.slot_updated(secs(14), 0, "Charge");
        assert!(!watch.check(secs(15)));
        assert!(watch.check(secs(30)));
    }

    #[test]
    fn largest_slot_index_is_numbered_without_overflow() {
        let mut watch = ConnectionWatch::new();
        assert_eq!(watch.slot_updated(secs(0), usize::MAX, "Fail"),
                   Some(format!("Slot {} changed status to 'Fail'", usize::MAX as u128 + 1)));
    }
}
