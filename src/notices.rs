use std::fmt;
use std::fmt::Formatter;
use chrono::{DateTime, Local};

pub type NoticeId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Danger,
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for Severity {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Warning => write!(f, "warning"),
            Severity::Danger  => write!(f, "danger "),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: NoticeId,
    pub message: String,
    pub severity: Severity,
    pub created: DateTime<Local>,
}

/// Transient notices currently on the page
#[derive(Debug, Default)]
pub struct Notices {
    next_id: NoticeId,
    items: Vec<Notice>,
}

impl Notices {
    pub fn new() -> Notices {
        Notices::default()
    }

    /// Adds a notice and returns its id
    ///
    /// # Arguments
    ///
    /// * 'message' - the text of the notice
    /// * 'severity' - how the notice is styled
    pub fn push(&mut self, message: &str, severity: Severity) -> NoticeId {
        self.next_id += 1;
        self.items.push(Notice {
            id: self.next_id,
            message: message.to_string(),
            severity,
            created: Local::now(),
        });
        self.next_id
    }

    /// Removes a notice, returns false if it was already gone
    ///
    /// # Arguments
    ///
    /// * 'id' - id of the notice to remove
    pub fn remove(&mut self, id: NoticeId) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    #[cfg(test)]
    pub fn contains(&self, id: NoticeId) -> bool {
        self.items.iter().any(|n| n.id == id)
    }

    #[cfg(test)]
    pub fn get(&self, id: NoticeId) -> Option<&Notice> {
        self.items.iter().find(|n| n.id == id)
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.items.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for Notices {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for n in &self.items {
            writeln!(f, "({}) {} {} [{}]", n.id, n.created.format("%H:%M:%S"), n.message, n.severity)?;
        }

        Ok(())
    }
}
