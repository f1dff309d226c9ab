use std::sync::mpsc::Sender;
use crate::console::Action;
use crate::manager_backend::RequestId;
use crate::manager_backend::errors::TransportError;

/// Everything that wakes up the event loop
#[derive(Debug)]
pub enum Event {
    /// A raw status document from the feed
    Document(String),
    /// Completion of a backend request
    Response { id: RequestId, result: Result<String, TransportError> },
    /// Operator input
    Operator(Action),
    FeedClosed,
}

pub type Hub = Sender<Event>;
