use std::io::{BufRead, BufReader};
use std::net::TcpStream;
use std::thread;
use std::thread::JoinHandle;
use anyhow::Context;
use log::{debug, info, warn};
use crate::events::{Event, Hub};

/// Handle through which status documents reach the event loop.
///
/// Documents are delivered in the order they are pushed.
#[derive(Clone)]
pub struct DocumentFeed {
    hub: Hub,
}

impl DocumentFeed {
    pub fn new(hub: Hub) -> DocumentFeed {
        DocumentFeed { hub }
    }

    /// Posts one raw document, returns false once the event loop is gone
    ///
    /// # Arguments
    ///
    /// * 'raw' - the json document
    pub fn push(&self, raw: &str) -> bool {
        self.hub.send(Event::Document(raw.to_string())).is_ok()
    }

    /// Reads newline delimited documents on a background thread until the reader ends
    ///
    /// # Arguments
    ///
    /// * 'reader' - source of documents
    pub fn spawn_reader<R: BufRead + Send + 'static>(self, reader: R) -> JoinHandle<()> {
        thread::spawn(move || {
            for line in reader.lines() {
                match line {
                    Ok(line) if line.trim().is_empty() => continue,
                    Ok(line) => {
                        if !self.push(line.trim()) {
                            return;
                        }
                    },
                    Err(e) => {
                        warn!("feed read error: {}", e);
                        break;
                    },
                }
            }
            debug!("feed ended");
            self.hub.send(Event::FeedClosed).ok();
        })
    }

    /// Connects to the backend's document stream and starts reading it
    ///
    /// # Arguments
    ///
    /// * 'address' - host:port of the stream
    pub fn connect(self, address: &str) -> anyhow::Result<JoinHandle<()>> {
        let stream = TcpStream::connect(address)
            .with_context(|| format!("failed to connect to document feed {}", address))?;
        info!("connected to document feed {}", address);

        Ok(self.spawn_reader(BufReader::new(stream)))
    }
}
