use std::io::BufRead;
use std::str::FromStr;
use std::thread;
use std::thread::JoinHandle;
use log::{debug, warn};
use crate::events::{Event, Hub};
use crate::notices::NoticeId;

/// Operator commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Scan,
    /// 0-based entry of the scan listing
    Select(usize),
    /// Profile id and 0-based slot, None for all slots
    Assign { profile: String, slot: Option<usize> },
    Dismiss(NoticeId),
    Show,
    Quit,
}

impl FromStr for Action {
    type Err = String;

    /// Parses a command line, entries and slots are given 1-based
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fn index(arg: Option<&str>, what: &str) -> Result<usize, String> {
            let n = arg.ok_or(format!("missing {}", what))?
                .parse::<usize>()
                .map_err(|e| format!("bad {}: {}", what, e))?;
            n.checked_sub(1).ok_or(format!("{} starts at 1", what))
        }

        let mut words = s.split_whitespace();
        match words.next() {
            Some("scan") => Ok(Action::Scan),
            Some("select") => Ok(Action::Select(index(words.next(), "entry")?)),
            Some("assign") => {
                let profile = words.next().ok_or("missing profile")?.to_string();
                let slot = match words.next() {
                    None | Some("all") => None,
                    Some(n) => Some(index(Some(n), "slot")?),
                };
                Ok(Action::Assign { profile, slot })
            },
            Some("dismiss") => {
                let id = words.next().ok_or("missing notice")?
                    .parse::<NoticeId>()
                    .map_err(|e| format!("bad notice: {}", e))?;
                Ok(Action::Dismiss(id))
            },
            Some("show") => Ok(Action::Show),
            Some("quit") | Some("exit") => Ok(Action::Quit),
            Some(other) => Err(format!("unknown command '{}'", other)),
            None => Err("empty command".to_string()),
        }
    }
}

/// Reads operator commands line by line and posts them to the event loop.
/// End of input is read as quit.
///
/// # Arguments
///
/// * 'reader' - where commands come from, usually stdin
/// * 'hub' - event loop sender
pub fn spawn_console<R: BufRead + Send + 'static>(reader: R, hub: Hub) -> JoinHandle<()> {
    thread::spawn(move || {
        for line in reader.lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Action>() {
                Ok(action) => {
                    debug!("operator: {:?}", action);
                    if hub.send(Event::Operator(action)).is_err() {
                        return;
                    }
                },
                Err(e) => {
                    warn!("{}", e);
                    eprintln!("?? {}", e);
                },
            }
        }
        hub.send(Event::Operator(Action::Quit)).ok();
    })
}
