use std::fmt;
use std::fmt::Formatter;
use crate::models::status_document::MalformedPayload;

/// Error depicting errors that occur while loading the configuration
///
#[derive(Debug)]
pub struct ConfigError(pub String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ConfigError: {}", self.0)
    }
}
impl std::error::Error for ConfigError {}
impl From<&str> for ConfigError {
    fn from(e: &str) -> Self { ConfigError(e.to_string()) }
}
impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self { ConfigError(e.to_string()) }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self { ConfigError(e.to_string()) }
}

/// Error depicting errors that occur while setting up logging, the backend and the page
///
#[derive(Debug)]
pub struct ClientInitError(pub String);

impl fmt::Display for ClientInitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ClientInitError: {}", self.0)
    }
}
impl std::error::Error for ClientInitError {}
impl From<std::io::Error> for ClientInitError {
    fn from(e: std::io::Error) -> Self { ClientInitError(e.to_string()) }
}
impl From<log4rs::config::runtime::ConfigErrors> for ClientInitError {
    fn from(e: log4rs::config::runtime::ConfigErrors) -> Self { ClientInitError(e.to_string()) }
}
impl From<log::SetLoggerError> for ClientInitError {
    fn from(e: log::SetLoggerError) -> Self { ClientInitError(e.to_string()) }
}

/// Error raised out of the event loop, i.e. when the client can't go on
///
#[derive(Debug)]
pub struct ClientWorkerError {
    msg: String,
    document: Option<String>,
}

impl ClientWorkerError {
    pub fn new(msg: String, document: &str) -> ClientWorkerError {
        ClientWorkerError {
            msg,
            document: Some(document.to_string()),
        }
    }
}
impl fmt::Display for ClientWorkerError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "ClientWorkerError: {}", self.msg)?;
        if let Some(document) = &self.document {
            write!(f, "\nDocument: {}", document)?;
        }

        Ok(())
    }
}
impl std::error::Error for ClientWorkerError {}
impl From<MalformedPayload> for ClientWorkerError {
    fn from(e: MalformedPayload) -> Self {
        ClientWorkerError { msg: e.to_string(), document: None }
    }
}
impl From<&str> for ClientWorkerError {
    fn from(e: &str) -> Self {
        ClientWorkerError { msg: e.to_string(), document: None }
    }
}
