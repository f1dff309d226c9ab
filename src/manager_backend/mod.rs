pub mod errors;

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use log::{debug, error};
use serde_json::Value;
use ureq::Agent;
use crate::config;
use crate::context::Context;
use crate::events::{Event, Hub};
use crate::manager_backend::errors::TransportError;

/// Header carrying the process wide token
pub const AUTH_HEADER: &str = "Authentication";

pub type RequestId = u64;

/// Continuation run with the parsed response body on success
pub type Callback = Box<dyn FnOnce(Value, &mut Context)>;

/// Http methods in use, every backend endpoint is read with GET
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub token: String,
}

/// Performs one HTTP exchange and returns the response body
pub trait Transport: Send + Sync {
    fn execute(&self, request: &Request) -> Result<String, TransportError>;
}

/// Blocking, user visible report of a failed request
pub trait Alert {
    fn alert(&self, message: &str);
}

pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    /// Returns a new transport
    ///
    /// # Arguments
    ///
    /// * 'timeout' - global timeout of a single request
    pub fn new(timeout: Duration) -> Self {
        let agent_config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();

        let agent = agent_config.into();

        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &Request) -> Result<String, TransportError> {
        let token = request.token.as_str();
        let response = match request.method {
            Method::Get => {
                self.agent
                    .get(request.url.as_str())
                    .header(AUTH_HEADER, token)
                    .call()
            },
        };

        let mut response = response?;
        Ok(response.body_mut().read_to_string()?)
    }
}

/// Alert printed to standard error
pub struct ConsoleAlert;

impl Alert for ConsoleAlert {
    fn alert(&self, message: &str) {
        error!("request failed: {}", message);
        eprintln!("!! {}", message);
    }
}

/// Dispatches requests to the backend
///
/// Requests run on their own thread and report back through the hub, the outcome
/// is resolved on the event loop by `complete`.
pub struct Backend {
    base_url: String,
    token: String,
    transport: Arc<dyn Transport>,
    alert: Box<dyn Alert>,
    hub: Hub,
    next_id: RequestId,
    pending: HashMap<RequestId, Option<Callback>>,
}

impl Backend {
    /// Returns a new instance of the Backend struct talking http
    ///
    /// # Arguments
    ///
    /// * 'config' - backend configuration
    /// * 'hub' - event loop sender where completions are posted
    pub fn new(config: &config::Backend, hub: Hub) -> Self {
        let transport = Arc::new(UreqTransport::new(Duration::from_secs(config.timeout_secs)));

        Backend::with_transport(&config.base_url, &config.token, transport, Box::new(ConsoleAlert), hub)
    }

    /// Returns a new instance of the Backend struct with the given transport and alert sink
    ///
    /// # Arguments
    ///
    /// * 'base_url' - scheme, host and port of the backend
    /// * 'token' - authentication token attached to every request
    /// * 'transport' - performs the http exchange
    /// * 'alert' - where failures are reported
    /// * 'hub' - event loop sender where completions are posted
    pub fn with_transport(base_url: &str, token: &str, transport: Arc<dyn Transport>, alert: Box<dyn Alert>, hub: Hub) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            transport,
            alert,
            hub,
            next_id: 0,
            pending: HashMap::new(),
        }
    }

    /// Sends a request, the callback is run on success only
    ///
    /// # Arguments
    ///
    /// * 'method' - http method
    /// * 'endpoint' - path and query, relative to the backend base url
    /// * 'body' - optional url encoded data, appended to the query
    /// * 'on_success' - optional continuation taking the parsed body
    pub fn send(&mut self, method: Method, endpoint: &str, body: Option<String>, on_success: Option<Callback>) -> RequestId {
        self.next_id += 1;
        let id = self.next_id;

        let mut url = format!("{}{}", self.base_url, endpoint);
        if let Some(query) = body {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&query);
        }

        let request = Request { method, url, token: self.token.clone() };
        debug!("request {} {:?} {}", id, request.method, request.url);
        self.pending.insert(id, on_success);

        let transport = Arc::clone(&self.transport);
        let hub = self.hub.clone();
        thread::spawn(move || {
            let result = transport.execute(&request);
            hub.send(Event::Response { id, result }).ok();
        });

        id
    }

    /// Resolves a finished request, either running its callback or raising an alert
    ///
    /// # Arguments
    ///
    /// * 'id' - id returned by `send`
    /// * 'result' - body or failure as reported by the transport
    /// * 'ctx' - the event loop context handed to the callback
    pub fn complete(&mut self, id: RequestId, result: Result<String, TransportError>, ctx: &mut Context) {
        let Some(on_success) = self.pending.remove(&id) else {
            debug!("response for unknown request {}", id);
            return;
        };

        match result.and_then(|body| parse_body(&body)) {
            Ok(value) => {
                debug!("request {} succeeded", id);
                if let Some(callback) = on_success {
                    callback(value, ctx);
                }
            },
            Err(e) => {
                self.alert.alert(&format!("{}: {}", e.status_text(), e.description()));
            },
        }
    }

    /// Number of requests not yet completed
    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

/// Parses a response body, an empty body is json null
fn parse_body(body: &str) -> Result<Value, TransportError> {
    if body.trim().is_empty() {
        Ok(Value::Null)
    } else {
        Ok(serde_json::from_str(body)?)
    }
}
