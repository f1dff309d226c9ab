use log::{info, warn};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;
use crate::context::Context;
use crate::loading;
use crate::manager_backend::{Backend, Method, RequestId};
use crate::page::ROOT_PATH;
use crate::scan_view::ScanState;

pub const SCAN_TRIGGER_ENDPOINT: &str = "/scan/trigger";
pub const SCAN_SELECT_ENDPOINT: &str = "/scan/select";
pub const SCANNING_MESSAGE: &str = "Scanning... This can take a while...";

/// Characters left alone when encoding a uri component, everything else is escaped
pub const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-').remove(b'_').remove(b'.').remove(b'!')
    .remove(b'~').remove(b'*').remove(b'\'').remove(b'(').remove(b')');

/// Percent encodes a value for use in a url
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Endpoint binding the device with the given address
pub fn selection_endpoint(address: &str) -> String {
    format!("{}?ble_address={}", SCAN_SELECT_ENDPOINT, encode_component(address))
}

/// Starts a device scan if the page has a scan view.
///
/// The result container shows a progress message with the loading animation until
/// the backend pushes the scan results.
///
/// # Arguments
///
/// * 'ctx' - event loop context
/// * 'backend' - request dispatcher
pub fn trigger(ctx: &mut Context, backend: &mut Backend) -> Option<RequestId> {
    let Some(scan) = ctx.page.scan.as_mut() else {
        warn!("scan requested but the page has no scan view");
        return None;
    };

    info!("triggering device scan");
    scan.begin_scan(SCANNING_MESSAGE);
    loading::start(ctx);

    Some(backend.send(Method::Get, SCAN_TRIGGER_ENDPOINT, None, None))
}

/// Binds the device of the activated entry, on success the page is reloaded at root.
/// A failed request leaves the results in place so another attempt can be made.
///
/// # Arguments
///
/// * 'ctx' - event loop context
/// * 'backend' - request dispatcher
/// * 'entry' - 0-based index of the activated entry
pub fn select(ctx: &mut Context, backend: &mut Backend, entry: usize) -> Option<RequestId> {
    let scan = ctx.page.scan.as_mut()?;
    let Some(address) = scan.address_of(entry) else {
        warn!("no device entry {}", entry + 1);
        return None;
    };

    scan.set_state(ScanState::Selecting);
    info!("selecting device {}", address);
    let id = backend.send(Method::Get, &selection_endpoint(&address), None, Some(Box::new(
        move |_: Value, ctx: &mut Context| {
            info!("device {} bound", address);
            if let Some(scan) = ctx.page.scan.as_mut() {
                scan.set_state(ScanState::Done);
            }
            ctx.page.navigate(ROOT_PATH);
        }
    )));
    scan.set_state(ScanState::ResultsShown);

    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager_backend::errors::TransportError;
    use crate::manager_backend::tests::{backend, complete_next};
    use crate::page::SCAN_PATH;
    use crate::renderer;

    const LISTING: &str = r##"{"scan_results": "Results:<br><a href=\"#\" data-address=\"AA:BB:CC\">AA:BB:CC (MC3000)</a>"}"##;

    #[test]
    fn encodes_like_encode_uri_component() {
        assert_eq!(encode_component("AA:BB:CC"), "AA%3ABB%3ACC");
        assert_eq!(encode_component("a b/c?d&e=f"), "a%20b%2Fc%3Fd%26e%3Df");
        assert_eq!(encode_component("-_.!~*'()"), "-_.!~*'()");
    }

    #[test]
    fn trigger_shows_progress_and_requests_scan() {
        let (mut backend, transport, _alert, rx) = backend(Ok(r#"{"status": "ok"}"#.to_string()));
        let mut ctx = Context::new(SCAN_PATH, 4);

        assert!(trigger(&mut ctx, &mut backend).is_some());
        let scan = ctx.page.scan.as_ref().unwrap();
        assert_eq!(scan.result(), SCANNING_MESSAGE);
        assert_eq!(scan.state(), ScanState::Scanning);
        assert!(ctx.page.has_loading_indicator());

        complete_next(&mut backend, &rx, &mut ctx);
        assert_eq!(transport.urls(), vec!["http://charger.local:5000/scan/trigger".to_string()]);
    }

    #[test]
    fn trigger_without_scan_view_does_nothing() {
        let (mut backend, _transport, _alert, _rx) = backend(Ok(String::new()));
        let mut ctx = Context::new(ROOT_PATH, 4);
        assert!(trigger(&mut ctx, &mut backend).is_none());
        assert_eq!(backend.pending(), 0);
    }

    #[test]
    fn select_requests_binding_once_per_click_and_reloads() {
        let (mut backend, transport, _alert, rx) = backend(Ok(r#"{"status": "ok"}"#.to_string()));
        let mut ctx = Context::new(SCAN_PATH, 4);
        renderer::apply(LISTING, &mut ctx.page).unwrap();

        select(&mut ctx, &mut backend, 0).unwrap();
        complete_next(&mut backend, &rx, &mut ctx);

        assert_eq!(transport.urls(), vec!["http://charger.local:5000/scan/select?ble_address=AA%3ABB%3ACC".to_string()]);
        assert_eq!(ctx.page.scan.as_ref().unwrap().state(), ScanState::Done);
        assert_eq!(ctx.page.take_navigation().as_deref(), Some(ROOT_PATH));
    }

    #[test]
    fn failed_selection_stays_on_results() {
        let failure = TransportError::Network("connection refused".to_string());
        let (mut backend, transport, alert, rx) = backend(Err(failure));
        let mut ctx = Context::new(SCAN_PATH, 4);
        renderer::apply(LISTING, &mut ctx.page).unwrap();

        select(&mut ctx, &mut backend, 0).unwrap();
        complete_next(&mut backend, &rx, &mut ctx);

        assert_eq!(alert.0.borrow().len(), 1);
        assert_eq!(ctx.page.scan.as_ref().unwrap().state(), ScanState::ResultsShown);
        assert_eq!(ctx.page.take_navigation(), None);

        select(&mut ctx, &mut backend, 0).unwrap();
        complete_next(&mut backend, &rx, &mut ctx);
        assert_eq!(transport.urls().len(), 2);
    }

    #[test]
    fn select_unknown_entry_sends_nothing() {
        let (mut backend, _transport, _alert, _rx) = backend(Ok(String::new()));
        let mut ctx = Context::new(SCAN_PATH, 4);
        renderer::apply(LISTING, &mut ctx.page).unwrap();

        assert!(select(&mut ctx, &mut backend, 3).is_none());
        assert_eq!(backend.pending(), 0);
    }
}
