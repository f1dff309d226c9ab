use log::{info, warn};
use serde_json::Value;
use crate::context::Context;
use crate::manager_backend::{Backend, Method, RequestId};
use crate::models::operation_result::OperationResult;
use crate::notices::Severity;
use crate::notification::flash;
use crate::scan::encode_component;

/// Endpoint assigning a stored profile to one slot, or to all slots when none is given
///
/// # Arguments
///
/// * 'profile' - id of the stored profile
/// * 'slot' - 0-based slot index
pub fn assignment_endpoint(profile: &str, slot: Option<usize>) -> String {
    let slot = slot.map_or("all".to_string(), |s| s.to_string());
    format!("/set/{}/{}", encode_component(profile), slot)
}

/// Assigns a profile and shows the outcome reported by the backend as a notice
///
/// # Arguments
///
/// * 'backend' - request dispatcher
/// * 'profile' - id of the stored profile
/// * 'slot' - 0-based slot index, None for all slots
pub fn assign(backend: &mut Backend, profile: &str, slot: Option<usize>) -> RequestId {
    info!("assigning profile {} to {}", profile, slot.map_or("all slots".to_string(), |s| format!("slot {}", s + 1)));

    backend.send(Method::Get, &assignment_endpoint(profile, slot), None, Some(Box::new(
        |body: Value, ctx: &mut Context| {
            match OperationResult::from_body(body) {
                Some(OperationResult::Success(message)) => { flash(ctx, &message, Severity::Success); },
                Some(OperationResult::Error(message)) => { flash(ctx, &message, Severity::Danger); },
                None => warn!("assignment response holds neither success nor error"),
            }
        }
    )))
}
