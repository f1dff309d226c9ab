use log::{debug, trace};
use crate::models::status_document::{MalformedPayload, StatusDocument};
use crate::page::Page;

/// What a status document did to the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Slot { slot: usize, status: String },
    ScanResults,
    Ignored,
}

/// Applies a raw status document to the page.
///
/// Slot telemetry goes to the status table, in a fixed order: the slot's cells first,
/// then its status class across every row. Scan results replace the scan result
/// container verbatim. Anything else is left alone.
///
/// # Arguments
///
/// * 'raw' - the json document as received
/// * 'page' - the page to update
pub fn apply(raw: &str, page: &mut Page) -> Result<Applied, MalformedPayload> {
    trace!("document: {}", raw);

    match StatusDocument::decode(raw)? {
        StatusDocument::BatteryInfo(info) => {
            if let Some(table) = page.status_table.as_mut() {
                table.update_slot(info.slot, &info);
                table.set_status_class(info.slot, &info.status);
            }
            Ok(Applied::Slot { slot: info.slot, status: info.status })
        },
        StatusDocument::ScanResults(fragment) => {
            if let Some(scan) = page.scan.as_mut() {
                scan.show_results(&fragment);
            }
            Ok(Applied::ScanResults)
        },
        StatusDocument::Unknown => {
            debug!("ignoring unknown document");
            Ok(Applied::Ignored)
        },
    }
}
