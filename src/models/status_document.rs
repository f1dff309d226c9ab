use std::fmt;
use std::fmt::Formatter;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("malformed status document: {0}")]
pub struct MalformedPayload(#[from] pub serde_json::Error);

/// A measurement as sent by the backend, either a plain number or a text
/// such as "n/a" when the charger has no reading
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Measurement {
    Number(f64),
    Text(String),
}

/// Numbers are printed the way the browser would stringify them: integral values
/// without a trailing ".0", and exponent form from 1e21 up and below 1e-6
impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Measurement::Number(n) if *n == 0.0 => write!(f, "0"),
            Measurement::Number(n) if n.abs() >= 1e21 || n.abs() < 1e-6 => {
                let exponent_form = format!("{:e}", n);
                match exponent_form.split_once('e') {
                    Some((mantissa, exponent)) if !exponent.starts_with('-') => write!(f, "{}e+{}", mantissa, exponent),
                    _ => write!(f, "{}", exponent_form),
                }
            },
            Measurement::Number(n) => write!(f, "{}", n),
            Measurement::Text(t) => write!(f, "{}", t),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BatterySlotStatus {
    pub slot: usize,
    pub led: String,
    #[serde(rename = "type")]
    pub battery_type: String,
    pub mode: String,
    pub status: String,
    pub voltage: Measurement,
    pub current: Measurement,
    pub capacity: Measurement,
    pub time: Measurement,
    pub temperature: Measurement,
    pub resistance: Measurement,
}

/// Documents pushed by the backend, decoded once at the boundary
#[derive(Debug, Clone, PartialEq)]
pub enum StatusDocument {
    BatteryInfo(BatterySlotStatus),
    ScanResults(String),
    Unknown,
}

impl StatusDocument {
    /// Decodes a raw status document
    ///
    /// When both known keys are present `battery_info` wins. Documents that are not
    /// objects, or that carry none of the known keys, decode to `Unknown`.
    ///
    /// # Arguments
    ///
    /// * 'raw' - the json text as received from the feed
    pub fn decode(raw: &str) -> Result<StatusDocument, MalformedPayload> {
        let Value::Object(mut map) = serde_json::from_str::<Value>(raw)? else {
            return Ok(StatusDocument::Unknown);
        };

        if let Some(info) = map.remove("battery_info") {
            Ok(StatusDocument::BatteryInfo(serde_json::from_value(info)?))
        } else if let Some(results) = map.remove("scan_results") {
            Ok(StatusDocument::ScanResults(serde_json::from_value(results)?))
        } else {
            Ok(StatusDocument::Unknown)
        }
    }
}
