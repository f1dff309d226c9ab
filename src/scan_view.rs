use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::fmt::Formatter;
use entities::ENTITIES;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ADDRESS_ATTRIBUTE: Regex = Regex::new(r#"data-address\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap();
    static ref CHARACTER_ENTITIES: HashMap<&'static str, &'static str> = {
        ENTITIES.iter().map(|e| (e.entity, e.characters)).collect()
    };
}

/// Replaces named and numeric character references, unknown references are kept as is
///
/// # Arguments
///
/// * 'text' - attribute value as found in the markup
fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut cursor = text;
    let mut decoded = String::with_capacity(text.len());

    while let Some(start) = cursor.find('&') {
        decoded.push_str(&cursor[..start]);
        cursor = &cursor[start..];

        let Some(end) = cursor.find(';') else {
            break;
        };
        let reference = &cursor[..=end];
        let numeric = reference.strip_prefix("&#").map(|n| &n[..n.len() - 1]);
        let character = match numeric {
            Some(n) if n.starts_with('x') || n.starts_with('X') => u32::from_str_radix(&n[1..], 16).ok().and_then(char::from_u32),
            Some(n) => n.parse::<u32>().ok().and_then(char::from_u32),
            None => None,
        };

        if let Some(c) = character {
            decoded.push(c);
        } else if let Some(characters) = CHARACTER_ENTITIES.get(reference) {
            decoded.push_str(characters);
        } else {
            decoded.push('&');
            cursor = &cursor[1..];
            continue;
        }
        cursor = &cursor[end + 1..];
    }
    decoded.push_str(cursor);

    Cow::Owned(decoded)
}

/// States of the device discovery and selection workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Scanning,
    ResultsShown,
    Selecting,
    Done,
}

/// Animated dots shown while a scan is outstanding
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadingIndicator {
    dots: usize,
}

impl LoadingIndicator {
    /// Advances the animation, cycling through 0 to 3 dots
    pub fn advance(&mut self) {
        self.dots = if self.dots >= 3 { 0 } else { self.dots + 1 };
    }

    #[cfg(test)]
    pub fn dots(&self) -> usize {
        self.dots
    }

    pub fn text(&self) -> String {
        ".".repeat(self.dots)
    }
}

/// The scan page: a result container holding either a progress message or the
/// listing rendered by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanView {
    result: String,
    loading: Option<LoadingIndicator>,
    state: ScanState,
}

impl ScanView {
    pub fn new() -> ScanView {
        ScanView { result: String::new(), loading: None, state: ScanState::Idle }
    }

    #[cfg(test)]
    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn set_state(&mut self, state: ScanState) {
        self.state = state;
    }

    #[cfg(test)]
    pub fn result(&self) -> &str {
        &self.result
    }

    #[cfg(test)]
    pub fn loading(&self) -> Option<&LoadingIndicator> {
        self.loading.as_ref()
    }

    pub fn loading_mut(&mut self) -> Option<&mut LoadingIndicator> {
        self.loading.as_mut()
    }

    /// Replaces the result container with a progress message and shows the loading indicator
    ///
    /// # Arguments
    ///
    /// * 'message' - the progress message
    pub fn begin_scan(&mut self, message: &str) {
        self.result = message.to_string();
        self.loading = Some(LoadingIndicator::default());
        self.state = ScanState::Scanning;
    }

    /// Replaces the result container with the listing, verbatim
    ///
    /// # Arguments
    ///
    /// * 'fragment' - listing of discovered devices as rendered by the backend
    pub fn show_results(&mut self, fragment: &str) {
        self.result = fragment.to_string();
        self.loading = None;
        self.state = ScanState::ResultsShown;
    }

    /// Addresses of the entries in the result container in document order, with
    /// character references decoded
    pub fn entries(&self) -> Vec<String> {
        if !matches!(self.state, ScanState::ResultsShown | ScanState::Selecting) {
            return Vec::new();
        }
        ADDRESS_ATTRIBUTE.captures_iter(&self.result)
            .filter_map(|c| c.get(1).or_else(|| c.get(2)))
            .map(|m| decode_entities(m.as_str()).into_owned())
            .collect()
    }

    /// Address carried by the entry the operator activated
    ///
    /// # Arguments
    ///
    /// * 'entry' - 0-based index of the entry
    pub fn address_of(&self, entry: usize) -> Option<String> {
        self.entries().into_iter().nth(entry)
    }
}

impl Default for ScanView {
    fn default() -> Self {
        ScanView::new()
    }
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for ScanView {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.state {
            ScanState::Scanning => {
                let dots = self.loading.as_ref().map(|l| l.text()).unwrap_or_default();
                writeln!(f, "{}{}", self.result, dots)
            },
            _ => {
                let entries = self.entries();
                if entries.is_empty() {
                    writeln!(f, "{}", self.result)
                } else {
                    for (i, address) in entries.iter().enumerate() {
                        writeln!(f, "[{}] {}", i + 1, address)?;
                    }
                    Ok(())
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "Results:<br><a href=\"#\" data-address=\"AA:BB:CC\">AA:BB:CC (MC3000)</a>\
        <br><a href=\"#\" data-address='11:22:33'>11:22:33 (Unknown)</a>";

    #[test]
    fn indicator_cycles_four_states() {
        let mut indicator = LoadingIndicator::default();
        let mut seen = Vec::new();
        for _ in 0..6 {
            indicator.advance();
            seen.push(indicator.dots());
        }
        assert_eq!(seen, vec![1, 2, 3, 0, 1, 2]);
        assert_eq!(indicator.text(), "..");
    }

    #[test]
    fn begin_scan_shows_progress() {
        let mut view = ScanView::new();
        view.begin_scan("Scanning...");
        assert_eq!(view.state(), ScanState::Scanning);
        assert_eq!(view.result(), "Scanning...");
        assert!(view.loading().is_some());
        assert!(view.entries().is_empty());
    }

    #[test]
    fn results_replace_progress() {
        let mut view = ScanView::new();
        view.begin_scan("Scanning...");
        view.show_results(LISTING);

        assert_eq!(view.result(), LISTING);
        assert!(view.loading().is_none());
        assert_eq!(view.entries(), vec!["AA:BB:CC".to_string(), "11:22:33".to_string()]);
        assert_eq!(view.address_of(1).as_deref(), Some("11:22:33"));
        assert_eq!(view.address_of(2), None);
    }

    #[test]
    fn listing_without_devices_has_no_entries() {
        let mut view = ScanView::new();
        view.show_results("Results:<br>no device found, try again");
        assert!(view.entries().is_empty());
    }

    #[test]
    fn addresses_are_entity_decoded() {
        let mut view = ScanView::new();
        view.show_results("<a data-address=\"A&amp;B\">x</a><a data-address='&quot;C&#39;&lt;&gt;&#x41;'>y</a>");
        assert_eq!(view.entries(), vec!["A&B".to_string(), "\"C'<>A".to_string()]);
    }

    #[test]
    fn unknown_references_are_kept() {
        assert_eq!(decode_entities("AA:BB"), "AA:BB");
        assert_eq!(decode_entities("a &zZz; b"), "a &zZz; b");
        assert_eq!(decode_entities("a & b; c"), "a & b; c");
        assert_eq!(decode_entities("trailing &amp"), "trailing &amp");
    }
}
