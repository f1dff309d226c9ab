use std::fmt;
use std::fmt::Formatter;
use log::warn;
use crate::notices::Notices;
use crate::scan_view::ScanView;
use crate::status_table::StatusTable;

pub const ROOT_PATH: &str = "/";
pub const SCAN_PATH: &str = "/scan";

/// View state of the currently loaded page
#[derive(Debug)]
pub struct Page {
    path: String,
    pub status_table: Option<StatusTable>,
    pub scan: Option<ScanView>,
    pub notices: Notices,
    navigation: Option<String>,
}

impl Page {
    /// Builds the view state for a path
    ///
    /// * "/" holds the status table
    /// * "/scan" holds the scan view
    ///
    /// # Arguments
    ///
    /// * 'path' - the path being loaded
    /// * 'slots' - number of charger slots
    pub fn load(path: &str, slots: usize) -> Page {
        let (status_table, scan) = match path {
            ROOT_PATH => (Some(StatusTable::new(slots)), None),
            SCAN_PATH => (None, Some(ScanView::new())),
            _ => {
                warn!("no view for path {}, loading an empty page", path);
                (None, None)
            },
        };

        Page { path: path.to_string(), status_table, scan, notices: Notices::new(), navigation: None }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Requests a full reload at the given path, carried out by the event loop
    ///
    /// # Arguments
    ///
    /// * 'path' - where to go
    pub fn navigate(&mut self, path: &str) {
        self.navigation = Some(path.to_string());
    }

    pub fn take_navigation(&mut self) -> Option<String> {
        self.navigation.take()
    }

    /// True while a loading indicator is shown anywhere on the page
    #[cfg(test)]
    pub fn has_loading_indicator(&self) -> bool {
        self.scan.as_ref().is_some_and(|s| s.loading().is_some())
    }
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for Page {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if let Some(table) = &self.status_table {
            write!(f, "{}", table)?;
        }
        if let Some(scan) = &self.scan {
            write!(f, "{}", scan)?;
        }
        if !self.notices.is_empty() {
            write!(f, "{}", self.notices)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_picks_the_view() {
        let root = Page::load(ROOT_PATH, 4);
        assert!(root.status_table.is_some());
        assert!(root.scan.is_none());

        let scan = Page::load(SCAN_PATH, 4);
        assert!(scan.status_table.is_none());
        assert!(scan.scan.is_some());

        let other = Page::load("/profiles", 4);
        assert!(other.status_table.is_none() && other.scan.is_none());
    }

    #[test]
    fn navigation_is_taken_once() {
        let mut page = Page::load(SCAN_PATH, 4);
        page.navigate(ROOT_PATH);
        assert_eq!(page.take_navigation().as_deref(), Some(ROOT_PATH));
        assert_eq!(page.take_navigation(), None);
    }
}
