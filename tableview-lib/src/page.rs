//! Pagination bridge

use serde::Deserialize;
use serde::Serialize;

/// Pagination facts supplied by the data provider.
///
/// The engine never derives page math from these; it only displays them and
/// forwards navigation intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: usize,
    pub last_page: usize,
    pub per_page: usize,
    /// Total row count reported by the server, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl PageInfo {
    pub fn new(current_page: usize, last_page: usize, per_page: usize) -> Self {
        Self {
            current_page,
            last_page,
            per_page,
            total: None,
        }
    }

    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Index range of the current page inside a row set of `len` rows.
    ///
    /// A row set no longer than one page is taken to be the page already
    /// sliced by the server and is returned whole.
    pub fn window(&self, len: usize) -> std::ops::Range<usize> {
        if self.per_page == 0 || len <= self.per_page {
            return 0..len;
        }
        let start = self.current_page.saturating_sub(1).saturating_mul(self.per_page).min(len);
        let end = start.saturating_add(self.per_page).min(len);
        start..end
    }
}
