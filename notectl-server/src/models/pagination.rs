//! Skip/take windowing for list queries

use serde::Deserialize;

/// Default number of notes returned by a list request
pub const DEFAULT_TAKE: u32 = 20;

/// Offset window over the notes table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Rows to skip from the start
    pub skip: u32,
    /// Maximum rows to return
    pub take: u32,
}

impl Default for Window {
    fn default() -> Self {
        Self {
            skip: 0,
            take: DEFAULT_TAKE,
        }
    }
}

/// Query parameters for list requests.
///
/// Unsigned types reject negative values at extraction time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindowParams {
    pub skip: Option<u32>,
    pub take: Option<u32>,
}

impl From<WindowParams> for Window {
    fn from(params: WindowParams) -> Self {
        Self {
            skip: params.skip.unwrap_or(0),
            take: params.take.unwrap_or(DEFAULT_TAKE),
        }
    }
}

impl Window {
    /// Index range this window selects from a sequence of `len` items.
    pub fn range(&self, len: usize) -> std::ops::Range<usize> {
        let start = (self.skip as usize).min(len);
        let end = start.saturating_add(self.take as usize).min(len);
        start..end
    }
}
