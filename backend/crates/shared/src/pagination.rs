//! Offset Pagination

/// A page request: one-indexed page number over a fixed page size.
///
/// Page numbers below 1 (or absent) resolve to the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u32,
    size: u32,
}

impl Page {
    pub fn new(number: Option<i64>, size: u32) -> Self {
        let number = match number {
            Some(n) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
            _ => 1,
        };
        Self { number, size }
    }

    /// Rows to skip
    pub fn offset(&self) -> i64 {
        (i64::from(self.number) - 1) * i64::from(self.size)
    }

    /// Maximum rows to return
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}
