//! Results of batch operations.

use crate::error::VenvscopeError;

/// Items produced by a batch operation together with the per-item
/// failures that were skipped along the way.
///
/// One bad environment or interpreter never discards the others: the
/// failure is recorded here and the batch continues.
#[derive(Debug, Default)]
pub struct BatchReport<T> {
    /// Successfully processed items, in processing order.
    pub items: Vec<T>,
    /// Errors for the items that could not be processed.
    pub failures: Vec<VenvscopeError>,
}

impl<T> BatchReport<T> {
    /// Create an empty report.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Record a successful item.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Record a failed item.
    pub fn fail(&mut self, error: VenvscopeError) {
        tracing::warn!("{}", error);
        self.failures.push(error);
    }

    /// Whether any item failed.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Drop the failures and keep the items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_report_is_empty() {
        let report: BatchReport<String> = BatchReport::new();
        assert!(report.items.is_empty());
        assert!(!report.has_failures());
    }

    #[test]
    fn failures_do_not_discard_items() {
        let mut report = BatchReport::new();
        report.push("a");
        report.fail(VenvscopeError::remote("boom"));
        report.push("b");

        assert!(report.has_failures());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.into_items(), vec!["a", "b"]);
    }
}
