//! Progress reporting for build and extract operations.
//!
//! Two independent percentage streams exist per operation: one scoped to the
//! item currently being copied and one scoped to the whole operation. Either
//! observer may be absent.
//!
//! # Components
//!
//! - **`ProgressSink`**: observer receiving a percentage in `[0, 100]`
//! - **`ProgressSinks`**: the optional per-item and aggregate observers
//! - **`Transfer`**: byte counters for one operation

/// Observer of a completion percentage.
///
/// Sinks are invoked synchronously from the copy loop, so an implementation
/// that blocks stalls the transfer. Any `FnMut(f64) + Send` closure is a sink.
///
/// # Examples
///
/// ```
/// use ziptrack_core::ProgressSink;
///
/// struct Printer;
///
/// impl ProgressSink for Printer {
///     fn report(&mut self, percent: f64) {
///         println!("{percent:.2}%");
///     }
/// }
///
/// let mut seen = Vec::new();
/// let mut closure = |p: f64| seen.push(p);
/// closure.report(42.0);
/// assert_eq!(seen, vec![42.0]);
/// ```
pub trait ProgressSink: Send {
    /// Called with the current completion percentage.
    fn report(&mut self, percent: f64);
}

impl<F> ProgressSink for F
where
    F: FnMut(f64) + Send,
{
    fn report(&mut self, percent: f64) {
        self(percent);
    }
}

/// The pair of optional observers passed through an operation.
///
/// # Examples
///
/// ```
/// use ziptrack_core::ProgressSinks;
///
/// let mut total = Vec::new();
/// let mut on_total = |p: f64| total.push(p);
/// let mut sinks = ProgressSinks::new(None, Some(&mut on_total));
/// sinks.report_total(50.0);
/// sinks.report_item(10.0); // no item observer, ignored
/// drop(sinks);
/// assert_eq!(total, vec![50.0]);
/// ```
#[derive(Default)]
pub struct ProgressSinks<'a> {
    item: Option<&'a mut dyn ProgressSink>,
    total: Option<&'a mut dyn ProgressSink>,
}

impl<'a> ProgressSinks<'a> {
    /// Creates a sink pair from optional per-item and aggregate observers.
    #[must_use]
    pub fn new(
        item: Option<&'a mut dyn ProgressSink>,
        total: Option<&'a mut dyn ProgressSink>,
    ) -> Self {
        Self { item, total }
    }

    /// Creates a sink pair with no observers.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Reports per-item progress if an item observer is present.
    pub fn report_item(&mut self, percent: f64) {
        if let Some(sink) = self.item.as_deref_mut() {
            sink.report(percent);
        }
    }

    /// Reports aggregate progress if an aggregate observer is present.
    pub fn report_total(&mut self, percent: f64) {
        if let Some(sink) = self.total.as_deref_mut() {
            sink.report(percent);
        }
    }

    /// Returns `true` if neither observer is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.item.is_none() && self.total.is_none()
    }
}

impl std::fmt::Debug for ProgressSinks<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressSinks")
            .field("item", &self.item.is_some())
            .field("total", &self.total.is_some())
            .finish()
    }
}

/// Computes `processed * 100 / expected` rounded to two decimal places.
///
/// A zero denominator means there is nothing to wait for and yields `100.0`.
///
/// # Examples
///
/// ```
/// use ziptrack_core::progress::percentage;
///
/// assert_eq!(percentage(1, 3), 33.33);
/// assert_eq!(percentage(5, 20), 25.0);
/// assert_eq!(percentage(0, 0), 100.0);
/// ```
#[must_use]
pub fn percentage(processed: u64, expected: u64) -> f64 {
    if expected == 0 {
        return 100.0;
    }
    let raw = processed as f64 * 100.0 / expected as f64;
    (raw * 100.0).round() / 100.0
}

/// Byte counters for one build or extract call.
///
/// Created by the orchestrator after the total is known and threaded through
/// every stream copy, so aggregate progress accumulates across items instead
/// of resetting per file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    processed: u64,
    expected: u64,
}

impl Transfer {
    /// Creates counters for an operation expected to move `expected` bytes.
    #[must_use]
    pub fn new(expected: u64) -> Self {
        Self {
            processed: 0,
            expected,
        }
    }

    /// Bytes processed so far across all items.
    #[must_use]
    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// Total bytes expected across all items.
    #[must_use]
    pub fn expected(&self) -> u64 {
        self.expected
    }

    /// Current aggregate percentage.
    #[must_use]
    pub fn percent(&self) -> f64 {
        percentage(self.processed, self.expected)
    }

    /// Adds `bytes` to the cumulative count, returning the new count.
    ///
    /// Saturates at `expected`; callers bound each item by its declared
    /// length, which keeps the sum within the total.
    pub(crate) fn advance(&mut self, bytes: u64) -> u64 {
        self.processed = self.processed.saturating_add(bytes).min(self.expected);
        self.processed
    }

    /// Reports the starting aggregate value.
    pub fn begin(&self, sinks: &mut ProgressSinks<'_>) {
        sinks.report_total(self.percent());
    }

    /// Reports completion for operations that had nothing to transfer.
    ///
    /// When bytes were expected the last chunk already reported 100.
    pub fn finish(&self, sinks: &mut ProgressSinks<'_>) {
        if self.expected == 0 {
            sinks.report_total(100.0);
        }
    }
}
