//! Default values for policy-diff configuration.

/// Default terminal width for side-by-side reports.
pub const DEFAULT_REPORT_WIDTH: usize = 120;

/// Narrowest width the side-by-side layout supports.
pub const MIN_REPORT_WIDTH: usize = 40;
