pub const TIMESTAMP: &str = "Timestamp";
pub const ZIP: &str = "ZIP";
pub const FULL_NAME: &str = "FullName";
pub const ADDRESS: &str = "Address";
pub const FOO_DURATION: &str = "FooDuration";
pub const BAR_DURATION: &str = "BarDuration";
pub const TOTAL_DURATION: &str = "TotalDuration";
pub const NOTES: &str = "Notes";

/// Every column the full pipeline needs, in header order of the reference layout.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    TIMESTAMP,
    ZIP,
    FULL_NAME,
    ADDRESS,
    FOO_DURATION,
    BAR_DURATION,
    TOTAL_DURATION,
    NOTES,
];
