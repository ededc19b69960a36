/// Application-level constants
pub const APP_NAME: &str = "Labtrend";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Date format as printed on reports: day/month/year.
/// Consumers must parse with this order, not month/day/year.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "info,labtrend=debug"
}
