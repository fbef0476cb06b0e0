/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_VERSION_COMPONENT: &str = "v1";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);
pub const API_V1_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", API_VERSION_COMPONENT);

pub const SERVICE_NAME: &str = "peptrack";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upcoming-dose window bounds, in calendar days.
pub const UPCOMING_DAYS_DEFAULT: i64 = 7;
pub const UPCOMING_DAYS_MIN: i64 = 1;
pub const UPCOMING_DAYS_MAX: i64 = 60;

/// Default lookback for tracking listings and insight generation.
pub const TRACKING_LOOKBACK_DAYS: i64 = 7;
/// Default lookback for exports.
pub const EXPORT_LOOKBACK_DAYS: i64 = 30;
