//! Dashboard Constants
//!
//! Scaling factors, chart geometry, proxy cache lifetimes and upstream defaults.
//!
//! ## Rate encoding
//!
//! The rate service stores every IQD-per-USD rate as an integer scaled by 100
//! (e.g. `152000` means 1,520 IQD for one dollar). Values stay scaled until they
//! cross into the derived data pipeline, where they are divided by
//! [`RATE_SCALE`] exactly once.

/// Divisor turning a stored rate into IQD per USD
pub const RATE_SCALE: f64 = 100.0;

/// Maximum number of points kept in the chart window
pub const CHART_WINDOW: usize = 30;

/// Axis domain used when there is nothing to plot
pub const DEFAULT_AXIS_DOMAIN: (f64, f64) = (0.0, 100.0);

/// Fraction of the rate range added above and below the plotted series
pub const AXIS_PADDING_RATIO: f64 = 0.05;

/// Padding used for a flat series, where the range-based padding is zero
pub const FLAT_SERIES_PADDING: f64 = 50.0;

/// Cosmetic delay before the "switching" flag clears after a rate type change
pub const RATE_TYPE_SWITCH_DELAY_MS: u64 = 300;

/// Timezone used to render chart dates and to read naive timestamps
pub const DASHBOARD_TIMEZONE: &str = "Asia/Baghdad";

/// Default rate service location
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://api.aryakurdo.com";

/// Default location of the proxy as seen by dashboard clients
pub const DEFAULT_DASHBOARD_API_URL: &str = "http://localhost:3000";

/// Default upstream timeout in seconds
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// User agent presented to the upstream services
pub const UPSTREAM_USER_AGENT: &str = "Iraqi-Exchange-Dashboard/1.0";

/// `Cache-Control` for proxied city data (1 minute)
pub const CITY_CACHE_CONTROL: &str = "public, max-age=60";

/// `Cache-Control` for proxied palettes (5 minutes)
pub const STYLES_CACHE_CONTROL: &str = "public, max-age=300";

/// Methods advertised for the city endpoint
pub const CITY_ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

/// Methods advertised for the styles endpoint
pub const STYLES_ALLOW_METHODS: &str = "GET, OPTIONS";

/// Headers advertised by both endpoints
pub const CORS_ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// Key-value entry holding the persisted theme preference
pub const THEME_PREFERENCE_KEY: &str = "theme";

/// Default file backing the preference store
pub const DEFAULT_PREFS_FILE: &str = "dashboard_prefs.json";
