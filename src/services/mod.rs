pub mod chart_data;
pub mod converter;
pub mod dashboard_client;
pub mod preferences;
pub mod proxy_metrics;
pub mod rate_change;
pub mod rate_selection;
pub mod rate_type_switch;
pub mod session;
pub mod theme_store;

pub use chart_data::{axis_domain, project_chart};
pub use converter::{parse_amount, ConverterMode, CurrencyConverter};
pub use dashboard_client::{DashboardClient, PaletteSource, RateSource};
pub use preferences::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
pub use proxy_metrics::{log_proxy_request, ProxyOutcome, ProxyRequestMetrics, ProxyStats, SharedProxyStats};
pub use rate_change::compute_snapshot;
pub use rate_selection::{partition_rates, sort_chronologically, RateSelection};
pub use rate_type_switch::RateTypeSwitch;
pub use session::{DashboardSession, DashboardView, FetchOutcome};
pub use theme_store::{CatalogSource, PaletteCatalog, ThemeStore};
