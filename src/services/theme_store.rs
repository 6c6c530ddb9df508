//! Theme store.
//!
//! Holds the active theme and the palette catalog. Built once at the
//! application root and handed out as a cloneable handle; every clone sees
//! the same state.

use crate::constants::THEME_PREFERENCE_KEY;
use crate::models::{fallback_palettes, ThemeColors, ThemeName, ThemePalette};
use crate::services::dashboard_client::PaletteSource;
use crate::services::preferences::PreferenceStore;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Where the palettes in the catalog came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    Remote,
    /// Remote catalog with at least one palette filled in from the built-ins
    Mixed,
    Fallback,
}

/// Light and dark palettes, always both present
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteCatalog {
    light: ThemeColors,
    dark: ThemeColors,
    source: CatalogSource,
}

impl Default for PaletteCatalog {
    fn default() -> Self {
        Self::fallback()
    }
}

impl PaletteCatalog {
    pub fn fallback() -> Self {
        Self {
            light: ThemeColors::light(),
            dark: ThemeColors::dark(),
            source: CatalogSource::Fallback,
        }
    }

    /// Merge remote palette records over the built-ins
    ///
    /// Records that fail to decode (missing color keys, wrong shape) or carry an
    /// unknown name are skipped; the first valid record per theme wins.
    pub fn from_remote(records: &[Value]) -> Self {
        let mut light = None;
        let mut dark = None;

        for record in records {
            let palette: ThemePalette = match serde_json::from_value(record.clone()) {
                Ok(p) => p,
                Err(e) => {
                    warn!(error = %e, "Skipping incomplete palette record");
                    continue;
                }
            };
            match palette.theme_name() {
                Some(ThemeName::Light) if light.is_none() => light = Some(palette.data),
                Some(ThemeName::Dark) if dark.is_none() => dark = Some(palette.data),
                Some(_) => debug!(name = %palette.name, "Duplicate palette ignored"),
                None => debug!(name = %palette.name, "Unknown palette name ignored"),
            }
        }

        let source = match (light.is_some(), dark.is_some()) {
            (true, true) => CatalogSource::Remote,
            (false, false) => CatalogSource::Fallback,
            _ => CatalogSource::Mixed,
        };

        Self {
            light: light.unwrap_or_else(ThemeColors::light),
            dark: dark.unwrap_or_else(ThemeColors::dark),
            source,
        }
    }

    pub fn colors(&self, theme: ThemeName) -> &ThemeColors {
        match theme {
            ThemeName::Light => &self.light,
            ThemeName::Dark => &self.dark,
        }
    }

    pub fn source(&self) -> CatalogSource {
        self.source
    }

    /// Catalog as palette records, in the palette service's shape
    pub fn to_palettes(&self) -> Vec<ThemePalette> {
        let mut palettes = fallback_palettes();
        palettes[0].data = self.light.clone();
        palettes[1].data = self.dark.clone();
        palettes
    }
}

#[derive(Debug, Clone)]
struct ThemeState {
    theme: ThemeName,
    catalog: PaletteCatalog,
    loading: bool,
}

/// Shared theme state plus its preference collaborator
#[derive(Clone)]
pub struct ThemeStore {
    state: Arc<RwLock<ThemeState>>,
    preferences: Arc<dyn PreferenceStore>,
}

impl ThemeStore {
    /// Store with the built-in palettes and the `light` theme, still marked as loading
    pub fn new(preferences: Arc<dyn PreferenceStore>) -> Self {
        Self {
            state: Arc::new(RwLock::new(ThemeState {
                theme: ThemeName::default(),
                catalog: PaletteCatalog::fallback(),
                loading: true,
            })),
            preferences,
        }
    }

    /// Build the store, resolving the preference and fetching palettes concurrently
    ///
    /// Preference order: persisted value, then `system_hint`, then `light`.
    /// Palette failures leave the built-in catalog in place.
    pub async fn initialize<P: PaletteSource>(
        preferences: Arc<dyn PreferenceStore>,
        palettes: &P,
        system_hint: Option<ThemeName>,
    ) -> Self {
        let store = Self::new(preferences);

        let prefs = store.preferences.clone();
        let resolve_theme = async move { resolve_preference(prefs.as_ref(), system_hint) };

        let (theme, remote) = tokio::join!(resolve_theme, palettes.fetch_palettes());

        let catalog = match remote {
            Ok(records) => {
                let catalog = PaletteCatalog::from_remote(&records);
                info!(source = ?catalog.source(), "Theme data loaded");
                catalog
            }
            Err(e) => {
                warn!(error = %e, "Using fallback themes");
                PaletteCatalog::fallback()
            }
        };

        {
            let mut state = store.state.write().await;
            state.theme = theme;
            state.catalog = catalog;
            state.loading = false;
        }

        store
    }

    pub async fn theme(&self) -> ThemeName {
        self.state.read().await.theme
    }

    /// Palette of the active theme
    pub async fn colors(&self) -> ThemeColors {
        let state = self.state.read().await;
        state.catalog.colors(state.theme).clone()
    }

    pub async fn catalog_source(&self) -> CatalogSource {
        self.state.read().await.catalog.source()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Flip the theme and persist it; a failed write is logged and otherwise ignored
    pub async fn toggle(&self) -> ThemeName {
        let theme = {
            let mut state = self.state.write().await;
            state.theme = state.theme.toggled();
            state.theme
        };

        if let Err(e) = self.preferences.set(THEME_PREFERENCE_KEY, theme.as_str()) {
            warn!(error = %e, "Failed to save theme preference");
        }

        info!(theme = %theme, "Theme toggled");
        theme
    }
}

fn resolve_preference(preferences: &dyn PreferenceStore, system_hint: Option<ThemeName>) -> ThemeName {
    let saved = match preferences.get(THEME_PREFERENCE_KEY) {
        Ok(value) => value.and_then(|v| match ThemeName::from_str(&v) {
            Ok(theme) => Some(theme),
            Err(e) => {
                warn!(error = %e, "Ignoring invalid saved theme");
                None
            }
        }),
        Err(e) => {
            warn!(error = %e, "Failed to read theme preference");
            None
        }
    };

    saved.or(system_hint).unwrap_or_default()
}
