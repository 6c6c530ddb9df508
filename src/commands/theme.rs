use crate::services::{DashboardClient, FilePreferenceStore, PreferenceStore, ThemeStore};
use crate::utils::{get_dashboard_api_url, get_prefs_path, get_system_color_scheme, get_upstream_timeout};
use std::sync::Arc;

pub async fn run(toggle: bool) {
    match show_theme(toggle).await {
        Ok(()) => {}
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn show_theme(toggle: bool) -> Result<(), Box<dyn std::error::Error>> {
    let client = DashboardClient::new(&get_dashboard_api_url(), get_upstream_timeout())?;
    let prefs_path = get_prefs_path();
    let preferences: Arc<dyn PreferenceStore> = Arc::new(FilePreferenceStore::new(&prefs_path));

    let store = ThemeStore::initialize(preferences, &client, get_system_color_scheme()).await;

    if toggle {
        let theme = store.toggle().await;
        println!("🌓 Switched to {} theme (saved to {})", theme, prefs_path.display());
    }

    println!("🎨 Theme: {} (palettes: {:?})\n", store.theme().await, store.catalog_source().await);
    for (name, value) in store.colors().await.css_variables() {
        println!("   {}: {};", name, value);
    }

    Ok(())
}
