use crate::models::{City, RateTrend, RateType};
use crate::services::{DashboardClient, DashboardSession, DashboardView, FetchOutcome};
use crate::utils::{get_dashboard_api_url, get_upstream_timeout};
use std::sync::Arc;

pub async fn run(city: Option<String>, rate_type: RateType, json: bool) {
    match show_rates(city, rate_type, json).await {
        Ok(()) => {}
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Resolve a city argument, defaulting to the first city
pub fn resolve_city(input: Option<&str>) -> Result<&'static City, String> {
    match input {
        None => Ok(City::default_city()),
        Some(name) => City::resolve(name).ok_or_else(|| {
            format!("Unknown city '{}'. Run 'cities' to list the supported cities", name)
        }),
    }
}

/// Fetch a city and return the derived view
pub async fn load_view(city: &City, rate_type: RateType) -> Result<DashboardView, Box<dyn std::error::Error>> {
    let client = DashboardClient::new(&get_dashboard_api_url(), get_upstream_timeout())?;
    let session = DashboardSession::new(Arc::new(client));

    session.select_rate_type(rate_type).await;
    if session.load_city(city.value).await == FetchOutcome::Failed {
        let view = session.view().await;
        return Err(view.error.unwrap_or_else(|| "Failed to fetch data".to_string()).into());
    }

    Ok(session.view().await)
}

async fn show_rates(city: Option<String>, rate_type: RateType, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let city = resolve_city(city.as_deref())?;
    let view = load_view(city, rate_type).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("💱 {} ({}) - {} note ({} IQD)\n", city.english, city.label, rate_type, rate_type.note_value());

    let latest = match &view.latest {
        Some(latest) => latest,
        None => {
            println!("⚠️  No rates published for this city yet.");
            return Ok(());
        }
    };

    let arrow = match view.trend {
        RateTrend::Up => "▲",
        RateTrend::Down => "▼",
        RateTrend::Flat => "■",
    };

    println!("   Current rate: {:.2} IQD / USD", view.snapshot.current_rate);
    println!(
        "   Change:       {} {:+.2} ({:+.2}%)",
        arrow, view.snapshot.rate_change, view.snapshot.rate_change_percent
    );
    println!("   Updated:      {}", latest.timestamp);
    if view.latest_is_fallback {
        println!("   ℹ️  No {} history yet, showing the latest rate of any note", rate_type);
    }

    if view.chart.is_empty() {
        return Ok(());
    }

    println!("\n📈 Last {} observations (axis {:.2} – {:.2})\n", view.chart.points.len(), view.chart.domain.lower, view.chart.domain.upper);
    for point in &view.chart.points {
        println!("   {:>3}  {:<18} {:>10.2}", point.index, point.full_date, point.rate);
    }

    Ok(())
}
