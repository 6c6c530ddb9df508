use crate::commands::rates::{load_view, resolve_city};
use crate::models::RateType;
use crate::services::CurrencyConverter;

/// Amount to convert, whichever side the user supplied
pub enum Amount {
    Usd(String),
    Iqd(String),
}

pub async fn run(city: Option<String>, rate_type: RateType, amount: Amount) {
    match convert(city, rate_type, amount).await {
        Ok(()) => {}
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn convert(city: Option<String>, rate_type: RateType, amount: Amount) -> Result<(), Box<dyn std::error::Error>> {
    let city = resolve_city(city.as_deref())?;
    let view = load_view(city, rate_type).await?;

    let rate = view.latest.as_ref().map(|o| o.rate_per_dollar());
    let mut converter = CurrencyConverter::new(rate);

    let rate = match converter.rate() {
        Some(rate) => rate,
        None => {
            println!("⚠️  No rate available for {}, nothing to convert.", city.english);
            return Ok(());
        }
    };

    match amount {
        Amount::Usd(value) => converter.edit_usd(&value),
        Amount::Iqd(value) => converter.edit_iqd(&value),
    }

    println!("💵 {} USD = {} IQD", converter.usd(), converter.iqd());
    println!("   at {:.2} IQD / USD ({}, {} note)", rate, city.english, rate_type);
    Ok(())
}
