use clap::{Args, Parser, Subcommand};

use crate::commands;
use crate::commands::convert::Amount;
use crate::models::RateType;

#[derive(Parser)]
#[command(name = "iqd-exchange")]
#[command(about = "Iraqi dinar exchange-rate proxy and dashboard tools", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the rate proxy server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// List supported cities
    Cities,
    /// Show the latest rate, change and chart data for a city
    Rates {
        /// City (English name or local name)
        #[arg(short, long)]
        city: Option<String>,

        /// Note denomination: penji or sur
        #[arg(short, long, default_value = "penji", value_parser = parse_rate_type)]
        rate_type: RateType,

        /// Print the derived view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Convert between USD and IQD at a city's latest rate
    Convert {
        #[arg(short, long)]
        city: Option<String>,

        #[arg(short, long, default_value = "penji", value_parser = parse_rate_type)]
        rate_type: RateType,

        #[command(flatten)]
        amount: AmountArgs,
    },
    /// Show the active theme palette
    Theme {
        /// Flip between light and dark and save the choice
        #[arg(long)]
        toggle: bool,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct AmountArgs {
    /// Amount in US dollars
    #[arg(long)]
    usd: Option<String>,

    /// Amount in Iraqi dinars
    #[arg(long)]
    iqd: Option<String>,
}

fn parse_rate_type(s: &str) -> Result<RateType, String> {
    RateType::from_str(s)
}

pub async fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            commands::serve::run(port).await;
        }
        Commands::Cities => {
            commands::cities::run();
        }
        Commands::Rates { city, rate_type, json } => {
            commands::rates::run(city, rate_type, json).await;
        }
        Commands::Convert { city, rate_type, amount } => {
            let amount = match (amount.usd, amount.iqd) {
                (Some(usd), _) => Amount::Usd(usd),
                (None, Some(iqd)) => Amount::Iqd(iqd),
                (None, None) => Amount::Usd(String::new()),
            };
            commands::convert::run(city, rate_type, amount).await;
        }
        Commands::Theme { toggle } => {
            commands::theme::run(toggle).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_convert() {
        let cli = Cli::try_parse_from(["iqd-exchange", "convert", "--city", "Erbil", "--rate-type", "sur", "--usd", "100"]).unwrap();
        match cli.command {
            Commands::Convert { city, rate_type, amount } => {
                assert_eq!(city.as_deref(), Some("Erbil"));
                assert_eq!(rate_type, RateType::Sur);
                assert_eq!(amount.usd.as_deref(), Some("100"));
                assert!(amount.iqd.is_none());
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_convert_requires_one_amount() {
        assert!(Cli::try_parse_from(["iqd-exchange", "convert"]).is_err());
        assert!(Cli::try_parse_from(["iqd-exchange", "convert", "--usd", "1", "--iqd", "2"]).is_err());
    }

    #[test]
    fn test_invalid_rate_type() {
        assert!(Cli::try_parse_from(["iqd-exchange", "rates", "--rate-type", "euro"]).is_err());
    }
}
