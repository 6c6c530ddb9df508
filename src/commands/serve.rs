use crate::server::{self, ProxyConfig};

pub async fn run(port: u16) {
    println!("🚀 Starting exchange-rate proxy on port {}", port);

    let config = match ProxyConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    println!("📡 Rate service:    {}", config.upstream_base_url);
    println!("🎨 Palette service: {}", config.styles_url);
    println!("⏱️  Upstream timeout: {}s", config.timeout.as_secs());
    println!();

    if let Err(e) = server::serve(config, port).await {
        eprintln!("❌ Server error: {}", e);
        std::process::exit(1);
    }
}
