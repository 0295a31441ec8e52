//! `chalkmate doctor`: diagnose configuration and backend health.

use chalkmate_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!();
    println!("  chalkmate doctor");
    println!("  ----------------");

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  [ok] config loaded");
            config
        }
        Err(e) => {
            println!("  [fail] config: {e}");
            return Err(e.into());
        }
    };

    println!("  model:            {}", config.model);
    println!(
        "  base URL:         {}",
        config.base_url.as_deref().unwrap_or("(not set)")
    );
    println!("  history window:   {}", config.history_window);
    println!("  request timeout:  {}s", config.request_timeout_secs);

    if config.has_api_key() {
        println!("  [ok] API key present");
    } else {
        println!("  [fail] no API key (set CHALKMATE_API_KEY or OPENAI_API_KEY)");
        return Ok(());
    }

    match chalkmate_providers::build_from_config(&config) {
        Ok(service) => match service.health_check().await {
            Ok(true) => println!("  [ok] completion backend reachable"),
            Ok(false) => println!("  [warn] backend responded but reported unhealthy"),
            Err(e) => println!("  [fail] backend unreachable: {e}"),
        },
        Err(e) => println!("  [fail] could not build completion service: {e}"),
    }

    println!();
    Ok(())
}
