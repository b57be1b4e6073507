//! `skybrief onboard` — First-time setup.

use skybrief_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("skybrief — First-Time Setup");
    println!("===========================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("Created config directory: {}", config_dir.display());
    } else {
        println!("Config directory exists: {}", config_dir.display());
    }

    let reports_dir = config_dir.join("reports");
    if !reports_dir.exists() {
        std::fs::create_dir_all(&reports_dir)?;
        println!("Created reports directory: {}", reports_dir.display());
    }

    if config_path.exists() {
        println!("\nConfig already exists at: {}", config_path.display());
        println!("Edit it manually or delete and re-run onboard.\n");
    } else {
        let default_toml = AppConfig::default_toml();
        std::fs::write(&config_path, &default_toml)?;
        println!("Created config.toml at: {}", config_path.display());
        println!("\nNext steps:");
        println!("  1. Set ANTHROPIC_API_KEY (or add api_key to the config)");
        println!("  2. Set YANDEX_WEATHER_API_KEY (or weather.api_key)");
        println!("  3. Run: skybrief chat");
    }

    Ok(())
}
