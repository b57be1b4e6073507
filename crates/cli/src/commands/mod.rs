pub mod chat;
pub mod monitor;
pub mod onboard;
pub mod weather;

use std::sync::Arc;
use std::time::Duration;

use skybrief_config::AppConfig;
use skybrief_providers::AnthropicProvider;
use skybrief_tools::Toolkit;
use skybrief_weather::{ReportWriter, WeatherService, YandexWeatherApi};

/// Build the chat provider from config, with a clear error when no key is set.
pub(crate) fn build_provider(
    config: &AppConfig,
) -> Result<Arc<AnthropicProvider>, Box<dyn std::error::Error>> {
    let api_key = config.api_key.clone().ok_or_else(|| {
        format!(
            "No API key configured. Set ANTHROPIC_API_KEY or SKYBRIEF_API_KEY, \
             or add api_key to {}",
            AppConfig::config_dir().join("config.toml").display()
        )
    })?;
    Ok(Arc::new(AnthropicProvider::new(api_key)))
}

/// Build the cache-fronted weather service from config.
pub(crate) fn build_weather_service(
    config: &AppConfig,
) -> Result<WeatherService, Box<dyn std::error::Error>> {
    let api_key = config.weather.api_key.clone().ok_or_else(|| {
        format!(
            "No weather API key configured. Set YANDEX_WEATHER_API_KEY, \
             or add weather.api_key to {}",
            AppConfig::config_dir().join("config.toml").display()
        )
    })?;
    let api = Arc::new(YandexWeatherApi::new(&config.weather.api_url, api_key));
    Ok(WeatherService::new(
        api,
        Duration::from_secs(config.weather.cache_ttl_secs),
    ))
}

/// Build the tool set over a weather service.
pub(crate) fn build_toolkit(config: &AppConfig, weather: WeatherService) -> Toolkit {
    let reports = ReportWriter::new(config.reports_dir(), &config.reports.base_url);
    Toolkit::new(weather, reports)
}
