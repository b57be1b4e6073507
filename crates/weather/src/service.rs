//! Cache-fronted weather service.

use std::sync::Arc;
use std::time::Duration;

use skybrief_cache::Cache;
use skybrief_core::error::WeatherError;
use skybrief_core::WeatherReport;
use tracing::{debug, info, warn};

use crate::cities::{find_city, CityLocation};
use crate::client::WeatherApi;

/// Fetches current weather for named cities, absorbing repeated lookups with
/// a TTL cache keyed by coordinates.
#[derive(Clone)]
pub struct WeatherService {
    api: Arc<dyn WeatherApi>,
    cache: Cache<WeatherReport>,
}

impl WeatherService {
    pub fn new(api: Arc<dyn WeatherApi>, cache_ttl: Duration) -> Self {
        Self {
            api,
            cache: Cache::new(cache_ttl),
        }
    }

    /// Access the underlying cache, e.g. to spawn its sweeper.
    pub fn cache(&self) -> &Cache<WeatherReport> {
        &self.cache
    }

    fn cache_key(city: &CityLocation) -> String {
        format!("weather:{}:{}", city.lat, city.lon)
    }

    /// Current weather for a city by name or alias.
    pub async fn current(&self, city_name: &str) -> Result<WeatherReport, WeatherError> {
        info!(city = city_name, "Weather request");

        let city = find_city(city_name).ok_or_else(|| {
            warn!(city = city_name, "City not found");
            WeatherError::CityNotFound(city_name.to_string())
        })?;

        let key = Self::cache_key(city);
        if let Some(cached) = self.cache.get(&key).await {
            debug!(city = city.name, "Returning cached weather");
            return Ok(cached);
        }

        let weather = self.api.fetch(city).await?;
        self.cache.set(key, weather.clone()).await;

        info!(city = city.name, temp = weather.temperature, "Weather fetched");
        Ok(weather)
    }
}

/// Format a weather record as the human-readable tool output.
pub fn format_weather_text(weather: &WeatherReport) -> String {
    let mut lines = vec![
        format!("Weather in {}:", weather.city),
        String::new(),
        format!("Temperature: {}°C", weather.temperature),
        format!(
            "Feels like: {}°C",
            weather.feels_like.unwrap_or(weather.temperature)
        ),
        format!("Conditions: {}", weather.condition),
        format!("Humidity: {}%", weather.humidity),
        format!("Pressure: {} mmHg", weather.pressure),
    ];

    if let Some(wind) = weather.wind_speed {
        lines.push(format!("Wind: {wind} m/s"));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeApi {
        calls: AtomicUsize,
        fail: bool,
    }

    impl FakeApi {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl WeatherApi for FakeApi {
        async fn fetch(&self, city: &CityLocation) -> Result<WeatherReport, WeatherError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(WeatherError::Unavailable("boom".into()));
            }
            Ok(WeatherReport {
                temperature: -3.0,
                condition: "light snow".into(),
                humidity: 91,
                pressure: 745,
                city: city.name.to_string(),
                feels_like: Some(-8.0),
                wind_speed: Some(6.0),
                icon: None,
            })
        }
    }

    #[tokio::test]
    async fn unknown_city_errors_without_api_call() {
        let api = Arc::new(FakeApi::new(false));
        let service = WeatherService::new(api.clone(), Duration::from_secs(300));

        let err = service.current("Атлантида").await.unwrap_err();
        assert!(matches!(err, WeatherError::CityNotFound(_)));
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn repeated_lookup_hits_cache() {
        let api = Arc::new(FakeApi::new(false));
        let service = WeatherService::new(api.clone(), Duration::from_secs(300));

        let first = service.current("Рига").await.unwrap();
        let second = service.current("riga").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn upstream_failure_propagates() {
        let api = Arc::new(FakeApi::new(true));
        let service = WeatherService::new(api, Duration::from_secs(300));

        let err = service.current("Москва").await.unwrap_err();
        assert!(matches!(err, WeatherError::Unavailable(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entry_refetches() {
        let api = Arc::new(FakeApi::new(false));
        let service = WeatherService::new(api.clone(), Duration::from_secs(300));

        service.current("Рига").await.unwrap();
        tokio::time::advance(Duration::from_secs(301)).await;
        service.current("Рига").await.unwrap();

        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn formats_weather_text() {
        let weather = WeatherReport {
            temperature: -3.0,
            condition: "light snow".into(),
            humidity: 91,
            pressure: 745,
            city: "Рига".into(),
            feels_like: Some(-8.0),
            wind_speed: Some(6.0),
            icon: None,
        };
        let text = format_weather_text(&weather);
        assert!(text.contains("Weather in Рига"));
        assert!(text.contains("Feels like: -8°C"));
        assert!(text.contains("Wind: 6 m/s"));
    }
}
