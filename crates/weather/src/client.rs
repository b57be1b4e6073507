//! Upstream weather API client.
//!
//! Talks to a Yandex.Weather-style forecast endpoint, authenticated with the
//! `X-Yandex-Weather-Key` header, and maps the response into the domain
//! [`WeatherReport`].

use async_trait::async_trait;
use serde::Deserialize;
use skybrief_core::error::WeatherError;
use skybrief_core::WeatherReport;
use tracing::{debug, warn};

use crate::cities::CityLocation;

/// Condition codes mapped to readable text. Unknown codes pass through.
static CONDITIONS: &[(&str, &str)] = &[
    ("clear", "clear"),
    ("partly-cloudy", "partly cloudy"),
    ("cloudy", "cloudy"),
    ("overcast", "overcast"),
    ("drizzle", "drizzle"),
    ("light-rain", "light rain"),
    ("rain", "rain"),
    ("moderate-rain", "moderate rain"),
    ("heavy-rain", "heavy rain"),
    ("continuous-heavy-rain", "continuous heavy rain"),
    ("showers", "showers"),
    ("wet-snow", "wet snow"),
    ("light-snow", "light snow"),
    ("snow", "snow"),
    ("snow-showers", "snow showers"),
    ("hail", "hail"),
    ("thunderstorm", "thunderstorm"),
    ("thunderstorm-with-rain", "thunderstorm with rain"),
    ("thunderstorm-with-hail", "thunderstorm with hail"),
];

fn translate_condition(code: &str) -> String {
    CONDITIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, text)| (*text).to_string())
        .unwrap_or_else(|| code.to_string())
}

/// The seam between the weather service and the upstream API.
#[async_trait]
pub trait WeatherApi: Send + Sync {
    /// Fetch current weather for a resolved city.
    async fn fetch(&self, city: &CityLocation) -> Result<WeatherReport, WeatherError>;
}

/// Yandex.Weather forecast API client.
pub struct YandexWeatherApi {
    api_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl YandexWeatherApi {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }
}

#[async_trait]
impl WeatherApi for YandexWeatherApi {
    async fn fetch(&self, city: &CityLocation) -> Result<WeatherReport, WeatherError> {
        let url = format!(
            "{}?lat={}&lon={}&lang=ru_RU&limit=1",
            self.api_url, city.lat, city.lon
        );

        debug!(city = city.name, lat = city.lat, lon = city.lon, "Fetching weather");

        let response = self
            .client
            .get(&url)
            .header("X-Yandex-Weather-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| WeatherError::Unavailable(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(WeatherError::RateLimited);
        }
        if status == 401 || status == 403 {
            return Err(WeatherError::AuthFailed);
        }
        if status >= 500 {
            warn!(status, "Weather API server error");
            return Err(WeatherError::Unavailable(format!(
                "server returned {status}"
            )));
        }
        if status != 200 {
            return Err(WeatherError::Unavailable(format!(
                "unexpected status {status}"
            )));
        }

        let api_resp: ForecastResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Unavailable(format!("malformed response: {e}")))?;

        Ok(WeatherReport {
            temperature: api_resp.fact.temp,
            condition: translate_condition(&api_resp.fact.condition),
            humidity: api_resp.fact.humidity,
            pressure: api_resp.fact.pressure_mm,
            city: city.name.to_string(),
            feels_like: Some(api_resp.fact.feels_like),
            wind_speed: Some(api_resp.fact.wind_speed),
            icon: api_resp.fact.icon,
        })
    }
}

// --- Forecast API types ---

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    fact: Fact,
}

#[derive(Debug, Deserialize)]
struct Fact {
    temp: f64,
    feels_like: f64,
    condition: String,
    humidity: u32,
    pressure_mm: u32,
    wind_speed: f64,
    #[serde(default)]
    icon: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_known_condition_codes() {
        assert_eq!(translate_condition("light-snow"), "light snow");
        assert_eq!(translate_condition("thunderstorm-with-hail"), "thunderstorm with hail");
    }

    #[test]
    fn unknown_condition_passes_through() {
        assert_eq!(translate_condition("volcanic-ash"), "volcanic-ash");
    }

    #[test]
    fn parses_forecast_response() {
        let resp: ForecastResponse = serde_json::from_str(
            r#"{
                "fact": {
                    "temp": -3,
                    "feels_like": -8,
                    "icon": "ovc_sn",
                    "condition": "light-snow",
                    "wind_speed": 6.0,
                    "wind_dir": "nw",
                    "pressure_mm": 745,
                    "pressure_pa": 993,
                    "humidity": 91
                },
                "now": 1735000000
            }"#,
        )
        .unwrap();

        assert_eq!(resp.fact.temp, -3.0);
        assert_eq!(resp.fact.pressure_mm, 745);
        assert_eq!(resp.fact.icon.as_deref(), Some("ovc_sn"));
    }
}
