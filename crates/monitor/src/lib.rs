//! Background weather monitoring.
//!
//! Polls one city on an interval, appends readings to the history store, and
//! periodically generates a trend summary. The summary asks the chat model to
//! describe the trend; when that call fails the monitor falls back to a
//! deterministic statistical sentence, so monitoring never depends on the
//! model being reachable.

pub mod store;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use skybrief_core::error::Result;
use skybrief_core::{Message, Provider, ProviderRequest};
use skybrief_weather::WeatherService;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

pub use store::{HistoryStore, WeatherObservation, WeatherSummary};

const SUMMARY_WINDOW_HOURS: i64 = 24;

/// Polls weather for one city and maintains its history and summaries.
pub struct WeatherMonitor {
    service: WeatherService,
    store: HistoryStore,
    provider: Arc<dyn Provider>,
    model: String,
    city: String,
    summary_interval: Duration,
}

impl WeatherMonitor {
    pub fn new(
        service: WeatherService,
        store: HistoryStore,
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        city: impl Into<String>,
        summary_interval: Duration,
    ) -> Self {
        Self {
            service,
            store,
            provider,
            model: model.into(),
            city: city.into(),
            summary_interval,
        }
    }

    /// One poll: fetch, record, and summarize when due.
    pub async fn poll_once(&self) -> Result<()> {
        let weather = self.service.current(&self.city).await?;
        debug!(city = %self.city, temp = weather.temperature, "Observation");

        self.store
            .append(WeatherObservation {
                weather,
                timestamp: Utc::now(),
            })
            .await?;

        if self.store.needs_summary(self.summary_interval).await? {
            self.generate_summary().await?;
        }

        Ok(())
    }

    /// Generate and persist a trend summary over the recent window.
    pub async fn generate_summary(&self) -> Result<Option<WeatherSummary>> {
        let observations = self.store.recent(SUMMARY_WINDOW_HOURS).await?;
        if observations.len() < 2 {
            debug!("Not enough observations for a summary");
            return Ok(None);
        }

        let text = match self.model_summary(&observations).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Model summary failed, using statistical fallback");
                fallback_summary(&self.city, &observations)
            }
        };

        let summary = WeatherSummary {
            text,
            generated_at: Utc::now(),
            period_start: observations[0].timestamp,
            period_end: observations[observations.len() - 1].timestamp,
            entries_count: observations.len(),
        };
        self.store.save_summary(summary.clone()).await?;

        info!(city = %self.city, entries = summary.entries_count, "Summary generated");
        Ok(Some(summary))
    }

    async fn model_summary(&self, observations: &[WeatherObservation]) -> Result<String> {
        let mut prompt = format!(
            "Summarize the weather trend in {} over these readings in 2-3 \
             sentences. Mention the temperature range and whether it is \
             warming, cooling, or stable.\n\n",
            self.city
        );
        for o in observations {
            prompt.push_str(&format!(
                "- {}: {}°C, {}, humidity {}%, pressure {} mmHg\n",
                o.timestamp.format("%Y-%m-%d %H:%M"),
                o.weather.temperature,
                o.weather.condition,
                o.weather.humidity,
                o.weather.pressure
            ));
        }

        let request = ProviderRequest {
            model: self.model.clone(),
            messages: vec![Message::user(prompt)],
            temperature: 0.3,
            max_tokens: Some(512),
            tools: vec![],
        };

        let response = self.provider.complete(request).await?;
        Ok(response.message.content)
    }

    /// Spawn the polling loop. Errors are logged, never fatal; the task runs
    /// until aborted.
    pub fn start(self: Arc<Self>, poll_interval: Duration) -> JoinHandle<()> {
        info!(city = %self.city, interval_secs = poll_interval.as_secs(), "Monitor started");
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(e) = self.poll_once().await {
                    error!(error = %e, city = %self.city, "Poll failed");
                }
            }
        })
    }
}

/// Deterministic min/avg/max + trend sentence used when the model call fails.
fn fallback_summary(city: &str, observations: &[WeatherObservation]) -> String {
    let temps: Vec<f64> = observations.iter().map(|o| o.weather.temperature).collect();
    let min = temps.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = temps.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let avg = temps.iter().sum::<f64>() / temps.len() as f64;

    let delta = temps[temps.len() - 1] - temps[0];
    let trend = if delta > 1.5 {
        "warming"
    } else if delta < -1.5 {
        "cooling"
    } else {
        "stable"
    };

    format!(
        "Weather in {city} over {} readings: min {min:.1}°C, avg {avg:.1}°C, \
         max {max:.1}°C. Trend: {trend}.",
        observations.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use skybrief_core::error::{ProviderError, WeatherError};
    use skybrief_core::{ProviderResponse, StopReason, WeatherReport};
    use skybrief_weather::{CityLocation, WeatherApi};

    struct FakeApi {
        temp: f64,
    }

    #[async_trait]
    impl WeatherApi for FakeApi {
        async fn fetch(&self, city: &CityLocation) -> std::result::Result<WeatherReport, WeatherError> {
            Ok(WeatherReport {
                temperature: self.temp,
                condition: "clear".into(),
                humidity: 50,
                pressure: 760,
                city: city.name.to_string(),
                feels_like: None,
                wind_speed: None,
                icon: None,
            })
        }
    }

    struct FixedProvider {
        reply: Option<String>,
    }

    #[async_trait]
    impl Provider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn complete(
            &self,
            _request: ProviderRequest,
        ) -> std::result::Result<ProviderResponse, ProviderError> {
            match &self.reply {
                Some(text) => Ok(ProviderResponse {
                    message: Message::assistant(text.clone()),
                    stop_reason: StopReason::EndTurn,
                    usage: None,
                    model: "test-model".into(),
                }),
                None => Err(ProviderError::Network("offline".into())),
            }
        }
    }

    fn monitor(
        dir: &tempfile::TempDir,
        temp: f64,
        reply: Option<String>,
    ) -> WeatherMonitor {
        let service = WeatherService::new(
            Arc::new(FakeApi { temp }),
            // Zero TTL so successive polls refetch instead of hitting cache
            Duration::from_secs(0),
        );
        let store = HistoryStore::new(dir.path().join("history.json"), 100);
        WeatherMonitor::new(
            service,
            store,
            Arc::new(FixedProvider { reply }),
            "test-model",
            "Рига",
            Duration::from_secs(3600),
        )
    }

    fn observation(temp: f64, hours_ago: i64) -> WeatherObservation {
        WeatherObservation {
            weather: WeatherReport {
                temperature: temp,
                condition: "clear".into(),
                humidity: 50,
                pressure: 760,
                city: "Рига".into(),
                feels_like: None,
                wind_speed: None,
                icon: None,
            },
            timestamp: Utc::now() - chrono::Duration::hours(hours_ago),
        }
    }

    #[tokio::test]
    async fn poll_once_records_an_observation() {
        let dir = tempfile::tempdir().unwrap();
        let monitor = monitor(&dir, -3.0, Some("Trend: stable.".into()));

        monitor.poll_once().await.unwrap();

        let latest = monitor.store.latest().await.unwrap().unwrap();
        assert_eq!(latest.weather.temperature, -3.0);
        assert_eq!(latest.weather.city, "Рига");
    }

    #[tokio::test]
    async fn summary_uses_model_text_when_available() {
        let dir = tempfile::tempdir().unwrap();
        let monitor = monitor(&dir, -3.0, Some("It is getting colder in Riga.".into()));

        monitor.store.append(observation(-1.0, 3)).await.unwrap();
        monitor.store.append(observation(-4.0, 1)).await.unwrap();

        let summary = monitor.generate_summary().await.unwrap().unwrap();
        assert_eq!(summary.text, "It is getting colder in Riga.");
        assert_eq!(summary.entries_count, 2);
    }

    #[tokio::test]
    async fn summary_falls_back_when_model_fails() {
        let dir = tempfile::tempdir().unwrap();
        let monitor = monitor(&dir, -3.0, None);

        monitor.store.append(observation(-1.0, 3)).await.unwrap();
        monitor.store.append(observation(-4.0, 1)).await.unwrap();

        let summary = monitor.generate_summary().await.unwrap().unwrap();
        assert!(summary.text.contains("min -4.0°C"));
        assert!(summary.text.contains("cooling"));

        // Persisted too
        let stored = monitor.store.last_summary().await.unwrap().unwrap();
        assert_eq!(stored.text, summary.text);
    }

    #[tokio::test]
    async fn too_few_observations_skip_summary() {
        let dir = tempfile::tempdir().unwrap();
        let monitor = monitor(&dir, -3.0, None);

        monitor.store.append(observation(-1.0, 1)).await.unwrap();
        assert!(monitor.generate_summary().await.unwrap().is_none());
    }

    #[test]
    fn fallback_summary_trends() {
        let warming = vec![observation(0.0, 3), observation(3.0, 0)];
        assert!(fallback_summary("Рига", &warming).contains("warming"));

        let stable = vec![observation(1.0, 3), observation(1.5, 0)];
        assert!(fallback_summary("Рига", &stable).contains("stable"));
    }
}
