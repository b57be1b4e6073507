//! The tool dispatch boundary: three weather tools behind the
//! `ToolDispatcher` seam.
//!
//! Upstream failures and malformed arguments come back as error-text results
//! inside `Ok(Dispatch)` so the orchestration loop keeps running; only an
//! unknown tool name propagates as an error.

pub mod command;

use async_trait::async_trait;
use skybrief_core::error::ToolError;
use skybrief_core::provider::ToolDefinition;
use skybrief_core::{Artifact, Dispatch, ToolCall, ToolDispatcher, ToolResult};
use skybrief_weather::{
    analyze, extract_city, format_analysis_text, format_save_result_text, format_weather_text,
    ReportWriter, WeatherService,
};
use tracing::{debug, warn};

pub use command::{tool_definitions, ToolCommand};

/// The concrete tool set: weather lookup, analysis, report saving.
#[derive(Clone)]
pub struct Toolkit {
    weather: WeatherService,
    reports: ReportWriter,
}

impl Toolkit {
    pub fn new(weather: WeatherService, reports: ReportWriter) -> Self {
        Self { weather, reports }
    }

    async fn execute(&self, call: &ToolCall, command: ToolCommand) -> Dispatch {
        match command {
            ToolCommand::GetWeather(args) => {
                // Chat text sometimes arrives instead of a bare city name;
                // the extractor normalizes it, unmatched input passes through.
                let city = extract_city(&args.city).unwrap_or(args.city);

                match self.weather.current(&city).await {
                    Ok(weather) => {
                        let data = serde_json::to_value(&weather).unwrap_or_default();
                        Dispatch {
                            result: ToolResult::ok(
                                &call.id,
                                format_weather_text(&weather),
                                data,
                            ),
                            artifact: Some(Artifact::Weather(weather)),
                        }
                    }
                    Err(e) => {
                        warn!(tool = %call.name, error = %e, "Tool failed");
                        Dispatch {
                            result: ToolResult::error(&call.id, format!("Error: {e}")),
                            artifact: None,
                        }
                    }
                }
            }
            ToolCommand::AnalyzeWeather(args) => {
                let analysis = analyze(&args.weather_data, args.analysis_type);
                let data = serde_json::to_value(&analysis).unwrap_or_default();
                Dispatch {
                    result: ToolResult::ok(&call.id, format_analysis_text(&analysis), data),
                    artifact: Some(Artifact::Analysis(analysis)),
                }
            }
            ToolCommand::SaveWeatherReport(args) => {
                match self
                    .reports
                    .write(&args.city, &args.weather_data, &args.analysis, args.format)
                    .await
                {
                    Ok(descriptor) => {
                        let data = serde_json::to_value(&descriptor).unwrap_or_default();
                        Dispatch {
                            result: ToolResult::ok(
                                &call.id,
                                format_save_result_text(&descriptor),
                                data,
                            ),
                            artifact: Some(Artifact::Report(descriptor)),
                        }
                    }
                    Err(e) => {
                        warn!(tool = %call.name, error = %e, "Tool failed");
                        Dispatch {
                            result: ToolResult::error(&call.id, format!("Error: {e}")),
                            artifact: None,
                        }
                    }
                }
            }
        }
    }
}

#[async_trait]
impl ToolDispatcher for Toolkit {
    fn definitions(&self) -> Vec<ToolDefinition> {
        tool_definitions()
    }

    async fn dispatch(&self, call: &ToolCall) -> Result<Dispatch, ToolError> {
        debug!(tool = %call.name, "Dispatching tool call");

        let command = match ToolCommand::parse(&call.name, &call.arguments) {
            Ok(command) => command,
            Err(ToolError::UnknownTool(name)) => {
                return Err(ToolError::UnknownTool(name));
            }
            Err(e) => {
                warn!(tool = %call.name, error = %e, "Invalid tool arguments");
                return Ok(Dispatch {
                    result: ToolResult::error(
                        &call.id,
                        command::invalid_args_text(&call.name),
                    ),
                    artifact: None,
                });
            }
        };

        Ok(self.execute(call, command).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use skybrief_core::error::WeatherError;
    use skybrief_core::WeatherReport;
    use skybrief_weather::{CityLocation, WeatherApi};
    use std::sync::Arc;
    use std::time::Duration;

    struct FakeApi {
        fail: bool,
    }

    #[async_trait]
    impl WeatherApi for FakeApi {
        async fn fetch(&self, city: &CityLocation) -> Result<WeatherReport, WeatherError> {
            if self.fail {
                return Err(WeatherError::Unavailable("offline".into()));
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

    fn toolkit(fail: bool, dir: &std::path::Path) -> Toolkit {
        let service = WeatherService::new(Arc::new(FakeApi { fail }), Duration::from_secs(300));
        let reports = ReportWriter::new(dir, "http://localhost:3000/reports");
        Toolkit::new(service, reports)
    }

    fn call(name: &str, args: serde_json::Value) -> ToolCall {
        ToolCall {
            id: "toolu_1".into(),
            name: name.into(),
            arguments: args,
        }
    }

    #[tokio::test]
    async fn get_weather_returns_weather_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let toolkit = toolkit(false, dir.path());

        let dispatch = toolkit
            .dispatch(&call("get_weather", serde_json::json!({ "city": "Рига" })))
            .await
            .unwrap();

        assert!(dispatch.result.success);
        assert!(dispatch.result.output.contains("Weather in Рига"));
        assert!(matches!(dispatch.artifact, Some(Artifact::Weather(_))));
    }

    #[tokio::test]
    async fn get_weather_extracts_city_from_chat_text() {
        let dir = tempfile::tempdir().unwrap();
        let toolkit = toolkit(false, dir.path());

        let dispatch = toolkit
            .dispatch(&call(
                "get_weather",
                serde_json::json!({ "city": "какая погода в москве" }),
            ))
            .await
            .unwrap();

        assert!(dispatch.result.success);
        assert!(dispatch.result.output.contains("Москва"));
    }

    #[tokio::test]
    async fn upstream_failure_becomes_error_result() {
        let dir = tempfile::tempdir().unwrap();
        let toolkit = toolkit(true, dir.path());

        let dispatch = toolkit
            .dispatch(&call("get_weather", serde_json::json!({ "city": "Рига" })))
            .await
            .unwrap();

        assert!(!dispatch.result.success);
        assert!(dispatch.result.output.starts_with("Error:"));
        assert!(dispatch.artifact.is_none());
    }

    #[tokio::test]
    async fn malformed_args_get_fixed_message() {
        let dir = tempfile::tempdir().unwrap();
        let toolkit = toolkit(false, dir.path());

        let dispatch = toolkit
            .dispatch(&call("analyze_weather", serde_json::json!({ "bogus": 1 })))
            .await
            .unwrap();

        assert!(!dispatch.result.success);
        assert_eq!(
            dispatch.result.output,
            "Error: provide weather_data and analysis_type (clothing/activity/health)"
        );
    }

    #[tokio::test]
    async fn unknown_tool_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let toolkit = toolkit(false, dir.path());

        let err = toolkit
            .dispatch(&call("fly_to_moon", serde_json::json!({})))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(_)));
    }

    #[tokio::test]
    async fn analyze_then_save_report_round() {
        let dir = tempfile::tempdir().unwrap();
        let toolkit = toolkit(false, dir.path());

        let weather = serde_json::json!({
            "temperature": -3.0,
            "condition": "light snow",
            "humidity": 91,
            "pressure": 745,
            "city": "Рига",
            "feels_like": -8.0,
            "wind_speed": 6.0
        });

        let analyze_dispatch = toolkit
            .dispatch(&call(
                "analyze_weather",
                serde_json::json!({ "weather_data": weather, "analysis_type": "clothing" }),
            ))
            .await
            .unwrap();
        assert!(analyze_dispatch.result.success);
        let analysis = analyze_dispatch.result.data.clone().unwrap();

        let save_dispatch = toolkit
            .dispatch(&call(
                "save_weather_report",
                serde_json::json!({
                    "city": "Рига",
                    "weather_data": weather,
                    "analysis": analysis,
                    "format": "md"
                }),
            ))
            .await
            .unwrap();

        assert!(save_dispatch.result.success);
        assert!(save_dispatch.result.output.contains("Report saved"));
        match save_dispatch.artifact {
            Some(Artifact::Report(descriptor)) => {
                assert!(descriptor.file_name.ends_with(".md"));
                assert!(std::path::Path::new(&descriptor.file_path).exists());
            }
            _ => panic!("Expected report artifact"),
        }
    }
}
