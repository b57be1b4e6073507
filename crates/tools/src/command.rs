//! The closed set of tool commands.
//!
//! Tool calls are parsed once at this boundary from `(name, json args)` into
//! typed argument structs. An unknown name is a contract violation; malformed
//! arguments are reported with a fixed per-tool message so the model can
//! retry conversationally.

use serde::Deserialize;
use skybrief_core::error::ToolError;
use skybrief_core::provider::ToolDefinition;
use skybrief_core::{AnalysisKind, ReportFormat, WeatherAnalysis, WeatherReport};

pub const GET_WEATHER: &str = "get_weather";
pub const ANALYZE_WEATHER: &str = "analyze_weather";
pub const SAVE_WEATHER_REPORT: &str = "save_weather_report";

#[derive(Debug, Clone, Deserialize)]
pub struct GetWeatherArgs {
    pub city: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeWeatherArgs {
    pub weather_data: WeatherReport,
    pub analysis_type: AnalysisKind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveReportArgs {
    pub city: String,
    pub weather_data: WeatherReport,
    pub analysis: WeatherAnalysis,
    pub format: ReportFormat,
}

/// A fully-parsed tool invocation.
#[derive(Debug, Clone)]
pub enum ToolCommand {
    GetWeather(GetWeatherArgs),
    AnalyzeWeather(AnalyzeWeatherArgs),
    SaveWeatherReport(SaveReportArgs),
}

impl ToolCommand {
    /// Parse a tool call into a typed command.
    pub fn parse(name: &str, args: &serde_json::Value) -> Result<Self, ToolError> {
        match name {
            GET_WEATHER => {
                let args: GetWeatherArgs = serde_json::from_value(args.clone())
                    .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;
                if args.city.trim().is_empty() {
                    return Err(ToolError::InvalidArguments("city is empty".into()));
                }
                Ok(Self::GetWeather(args))
            }
            ANALYZE_WEATHER => {
                let args: AnalyzeWeatherArgs = serde_json::from_value(args.clone())
                    .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;
                Ok(Self::AnalyzeWeather(args))
            }
            SAVE_WEATHER_REPORT => {
                let args: SaveReportArgs = serde_json::from_value(args.clone())
                    .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;
                if args.city.trim().is_empty() {
                    return Err(ToolError::InvalidArguments("city is empty".into()));
                }
                Ok(Self::SaveWeatherReport(args))
            }
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }
}

/// Fixed error text fed back to the model when a known tool receives
/// malformed arguments.
pub fn invalid_args_text(name: &str) -> &'static str {
    match name {
        GET_WEATHER => "Error: provide a city name",
        ANALYZE_WEATHER => {
            "Error: provide weather_data and analysis_type (clothing/activity/health)"
        }
        SAVE_WEATHER_REPORT => {
            "Error: provide city, weather_data, analysis and format (txt/json/md)"
        }
        _ => "Error: invalid tool arguments",
    }
}

/// The tool definitions advertised to the chat model.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    let weather_data_schema = serde_json::json!({
        "type": "object",
        "description": "Weather data from get_weather",
        "properties": {
            "temperature": { "type": "number", "description": "Temperature in °C" },
            "condition": { "type": "string", "description": "Weather conditions" },
            "humidity": { "type": "number", "description": "Humidity in %" },
            "pressure": { "type": "number", "description": "Pressure in mmHg" },
            "city": { "type": "string", "description": "City name" },
            "feels_like": { "type": "number", "description": "Apparent temperature" },
            "wind_speed": { "type": "number", "description": "Wind speed in m/s" }
        },
        "required": ["temperature", "condition", "humidity", "pressure", "city"]
    });

    vec![
        ToolDefinition {
            name: GET_WEATHER.into(),
            description: "Get the current weather for a city. Returns temperature, \
                          conditions, humidity, and pressure. This is the first step \
                          in the chain: weather → analysis → report."
                .into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "city": {
                        "type": "string",
                        "description": "City name (e.g. Москва, Рига, Paris)"
                    }
                },
                "required": ["city"]
            }),
        },
        ToolDefinition {
            name: ANALYZE_WEATHER.into(),
            description: "Analyze weather data and generate recommendations. \
                          IMPORTANT: call get_weather first and pass its result here. \
                          Analysis types: clothing (what to wear), activity (what the \
                          weather suits), health (health impact)."
                .into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "weather_data": weather_data_schema,
                    "analysis_type": {
                        "type": "string",
                        "enum": ["clothing", "activity", "health"],
                        "description": "clothing = what to wear, activity = what the weather suits, health = health impact"
                    }
                },
                "required": ["weather_data", "analysis_type"]
            }),
        },
        ToolDefinition {
            name: SAVE_WEATHER_REPORT.into(),
            description: "Save a weather report to a file. IMPORTANT: call get_weather \
                          and analyze_weather first. Formats: txt (plain text), json \
                          (structured), md (Markdown with tables). Returns a download \
                          link."
                .into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "city": { "type": "string", "description": "City name" },
                    "weather_data": weather_data_schema,
                    "analysis": {
                        "type": "object",
                        "description": "Analysis result from analyze_weather"
                    },
                    "format": {
                        "type": "string",
                        "enum": ["txt", "json", "md"],
                        "description": "Report file format"
                    }
                },
                "required": ["city", "weather_data", "analysis", "format"]
            }),
        },
    ]
}
