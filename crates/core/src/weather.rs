//! Weather domain records shared by the tools, the monitor, and the CLI.
//!
//! Field names match the wire contract the tools expose to the chat model
//! (`weather_data`, `analysis`, report descriptor), so these types serialize
//! directly into tool results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A current-weather record for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Temperature in °C
    pub temperature: f64,

    /// Human-readable conditions ("clear", "light rain", ...)
    pub condition: String,

    /// Relative humidity in percent
    pub humidity: u32,

    /// Pressure in mmHg
    pub pressure: u32,

    /// Canonical city name
    pub city: String,

    /// Apparent temperature in °C
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feels_like: Option<f64>,

    /// Wind speed in m/s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,

    /// Provider icon code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Which advice transform to run over a weather record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    Clothing,
    Activity,
    Health,
}

impl std::fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisKind::Clothing => write!(f, "clothing"),
            AnalysisKind::Activity => write!(f, "activity"),
            AnalysisKind::Health => write!(f, "health"),
        }
    }
}

/// Clothing recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingAdvice {
    /// The main layer ("winter coat", "light jacket", ...)
    pub main: String,

    /// Individual items to wear
    pub items: Vec<String>,

    /// Optional extras (umbrella, sunglasses, ...)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<String>,
}

/// Activity recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityAdvice {
    pub suitable: Vec<String>,
    pub avoid: Vec<String>,
    pub tips: Vec<String>,
}

/// Health risk level attached to health advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Health warnings and tips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthAdvice {
    pub warnings: Vec<String>,
    pub tips: Vec<String>,
    pub risk_level: RiskLevel,
}

/// The output of the rule-based analyzer: exactly one of the advice fields
/// is populated, matching `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherAnalysis {
    /// Which analysis was requested
    #[serde(rename = "type")]
    pub kind: AnalysisKind,

    /// City the analysis applies to
    pub city: String,

    /// Temperature the analysis was based on
    pub temperature: f64,

    /// Conditions the analysis was based on
    pub condition: String,

    /// Short natural-language summary of the recommendation
    pub summary: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clothing: Option<ClothingAdvice>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<ActivityAdvice>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthAdvice>,

    /// When the analysis was produced (the only nondeterministic field)
    pub timestamp: DateTime<Utc>,
}

/// Report file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Txt,
    Json,
    Md,
}

impl ReportFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Txt => "txt",
            ReportFormat::Json => "json",
            ReportFormat::Md => "md",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Descriptor returned after a report has been written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDescriptor {
    /// Absolute path of the written file
    pub file_path: String,

    /// Public download URL
    pub file_url: String,

    /// Bare file name
    pub file_name: String,

    /// File size in bytes
    pub file_size: u64,

    /// Format the report was rendered in
    pub format: ReportFormat,

    /// When the report was written
    pub timestamp: DateTime<Utc>,
}
