//! Report rendering and persistence.
//!
//! Writes `weather-{city-slug}-{timestamp}.{ext}` files under the configured
//! reports directory and returns a descriptor with the public download URL.

use chrono::Utc;
use skybrief_core::error::ReportError;
use skybrief_core::{ReportDescriptor, ReportFormat, WeatherAnalysis, WeatherReport};
use std::path::PathBuf;
use tracing::info;

use crate::analyze::format_analysis_text;
use crate::service::format_weather_text;

/// Renders weather + analysis into report files.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
    base_url: String,
}

impl ReportWriter {
    pub fn new(dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Write a report and return its descriptor.
    pub async fn write(
        &self,
        city: &str,
        weather: &WeatherReport,
        analysis: &WeatherAnalysis,
        format: ReportFormat,
    ) -> Result<ReportDescriptor, ReportError> {
        let timestamp = Utc::now();
        let file_name = format!(
            "weather-{}-{}.{}",
            slugify(city),
            timestamp.format("%Y%m%d-%H%M%S"),
            format.extension()
        );

        let content = match format {
            ReportFormat::Txt => render_txt(city, weather, analysis),
            ReportFormat::Json => render_json(city, weather, analysis)?,
            ReportFormat::Md => render_md(city, weather, analysis),
        };

        tokio::fs::create_dir_all(&self.dir).await?;
        let file_path = self.dir.join(&file_name);
        tokio::fs::write(&file_path, content.as_bytes()).await?;

        let file_size = tokio::fs::metadata(&file_path).await?.len();

        info!(file = %file_path.display(), size = file_size, "Report written");

        Ok(ReportDescriptor {
            file_path: file_path.to_string_lossy().into_owned(),
            file_url: format!("{}/{}", self.base_url, file_name),
            file_name,
            file_size,
            format,
            timestamp,
        })
    }
}

/// Lowercase, spaces to dashes. Non-alphanumeric characters other than
/// dashes are dropped; Cyrillic survives as-is.
fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() {
                Some(c)
            } else if c.is_whitespace() || c == '-' {
                Some('-')
            } else {
                None
            }
        })
        .collect()
}

fn render_txt(city: &str, weather: &WeatherReport, analysis: &WeatherAnalysis) -> String {
    format!(
        "WEATHER REPORT: {city}\nGenerated: {}\n\n{}\n\n--- Analysis ({}) ---\n\n{}\n",
        Utc::now().format("%Y-%m-%d %H:%M UTC"),
        format_weather_text(weather),
        analysis.kind,
        format_analysis_text(analysis)
    )
}

fn render_json(
    city: &str,
    weather: &WeatherReport,
    analysis: &WeatherAnalysis,
) -> Result<String, ReportError> {
    let payload = serde_json::json!({
        "city": city,
        "generated_at": Utc::now(),
        "weather": weather,
        "analysis": analysis,
    });
    Ok(serde_json::to_string_pretty(&payload)?)
}

fn render_md(city: &str, weather: &WeatherReport, analysis: &WeatherAnalysis) -> String {
    let mut out = String::new();
    out.push_str(&format!("# Weather report: {city}\n\n"));
    out.push_str(&format!(
        "Generated: {}\n\n",
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    ));

    out.push_str("## Current weather\n\n");
    out.push_str("| Metric | Value |\n|---|---|\n");
    out.push_str(&format!("| Temperature | {}°C |\n", weather.temperature));
    if let Some(feels) = weather.feels_like {
        out.push_str(&format!("| Feels like | {feels}°C |\n"));
    }
    out.push_str(&format!("| Conditions | {} |\n", weather.condition));
    out.push_str(&format!("| Humidity | {}% |\n", weather.humidity));
    out.push_str(&format!("| Pressure | {} mmHg |\n", weather.pressure));
    if let Some(wind) = weather.wind_speed {
        out.push_str(&format!("| Wind | {wind} m/s |\n"));
    }

    out.push_str(&format!("\n## Analysis ({})\n\n", analysis.kind));
    out.push_str(&format!("{}\n\n", analysis.summary));

    if let Some(clothing) = &analysis.clothing {
        out.push_str(&format!("**Main layer:** {}\n\n", clothing.main));
        for item in &clothing.items {
            out.push_str(&format!("- {item}\n"));
        }
        if !clothing.extras.is_empty() {
            out.push_str(&format!("\n**Extras:** {}\n", clothing.extras.join(", ")));
        }
    }

    if let Some(activity) = &analysis.activity {
        out.push_str("**Suitable:**\n\n");
        for item in &activity.suitable {
            out.push_str(&format!("- {item}\n"));
        }
        if !activity.avoid.is_empty() {
            out.push_str("\n**Avoid:**\n\n");
            for item in &activity.avoid {
                out.push_str(&format!("- {item}\n"));
            }
        }
    }

    if let Some(health) = &analysis.health {
        out.push_str(&format!("**Risk level:** {:?}\n\n", health.risk_level));
        for warning in &health.warnings {
            out.push_str(&format!("- ⚠ {warning}\n"));
        }
        for tip in &health.tips {
            out.push_str(&format!("- {tip}\n"));
        }
    }

    out
}

/// Format a report descriptor as the human-readable tool output.
pub fn format_save_result_text(descriptor: &ReportDescriptor) -> String {
    format!(
        "Report saved: {} ({} bytes)\nDownload: {}",
        descriptor.file_name, descriptor.file_size, descriptor.file_url
    )
}
