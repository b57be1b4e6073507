//! `skybrief weather` — One-shot weather lookup without the chat model.

use skybrief_config::AppConfig;
use skybrief_core::AnalysisKind;
use skybrief_weather::{analyze, extract_city, format_analysis_text, format_weather_text};

pub async fn run(city: &str, analyze_kind: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let service = super::build_weather_service(&config)?;

    let city = extract_city(city).unwrap_or_else(|| city.to_string());
    let weather = service.current(&city).await?;

    println!("{}", format_weather_text(&weather));

    if let Some(kind) = analyze_kind {
        let kind = match kind.as_str() {
            "clothing" => AnalysisKind::Clothing,
            "activity" => AnalysisKind::Activity,
            "health" => AnalysisKind::Health,
            other => {
                return Err(
                    format!("Unknown analysis type '{other}' (use clothing, activity, or health)")
                        .into(),
                );
            }
        };
        let analysis = analyze(&weather, kind);
        println!("\n{}", format_analysis_text(&analysis));
    }

    Ok(())
}
