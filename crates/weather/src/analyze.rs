//! Rule-based weather analysis.
//!
//! Pure transforms over a weather record: given the same input, the output is
//! identical except for the timestamp. Rules key off the apparent temperature
//! (falling back to the actual one), the condition text, wind, humidity, and
//! pressure.

use chrono::Utc;
use skybrief_core::{
    ActivityAdvice, AnalysisKind, ClothingAdvice, HealthAdvice, RiskLevel, WeatherAnalysis,
    WeatherReport,
};

fn effective_temp(weather: &WeatherReport) -> f64 {
    weather.feels_like.unwrap_or(weather.temperature)
}

fn is_precipitating(condition: &str) -> bool {
    ["rain", "drizzle", "showers", "snow", "hail", "thunderstorm"]
        .iter()
        .any(|w| condition.contains(w))
}

fn is_stormy(condition: &str) -> bool {
    condition.contains("thunderstorm") || condition.contains("hail")
}

/// Run one analysis over a weather record.
pub fn analyze(weather: &WeatherReport, kind: AnalysisKind) -> WeatherAnalysis {
    let mut analysis = WeatherAnalysis {
        kind,
        city: weather.city.clone(),
        temperature: weather.temperature,
        condition: weather.condition.clone(),
        summary: String::new(),
        clothing: None,
        activity: None,
        health: None,
        timestamp: Utc::now(),
    };

    match kind {
        AnalysisKind::Clothing => {
            let clothing = clothing_advice(weather);
            analysis.summary = format!(
                "In {} it is {}°C ({}), wear: {}.",
                weather.city, weather.temperature, weather.condition, clothing.main
            );
            analysis.clothing = Some(clothing);
        }
        AnalysisKind::Activity => {
            let activity = activity_advice(weather);
            analysis.summary = format!(
                "At {}°C and {} in {}, good options: {}.",
                weather.temperature,
                weather.condition,
                weather.city,
                activity.suitable.join(", ")
            );
            analysis.activity = Some(activity);
        }
        AnalysisKind::Health => {
            let health = health_advice(weather);
            analysis.summary = format!(
                "Health risk in {} is {:?} at {}°C, {}.",
                weather.city,
                health.risk_level,
                weather.temperature,
                weather.condition
            );
            analysis.health = Some(health);
        }
    }

    analysis
}

fn clothing_advice(weather: &WeatherReport) -> ClothingAdvice {
    let temp = effective_temp(weather);
    let condition = weather.condition.as_str();

    let (main, items): (&str, Vec<&str>) = if temp < -10.0 {
        (
            "heavy winter coat",
            vec![
                "thermal underwear",
                "heavy winter coat",
                "warm hat",
                "scarf",
                "insulated gloves",
                "winter boots",
            ],
        )
    } else if temp < 0.0 {
        (
            "winter coat",
            vec!["winter coat", "hat", "scarf", "gloves", "warm boots"],
        )
    } else if temp < 10.0 {
        (
            "warm jacket",
            vec!["warm jacket", "sweater", "long trousers", "closed shoes"],
        )
    } else if temp < 18.0 {
        (
            "light jacket",
            vec!["light jacket or hoodie", "long trousers"],
        )
    } else if temp < 25.0 {
        ("t-shirt", vec!["t-shirt", "light trousers or jeans"])
    } else {
        (
            "light summer clothing",
            vec!["t-shirt or top", "shorts", "sandals"],
        )
    };

    let mut extras: Vec<String> = Vec::new();
    if condition.contains("rain") || condition.contains("drizzle") || condition.contains("showers")
    {
        extras.push("umbrella".into());
        extras.push("waterproof jacket".into());
    }
    if condition.contains("snow") {
        extras.push("non-slip footwear".into());
    }
    if condition == "clear" && temp >= 18.0 {
        extras.push("sunglasses".into());
    }
    if weather.wind_speed.unwrap_or(0.0) > 8.0 {
        extras.push("windbreaker".into());
    }

    ClothingAdvice {
        main: main.to_string(),
        items: items.into_iter().map(String::from).collect(),
        extras,
    }
}

fn activity_advice(weather: &WeatherReport) -> ActivityAdvice {
    let temp = effective_temp(weather);
    let condition = weather.condition.as_str();
    let wind = weather.wind_speed.unwrap_or(0.0);

    if is_stormy(condition) {
        return ActivityAdvice {
            suitable: vec!["indoor activities".into(), "museums".into(), "reading".into()],
            avoid: vec![
                "any outdoor activity".into(),
                "open water".into(),
                "standing under trees".into(),
            ],
            tips: vec!["Stay indoors until the storm passes.".into()],
        };
    }

    if is_precipitating(condition) {
        return ActivityAdvice {
            suitable: vec![
                "museums and galleries".into(),
                "indoor sports".into(),
                "cafes".into(),
            ],
            avoid: vec!["hiking".into(), "cycling".into(), "picnics".into()],
            tips: vec!["Take an umbrella if you go out.".into()],
        };
    }

    if temp < 0.0 {
        ActivityAdvice {
            suitable: vec![
                "ice skating".into(),
                "brisk short walks".into(),
                "winter photography".into(),
            ],
            avoid: vec!["long stays outdoors".into()],
            tips: vec!["Dress in layers and keep extremities warm.".into()],
        }
    } else if temp >= 30.0 {
        ActivityAdvice {
            suitable: vec![
                "swimming".into(),
                "early morning walks".into(),
                "shaded parks".into(),
            ],
            avoid: vec!["midday sun".into(), "strenuous outdoor sports".into()],
            tips: vec!["Drink plenty of water and seek shade at midday.".into()],
        }
    } else if (15.0..25.0).contains(&temp) && wind < 8.0 {
        ActivityAdvice {
            suitable: vec![
                "walking".into(),
                "cycling".into(),
                "picnic".into(),
                "outdoor sports".into(),
            ],
            avoid: vec![],
            tips: vec!["Great conditions, enjoy the outdoors.".into()],
        }
    } else {
        ActivityAdvice {
            suitable: vec!["walking".into(), "jogging".into(), "sightseeing".into()],
            avoid: if wind >= 8.0 {
                vec!["cycling in open areas".into()]
            } else {
                vec![]
            },
            tips: vec!["A light extra layer will not hurt.".into()],
        }
    }
}

fn health_advice(weather: &WeatherReport) -> HealthAdvice {
    let temp = effective_temp(weather);
    let condition = weather.condition.as_str();
    let wind = weather.wind_speed.unwrap_or(0.0);

    let mut warnings: Vec<String> = Vec::new();
    let mut tips: Vec<String> = Vec::new();

    if temp <= -15.0 {
        warnings.push("Severe cold: frostbite risk on exposed skin.".into());
        tips.push("Limit time outside to short intervals.".into());
    } else if temp <= -5.0 {
        warnings.push("Hard frost: cover face and hands in the wind.".into());
    }

    if temp >= 35.0 {
        warnings.push("Extreme heat: heatstroke risk.".into());
        tips.push("Avoid exertion, drink water regularly.".into());
    } else if temp >= 28.0 {
        warnings.push("Hot weather: watch for dehydration.".into());
    }

    if is_stormy(condition) {
        warnings.push("Thunderstorm: stay away from open areas and tall trees.".into());
    }

    if weather.pressure < 740 || weather.pressure > 770 {
        warnings.push(format!(
            "Atmospheric pressure {} mmHg is outside the comfortable range.",
            weather.pressure
        ));
        tips.push("Weather-sensitive people may feel headaches or fatigue.".into());
    }

    if wind > 12.0 {
        warnings.push("Strong wind: risk of falling branches.".into());
    }

    if weather.humidity > 85 {
        tips.push("High humidity makes temperature extremes feel harsher.".into());
    }

    let risk_level = if temp <= -15.0 || temp >= 35.0 || is_stormy(condition) {
        RiskLevel::High
    } else if !warnings.is_empty() {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    if warnings.is_empty() {
        tips.push("No particular health concerns from the weather.".into());
    }

    HealthAdvice {
        warnings,
        tips,
        risk_level,
    }
}

/// Format an analysis as the human-readable tool output.
pub fn format_analysis_text(analysis: &WeatherAnalysis) -> String {
    let mut lines = vec![analysis.summary.clone(), String::new()];

    if let Some(clothing) = &analysis.clothing {
        lines.push(format!("Main layer: {}", clothing.main));
        lines.push(format!("Items: {}", clothing.items.join(", ")));
        if !clothing.extras.is_empty() {
            lines.push(format!("Extras: {}", clothing.extras.join(", ")));
        }
    }

    if let Some(activity) = &analysis.activity {
        lines.push(format!("Suitable: {}", activity.suitable.join(", ")));
        if !activity.avoid.is_empty() {
            lines.push(format!("Avoid: {}", activity.avoid.join(", ")));
        }
        for tip in &activity.tips {
            lines.push(format!("Tip: {tip}"));
        }
    }

    if let Some(health) = &analysis.health {
        lines.push(format!("Risk level: {:?}", health.risk_level));
        for warning in &health.warnings {
            lines.push(format!("Warning: {warning}"));
        }
        for tip in &health.tips {
            lines.push(format!("Tip: {tip}"));
        }
    }

    lines.join("\n")
}
