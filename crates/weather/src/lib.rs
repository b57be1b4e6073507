//! Weather collaborator: city resolution, upstream API client, cache-fronted
//! service, rule-based analysis, and report rendering.

pub mod analyze;
pub mod cities;
pub mod client;
pub mod extract;
pub mod report;
pub mod service;

pub use analyze::{analyze, format_analysis_text};
pub use cities::{find_city, CityLocation};
pub use client::{WeatherApi, YandexWeatherApi};
pub use extract::extract_city;
pub use report::{format_save_result_text, ReportWriter};
pub use service::{format_weather_text, WeatherService};
