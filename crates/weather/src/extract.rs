//! Best-effort city extraction from free-form chat text.
//!
//! Ordered regex patterns over common Russian/English phrasings, then a
//! grammatical-case normalization table, then a substring scan over known
//! city forms. No match returns `None` and callers pass the raw text through.

use once_cell::sync::Lazy;
use regex::Regex;

static PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)погод[аеуы]?\s+(?:в|во)\s+([а-яёА-ЯЁ\-\s]+?)(?:\?|!|,|$)",
        r"(?i)(?:в|во)\s+([а-яёА-ЯЁ\-\s]+?)\s+погод",
        r"(?i)weather\s+(?:in|at)\s+([a-zA-Z\-\s]+?)(?:\?|!|,|$)",
        r"(?i)([а-яёА-ЯЁ\-]+)\s+погод",
        r"(?i)что\s+(?:с погодой\s+)?(?:в|во)\s+([а-яёА-ЯЁ\-\s]+?)(?:\?|!|,|$)",
        r"(?i)как\s+(?:там\s+)?(?:в|во)\s+([а-яёА-ЯЁ\-\s]+?)(?:\?|!|,|$)",
        r"(?i)(?:сейчас\s+)?(?:в|во)\s+([а-яёА-ЯЁ\-\s]+?)(?:\?|!|,|$)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static extraction pattern"))
    .collect()
});

/// Grammatical case forms mapped to canonical city names.
static CASE_FORMS: &[(&str, &str)] = &[
    ("риге", "Рига"), ("ригу", "Рига"), ("ригой", "Рига"),
    ("москве", "Москва"), ("москву", "Москва"), ("москвой", "Москва"),
    ("праге", "Прага"), ("прагу", "Прага"), ("прагой", "Прага"),
    ("вене", "Вена"), ("вену", "Вена"), ("веной", "Вена"),
    ("варшаве", "Варшава"), ("варшаву", "Варшава"),
    ("одессе", "Одесса"), ("одессу", "Одесса"),
    ("самаре", "Самара"), ("самару", "Самара"),
    ("астане", "Астана"), ("астану", "Астана"),
    ("париже", "Париж"), ("парижа", "Париж"), ("парижем", "Париж"),
    ("лондоне", "Лондон"), ("лондона", "Лондон"), ("лондоном", "Лондон"),
    ("берлине", "Берлин"), ("берлина", "Берлин"), ("берлином", "Берлин"),
    ("мадриде", "Мадрид"), ("мадрида", "Мадрид"),
    ("риме", "Рим"), ("рима", "Рим"), ("римом", "Рим"),
    ("пекине", "Пекин"), ("пекина", "Пекин"),
    ("дубае", "Дубай"), ("дубая", "Дубай"),
    ("минске", "Минск"), ("минска", "Минск"), ("минском", "Минск"),
    ("киеве", "Киев"), ("киева", "Киев"), ("киевом", "Киев"),
    ("таллине", "Таллин"), ("таллина", "Таллин"), ("таллином", "Таллин"),
    ("вильнюсе", "Вильнюс"), ("вильнюса", "Вильнюс"),
    ("петербурге", "Санкт-Петербург"), ("питере", "Санкт-Петербург"),
    ("казани", "Казань"), ("казанью", "Казань"),
    ("новосибирске", "Новосибирск"), ("екатеринбурге", "Екатеринбург"),
    ("красноярске", "Красноярск"), ("владивостоке", "Владивосток"),
    ("калининграде", "Калининград"), ("амстердаме", "Амстердам"),
    ("стокгольме", "Стокгольм"), ("копенгагене", "Копенгаген"),
    ("барселоне", "Барселона"), ("барселону", "Барселона"),
    ("милане", "Милан"), ("милана", "Милан"),
    ("мюнхене", "Мюнхен"), ("мюнхена", "Мюнхен"),
    ("цюрихе", "Цюрих"), ("цюриха", "Цюрих"),
    ("шанхае", "Шанхай"), ("шанхая", "Шанхай"),
    ("сеуле", "Сеул"), ("сеула", "Сеул"),
    ("бангкоке", "Бангкок"), ("бангкока", "Бангкок"),
    ("сингапуре", "Сингапур"), ("сингапура", "Сингапур"),
    ("стамбуле", "Стамбул"), ("стамбула", "Стамбул"),
];

/// Known city forms (nominative + common case forms) for the substring scan
/// when none of the phrase patterns match.
static CITY_FORMS: &[(&str, &str)] = &[
    ("москва", "Москва"), ("рига", "Рига"), ("париж", "Париж"),
    ("лондон", "Лондон"), ("берлин", "Берлин"), ("прага", "Прага"),
    ("минск", "Минск"), ("киев", "Киев"), ("таллин", "Таллин"),
    ("вильнюс", "Вильнюс"), ("варшава", "Варшава"), ("вена", "Вена"),
    ("амстердам", "Амстердам"), ("стокгольм", "Стокгольм"),
    ("хельсинки", "Хельсинки"), ("осло", "Осло"), ("токио", "Токио"),
    ("пекин", "Пекин"), ("дубай", "Дубай"), ("сингапур", "Сингапур"),
    ("санкт-петербург", "Санкт-Петербург"), ("петербург", "Санкт-Петербург"),
    ("спб", "Санкт-Петербург"), ("питер", "Санкт-Петербург"),
    ("риге", "Рига"), ("ригу", "Рига"),
    ("москве", "Москва"), ("москву", "Москва"),
    ("париже", "Париж"), ("лондоне", "Лондон"), ("берлине", "Берлин"),
    ("праге", "Прага"), ("минске", "Минск"), ("киеве", "Киев"),
    ("таллине", "Таллин"), ("вильнюсе", "Вильнюс"),
    ("варшаве", "Варшава"), ("вене", "Вена"),
    ("амстердаме", "Амстердам"), ("стокгольме", "Стокгольм"),
    ("пекине", "Пекин"), ("дубае", "Дубай"), ("сингапуре", "Сингапур"),
    ("петербурге", "Санкт-Петербург"), ("питере", "Санкт-Петербург"),
];

/// Normalize an extracted city name: resolve grammatical case forms to the
/// canonical name, otherwise capitalize the first letter.
fn normalize_city_name(name: &str) -> String {
    let normalized = name.trim().to_lowercase();

    if let Some((_, canonical)) = CASE_FORMS.iter().find(|(form, _)| *form == normalized) {
        return (*canonical).to_string();
    }

    let mut chars = normalized.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => normalized,
    }
}

/// Extract a city name from a user message. Returns `None` when nothing in
/// the text looks like a city.
pub fn extract_city(message: &str) -> Option<String> {
    for pattern in PATTERNS.iter() {
        if let Some(captures) = pattern.captures(message) {
            if let Some(m) = captures.get(1) {
                let city = m.as_str().trim();
                if !city.is_empty() {
                    return Some(normalize_city_name(city));
                }
            }
        }
    }

    let lower = message.to_lowercase();
    for (form, canonical) in CITY_FORMS {
        if lower.contains(form) {
            return Some((*canonical).to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_russian_phrase() {
        assert_eq!(extract_city("какая погода в москве").as_deref(), Some("Москва"));
        assert_eq!(extract_city("погода в Риге?").as_deref(), Some("Рига"));
        assert_eq!(extract_city("что в Лондоне?").as_deref(), Some("Лондон"));
    }

    #[test]
    fn extracts_from_english_phrase() {
        assert_eq!(extract_city("weather in Riga").as_deref(), Some("Riga"));
        assert_eq!(extract_city("what's the weather at London?").as_deref(), Some("London"));
    }

    #[test]
    fn normalizes_case_forms() {
        assert_eq!(extract_city("как там в питере").as_deref(), Some("Санкт-Петербург"));
        assert_eq!(extract_city("погода в париже,").as_deref(), Some("Париж"));
    }

    #[test]
    fn falls_back_to_substring_scan() {
        assert_eq!(extract_city("москва").as_deref(), Some("Москва"));
        assert_eq!(extract_city("а что насчёт спб").as_deref(), Some("Санкт-Петербург"));
    }

    #[test]
    fn no_city_returns_none() {
        assert_eq!(extract_city("привет, как дела?"), None);
        assert_eq!(extract_city("tell me a joke"), None);
    }

    #[test]
    fn unknown_city_is_capitalized_passthrough() {
        // The extractor is best effort; unknown names still come out
        // normalized and the city table decides later.
        assert_eq!(extract_city("погода в урюпинске").as_deref(), Some("Урюпинске"));
    }
}
