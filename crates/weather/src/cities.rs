//! Fixed table of supported cities with coordinates.
//!
//! The upstream forecast API is queried by coordinates, so every supported
//! city carries its lat/lon here. Lookup is case-insensitive over the
//! canonical name and all aliases.

/// A supported city with its canonical name and coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CityLocation {
    /// Canonical display name
    pub name: &'static str,

    /// Alternate spellings, including English names
    pub aliases: &'static [&'static str],

    pub lat: f64,
    pub lon: f64,
}

pub static CITIES: &[CityLocation] = &[
    CityLocation { name: "Москва", aliases: &["moscow"], lat: 55.76, lon: 37.62 },
    CityLocation {
        name: "Санкт-Петербург",
        aliases: &["петербург", "питер", "спб", "saint petersburg", "st petersburg"],
        lat: 59.94,
        lon: 30.31,
    },
    CityLocation { name: "Рига", aliases: &["riga"], lat: 56.95, lon: 24.11 },
    CityLocation { name: "Таллин", aliases: &["таллинн", "tallinn"], lat: 59.44, lon: 24.75 },
    CityLocation { name: "Вильнюс", aliases: &["vilnius"], lat: 54.69, lon: 25.28 },
    CityLocation { name: "Минск", aliases: &["minsk"], lat: 53.90, lon: 27.56 },
    CityLocation { name: "Киев", aliases: &["kyiv", "kiev"], lat: 50.45, lon: 30.52 },
    CityLocation { name: "Одесса", aliases: &["odesa", "odessa"], lat: 46.48, lon: 30.73 },
    CityLocation { name: "Варшава", aliases: &["warsaw"], lat: 52.23, lon: 21.01 },
    CityLocation { name: "Прага", aliases: &["prague"], lat: 50.08, lon: 14.42 },
    CityLocation { name: "Вена", aliases: &["vienna"], lat: 48.21, lon: 16.37 },
    CityLocation { name: "Берлин", aliases: &["berlin"], lat: 52.52, lon: 13.40 },
    CityLocation { name: "Мюнхен", aliases: &["munich"], lat: 48.14, lon: 11.58 },
    CityLocation { name: "Цюрих", aliases: &["zurich"], lat: 47.37, lon: 8.54 },
    CityLocation { name: "Париж", aliases: &["paris"], lat: 48.86, lon: 2.35 },
    CityLocation { name: "Лондон", aliases: &["london"], lat: 51.51, lon: -0.13 },
    CityLocation { name: "Амстердам", aliases: &["amsterdam"], lat: 52.37, lon: 4.90 },
    CityLocation { name: "Стокгольм", aliases: &["stockholm"], lat: 59.33, lon: 18.06 },
    CityLocation { name: "Хельсинки", aliases: &["helsinki"], lat: 60.17, lon: 24.94 },
    CityLocation { name: "Осло", aliases: &["oslo"], lat: 59.91, lon: 10.75 },
    CityLocation { name: "Копенгаген", aliases: &["copenhagen"], lat: 55.68, lon: 12.57 },
    CityLocation { name: "Мадрид", aliases: &["madrid"], lat: 40.42, lon: -3.70 },
    CityLocation { name: "Барселона", aliases: &["barcelona"], lat: 41.39, lon: 2.17 },
    CityLocation { name: "Рим", aliases: &["rome"], lat: 41.90, lon: 12.50 },
    CityLocation { name: "Милан", aliases: &["milan"], lat: 45.46, lon: 9.19 },
    CityLocation { name: "Стамбул", aliases: &["istanbul"], lat: 41.01, lon: 28.98 },
    CityLocation { name: "Казань", aliases: &["kazan"], lat: 55.80, lon: 49.11 },
    CityLocation { name: "Самара", aliases: &["samara"], lat: 53.20, lon: 50.15 },
    CityLocation { name: "Екатеринбург", aliases: &["yekaterinburg"], lat: 56.84, lon: 60.65 },
    CityLocation { name: "Новосибирск", aliases: &["novosibirsk"], lat: 55.03, lon: 82.92 },
    CityLocation { name: "Красноярск", aliases: &["krasnoyarsk"], lat: 56.01, lon: 92.87 },
    CityLocation { name: "Владивосток", aliases: &["vladivostok"], lat: 43.12, lon: 131.89 },
    CityLocation { name: "Калининград", aliases: &["kaliningrad"], lat: 54.71, lon: 20.45 },
    CityLocation { name: "Астана", aliases: &["astana"], lat: 51.17, lon: 71.43 },
    CityLocation { name: "Токио", aliases: &["tokyo"], lat: 35.68, lon: 139.69 },
    CityLocation { name: "Пекин", aliases: &["beijing"], lat: 39.90, lon: 116.41 },
    CityLocation { name: "Сеул", aliases: &["seoul"], lat: 37.57, lon: 126.98 },
    CityLocation { name: "Шанхай", aliases: &["shanghai"], lat: 31.23, lon: 121.47 },
    CityLocation { name: "Бангкок", aliases: &["bangkok"], lat: 13.76, lon: 100.50 },
    CityLocation { name: "Сингапур", aliases: &["singapore"], lat: 1.35, lon: 103.82 },
    CityLocation { name: "Дубай", aliases: &["dubai"], lat: 25.20, lon: 55.27 },
];

/// Look up a city by canonical name or alias, case-insensitively.
pub fn find_city(name: &str) -> Option<&'static CityLocation> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    CITIES.iter().find(|c| {
        c.name.to_lowercase() == needle || c.aliases.iter().any(|a| *a == needle)
    })
}

/// All canonical city names, for display.
pub fn all_city_names() -> Vec<&'static str> {
    CITIES.iter().map(|c| c.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_by_canonical_name() {
        let city = find_city("Рига").unwrap();
        assert_eq!(city.lat, 56.95);
        assert_eq!(city.lon, 24.11);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(find_city("москва").is_some());
        assert!(find_city("МОСКВА").is_some());
        assert!(find_city("Moscow").is_some());
    }

    #[test]
    fn finds_by_alias() {
        let city = find_city("питер").unwrap();
        assert_eq!(city.name, "Санкт-Петербург");
        assert_eq!(find_city("спб").unwrap().name, "Санкт-Петербург");
        assert_eq!(find_city("kyiv").unwrap().name, "Киев");
    }

    #[test]
    fn unknown_city_is_none() {
        assert!(find_city("Атлантида").is_none());
        assert!(find_city("").is_none());
        assert!(find_city("   ").is_none());
    }

    #[test]
    fn table_has_no_duplicate_names() {
        let mut names: Vec<String> = CITIES.iter().map(|c| c.name.to_lowercase()).collect();
        names.sort();
        let before = names.len();
        names.dedup();
        assert_eq!(names.len(), before);
    }
}
