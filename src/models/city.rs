use serde::Serialize;

/// City the rate service publishes quotes for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct City {
    /// Value sent to the rate service
    pub value: &'static str,
    /// Local display name
    pub label: &'static str,
    pub english: &'static str,
}

/// Cities offered by the dashboard; the first entry is the default selection
pub const CITIES: &[City] = &[
    City { value: "سڵێمانی", label: "سڵێمانی", english: "Sulaymaniyah" },
    City { value: "هەولێر", label: "هەولێر", english: "Erbil" },
    City { value: "دهۆک", label: "دهۆک", english: "Duhok" },
    City { value: "بغداد", label: "بغداد", english: "Baghdad" },
    City { value: "بصره", label: "البصرة", english: "Basra" },
];

impl City {
    pub fn default_city() -> &'static City {
        &CITIES[0]
    }

    /// Look up a city by service value, local label or English name (case-insensitive)
    pub fn resolve(input: &str) -> Option<&'static City> {
        let input = input.trim();
        CITIES.iter().find(|city| {
            city.value == input || city.label == input || city.english.eq_ignore_ascii_case(input)
        })
    }

    /// Look up by the value sent to the rate service
    pub fn by_value(value: &str) -> Option<&'static City> {
        CITIES.iter().find(|city| city.value == value)
    }
}
