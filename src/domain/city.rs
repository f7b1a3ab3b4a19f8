use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CityKey {
    Seoul,
    Daegu,
    Busan,
}

/// A forecast city and its cell on the provider's grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct City {
    pub key: CityKey,
    pub display_name: &'static str,
    pub nx: u16,
    pub ny: u16,
}

pub static CITIES: [City; 3] = [
    City {
        key: CityKey::Seoul,
        display_name: "Seoul",
        nx: 60,
        ny: 127,
    },
    City {
        key: CityKey::Daegu,
        display_name: "Daegu",
        nx: 89,
        ny: 90,
    },
    City {
        key: CityKey::Busan,
        display_name: "Busan",
        nx: 97,
        ny: 74,
    },
];

impl CityKey {
    #[must_use]
    pub fn city(self) -> &'static City {
        match self {
            Self::Seoul => &CITIES[0],
            Self::Daegu => &CITIES[1],
            Self::Busan => &CITIES[2],
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Seoul => "seoul",
            Self::Daegu => "daegu",
            Self::Busan => "busan",
        }
    }
}
