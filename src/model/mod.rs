use std::collections::BTreeMap;

use serde::Serialize;

/// Placeholder shown wherever an optional field is missing.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a record without a common name.
pub const UNKNOWN_NAME: &str = "Unknown";

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Currency {
    pub name: Option<String>,
    pub symbol: Option<String>,
}

/// One country as fetched from the data source. Never mutated after parsing.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Country {
    pub cca3: String,
    pub common_name: Option<String>,
    pub official_name: Option<String>,
    pub region: Option<String>,
    pub subregion: Option<String>,
    pub population: Option<u64>,
    pub area: Option<f64>,
    pub capital: Vec<String>,
    pub languages: BTreeMap<String, String>,
    pub currencies: BTreeMap<String, Currency>,
    pub flag_url: Option<String>,
}

impl Country {
    pub fn display_name(&self) -> &str {
        self.common_name.as_deref().unwrap_or(UNKNOWN_NAME)
    }

    pub fn region_or_na(&self) -> &str {
        self.region.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn subregion_or_na(&self) -> &str {
        self.subregion.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn official_name_or_na(&self) -> &str {
        self.official_name.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn flag_or_empty(&self) -> &str {
        self.flag_url.as_deref().unwrap_or("")
    }
}
