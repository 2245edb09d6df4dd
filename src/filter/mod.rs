use std::collections::BTreeSet;
use std::fmt;

use crate::model::Country;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PopulationBand {
    #[default]
    All,
    UnderOneMillion,
    OneToTenMillion,
    OverTenMillion,
}

impl PopulationBand {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "" | "all" | "none" | "any" => Some(Self::All),
            "lt1m" | "<1m" => Some(Self::UnderOneMillion),
            "1m-10m" | "1m–10m" => Some(Self::OneToTenMillion),
            "gt10m" | ">10m" => Some(Self::OverTenMillion),
            _ => None,
        }
    }

    /// A missing population never satisfies a concrete band.
    pub fn matches(self, population: Option<u64>) -> bool {
        match (self, population) {
            (Self::All, _) => true,
            (_, None) => false,
            (Self::UnderOneMillion, Some(p)) => p < 1_000_000,
            (Self::OneToTenMillion, Some(p)) => (1_000_000..=10_000_000).contains(&p),
            (Self::OverTenMillion, Some(p)) => p > 10_000_000,
        }
    }
}

impl fmt::Display for PopulationBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::All => "all",
            Self::UnderOneMillion => "< 1M",
            Self::OneToTenMillion => "1M - 10M",
            Self::OverTenMillion => "> 10M",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub text: String,
    pub region: Option<String>,
    pub band: PopulationBand,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.region.is_none() && self.band == PopulationBand::All
    }

    fn matches_text(&self, needle: &str, country: &Country) -> bool {
        if needle.is_empty() {
            return true;
        }
        country
            .common_name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(needle))
    }

    fn matches_region(&self, country: &Country) -> bool {
        match self.region.as_deref() {
            None => true,
            Some(region) => country.region.as_deref() == Some(region),
        }
    }

    fn matches_lowered(&self, needle: &str, country: &Country) -> bool {
        self.matches_text(needle, country)
            && self.matches_region(country)
            && self.band.matches(country.population)
    }

    pub fn matches(&self, country: &Country) -> bool {
        self.matches_lowered(&self.text.to_lowercase(), country)
    }
}

/// Returns the records passing every predicate, in dataset order.
#[tracing::instrument(level = "debug", skip(dataset), fields(total = dataset.len()))]
pub fn apply<'a>(dataset: &'a [Country], criteria: &FilterCriteria) -> Vec<&'a Country> {
    let needle = criteria.text.to_lowercase();
    let out: Vec<&Country> = dataset
        .iter()
        .filter(|c| criteria.matches_lowered(&needle, c))
        .collect();
    tracing::debug!(matched = out.len(), "filter applied");
    out
}

/// Distinct regions present in the dataset, sorted.
pub fn regions(dataset: &[Country]) -> Vec<String> {
    dataset
        .iter()
        .filter_map(|c| c.region.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
