pub mod pagination;

use std::fmt;

use colored::{ColoredString, Colorize};
use itertools::Itertools;

use crate::model::{Country, NOT_AVAILABLE};
use crate::source::FetchError;

pub use pagination::{PageLink, PaginationControls};

pub const EMPTY_MESSAGE: &str = "No countries found.";
pub const LOADING_MESSAGE: &str = "Loading countries data...";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Label of the toggle control, naming the theme it switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Light => "Dark Mode",
            Self::Dark => "Light Mode",
        }
    }

    fn title(self, s: &str) -> ColoredString {
        match self {
            Self::Light => s.bold().blue(),
            Self::Dark => s.bold().bright_cyan(),
        }
    }

    fn label(self, s: &str) -> ColoredString {
        match self {
            Self::Light => s.bold().black(),
            Self::Dark => s.bold().white(),
        }
    }
}

/// Keys a focused card reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Char(char),
}

impl Key {
    /// Accepts `enter`, `space`, `esc` or any single character.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "enter" | "return" => Some(Self::Enter),
            "space" => Some(Self::Space),
            "esc" | "escape" => Some(Self::Escape),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Self::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

/// One grid entry. Holds the record it was built from, so activation never
/// has to look it up again.
#[derive(Clone, Debug)]
pub struct Card<'a> {
    record: &'a Country,
    pub position: usize,
    pub name: String,
    pub region: String,
    pub population: String,
    pub flag_url: String,
}

impl<'a> Card<'a> {
    pub fn record(&self) -> &'a Country {
        self.record
    }

    /// Pointer activation.
    pub fn activate(&self) -> Detail<'a> {
        render_detail(self.record)
    }

    /// Keyboard activation: Enter and Space are equivalent.
    pub fn on_key(&self, key: Key) -> Option<Detail<'a>> {
        match key {
            Key::Enter | Key::Space => Some(self.activate()),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Detail<'a> {
    record: &'a Country,
    pub name: String,
    pub official_name: String,
    pub capital: String,
    pub region: String,
    pub subregion: String,
    pub population: String,
    pub area: String,
    pub languages: String,
    pub currencies: String,
    pub flag_url: String,
}

impl<'a> Detail<'a> {
    pub fn record(&self) -> &'a Country {
        self.record
    }

    pub fn rows(&self) -> [(&'static str, &str); 8] {
        [
            ("Official Name", self.official_name.as_str()),
            ("Capital", self.capital.as_str()),
            ("Region", self.region.as_str()),
            ("Subregion", self.subregion.as_str()),
            ("Population", self.population.as_str()),
            ("Area", self.area.as_str()),
            ("Languages", self.languages.as_str()),
            ("Currencies", self.currencies.as_str()),
        ]
    }
}

#[derive(Clone, Debug)]
pub enum Content<'a> {
    Cards(Vec<Card<'a>>),
    Empty,
    Error(String),
}

#[derive(Clone, Debug)]
pub struct Screen<'a> {
    pub content: Content<'a>,
    pub pagination: Option<PaginationControls>,
    pub theme: Theme,
}

impl<'a> Screen<'a> {
    pub fn cards(&self) -> &[Card<'a>] {
        match &self.content {
            Content::Cards(cards) => cards,
            _ => &[],
        }
    }
}

pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Groups the integer part and keeps at most three fraction digits.
pub fn group_thousands_f64(value: f64) -> String {
    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');
    let grouped = int_part
        .parse::<u64>()
        .map(group_thousands)
        .unwrap_or_else(|_| int_part.to_string());
    let sign = if value < 0.0 { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

// Zero counts as missing, same as the numeric fields in the source data.
fn population_label(population: Option<u64>) -> String {
    match population {
        Some(p) if p > 0 => group_thousands(p),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn area_label(area: Option<f64>) -> String {
    match area {
        Some(a) if a > 0.0 => format!("{} km²", group_thousands_f64(a)),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn join_or_na<I>(mut items: I) -> String
where
    I: Iterator,
    I::Item: fmt::Display,
{
    let joined = items.join(", ");
    if joined.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        joined
    }
}

pub fn render_card(record: &Country, position: usize) -> Card<'_> {
    Card {
        record,
        position,
        name: record.display_name().to_string(),
        region: record.region_or_na().to_string(),
        population: population_label(record.population),
        flag_url: record.flag_or_empty().to_string(),
    }
}

pub fn render_page<'a>(records: &[&'a Country]) -> Vec<Card<'a>> {
    records
        .iter()
        .enumerate()
        .map(|(i, &record)| render_card(record, i + 1))
        .collect()
}

pub fn render_detail(record: &Country) -> Detail<'_> {
    Detail {
        record,
        name: record.display_name().to_string(),
        official_name: record.official_name_or_na().to_string(),
        capital: join_or_na(record.capital.iter()),
        region: record.region_or_na().to_string(),
        subregion: record.subregion_or_na().to_string(),
        population: population_label(record.population),
        area: area_label(record.area),
        languages: join_or_na(record.languages.values()),
        currencies: join_or_na(record.currencies.values().filter_map(|c| c.name.as_deref())),
        flag_url: record.flag_or_empty().to_string(),
    }
}

pub fn render_screen<'a>(
    page_records: &[&'a Country],
    current_page: usize,
    page_count: usize,
    theme: Theme,
) -> Screen<'a> {
    if page_records.is_empty() {
        return Screen {
            content: Content::Empty,
            pagination: None,
            theme,
        };
    }
    Screen {
        content: Content::Cards(render_page(page_records)),
        pagination: pagination::controls(current_page, page_count),
        theme,
    }
}

/// Replaces the whole grid with one message. No cards, no pagination.
pub fn render_fetch_error(err: &FetchError, theme: Theme) -> Screen<'static> {
    Screen {
        content: Content::Error(format!("Failed to load countries data: {err}")),
        pagination: None,
        theme,
    }
}

fn write_card(f: &mut fmt::Formatter<'_>, card: &Card<'_>, theme: Theme) -> fmt::Result {
    write!(f, "{:>3}. {}", card.position, theme.title(&card.name))?;
    if !card.record.cca3.is_empty() {
        write!(f, " {}", format!("[{}]", card.record.cca3).dimmed())?;
    }
    writeln!(f)?;
    writeln!(f, "     {} {}", theme.label("Region:    "), card.region)?;
    writeln!(f, "     {} {}", theme.label("Population:"), card.population)?;
    writeln!(f, "     {} {}", theme.label("Flag:      "), card.flag_url.underline())
}

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.content {
            Content::Error(message) => return writeln!(f, "{}", message.bold().red()),
            Content::Empty => return writeln!(f, "{}", EMPTY_MESSAGE.italic()),
            Content::Cards(cards) => {
                for card in cards {
                    write_card(f, card, self.theme)?;
                }
            }
        }
        if let Some(p) = &self.pagination {
            writeln!(f)?;
            writeln!(f, "{p}")?;
        }
        Ok(())
    }
}

/// Renders the detail view with theme-aware labels.
pub fn themed_detail(detail: &Detail<'_>, theme: Theme) -> String {
    let mut out = String::new();
    out.push_str(&theme.title(&detail.name).underline().to_string());
    out.push('\n');
    for (label, value) in detail.rows() {
        out.push_str(&format!("{} {}\n", theme.label(&format!("{label:<14}")), value));
    }
    out.push_str(&format!("{} {}\n", theme.label(&format!("{:<14}", "Flag")), detail.flag_url));
    out
}

impl fmt::Display for Detail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&themed_detail(self, Theme::default()))
    }
}
