use tracing::debug;

use crate::filter::{self, FilterCriteria, PopulationBand};
use crate::model::Country;
use crate::paginate;
use crate::render::{self, Detail, Screen, Theme};

/// Everything a UI event can ask for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    SetText(String),
    SetRegion(Option<String>),
    SetPopulationBand(PopulationBand),
    GoToPage(usize),
    NextPage,
    PrevPage,
    ToggleTheme,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewState<'a> {
    pub filtered: Vec<&'a Country>,
    pub current_page: usize,
    pub page_size: usize,
}

impl<'a> ViewState<'a> {
    pub fn page_count(&self) -> usize {
        paginate::page_count(self.filtered.len(), self.page_size)
    }

    pub fn page(&self) -> &[&'a Country] {
        paginate::slice(&self.filtered, self.current_page, self.page_size)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppState<'a> {
    dataset: &'a [Country],
    pub criteria: FilterCriteria,
    pub view: ViewState<'a>,
    pub theme: Theme,
}

impl<'a> AppState<'a> {
    pub fn new(dataset: &'a [Country], criteria: FilterCriteria, page_size: usize, theme: Theme) -> Self {
        let page_size = page_size.max(1);
        let filtered = filter::apply(dataset, &criteria);
        Self {
            dataset,
            criteria,
            view: ViewState {
                filtered,
                current_page: 1,
                page_size,
            },
            theme,
        }
    }

    pub fn dataset(&self) -> &'a [Country] {
        self.dataset
    }

    pub fn screen(&self) -> Screen<'a> {
        render::render_screen(
            self.view.page(),
            self.view.current_page,
            self.view.page_count(),
            self.theme,
        )
    }

    /// Opens the `position`-th card (1-based) of the current page.
    pub fn select(&self, position: usize) -> Option<Detail<'a>> {
        let page = self.view.page();
        let cards = render::render_page(page);
        cards
            .iter()
            .find(|card| card.position == position)
            .map(|card| card.activate())
    }

    fn refilter(mut self, criteria: FilterCriteria) -> Self {
        self.view.filtered = filter::apply(self.dataset, &criteria);
        self.view.current_page = 1;
        self.criteria = criteria;
        self
    }

    fn go_to(mut self, page: usize) -> Self {
        match paginate::checked_page(page, self.view.filtered.len(), self.view.page_size) {
            Some(page) => self.view.current_page = page,
            None => debug!(page, pages = self.view.page_count(), "ignoring out-of-range page"),
        }
        self
    }
}

/// Applies one intent and returns the next state.
pub fn reduce<'a>(state: AppState<'a>, intent: Intent) -> AppState<'a> {
    debug!(?intent, "reduce");
    match intent {
        Intent::SetText(text) => {
            let criteria = FilterCriteria {
                text,
                ..state.criteria.clone()
            };
            state.refilter(criteria)
        }
        Intent::SetRegion(region) => {
            let region = region.filter(|r| !r.trim().is_empty());
            let criteria = FilterCriteria {
                region,
                ..state.criteria.clone()
            };
            state.refilter(criteria)
        }
        Intent::SetPopulationBand(band) => {
            let criteria = FilterCriteria {
                band,
                ..state.criteria.clone()
            };
            state.refilter(criteria)
        }
        Intent::GoToPage(page) => state.go_to(page),
        Intent::NextPage => {
            let next = state.view.current_page.saturating_add(1);
            state.go_to(next)
        }
        Intent::PrevPage => {
            let prev = state.view.current_page.saturating_sub(1);
            state.go_to(prev)
        }
        Intent::ToggleTheme => {
            let mut state = state;
            state.theme = state.theme.toggled();
            state
        }
    }
}
