//! Static page content and the small selection state each view keeps.
//!
//! Everything here is local to one view: nothing is shared between views and
//! nothing is persisted.

pub mod companies;
pub mod map;
pub mod profiles;
pub mod timeline;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;

pub use companies::{CompanyTable, Paginator};
pub use map::{OilMap, Region, Route};
pub use profiles::{Profile, ProfileAccordion};
pub use timeline::{Timeline, TimelineEvent};

/// Top-level page tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    /// The early industry, the map and the key control methods.
    #[default]
    Overview,
    /// Company profiles.
    Companies,
    /// Transportation and other control methods.
    Methods,
    /// The timeline of events.
    Timeline,
}

impl Tab {
    /// Tabs in display order.
    pub const ALL: [Self; 4] = [Self::Overview, Self::Companies, Self::Methods, Self::Timeline];

    /// Label shown on the tab.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Companies => "Key Companies",
            Self::Methods => "Control Methods",
            Self::Timeline => "Timeline",
        }
    }

    /// Stable identifier, also usable as a feedback section key.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Companies => "companies",
            Self::Methods => "methods",
            Self::Timeline => "timeline",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tab {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::validation(format!("unknown tab: {s}")))
    }
}

/// The active tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabBar {
    active: Tab,
}

impl TabBar {
    /// A bar with the overview active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The active tab.
    #[must_use]
    pub fn active(&self) -> Tab {
        self.active
    }

    /// Make `tab` active.
    pub fn select(&mut self, tab: Tab) {
        self.active = tab;
    }

    /// `(tab, is_active)` pairs in display order.
    pub fn tabs(&self) -> impl Iterator<Item = (Tab, bool)> + '_ {
        Tab::ALL.into_iter().map(move |tab| (tab, tab == self.active))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tab_is_overview() {
        let bar = TabBar::new();
        assert_eq!(bar.active(), Tab::Overview);
        let active: Vec<Tab> = bar.tabs().filter(|(_, a)| *a).map(|(t, _)| t).collect();
        assert_eq!(active, vec![Tab::Overview]);
    }

    #[test]
    fn test_select_tab() {
        let mut bar = TabBar::new();
        bar.select(Tab::Timeline);
        assert_eq!(bar.active(), Tab::Timeline);
        assert_eq!(bar.active().label(), "Timeline");
    }

    #[test]
    fn test_parse_tab() {
        assert_eq!("methods".parse::<Tab>().unwrap(), Tab::Methods);
        assert_eq!("Companies".parse::<Tab>().unwrap(), Tab::Companies);
        assert!("pricing".parse::<Tab>().is_err());
    }
}
