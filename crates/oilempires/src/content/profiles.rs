//! Company profiles and the accordion that shows one at a time.

use serde::Serialize;

use crate::model::{Company, IconTag};

/// A company profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Profile {
    /// Stable identifier, e.g. `"standard-oil"`.
    pub id: &'static str,
    /// Company name.
    pub name: &'static str,
    /// Founder or founders.
    pub founder: &'static str,
    /// Founding year, free text.
    pub year: &'static str,
    /// Primary region.
    pub region: &'static str,
    /// How the company controlled supply.
    pub control_method: &'static str,
    /// Header icon.
    pub icon: IconTag,
    /// Company overview.
    pub description: &'static str,
}

impl Profile {
    /// Company record for seeding the store.
    #[must_use]
    pub fn to_company(&self) -> Company {
        Company::new(
            self.name,
            self.region,
            Some(self.year),
            self.control_method,
            self.icon,
            self.description,
        )
    }
}

/// The six profiles, in display order.
pub static PROFILES: [Profile; 6] = [
    Profile {
        id: "standard-oil",
        name: "Standard Oil",
        founder: "John D. Rockefeller",
        year: "1870",
        region: "United States",
        control_method: "Refining, Distribution Networks",
        icon: IconTag::Building,
        description: "Began as a refinery business and built its domination of the American market by first monopolizing the refining industry with faster techniques. Later controlled pipelines, shipping routes, and established worldwide distribution networks, replacing independent importers with their own delivery system.",
    },
    Profile {
        id: "shell",
        name: "The Shell Transport Co.",
        founder: "Marcus Samuel",
        year: "1897",
        region: "Global Shipping",
        control_method: "Ocean Transport",
        icon: IconTag::Ship,
        description: "Developed and expanded the use of ocean-going tankers to transport oil in bulk across great distances. This innovation in transportation gave Shell significant control over the global oil supply chain.",
    },
    Profile {
        id: "royal-dutch",
        name: "Royal Dutch Petroleum",
        founder: "August Kessler",
        year: "1890",
        region: "Dutch East Indies (Indonesia)",
        control_method: "Production",
        icon: IconTag::Factory,
        description: "Dominated oil production in the Dutch East Indies (now Indonesia), operating like a mining company with workers' camps and teams of engineers. Later merged with Shell Transport to form Royal Dutch Shell.",
    },
    Profile {
        id: "burmah-oil",
        name: "Burmah Oil",
        founder: "David Sime Cargill",
        year: "1886",
        region: "Burma (Myanmar)",
        control_method: "Production, Refining",
        icon: IconTag::Droplet,
        description: "Controlled oil production in Burma (now Myanmar) and later became a significant player in Middle Eastern oil development through its investment in the Anglo-Persian Oil Company.",
    },
    Profile {
        id: "nobel-brothers",
        name: "Nobel Brothers",
        founder: "Ludwig & Robert Nobel",
        year: "1879",
        region: "Russia (Baku)",
        control_method: "Production, Transportation",
        icon: IconTag::PipeLine,
        description: "Developed the Baku oil fields in Russia (now Azerbaijan) and pioneered the use of pipelines and oil tankers in the Caspian region. Introduced technological innovations in drilling and transport.",
    },
    Profile {
        id: "deutsche-bank",
        name: "Deutsche Bank Oil Investments",
        founder: "Georg von Siemens",
        year: "1890s",
        region: "Middle East, Europe",
        control_method: "Banking, Infrastructure",
        icon: IconTag::Building,
        description: "Financed oil exploration, production, and transportation infrastructure, particularly in the Middle East and Europe. Represented banking interests that controlled oil through capital investment.",
    },
];

/// Profile expanded when the view first opens.
pub const DEFAULT_EXPANDED: &str = "standard-oil";

/// Reference company rows derived from the profiles.
#[must_use]
pub fn reference_companies() -> Vec<Company> {
    PROFILES.iter().map(Profile::to_company).collect()
}

/// At most one profile is expanded at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileAccordion {
    expanded: Option<&'static str>,
}

impl Default for ProfileAccordion {
    fn default() -> Self {
        Self {
            expanded: Some(DEFAULT_EXPANDED),
        }
    }
}

impl ProfileAccordion {
    /// An accordion with the default profile open.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All profiles.
    #[must_use]
    pub fn profiles(&self) -> &'static [Profile] {
        &PROFILES
    }

    /// Look up a profile by id.
    #[must_use]
    pub fn profile(&self, id: &str) -> Option<&'static Profile> {
        PROFILES.iter().find(|p| p.id == id)
    }

    /// The expanded profile, if any.
    #[must_use]
    pub fn expanded(&self) -> Option<&'static Profile> {
        self.expanded.and_then(|id| self.profile(id))
    }

    /// Whether `id` is the open profile.
    #[must_use]
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded == Some(id)
    }

    /// Collapse `id` if it is open, otherwise open it and close the rest.
    /// Unknown ids are ignored.
    pub fn toggle(&mut self, id: &str) {
        if self.is_expanded(id) {
            self.expanded = None;
        } else if let Some(profile) = self.profile(id) {
            self.expanded = Some(profile.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_expanded() {
        let accordion = ProfileAccordion::new();
        assert_eq!(accordion.expanded().unwrap().name, "Standard Oil");
        assert_eq!(accordion.profiles().len(), 6);
    }

    #[test]
    fn test_toggle_switches_and_collapses() {
        let mut accordion = ProfileAccordion::new();
        accordion.toggle("shell");
        assert!(accordion.is_expanded("shell"));
        assert!(!accordion.is_expanded("standard-oil"));

        accordion.toggle("shell");
        assert!(accordion.expanded().is_none());
    }

    #[test]
    fn test_toggle_unknown_ignored() {
        let mut accordion = ProfileAccordion::new();
        accordion.toggle("gulf-oil");
        assert!(accordion.is_expanded("standard-oil"));
    }

    #[test]
    fn test_reference_companies() {
        let companies = reference_companies();
        assert_eq!(companies.len(), 6);
        let deutsche = companies
            .iter()
            .find(|c| c.name.starts_with("Deutsche"))
            .unwrap();
        assert_eq!(deutsche.founded_label(), "1890s");
    }
}
