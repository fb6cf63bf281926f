//! World map hotspots and the supply routes between them.

use serde::Serialize;

use crate::model::IconTag;

/// A hotspot on the map. Positions are percentages of the map's size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    /// Stable identifier, e.g. `"burma"`.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Distance from the top edge.
    pub top: u8,
    /// Distance from the left edge.
    pub left: u8,
    /// Marker icon.
    pub icon: IconTag,
    /// Controlling company or interest.
    pub company: &'static str,
    /// Tooltip text.
    pub details: &'static str,
}

impl Region {
    /// Tooltips for markers in the lower half open upwards.
    #[must_use]
    pub fn tooltip_above(&self) -> bool {
        self.top > 50
    }
}

/// A connection drawn between two regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Stable identifier.
    pub id: &'static str,
    /// Region id at the start of the route.
    pub from: &'static str,
    /// Region id at the end of the route.
    pub to: &'static str,
}

impl Route {
    /// Whether either end of the route is `region`.
    #[must_use]
    pub fn touches(&self, region: &str) -> bool {
        self.from == region || self.to == region
    }
}

/// The six hotspots.
pub static REGIONS: [Region; 6] = [
    Region {
        id: "us",
        name: "United States",
        top: 38,
        left: 19,
        icon: IconTag::Building,
        company: "Standard Oil",
        details: "Center of refining and distribution networks, with Rockefeller's Standard Oil dominating through vertical integration.",
    },
    Region {
        id: "russia",
        name: "Russia (Baku)",
        top: 28,
        left: 55,
        icon: IconTag::Factory,
        company: "Nobel Brothers",
        details: "The Nobel Brothers revolutionized production in the Baku oil fields with advanced drilling technology.",
    },
    Region {
        id: "burma",
        name: "Burma (Myanmar)",
        top: 41,
        left: 69,
        icon: IconTag::Droplet,
        company: "Burmah Oil",
        details: "Burmah Oil Company controlled production in this region, later expanding to the Middle East.",
    },
    Region {
        id: "indonesia",
        name: "Dutch East Indies",
        top: 52,
        left: 75,
        icon: IconTag::Factory,
        company: "Royal Dutch",
        details: "Royal Dutch dominated oil production in the Dutch East Indies (now Indonesia).",
    },
    Region {
        id: "shipping",
        name: "Ocean Shipping Routes",
        top: 60,
        left: 40,
        icon: IconTag::Ship,
        company: "Shell Transport",
        details: "Shell Transportation Company pioneered bulk oil tankers, revolutionizing global oil transport.",
    },
    Region {
        id: "europe",
        name: "European Finance",
        top: 25,
        left: 44,
        icon: IconTag::Building,
        company: "Banking Houses",
        details: "European banking houses like Deutsche Bank financed oil infrastructure and operations.",
    },
];

/// The five connections between hotspots.
pub static ROUTES: [Route; 5] = [
    Route { id: "us-russia", from: "us", to: "russia" },
    Route { id: "us-shipping", from: "us", to: "shipping" },
    Route { id: "europe-burma", from: "europe", to: "burma" },
    Route { id: "burma-indonesia", from: "burma", to: "indonesia" },
    Route { id: "indonesia-shipping", from: "indonesia", to: "shipping" },
];

/// Map view state: which region, if any, is under the pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OilMap {
    active: Option<&'static str>,
}

impl OilMap {
    /// A map with nothing hovered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All hotspots.
    #[must_use]
    pub fn regions(&self) -> &'static [Region] {
        &REGIONS
    }

    /// All routes.
    #[must_use]
    pub fn routes(&self) -> &'static [Route] {
        &ROUTES
    }

    /// Look up a region by id.
    #[must_use]
    pub fn region(&self, id: &str) -> Option<&'static Region> {
        REGIONS.iter().find(|r| r.id == id)
    }

    /// Make `id` the active region. Unknown ids are ignored and return `false`.
    pub fn hover(&mut self, id: &str) -> bool {
        match self.region(id) {
            Some(region) => {
                self.active = Some(region.id);
                true
            }
            None => false,
        }
    }

    /// Clear the active region.
    pub fn leave(&mut self) {
        self.active = None;
    }

    /// The hovered region.
    #[must_use]
    pub fn active_region(&self) -> Option<&'static Region> {
        self.active.and_then(|id| self.region(id))
    }

    /// A route is highlighted when it touches the active region.
    #[must_use]
    pub fn is_route_active(&self, route: &Route) -> bool {
        self.active.is_some_and(|id| route.touches(id))
    }

    /// Routes currently highlighted.
    pub fn active_routes(&self) -> impl Iterator<Item = &'static Route> + '_ {
        ROUTES.iter().filter(|r| self.is_route_active(r))
    }
}
