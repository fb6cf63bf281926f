//! Oil industry timeline, 1850s to 1911.

use serde::Serialize;

use crate::model::IconTag;

/// One dated event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineEvent {
    /// Year or span, free text.
    pub year: &'static str,
    /// Headline.
    pub title: &'static str,
    /// What happened.
    pub description: &'static str,
    /// Effect on the industry.
    pub impact: &'static str,
    /// How control over oil was exercised at the time.
    pub control: &'static str,
    /// Marker icon.
    pub icon: IconTag,
}

/// Events in chronological order.
pub static EVENTS: [TimelineEvent; 12] = [
    TimelineEvent {
        year: "1850s",
        title: "Early Oil Industry Beginnings",
        description: "The modern oil industry begins with Edwin Drake's successful oil well in Pennsylvania in 1859, leading to the first oil boom.",
        impact: "Established the foundation for the modern petroleum industry, creating the first oil rush.",
        control: "Early wildcatters competed with minimal market control mechanisms.",
        icon: IconTag::Droplet,
    },
    TimelineEvent {
        year: "1865-1870",
        title: "Standard Oil Established",
        description: "John D. Rockefeller establishes Standard Oil in 1870, beginning the process of consolidating the American oil industry through refining dominance.",
        impact: "Began the process of industry consolidation through vertical integration, setting the pattern for oil monopolies.",
        control: "Began with refining monopoly, later expanding to transportation and distribution.",
        icon: IconTag::Building,
    },
    TimelineEvent {
        year: "1870s",
        title: "Pipeline Development",
        description: "Construction of pipelines begins, providing an alternative to rail transport and giving companies that controlled pipelines significant market power.",
        impact: "Created a new transportation monopoly that reduced dependence on railways.",
        control: "Pipeline ownership created transportation monopolies that controlled access to markets.",
        icon: IconTag::PipeLine,
    },
    TimelineEvent {
        year: "1879",
        title: "Nobel Brothers in Baku",
        description: "Ludwig and Robert Nobel establish oil operations in Baku (Russia, now Azerbaijan), revolutionizing production in the region with new technology.",
        impact: "Expanded oil production to new regions and introduced technological innovations.",
        control: "Production control through technological innovation and regional dominance.",
        icon: IconTag::Factory,
    },
    TimelineEvent {
        year: "1880s",
        title: "Standard Oil Dominance",
        description: "By the mid-1880s, Standard Oil controls approximately 90% of U.S. refining capacity and begins expanding its distribution networks globally.",
        impact: "Demonstrated the power of vertical integration and consolidation in creating market dominance.",
        control: "Vertical integration from production through distribution created complete supply chain control.",
        icon: IconTag::Building,
    },
    TimelineEvent {
        year: "1886",
        title: "Burmah Oil Company",
        description: "Burmah Oil Company is established to develop oil production in Burma (now Myanmar), later becoming a major player in Middle Eastern oil.",
        impact: "Extended oil exploration to Southeast Asia, diversifying global production.",
        control: "Regional production control in Southeast Asia.",
        icon: IconTag::Droplet,
    },
    TimelineEvent {
        year: "1890",
        title: "Royal Dutch Petroleum Founded",
        description: "Royal Dutch Petroleum Company is established to develop oil fields in the Dutch East Indies (now Indonesia).",
        impact: "Established European competition to Standard Oil's global dominance.",
        control: "Production control in the Dutch East Indies with technological innovation.",
        icon: IconTag::Factory,
    },
    TimelineEvent {
        year: "1892",
        title: "Standard Oil Trust Dissolved",
        description: "The Ohio Supreme Court orders the dissolution of the Standard Oil Trust, though it continues to operate as a holding company.",
        impact: "First major legal challenge to oil monopolies, though with limited immediate impact.",
        control: "Continued control through corporate restructuring despite legal challenges.",
        icon: IconTag::Building,
    },
    TimelineEvent {
        year: "1897",
        title: "Shell Transport Company",
        description: "Marcus Samuel's Shell Transport and Trading Company expands, pioneering the use of bulk oil tankers for oceanic transport.",
        impact: "Revolutionized global oil transport, making long-distance shipping economical.",
        control: "Transportation control through innovation in ocean shipping.",
        icon: IconTag::Ship,
    },
    TimelineEvent {
        year: "1901",
        title: "Spindletop Oil Boom",
        description: "The Spindletop gusher in Texas marks the beginning of the Texas oil boom and shifts the center of U.S. oil production from Pennsylvania to Texas.",
        impact: "Shifted the center of U.S. oil production and introduced new players to the industry.",
        control: "New production regions created opportunities for new control structures.",
        icon: IconTag::Droplet,
    },
    TimelineEvent {
        year: "1907",
        title: "Royal Dutch Shell Formed",
        description: "Royal Dutch Petroleum Company and Shell Transport and Trading Company merge to form Royal Dutch Shell, creating a major global competitor to Standard Oil.",
        impact: "Created a major global competitor to Standard Oil's dominance.",
        control: "Merger created vertically integrated global competitor combining production and transportation strengths.",
        icon: IconTag::Building,
    },
    TimelineEvent {
        year: "1911",
        title: "Standard Oil Breakup",
        description: "The U.S. Supreme Court orders the breakup of Standard Oil into 34 companies, ending its monopoly but creating many powerful successor companies.",
        impact: "Fundamentally transformed the structure of the global oil industry, creating today's major oil companies.",
        control: "Transformed monopoly control into oligopoly among Standard Oil successors and European competitors.",
        icon: IconTag::Building,
    },
];

/// Timeline view state: the event being shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timeline {
    active: usize,
}

impl Timeline {
    /// A timeline on the first event.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All events.
    #[must_use]
    pub fn events(&self) -> &'static [TimelineEvent] {
        &EVENTS
    }

    /// Index of the event being shown.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The event being shown.
    #[must_use]
    pub fn active_event(&self) -> &'static TimelineEvent {
        &EVENTS[self.active]
    }

    /// False on the first event.
    #[must_use]
    pub fn can_go_prev(&self) -> bool {
        self.active > 0
    }

    /// False on the last event.
    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.active + 1 < EVENTS.len()
    }

    /// Step back; stays put on the first event.
    pub fn prev(&mut self) {
        if self.can_go_prev() {
            self.active -= 1;
        }
    }

    /// Step forward; stays put on the last event.
    pub fn next(&mut self) {
        if self.can_go_next() {
            self.active += 1;
        }
    }

    /// Jump to `index`. Out-of-range indices are ignored and return `false`.
    pub fn select(&mut self, index: usize) -> bool {
        if index < EVENTS.len() {
            self.active = index;
            true
        } else {
            false
        }
    }
}
