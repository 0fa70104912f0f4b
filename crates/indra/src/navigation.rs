//! Screen destinations and the menus they appear in.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppDestination {
    MyHouse,
    Dashboard,
    History,
    LearnHub,
    Community,
    Assess,
    Services,
    Report,
    ReportCard,
    Profile,
    MyProperties,
    Settings,
}

impl AppDestination {
    pub const ALL: [Self; 12] = [
        Self::MyHouse,
        Self::Dashboard,
        Self::History,
        Self::LearnHub,
        Self::Community,
        Self::Assess,
        Self::Services,
        Self::Report,
        Self::ReportCard,
        Self::Profile,
        Self::MyProperties,
        Self::Settings,
    ];

    pub const fn route(self) -> &'static str {
        match self {
            Self::MyHouse => "my_house",
            Self::Dashboard => "dashboard",
            Self::History => "history",
            Self::LearnHub => "learn_hub",
            Self::Community => "community",
            Self::Assess => "assess",
            Self::Services => "Jal Sanchay Mitra",
            Self::Report => "report",
            Self::ReportCard => "report_card",
            Self::Profile => "profile",
            Self::MyProperties => "my_properties",
            Self::Settings => "settings",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::MyHouse => "Home",
            Self::Dashboard => "Dashboard",
            Self::History => "History",
            Self::LearnHub => "Learn Hub",
            Self::Community => "Community",
            Self::Assess => "Assess",
            Self::Services => "Services",
            Self::Report => "Report",
            Self::ReportCard => "Report Card",
            Self::Profile => "My Profile",
            Self::MyProperties => "My Properties",
            Self::Settings => "Settings",
        }
    }

    pub fn from_route(route: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|destination| destination.route() == route)
    }

    /// Destinations pinned to the bottom bar, in display order.
    pub const fn bottom_bar() -> [Self; 5] {
        [
            Self::MyHouse,
            Self::Dashboard,
            Self::History,
            Self::LearnHub,
            Self::Community,
        ]
    }

    pub const fn drawer() -> [Self; 3] {
        [Self::Profile, Self::MyProperties, Self::Settings]
    }
}

impl fmt::Display for AppDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn routes_round_trip_and_are_unique() {
        let routes: HashSet<&str> = AppDestination::ALL.iter().map(|d| d.route()).collect();
        assert_eq!(routes.len(), AppDestination::ALL.len());
        for destination in AppDestination::ALL {
            assert_eq!(AppDestination::from_route(destination.route()), Some(destination));
        }
        assert_eq!(AppDestination::from_route("onboarding"), None);
    }

    #[test]
    fn menus_hold_expected_titles() {
        let bottom: Vec<&str> = AppDestination::bottom_bar().iter().map(|d| d.title()).collect();
        assert_eq!(bottom, ["Home", "Dashboard", "History", "Learn Hub", "Community"]);
        let drawer: Vec<&str> = AppDestination::drawer().iter().map(|d| d.title()).collect();
        assert_eq!(drawer, ["My Profile", "My Properties", "Settings"]);
    }
}
