//! Fixed team and venue catalogues offered by the form.
//!
//! The trained model only knows these names, so anything outside them is
//! rejected before it ever reaches the predictor.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::InputError;

/// An IPL franchise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Team {
    MumbaiIndians,
    KolkataKnightRiders,
    RajasthanRoyals,
    ChennaiSuperKings,
    SunrisersHyderabad,
    DelhiCapitals,
    PunjabKings,
    LucknowSuperGiants,
    GujaratTitans,
    RoyalChallengersBengaluru,
}

impl Team {
    pub const ALL: [Team; 10] = [
        Team::MumbaiIndians,
        Team::KolkataKnightRiders,
        Team::RajasthanRoyals,
        Team::ChennaiSuperKings,
        Team::SunrisersHyderabad,
        Team::DelhiCapitals,
        Team::PunjabKings,
        Team::LucknowSuperGiants,
        Team::GujaratTitans,
        Team::RoyalChallengersBengaluru,
    ];

    /// Display name, which is also the category label the model was trained on.
    pub fn name(self) -> &'static str {
        match self {
            Team::MumbaiIndians => "Mumbai Indians",
            Team::KolkataKnightRiders => "Kolkata Knight Riders",
            Team::RajasthanRoyals => "Rajasthan Royals",
            Team::ChennaiSuperKings => "Chennai Super Kings",
            Team::SunrisersHyderabad => "Sunrisers Hyderabad",
            Team::DelhiCapitals => "Delhi Capitals",
            Team::PunjabKings => "Punjab Kings",
            Team::LucknowSuperGiants => "Lucknow Super Giants",
            Team::GujaratTitans => "Gujarat Titans",
            Team::RoyalChallengersBengaluru => "Royal Challengers Bengaluru",
        }
    }

    /// Chart colour as a CSS hex string.
    pub fn colour(self) -> &'static str {
        match self {
            Team::MumbaiIndians => "#000080",
            Team::KolkataKnightRiders => "#800080",
            Team::RajasthanRoyals => "#FFC0CB",
            Team::ChennaiSuperKings => "#FFFF00",
            Team::SunrisersHyderabad => "#FFA500",
            Team::DelhiCapitals => "#87CEEB",
            Team::PunjabKings => "#808080",
            Team::LucknowSuperGiants => "#800000",
            Team::GujaratTitans => "#000000",
            Team::RoyalChallengersBengaluru => "#FF0000",
        }
    }

    /// All teams ordered by display name, as the selectors list them.
    pub fn sorted() -> Vec<Team> {
        let mut teams = Team::ALL.to_vec();
        teams.sort_by_key(|t| t.name());
        teams
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Team {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Team::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| InputError::UnknownTeam(s.to_string()))
    }
}

impl TryFrom<String> for Team {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Team> for String {
    fn from(team: Team) -> Self {
        team.name().to_string()
    }
}

/// Host cities seen in the training data.
pub const CITIES: [&str; 32] = [
    "Bangalore",
    "Delhi",
    "Mumbai",
    "Kolkata",
    "Hyderabad",
    "Chennai",
    "Jaipur",
    "Cape Town",
    "Port Elizabeth",
    "Durban",
    "Centurion",
    "East London",
    "Johannesburg",
    "Kimberley",
    "Bloemfontein",
    "Ahmedabad",
    "Cuttack",
    "Nagpur",
    "Visakhapatnam",
    "Pune",
    "Raipur",
    "Ranchi",
    "Abu Dhabi",
    "Bengaluru",
    "Dubai",
    "Sharjah",
    "Navi Mumbai",
    "Chandigarh",
    "Lucknow",
    "Guwahati",
    "Dharamsala",
    "Mohali",
];

/// A venue from [`CITIES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct City(&'static str);

impl City {
    pub fn name(self) -> &'static str {
        self.0
    }

    pub fn sorted() -> Vec<City> {
        let mut cities: Vec<City> = CITIES.into_iter().map(City).collect();
        cities.sort_by_key(|c| c.0);
        cities
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl FromStr for City {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CITIES
            .into_iter()
            .find(|c| *c == s)
            .map(City)
            .ok_or_else(|| InputError::UnknownCity(s.to_string()))
    }
}

impl TryFrom<String> for City {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// Derived `Deserialize` would borrow the `&'static str` field from the input.
impl<'de> Deserialize<'de> for City {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer)?
            .parse()
            .map_err(de::Error::custom)
    }
}

impl From<City> for String {
    fn from(city: City) -> Self {
        city.0.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_names_round_trip_through_parse() {
        for team in Team::ALL {
            assert_eq!(team.name().parse::<Team>().unwrap(), team);
        }
    }

    #[test]
    fn unknown_team_is_rejected() {
        let err = "Deccan Chargers".parse::<Team>().unwrap_err();
        assert!(matches!(err, InputError::UnknownTeam(ref n) if n == "Deccan Chargers"));
    }

    #[test]
    fn teams_are_sorted_by_name() {
        let sorted = Team::sorted();
        assert_eq!(sorted.len(), 10);
        assert_eq!(sorted[0], Team::ChennaiSuperKings);
        assert_eq!(sorted[9], Team::SunrisersHyderabad);
        assert!(sorted.windows(2).all(|w| w[0].name() < w[1].name()));
    }

    #[test]
    fn team_colours_match_chart_palette() {
        assert_eq!(Team::MumbaiIndians.colour(), "#000080");
        assert_eq!(Team::RoyalChallengersBengaluru.colour(), "#FF0000");
        assert_eq!(Team::GujaratTitans.colour(), "#000000");
    }

    #[test]
    fn cities_sorted_and_parseable() {
        let sorted = City::sorted();
        assert_eq!(sorted.len(), 32);
        assert_eq!(sorted[0].name(), "Abu Dhabi");
        assert_eq!(sorted[31].name(), "Visakhapatnam");
        assert_eq!("Navi Mumbai".parse::<City>().unwrap().name(), "Navi Mumbai");
        assert!("Lahore".parse::<City>().is_err());
    }

    #[test]
    fn team_deserializes_from_display_name() {
        let team: Team = serde_json::from_str("\"Punjab Kings\"").unwrap();
        assert_eq!(team, Team::PunjabKings);
        assert_eq!(serde_json::to_string(&team).unwrap(), "\"Punjab Kings\"");
        assert!(serde_json::from_str::<Team>("\"Kings XI\"").is_err());
    }

    #[test]
    fn city_deserializes_from_owned_input() {
        let raw = String::from("\"Dharamsala\"");
        let city: City = serde_json::from_str(&raw).unwrap();
        drop(raw);
        assert_eq!(city.name(), "Dharamsala");
        assert_eq!(serde_json::to_string(&city).unwrap(), "\"Dharamsala\"");

        let err = serde_json::from_str::<City>("\"Lahore\"").unwrap_err();
        assert!(err.to_string().contains("unknown city: Lahore"));
    }
}
