//! Browser form submission → validated [`MatchState`].
//!
//! Every field arrives as text so that a malformed number becomes a readable
//! [`InputError`] instead of a bare extractor rejection.

use serde::Deserialize;

use crate::predictor::{City, InputError, MatchState, Team};

#[derive(Debug, Clone, Deserialize)]
pub struct PredictForm {
    pub batting_team: String,
    pub bowling_team: String,
    pub city: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub score: String,
    #[serde(default)]
    pub overs: String,
    #[serde(default)]
    pub wickets: String,
}

impl Default for PredictForm {
    /// First option of every selector, numbers at zero.
    fn default() -> Self {
        let first_team = Team::sorted()[0].name().to_string();
        PredictForm {
            batting_team: first_team.clone(),
            bowling_team: first_team,
            city: City::sorted()[0].name().to_string(),
            target: "0".into(),
            score: "0".into(),
            overs: "0".into(),
            wickets: "0".into(),
        }
    }
}

impl PredictForm {
    pub fn to_state(&self) -> Result<MatchState, InputError> {
        let state = MatchState {
            batting_team: self.batting_team.parse()?,
            bowling_team: self.bowling_team.parse()?,
            city: self.city.parse()?,
            target: parse_int("target", &self.target)?,
            score: parse_int("score", &self.score)?,
            overs: parse_int("overs", &self.overs)?,
            wickets: parse_int("wickets", &self.wickets)?,
        };
        state.validate()?;
        Ok(state)
    }
}

/// Blank fields count as 0, like an untouched number input.
fn parse_int(field: &'static str, raw: &str) -> Result<i64, InputError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse().map_err(|_| InputError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> PredictForm {
        PredictForm {
            batting_team: "Sunrisers Hyderabad".into(),
            bowling_team: "Delhi Capitals".into(),
            city: "Hyderabad".into(),
            target: "181".into(),
            score: " 95 ".into(),
            overs: "11".into(),
            wickets: "3".into(),
        }
    }

    #[test]
    fn valid_form_parses() {
        let s = form().to_state().unwrap();
        assert_eq!(s.batting_team, Team::SunrisersHyderabad);
        assert_eq!(s.bowling_team, Team::DelhiCapitals);
        assert_eq!(s.city.name(), "Hyderabad");
        assert_eq!((s.target, s.score, s.overs, s.wickets), (181, 95, 11, 3));
    }

    #[test]
    fn blank_numbers_default_to_zero() {
        let mut f = form();
        f.score = String::new();
        f.target = "  ".into();
        let s = f.to_state().unwrap();
        assert_eq!(s.score, 0);
        assert_eq!(s.target, 0);
    }

    #[test]
    fn non_integer_is_rejected() {
        let mut f = form();
        f.overs = "10.3".into();
        assert_eq!(
            f.to_state().unwrap_err(),
            InputError::InvalidNumber {
                field: "overs",
                value: "10.3".into()
            }
        );
    }

    #[test]
    fn out_of_bounds_and_unknown_names_are_rejected() {
        let mut f = form();
        f.wickets = "11".into();
        assert!(matches!(f.to_state(), Err(InputError::OutOfRange { field: "wickets", .. })));

        let mut f = form();
        f.city = "Karachi".into();
        assert_eq!(f.to_state().unwrap_err(), InputError::UnknownCity("Karachi".into()));
    }

    #[test]
    fn negative_target_is_allowed() {
        let mut f = form();
        f.target = "-10".into();
        assert_eq!(f.to_state().unwrap().runs_left(), -105);
    }

    #[test]
    fn default_form_selects_first_sorted_options() {
        let f = PredictForm::default();
        assert_eq!(f.batting_team, "Chennai Super Kings");
        assert_eq!(f.city, "Abu Dhabi");
        assert!(f.to_state().is_ok());
    }
}
