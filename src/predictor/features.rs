//! Match state and the derived second-innings features fed to the model.
//!
//! A T20 innings is 20 overs of 6 balls. The derivations are deliberately
//! unclamped: nonsensical inputs (score above target, more than 20 overs)
//! flow through as negative values and the model sees them as-is. The only
//! guard is on the two rates, which fall back to 0 instead of dividing by a
//! non-positive denominator.

use serde::{Deserialize, Serialize};

use super::{City, InputError, Team};

/// Balls in a full T20 innings.
pub const INNINGS_BALLS: i64 = 120;
pub const BALLS_PER_OVER: i64 = 6;
pub const MAX_OVERS: i64 = 20;
pub const MAX_WICKETS: i64 = 10;
/// Largest magnitude a browser number input round-trips exactly (2^53 − 1).
/// Keeps `target - score` and `runs_left * 6` well inside `i64`.
pub const MAX_RUNS: i64 = 9_007_199_254_740_991;

/// Raw values as entered on the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub batting_team: Team,
    pub bowling_team: Team,
    pub city: City,
    #[serde(default)]
    pub target: i64,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub overs: i64,
    #[serde(default)]
    pub wickets: i64,
}

/// One model input row: the raw fields plus the derived ones.
///
/// Field names follow the column names of the trained pipeline, hence
/// `total_runs_x` for the target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchFeatures {
    pub batting_team: Team,
    pub bowling_team: Team,
    pub city: City,
    pub runs_left: i64,
    pub balls_left: i64,
    pub wickets_left: i64,
    pub total_runs_x: i64,
    pub crr: f64,
    pub rr: f64,
}

impl MatchState {
    /// Check the bounds the form controls impose on overs and wickets.
    ///
    /// Target and score are free-form within [`MAX_RUNS`]; same-team
    /// matchups and scores past the target are accepted. The derivations
    /// assume a validated state.
    pub fn validate(&self) -> Result<(), InputError> {
        check_range("target", self.target, -MAX_RUNS, MAX_RUNS)?;
        check_range("score", self.score, -MAX_RUNS, MAX_RUNS)?;
        check_range("overs", self.overs, 0, MAX_OVERS)?;
        check_range("wickets", self.wickets, 0, MAX_WICKETS)?;
        Ok(())
    }

    pub fn runs_left(&self) -> i64 {
        self.target - self.score
    }

    pub fn balls_left(&self) -> i64 {
        INNINGS_BALLS - self.overs * BALLS_PER_OVER
    }

    pub fn wickets_left(&self) -> i64 {
        MAX_WICKETS - self.wickets
    }

    /// Current run rate: runs per over so far, 0 before the first over.
    pub fn current_run_rate(&self) -> f64 {
        if self.overs > 0 {
            self.score as f64 / self.overs as f64
        } else {
            0.0
        }
    }

    /// Required run rate: runs per over needed from the balls remaining,
    /// 0 once no balls remain.
    pub fn required_run_rate(&self) -> f64 {
        let balls_left = self.balls_left();
        if balls_left > 0 {
            (self.runs_left() * BALLS_PER_OVER) as f64 / balls_left as f64
        } else {
            0.0
        }
    }

    /// Build the model input row.
    pub fn features(&self) -> MatchFeatures {
        MatchFeatures {
            batting_team: self.batting_team,
            bowling_team: self.bowling_team,
            city: self.city,
            runs_left: self.runs_left(),
            balls_left: self.balls_left(),
            wickets_left: self.wickets_left(),
            total_runs_x: self.target,
            crr: self.current_run_rate(),
            rr: self.required_run_rate(),
        }
    }
}

impl MatchFeatures {
    /// Numeric column value by pipeline column name.
    pub fn numeric(&self, column: &str) -> Option<f64> {
        let value = match column {
            "runs_left" => self.runs_left as f64,
            "balls_left" => self.balls_left as f64,
            "wickets_left" => self.wickets_left as f64,
            "total_runs_x" => self.total_runs_x as f64,
            "crr" => self.crr,
            "rr" => self.rr,
            _ => return None,
        };
        Some(value)
    }

    /// Categorical column value by pipeline column name.
    pub fn categorical(&self, column: &str) -> Option<&'static str> {
        match column {
            "batting_team" => Some(self.batting_team.name()),
            "bowling_team" => Some(self.bowling_team.name()),
            "city" => Some(self.city.name()),
            _ => None,
        }
    }
}

fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<(), InputError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(InputError::OutOfRange {
            field,
            min,
            max,
            value,
        })
    }
}
