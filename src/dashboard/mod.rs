use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{debug, error, warn};

pub mod charts;
pub mod form;

use crate::predictor::{
    City, MatchFeatures, MatchState, ModelError, Probabilities, Team, WinPredictor,
};
use form::PredictForm;

#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<dyn WinPredictor>,
}

/// Build the Axum router for the predictor form and its JSON API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/predict", post(predict_form_handler))
        .route("/api/options", get(options_handler))
        .route("/api/model", get(model_handler))
        .route("/api/predict", post(api_predict_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Outcome of one prediction request.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub features: MatchFeatures,
    pub probabilities: Probabilities,
    pub win_percent: i64,
    pub loss_percent: i64,
}

fn predict(predictor: &dyn WinPredictor, state: &MatchState) -> Result<Prediction, ModelError> {
    let features = state.features();
    let probabilities = predictor.predict_proba(&features)?;
    debug!(
        batting = %features.batting_team,
        bowling = %features.bowling_team,
        city = %features.city,
        runs_left = features.runs_left,
        balls_left = features.balls_left,
        wickets_left = features.wickets_left,
        crr = features.crr,
        rr = features.rr,
        win = probabilities.win,
        "prediction"
    );
    Ok(Prediction {
        features,
        win_percent: probabilities.win_percent(),
        loss_percent: probabilities.loss_percent(),
        probabilities,
    })
}

/// Serve the empty form.
async fn index_handler() -> impl IntoResponse {
    Html(render_page(&PredictForm::default(), None))
}

/// POST /predict (form-urlencoded), re-rendering the form with the result.
async fn predict_form_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<PredictForm>,
) -> impl IntoResponse {
    let match_state = match form.to_state() {
        Ok(s) => s,
        Err(e) => {
            warn!("Rejected form submission: {}", e);
            let body = error_section(&e.to_string());
            return (StatusCode::UNPROCESSABLE_ENTITY, Html(render_page(&form, Some(&body))));
        }
    };

    match predict(state.predictor.as_ref(), &match_state) {
        Ok(prediction) => {
            let body = result_section(&match_state, &prediction);
            (StatusCode::OK, Html(render_page(&form, Some(&body))))
        }
        Err(e) => {
            error!("Prediction failed: {}", e);
            let body = error_section(&format!("Prediction failed: {e}"));
            (StatusCode::INTERNAL_SERVER_ERROR, Html(render_page(&form, Some(&body))))
        }
    }
}

#[derive(Debug, Serialize)]
struct TeamOption {
    name: &'static str,
    colour: &'static str,
}

#[derive(Debug, Serialize)]
struct Options {
    teams: Vec<TeamOption>,
    cities: Vec<&'static str>,
}

/// GET /api/options
async fn options_handler() -> impl IntoResponse {
    Json(Options {
        teams: Team::sorted()
            .into_iter()
            .map(|t| TeamOption {
                name: t.name(),
                colour: t.colour(),
            })
            .collect(),
        cities: City::sorted().into_iter().map(City::name).collect(),
    })
}

/// GET /api/model
async fn model_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.predictor.info())
}

/// POST /api/predict
async fn api_predict_handler(
    State(state): State<Arc<AppState>>,
    Json(match_state): Json<MatchState>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    match_state.validate().map_err(|e| {
        warn!("Rejected API request: {}", e);
        (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    })?;
    predict(state.predictor.as_ref(), &match_state)
        .map(Json)
        .map_err(|e| {
            error!("Prediction failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })
}

// ── Rendering ────────────────────────────────────────────────────────────────

fn render_page(form: &PredictForm, section: Option<&str>) -> String {
    let teams = Team::sorted();
    let team_options = |selected: &str| {
        teams
            .iter()
            .map(|t| option(t.name(), selected))
            .collect::<String>()
    };
    let city_options: String = City::sorted()
        .into_iter()
        .map(|c| option(c.name(), &form.city))
        .collect();

    PAGE_HTML
        .replace("<!--BATTING_OPTIONS-->", &team_options(&form.batting_team))
        .replace("<!--BOWLING_OPTIONS-->", &team_options(&form.bowling_team))
        .replace("<!--CITY_OPTIONS-->", &city_options)
        .replace("__TARGET__", &escape_html(&form.target))
        .replace("__SCORE__", &escape_html(&form.score))
        .replace("__OVERS__", &escape_html(&form.overs))
        .replace("__WICKETS__", &escape_html(&form.wickets))
        .replace("<!--RESULT-->", section.unwrap_or(""))
}

fn option(name: &str, selected: &str) -> String {
    let attr = if name == selected { " selected" } else { "" };
    let name = escape_html(name);
    format!(r#"<option value="{name}"{attr}>{name}</option>"#)
}

fn result_section(state: &MatchState, prediction: &Prediction) -> String {
    let p = &prediction.probabilities;
    format!(
        r#"<section class="result">
  <h2>Winning Probability 🔢</h2>
  <p><strong>{batting}</strong>'s Winning Chance: <strong id="win-pct">{win}%</strong></p>
  <p><strong>{bowling}</strong>'s Winning Chance: <strong id="loss-pct">{loss}%</strong></p>
  <div class="charts">{bar}{donut}</div>
</section>"#,
        batting = escape_html(state.batting_team.name()),
        bowling = escape_html(state.bowling_team.name()),
        win = prediction.win_percent,
        loss = prediction.loss_percent,
        bar = charts::bar_chart(state.batting_team, state.bowling_team, p),
        donut = charts::donut_chart(state.batting_team, state.bowling_team, p),
    )
}

fn error_section(message: &str) -> String {
    format!(r#"<div class="error">{}</div>"#, escape_html(message))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Embedded single-page form (HTML + CSS)
const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>IPL Win Predictor</title>
<style>
  :root {
    --text: #ecf0f1;
    --muted: #a9b4c2;
    --green: #27ae60;
    --red: #ff4f6a;
  }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: #0a2342; color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; display: grid; grid-template-columns: 260px 1fr; min-height: 100vh; }
  aside { background: linear-gradient(135deg, #34495e, #2c3e50); padding: 1.5rem; }
  aside h2 { color: white; font-size: 1.1rem; margin-bottom: 1rem; }
  aside li { margin: 0 0 .6rem 1rem; font-size: .9rem; color: var(--muted); }
  main { background: radial-gradient(circle, #283e51, #0a2342); padding: 20px; display: grid; gap: 1.5rem; align-content: start; }
  .title-container { background: linear-gradient(135deg, #a2a7e5, #1f6f8b); color: white; padding: 20px; display: flex; align-items: center; justify-content: center; border-radius: 10px; }
  .title-container img { height: 70px; margin-right: 15px; }
  .title-container h1 { font-size: 2.2rem; color: white; }
  form { display: grid; gap: 1rem; }
  .row { display: grid; gap: 1rem; }
  .row.two { grid-template-columns: 1fr 1fr; }
  .row.three { grid-template-columns: 1fr 1fr 1fr; }
  label { display: grid; gap: .35rem; font-size: .9rem; }
  select, input { background: #1b2a3a; color: var(--text); border: 1px solid #3d5166; border-radius: 6px; padding: .5rem .6rem; font-size: .95rem; }
  button { justify-self: start; background-color: var(--green); color: white; font-weight: bold; border: none; border-radius: 5px; padding: .6rem 1.1rem; cursor: pointer; }
  .result h2 { margin-bottom: .6rem; }
  .result p { margin-bottom: .3rem; }
  .charts { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; align-items: center; margin-top: 1rem; }
  .error { background: rgba(255,79,106,.15); border: 1px solid var(--red); color: var(--red); padding: .8rem 1rem; border-radius: 6px; }
  footer { color: var(--muted); font-size: .85rem; }
  @media (max-width: 768px) { body { grid-template-columns: 1fr; } .row.two, .row.three, .charts { grid-template-columns: 1fr; } }
</style>
</head>
<body>
<aside>
  <h2>🏏 Interactive IPL Predictor</h2>
  <ul>
    <li>Choose match details to predict winning probability.</li>
    <li>Note: Predictions are based on historical data and are for entertainment purposes.</li>
  </ul>
</aside>

<main>
  <div class="title-container">
    <img src="https://thefederal.com/file/2023/01/ipl-logo.webp" alt="IPL Logo">
    <h1>IPL Win Predictor</h1>
  </div>

  <h3>Match Details</h3>
  <form method="post" action="/predict">
    <div class="row two">
      <label>Select the batting team 🏏
        <select name="batting_team"><!--BATTING_OPTIONS--></select>
      </label>
      <label>Select the bowling team 🥎
        <select name="bowling_team"><!--BOWLING_OPTIONS--></select>
      </label>
    </div>
    <label>Select the city 🌆
      <select name="city"><!--CITY_OPTIONS--></select>
    </label>
    <label>Enter Target Score 🎯
      <input type="number" name="target" step="1" value="__TARGET__">
    </label>
    <div class="row three">
      <label>Enter Current Score 📊
        <input type="number" name="score" step="1" value="__SCORE__">
      </label>
      <label>Overs Completed ⏱️
        <input type="number" name="overs" step="1" min="0" max="20" value="__OVERS__">
      </label>
      <label>Wickets Fallen 🏴
        <input type="number" name="wickets" step="1" min="0" max="10" value="__WICKETS__">
      </label>
    </div>
    <button type="submit">Predict Winning Chances 🎉</button>
  </form>

  <!--RESULT-->

  <footer>Developed with ❤️ by Sumanth www.linkedin.com/in/sumanth-godari.</footer>
</main>
</body>
</html>"#;
