//! Server-side SVG charts for a prediction: a horizontal bar chart and a
//! donut chart, both coloured by team.

use std::f64::consts::PI;
use std::fmt::Write;

use crate::predictor::{Probabilities, Team};

// Bar chart canvas and plot area.
const BAR_WIDTH: f64 = 400.0;
const BAR_HEIGHT: f64 = 200.0;
const BAR_LEFT: f64 = 100.0;
const BAR_RIGHT: f64 = 20.0;
const BAR_TOP: f64 = 15.0;
const BAR_BOTTOM: f64 = 45.0;
/// Bar thickness as a fraction of the category slot.
const BAR_FILL: f64 = 0.8;
/// Value labels sit this many axis units inside the bar end.
const BAR_LABEL_INSET: f64 = 10.0;

// Donut canvas.
const DONUT_SIZE: f64 = 300.0;
const DONUT_RADIUS: f64 = 100.0;
const DONUT_CENTER_Y: f64 = 165.0;
const DONUT_HOLE: f64 = 0.70;
const DONUT_START_DEG: f64 = 90.0;
const DONUT_LABEL_DISTANCE: f64 = 1.1;
const DONUT_PCT_DISTANCE: f64 = 0.6;

/// Horizontal bars for batting (bottom) and bowling (top) chances on a
/// 0–100 axis.
pub fn bar_chart(batting: Team, bowling: Team, p: &Probabilities) -> String {
    let plot_w = BAR_WIDTH - BAR_LEFT - BAR_RIGHT;
    let plot_h = BAR_HEIGHT - BAR_TOP - BAR_BOTTOM;
    let slot = plot_h / 2.0;
    let x = |v: f64| BAR_LEFT + v / 100.0 * plot_w;
    let baseline = BAR_TOP + plot_h;

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg class="chart bar-chart" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {BAR_WIDTH} {BAR_HEIGHT}" width="{BAR_WIDTH}" height="{BAR_HEIGHT}" role="img" aria-label="Winning probability bar chart">"#
    );

    let bars = [
        ("Batting Team", p.win, batting),
        ("Bowling Team", p.loss, bowling),
    ];
    for (i, (label, value, team)) in bars.into_iter().enumerate() {
        let center = baseline - (i as f64 + 0.5) * slot;
        let thickness = slot * BAR_FILL;
        let pct = value * 100.0;
        let _ = write!(
            svg,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
            x(0.0),
            center - thickness / 2.0,
            (x(pct) - x(0.0)).max(0.0),
            thickness,
            team.colour(),
        );
        let _ = write!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" fill="white" font-weight="bold" text-anchor="end" dominant-baseline="middle">{}%</text>"#,
            x(pct - BAR_LABEL_INSET),
            center,
            crate::predictor::model::round_percent(value),
        );
        let _ = write!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" fill="white" font-size="12" text-anchor="end" dominant-baseline="middle">{label}</text>"#,
            BAR_LEFT - 6.0,
            center,
        );
    }

    // Only the bottom spine is drawn.
    let _ = write!(
        svg,
        r#"<line x1="{:.2}" y1="{baseline:.2}" x2="{:.2}" y2="{baseline:.2}" stroke="white"/>"#,
        x(0.0),
        x(100.0),
    );
    for tick in (0..=100).step_by(20) {
        let tx = x(tick as f64);
        let _ = write!(
            svg,
            r#"<line x1="{tx:.2}" y1="{baseline:.2}" x2="{tx:.2}" y2="{:.2}" stroke="white"/><text x="{tx:.2}" y="{:.2}" fill="white" font-size="11" text-anchor="middle">{tick}</text>"#,
            baseline + 4.0,
            baseline + 16.0,
        );
    }
    let _ = write!(
        svg,
        r#"<text x="{:.2}" y="{:.2}" fill="white" font-size="12" text-anchor="middle">Winning Probability (%)</text>"#,
        BAR_LEFT + plot_w / 2.0,
        BAR_HEIGHT - 6.0,
    );
    svg.push_str("</svg>");
    svg
}

/// Two-wedge donut of the win/loss split, starting at 12 o'clock and
/// running counter-clockwise.
pub fn donut_chart(batting: Team, bowling: Team, p: &Probabilities) -> String {
    let cx = DONUT_SIZE / 2.0;
    let cy = DONUT_CENTER_Y;
    let r = DONUT_RADIUS;

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg class="chart donut-chart" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {DONUT_SIZE} {size_h}" width="{DONUT_SIZE}" height="{size_h}" role="img" aria-label="Winning probability breakdown">"#,
        size_h = DONUT_SIZE + 20.0,
    );
    let _ = write!(
        svg,
        r#"<text x="{cx:.2}" y="24" fill="white" font-size="14" text-anchor="middle">Winning Probability Breakdown</text>"#
    );

    let wedges = [(p.win, batting), (p.loss, bowling)];
    let mut start = DONUT_START_DEG;
    let mut labels = String::new();
    for (fraction, team) in wedges {
        let fraction = fraction.clamp(0.0, 1.0);
        let sweep = fraction * 360.0;
        let end = start + sweep;

        if fraction >= 1.0 - 1e-9 {
            let _ = write!(
                svg,
                r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}" fill="{}"/>"#,
                team.colour()
            );
        } else if fraction > 0.0 {
            let (x0, y0) = polar(cx, cy, r, start);
            let (x1, y1) = polar(cx, cy, r, end);
            let large_arc = if sweep > 180.0 { 1 } else { 0 };
            let _ = write!(
                svg,
                r#"<path d="M {cx:.2} {cy:.2} L {x0:.2} {y0:.2} A {r:.2} {r:.2} 0 {large_arc} 0 {x1:.2} {y1:.2} Z" fill="{}"/>"#,
                team.colour()
            );
        }

        let mid = start + sweep / 2.0;
        let (lx, ly) = polar(cx, cy, r * DONUT_LABEL_DISTANCE, mid);
        let anchor = if (lx - cx).abs() < 1e-6 {
            "middle"
        } else if lx > cx {
            "start"
        } else {
            "end"
        };
        let _ = write!(
            labels,
            r#"<text x="{lx:.2}" y="{ly:.2}" fill="white" font-size="11" text-anchor="{anchor}" dominant-baseline="middle">{}</text>"#,
            team.name()
        );
        let (px, py) = polar(cx, cy, r * DONUT_PCT_DISTANCE, mid);
        let _ = write!(
            labels,
            r#"<text x="{px:.2}" y="{py:.2}" fill="black" font-size="11" text-anchor="middle" dominant-baseline="middle">{:.1}%</text>"#,
            fraction * 100.0
        );

        start = end;
    }

    let _ = write!(
        svg,
        r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{:.2}" fill="white" stroke="black" stroke-width="1.25"/>"#,
        r * DONUT_HOLE
    );
    svg.push_str(&labels);
    svg.push_str("</svg>");
    svg
}

/// Point on a circle for a math-convention angle in degrees (SVG y grows
/// downward).
fn polar(cx: f64, cy: f64, r: f64, deg: f64) -> (f64, f64) {
    let rad = deg * PI / 180.0;
    (cx + r * rad.cos(), cy - r * rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bar_chart_uses_team_colours_and_rounded_labels() {
        let p = Probabilities::from_win(0.625);
        let svg = bar_chart(Team::MumbaiIndians, Team::ChennaiSuperKings, &p);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r##"fill="#000080""##));
        assert!(svg.contains(r##"fill="#FFFF00""##));
        assert!(svg.contains(">62%<"));
        assert!(svg.contains(">38%<"));
        assert!(svg.contains("Batting Team"));
        assert!(svg.contains("Bowling Team"));
        assert!(svg.contains("Winning Probability (%)"));
    }

    #[test]
    fn bar_lengths_are_proportional() {
        let p = Probabilities::from_win(0.75);
        let svg = bar_chart(Team::DelhiCapitals, Team::PunjabKings, &p);
        // 280px plot width: 75% → 210px, 25% → 70px.
        assert!(svg.contains(r#"width="210.00""#));
        assert!(svg.contains(r#"width="70.00""#));
    }

    #[test]
    fn donut_shows_one_decimal_percentages() {
        let p = Probabilities::from_win(0.625);
        let svg = donut_chart(Team::GujaratTitans, Team::RajasthanRoyals, &p);
        assert!(svg.contains(">62.5%<"));
        assert!(svg.contains(">37.5%<"));
        assert!(svg.contains(">Gujarat Titans<"));
        assert!(svg.contains(">Rajasthan Royals<"));
        assert!(svg.contains("Winning Probability Breakdown"));
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn percentages_sit_on_the_centre_disc() {
        let p = Probabilities::from_win(0.5);
        let svg = donut_chart(Team::MumbaiIndians, Team::DelhiCapitals, &p);
        // Win wedge spans 90°..270°, so its label sits due left at 0.6r.
        assert!(svg.contains(r#"<text x="90.00" y="165.00" fill="black""#));
        assert!(svg.contains(r#"<text x="210.00" y="165.00" fill="black""#));
        // Labels are drawn after the disc so they stay visible.
        let disc = svg.find(r#"fill="white" stroke="black""#).unwrap();
        let label = svg.find(">50.0%<").unwrap();
        assert!(disc < label);
    }

    #[test]
    fn certain_outcome_renders_full_ring() {
        let p = Probabilities::from_win(1.0);
        let svg = donut_chart(Team::KolkataKnightRiders, Team::LucknowSuperGiants, &p);
        assert_eq!(svg.matches("<path").count(), 0);
        assert!(svg.contains(r##"<circle cx="150.00" cy="165.00" r="100.00" fill="#800080"/>"##));
        assert!(svg.contains(">100.0%<"));
        assert!(svg.contains(">0.0%<"));
    }

    #[test]
    fn first_wedge_starts_at_twelve_o_clock() {
        let (x, y) = polar(150.0, 165.0, 100.0, DONUT_START_DEG);
        assert_relative_eq!(x, 150.0, epsilon = 1e-9);
        assert_relative_eq!(y, 65.0, epsilon = 1e-9);
        // Counter-clockwise: a quarter turn lands on the left.
        let (x, y) = polar(150.0, 165.0, 100.0, DONUT_START_DEG + 90.0);
        assert_relative_eq!(x, 50.0, epsilon = 1e-9);
        assert_relative_eq!(y, 165.0, epsilon = 1e-9);
    }
}
