//! Presentation of a [`Prediction`] as a text report or JSON.

use snowday_core::{ClosureProfile, Prediction, Snowfall};

/// Score that fills the score bar.
pub(crate) const SCORE_BAR_MAX: u32 = 12;
const SCORE_BAR_WIDTH: u32 = 24;
const MISSING: &str = "n/a";

/// Share of [`SCORE_BAR_MAX`] reached by `score`, rounded, capped at 100.
pub(crate) fn score_bar_percent(score: u32) -> u32 {
    let scaled = score.saturating_mul(100).saturating_add(SCORE_BAR_MAX / 2) / SCORE_BAR_MAX;
    scaled.min(100)
}

fn score_bar(score: u32) -> String {
    let percent = score_bar_percent(score);
    let filled = percent * SCORE_BAR_WIDTH / 100;
    let empty = SCORE_BAR_WIDTH - filled;
    format!(
        "[{}{}] {percent}%",
        "#".repeat(filled as usize),
        "-".repeat(empty as usize)
    )
}

/// Render the human-readable report.
pub(crate) fn render_text(prediction: &Prediction) -> String {
    let total = prediction.report.total();
    let mut lines = vec![
        format!("{} (score {total})", prediction.verdict.headline()),
        score_bar(total),
        String::new(),
        "Why:".to_owned(),
    ];
    lines.extend(
        prediction
            .report
            .messages()
            .map(|message| format!("  - {message}")),
    );
    lines.push(String::new());
    lines.push("Weather:".to_owned());
    lines.extend(weather_lines(prediction).map(|line| format!("  - {line}")));
    lines.push(String::new());
    match prediction.signals.profile() {
        Some(profile) => {
            lines.push("Local profile:".to_owned());
            lines.extend(profile_lines(profile).map(|line| format!("  - {line}")));
        }
        None => lines.push(
            "No local profile found. Add an entry to school_trends.json for this ZIP \
             to improve predictions."
                .to_owned(),
        ),
    }
    lines.join("\n")
}

/// Render the full prediction as pretty-printed JSON.
pub(crate) fn render_json(prediction: &Prediction) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(prediction)
}

fn weather_lines(prediction: &Prediction) -> impl Iterator<Item = String> {
    let location = &prediction.location;
    let forecast = &prediction.forecast;
    let tomorrow = &forecast.tomorrow;

    let mut lines = vec![format!(
        "Location: {} ({:.4}, {:.4}), ZIP {}",
        location.display_name(),
        location.latitude(),
        location.longitude(),
        prediction.region
    )];
    if let Some(current) = &forecast.current {
        lines.push(format!(
            "Now: {}°F, wind {} km/h, weather code {}",
            optional(current.temperature),
            optional(current.wind_speed),
            current
                .condition_code
                .map_or_else(|| MISSING.to_owned(), |code| code.to_string())
        ));
    }
    lines.push(format!(
        "Tomorrow: {}",
        tomorrow.date.as_deref().unwrap_or(MISSING)
    ));
    lines.push(match tomorrow.snowfall {
        Some(amount) => {
            let snowfall = Snowfall::new(amount, tomorrow.snowfall_unit);
            format!(
                "Tomorrow snowfall: {snowfall} ({} in)",
                number(snowfall.inches())
            )
        }
        None => format!("Tomorrow snowfall: {MISSING}"),
    });
    lines.push(format!(
        "Tomorrow min: {}°F, max: {}°F",
        optional(tomorrow.temperature_min_f),
        optional(tomorrow.temperature_max_f)
    ));
    lines.push(format!(
        "Tomorrow precipitation: {} mm",
        optional(tomorrow.precipitation_mm)
    ));
    lines.into_iter()
}

fn profile_lines(profile: &ClosureProfile) -> impl Iterator<Item = String> {
    let threshold = profile.closure_snow_threshold();
    let mut lines = vec![
        if threshold.is_finite() {
            format!("closure snow threshold: {} in", number(threshold))
        } else {
            format!("closure snow threshold: {MISSING}")
        },
        format!(
            "historical closure weight: {}",
            number(profile.historical_closure_weight())
        ),
    ];
    if let Some(bias) = profile.overnight_snow_bias() {
        lines.push(format!("overnight snow bias: {}", number(bias)));
    }
    if let Some(cold) = profile.closure_cold_threshold() {
        lines.push(format!("closure cold threshold: {}°F", number(cold)));
    }
    lines.into_iter()
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_owned(), number)
}

/// One decimal place, dropping a trailing `.0`.
fn number(value: f64) -> String {
    let text = format!("{value:.1}");
    match text.strip_suffix(".0") {
        Some("-0") => "0".to_owned(),
        Some(whole) => whole.to_owned(),
        None => text,
    }
}
