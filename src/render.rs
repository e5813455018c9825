//! Text and HTML rendering of the prediction form and its result.

use std::fmt::Write;

use crate::models::*;

const TITLE: &str = "Satellite Launch Cost Prediction";
const SUBTITLE: &str = "Estimate the cost of launching a satellite (in Million USD)";

/// Unit the result is displayed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayCurrency {
    UsdMillions,
    Crores(CurrencyConversion),
}

pub fn format_usd_millions(value: f64) -> String {
    format!("${:.2} Million USD", value)
}

pub fn format_crores(value: f64) -> String {
    format!("₹{:.2} Crores", value)
}

/// One-line result, e.g. `Estimated Launch Cost: $12.34 Million USD`.
pub fn render_estimate(estimate: &Estimate, currency: DisplayCurrency) -> String {
    let amount = match currency {
        DisplayCurrency::UsdMillions => format_usd_millions(estimate.usd_millions),
        DisplayCurrency::Crores(conversion) => {
            let crores = estimate
                .crores
                .unwrap_or_else(|| conversion.to_crores(estimate.usd_millions));
            format_crores(crores)
        }
    };
    format!("Estimated Launch Cost: {}", amount)
}

/// Result shown under the form after a submit.
pub enum Outcome<'a> {
    Estimate(&'a Estimate),
    Error(String),
}

/// Render the full form page, pre-filled with `input`.
pub fn render_page(
    input: &PredictionInput,
    outcome: Option<Outcome<'_>>,
    currency: DisplayCurrency,
) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>");
    html.push_str(TITLE);
    html.push_str("</title></head>\n<body>\n");
    let _ = writeln!(html, "<h1>{}</h1>\n<p>{}</p>", TITLE, SUBTITLE);

    html.push_str("<form method=\"post\" action=\"/predict\">\n");
    number_input(
        &mut html,
        "payload_weight_kg",
        "Payload Weight (kg)",
        input.payload_weight_kg,
        &PAYLOAD_WEIGHT_RANGE,
    );
    number_input(
        &mut html,
        "mission_years",
        "Mission Duration (Years)",
        input.mission_years,
        &MISSION_YEARS_RANGE,
    );
    select::<Orbit>(&mut html, "orbit", "Orbit Type", &input.orbit);
    select::<RocketClass>(&mut html, "rocket", "Rocket Class", &input.rocket);
    select::<FuelType>(&mut html, "fuel", "Fuel Type", &input.fuel);
    html.push_str("<button type=\"submit\">Predict Launch Cost</button>\n</form>\n");

    match outcome {
        Some(Outcome::Estimate(estimate)) => {
            let _ = writeln!(
                html,
                "<p class=\"result\">{}</p>",
                escape(&render_estimate(estimate, currency))
            );
        }
        Some(Outcome::Error(message)) => {
            let _ = writeln!(html, "<p class=\"error\">{}</p>", escape(&message));
        }
        None => {}
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn number_input(
    html: &mut String,
    name: &str,
    label: &str,
    value: u32,
    range: &std::ops::RangeInclusive<u32>,
) {
    let _ = writeln!(
        html,
        "<label>{label} <input type=\"number\" name=\"{name}\" min=\"{}\" max=\"{}\" value=\"{value}\" required></label><br>",
        range.start(),
        range.end(),
    );
}

fn select<C: Category>(html: &mut String, name: &str, label: &str, selected: &str) {
    let _ = writeln!(html, "<label>{label} <select name=\"{name}\">");
    for choice in C::labels() {
        let marker = if choice == selected { " selected" } else { "" };
        let _ = writeln!(html, "<option value=\"{choice}\"{marker}>{choice}</option>");
    }
    html.push_str("</select></label><br>\n");
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
