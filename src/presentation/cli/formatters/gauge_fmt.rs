use colored::{ColoredString, Colorize};

use crate::domain::value_objects::severity::Severity;
use crate::domain::value_objects::thresholds::Limit;

/// Tier `value` falls in under `limit`; `None` when no limit applies or
/// nothing is breached.
fn tier(value: f64, limit: Option<&Limit>) -> Option<Severity> {
    limit.and_then(|l| l.classify(value)).map(|(severity, _)| severity)
}

fn paint(text: &str, tier: Option<Severity>) -> ColoredString {
    match tier {
        Some(Severity::Critical) => text.red().bold(),
        Some(Severity::Warning | Severity::Info) => text.yellow(),
        None => text.green(),
    }
}

/// Fixed-width bar for a percentage, coloured by the tier `limit` assigns
/// to it so the console agrees with the issue list.
#[must_use]
pub fn usage_bar(value: f64, width: usize, limit: Option<&Limit>) -> String {
    let ratio = (value / 100.0).clamp(0.0, 1.0);
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    format!(
        "{}{}",
        paint(&"█".repeat(filled), tier(value, limit)),
        "░".repeat(empty)
    )
}

#[must_use]
pub fn usage_percent(value: f64, limit: Option<&Limit>) -> ColoredString {
    paint(&format!("{value:.1}%"), tier(value, limit))
}

#[must_use]
pub fn temperature(celsius: f64, limit: Option<&Limit>) -> ColoredString {
    paint(&format!("{celsius:.1}°C"), tier(celsius, limit))
}
