use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatFormat {
    Integer,
    Rupees,
    Rating,
}

pub fn format_stat(val: f64, fmt: StatFormat) -> String {
    match fmt {
        StatFormat::Integer => format_thousands(val.round() as i64),
        StatFormat::Rupees => {
            let whole = val.trunc() as i64;
            let paise = ((val.abs() - (whole.abs() as f64)) * 100.0).round() as i64;
            if paise == 0 {
                format!("₹{}", format_thousands(whole))
            } else {
                format!("₹{}.{:02}", format_thousands(whole), paise)
            }
        }
        StatFormat::Rating => format!("{val:.1}"),
    }
}

fn format_thousands(n: i64) -> String {
    let s = n.abs().to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

#[component]
pub fn StatCard(
    #[prop(into)]
    label: String,
    /// Icon name from the icon() helper
    #[prop(into)]
    icon_name: String,
    /// None while loading
    #[prop(into)]
    value: Signal<Option<f64>>,
    format: StatFormat,
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let formatted = move || match value.get() {
        Some(v) => format_stat(v, format),
        None => "-".to_string(),
    };

    view! {
        <div class="stat-card">
            <div class="stat-card__icon">{icon(&icon_name)}</div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{formatted}</div>
                {move || subtitle.get().map(|s| view! { <div class="stat-card__subtitle">{s}</div> })}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_stat() {
        assert_eq!(format_stat(1234567.0, StatFormat::Integer), "1,234,567");
        assert_eq!(format_stat(12500.5, StatFormat::Rupees), "₹12,500.50");
        assert_eq!(format_stat(800.0, StatFormat::Rupees), "₹800");
        assert_eq!(format_stat(4.26, StatFormat::Rating), "4.3");
        assert_eq!(format_stat(-1500.0, StatFormat::Integer), "-1,500");
    }
}
