//! Plain-text rendering of a projection for `nestegg preview`

use nestegg_core::{Plan, Projection};
use std::fmt::Write;

/// Format a projection as a year-by-year table followed by the summary
pub fn render_text(plan: &Plan, projection: &Projection) -> String {
    let mut out = String::new();
    let scenario = &plan.assumptions.selected_scenario;

    // Start year as resolved by the projection
    let first_year = projection.rows.first().map_or(0, |row| row.year);
    let _ = writeln!(
        out,
        "Scenario: {scenario} ({} years from {first_year})",
        plan.horizon_years
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:>6} {:>4} {:>8} {:>14} {:>14} {:>16} {:>16} {:>9}",
        "Year", "Age", "Working", "Contributions", "Withdrawal", "End Balance", "Real Balance", "Depleted"
    );

    for row in &projection.rows {
        let _ = writeln!(
            out,
            "{:>6} {:>4} {:>8} {:>14} {:>14} {:>16} {:>16} {:>9}",
            row.year,
            row.age,
            yes_no(row.working),
            money(row.contributions),
            money(row.withdrawal),
            money(row.end_balance),
            money(row.real_end_balance),
            yes_no(row.depleted),
        );
    }

    let summary = &projection.summary;
    let _ = writeln!(out);
    let _ = writeln!(out, "Retirement age:                {}", summary.retirement_age);
    let _ = writeln!(
        out,
        "Balance at retirement:         {}",
        lookup(summary.balance_at_retirement)
    );
    let _ = writeln!(out, "Depletion year:                {}", summary.depletion_label());
    let _ = writeln!(out, "Sustainable years:             {}", summary.sustainable_years);
    let _ = writeln!(
        out,
        "Balance at life expectancy:    {}",
        lookup(summary.balance_at_life_expectancy)
    );
    out
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// `None` is where the sheet's exact-age MATCH would show `#N/A`
fn lookup(value: Option<f64>) -> String {
    value.map_or_else(|| "#N/A".to_string(), money)
}

/// Whole dollars with thousands separators
fn money(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(money(0.0), "$0");
        assert_eq!(money(999.4), "$999");
        assert_eq!(money(56_500.0), "$56,500");
        assert_eq!(money(1_234_567.8), "$1,234,568");
        assert_eq!(money(-1_500.0), "-$1,500");
    }

    #[test]
    fn missing_lookup_shows_na() {
        assert_eq!(lookup(None), "#N/A");
        assert_eq!(lookup(Some(260_000.0)), "$260,000");
    }

    #[test]
    fn header_year_comes_from_projection() {
        let plan = Plan::default().with_horizon(3);
        let mut projection = Projection::simulate(&plan).unwrap();
        for (offset, row) in projection.rows.iter_mut().enumerate() {
            row.year = 1999 + offset as i32;
        }
        let text = render_text(&plan, &projection);
        assert!(text.starts_with("Scenario: Moderate (3 years from 1999)"));
    }

    #[test]
    fn text_has_one_line_per_year_and_summary() {
        let plan = Plan::default().with_start_year(2025).with_horizon(5);
        let projection = Projection::simulate(&plan).unwrap();
        let text = render_text(&plan, &projection);

        assert!(text.starts_with("Scenario: Moderate (5 years from 2025)"));
        assert_eq!(text.lines().filter(|l| l.trim_start().starts_with("202")).count(), 5);
        assert!(text.contains("$56,500"));
        assert!(text.contains("Depletion year:                Not depleted"));
        assert!(text.contains("Balance at retirement:         #N/A"));
    }
}
