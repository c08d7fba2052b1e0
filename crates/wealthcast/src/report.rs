//! Plain-text rendering of engine results
//!
//! Each renderer returns the full text so commands can print it in one go
//! and tests can compare it without capturing stdout.

use jiff::civil::Date;
use wealthcast_core::allocation::{AllocationPlan, ClassWeight};
use wealthcast_core::amortization::{AmortizationRow, DebtSummary};
use wealthcast_core::date_math::{add_months, month_label, month_start};
use wealthcast_core::model::{CashEvent, Projection, SavingsWarning};

use crate::util::format::{
    format_compact_currency, format_currency, format_currency_short, format_percentage,
};

fn rule(width: usize) -> String {
    "-".repeat(width)
}

// ============================================================================
// Projection
// ============================================================================

/// Summary block plus one table row every `every` months (the final month is
/// always shown).
pub fn render_projection(title: &str, projection: &Projection, every: usize) -> String {
    let stats = &projection.stats;
    let every = every.max(1);
    let mut lines = vec![
        format!("{title} ({} months)", projection.horizon_months()),
        String::new(),
        format!("  Net worth today   {:>14}", format_currency(stats.net_worth)),
        format!("  Assets            {:>14}", format_currency(stats.total_assets)),
        format!("  Debt              {:>14}", format_currency(stats.total_debt)),
        format!("  Interest to pay   {:>14}", format_currency(stats.total_interest)),
        format!("  Monthly surplus   {:>14}", format_currency(stats.monthly_surplus)),
        format!("  Savings rate      {:>14}", format_percentage(stats.savings_rate)),
        format!(
            "  Final net worth   {:>14}",
            format_currency(projection.final_net_worth())
        ),
        format!(
            "  Total invested    {:>14}",
            format_currency(projection.total_invested())
        ),
    ];
    if let Some(line) = warning_line(stats.savings_used) {
        lines.push(String::new());
        lines.push(line);
    }

    let header = format!(
        "{:<10} {:>12} {:>12} {:>12} {:>10} {:>10} {:>10}",
        "Month", "Assets", "Debt", "Net worth", "Cash flow", "Events", "Invested"
    );
    lines.push(String::new());
    lines.push(header.clone());
    lines.push(rule(header.len()));

    let last = projection.series.len().saturating_sub(1);
    for point in projection
        .series
        .iter()
        .filter(|p| p.month % every == 0 || p.month == last)
    {
        lines.push(format!(
            "{:<10} {:>12} {:>12} {:>12} {:>10} {:>10} {:>10}",
            point.month_label,
            format_currency_short(point.assets),
            format_currency_short(point.debt),
            format_currency_short(point.net_worth),
            format_currency_short(point.cash_flow),
            format_currency_short(point.events_impact),
            format_currency_short(point.invested),
        ));
    }

    if let Some(final_point) = projection.final_point() {
        lines.push(String::new());
        let buckets: Vec<String> = final_point
            .buckets
            .iter()
            .filter(|(_, value)| *value != 0.0)
            .map(|(class, value)| format!("{class} {}", format_compact_currency(value)))
            .collect();
        if !buckets.is_empty() {
            lines.push(format!("Final buckets: {}", buckets.join(", ")));
        }
    }

    lines.join("\n")
}

fn warning_line(warning: SavingsWarning) -> Option<String> {
    match warning {
        SavingsWarning::None => None,
        SavingsWarning::Event => Some(
            "Warning: one-off events push investing into savings in some months".to_string(),
        ),
        SavingsWarning::StructuralInvestment => Some(
            "Warning: the investment goal exceeds the monthly surplus, savings fund the gap"
                .to_string(),
        ),
        SavingsWarning::StructuralDeficit => Some(
            "Warning: fixed costs exceed income, savings are drawn down every month".to_string(),
        ),
    }
}

// ============================================================================
// Allocation
// ============================================================================

/// Recommended monthly plan alongside the current class weights.
pub fn render_plan(goal: f64, plan: &AllocationPlan, weights: &[ClassWeight]) -> String {
    let mut lines = vec![format!("Monthly plan for {}", format_currency(goal))];

    let header = format!(
        "{:<12} {:>12} {:>8} {:>8} {:>12} {:>12}",
        "Class", "Amount", "Target", "Now", "Value", "Reason"
    );
    lines.push(String::new());
    lines.push(header.clone());
    lines.push(rule(header.len()));
    for line in &plan.classes {
        let now = weights
            .iter()
            .find(|w| w.class == line.class)
            .map_or(0.0, |w| w.current_percent);
        lines.push(format!(
            "{:<12} {:>12} {:>8} {:>8} {:>12} {:>12}",
            line.class.to_string(),
            format_currency(line.amount),
            format_percentage(line.target_percent),
            format_percentage(now),
            format_currency_short(line.current_value),
            line.reason.to_string(),
        ));
    }

    if !plan.holdings.is_empty() {
        lines.push(String::new());
        lines.push("By holding:".to_string());
        for holding in &plan.holdings {
            lines.push(format!(
                "  {:<24} {:<8} {:>12}  ({:+.1}%)",
                holding.name,
                holding.class.to_string(),
                format_currency(holding.amount),
                holding.performance,
            ));
        }
    }

    let unplaced = goal - plan.total();
    if unplaced > 0.005 {
        lines.push(String::new());
        lines.push(format!("Left in cash: {}", format_currency(unplaced)));
    }

    let drifting: Vec<String> = weights
        .iter()
        .filter(|w| w.drift.abs() >= 0.05 && w.target_percent > 0.0)
        .map(|w| format!("{} {:+.1} pts", w.class, w.drift))
        .collect();
    if !drifting.is_empty() {
        lines.push(format!("Drift: {}", drifting.join(", ")));
    }

    lines.join("\n")
}

// ============================================================================
// Debts
// ============================================================================

pub fn render_debts(summaries: &[DebtSummary]) -> String {
    if summaries.is_empty() {
        return "No debts".to_string();
    }

    let header = format!(
        "{:<24} {:>8} {:>12} {:>10} {:>12} {:>10}",
        "Debt", "Months", "Principal", "Monthly", "Interest", "Payoff"
    );
    let mut lines = vec![header.clone(), rule(header.len())];
    for debt in summaries {
        let payoff = debt
            .payoff_month
            .map_or_else(|| "paid".to_string(), month_label);
        lines.push(format!(
            "{:<24} {:>8} {:>12} {:>10} {:>12} {:>10}",
            debt.name,
            debt.remaining_months,
            format_currency(debt.principal),
            format_currency(debt.monthly_cost),
            format_currency(debt.remaining_interest),
            payoff,
        ));
    }

    let principal: f64 = summaries.iter().map(|d| d.principal).sum();
    let interest: f64 = summaries.iter().map(|d| d.remaining_interest).sum();
    lines.push(rule(header.len()));
    lines.push(format!(
        "{:<24} {:>8} {:>12} {:>10} {:>12}",
        "Total",
        "",
        format_currency(principal),
        "",
        format_currency(interest),
    ));
    lines.join("\n")
}

/// Amortization table for one debt, month 1 being the current month.
pub fn render_schedule(debt: &DebtSummary, rows: &[AmortizationRow], now: Date) -> String {
    let mut lines = vec![format!(
        "{}: {} left over {} months",
        debt.name,
        format_currency(debt.principal),
        debt.remaining_months
    )];
    if rows.is_empty() {
        lines.push("Nothing left to pay".to_string());
        return lines.join("\n");
    }

    let header = format!(
        "{:<10} {:>10} {:>10} {:>10} {:>12}",
        "Month", "Payment", "Interest", "Principal", "Balance"
    );
    lines.push(String::new());
    lines.push(header.clone());
    lines.push(rule(header.len()));
    let first = month_start(now);
    for row in rows {
        lines.push(format!(
            "{:<10} {:>10} {:>10} {:>10} {:>12}",
            month_label(add_months(first, row.month as i32 - 1)),
            format_currency(row.payment),
            format_currency(row.interest),
            format_currency(row.principal),
            format_currency(row.balance),
        ));
    }
    lines.join("\n")
}

// ============================================================================
// Events
// ============================================================================

/// Event list followed by the months in which events move money.
pub fn render_events(events: &[CashEvent], series: &[f64], now: Date) -> String {
    if events.is_empty() {
        return "No events".to_string();
    }

    let mut lines = Vec::with_capacity(events.len() + series.len() + 4);
    for event in events {
        let when = event
            .date
            .map_or_else(|| "no date".to_string(), |d| d.to_string());
        let until = event
            .end_date
            .map(|d| format!(" until {d}"))
            .unwrap_or_default();
        lines.push(format!(
            "  {:<24} {:>12}  {} from {when}{until}",
            event.name,
            format_currency(event.amount),
            event.recurrence,
        ));
    }

    lines.push(String::new());
    let first = month_start(now);
    let mut any = false;
    for (month, impact) in series.iter().enumerate().filter(|(_, v)| **v != 0.0) {
        any = true;
        lines.push(format!(
            "  {:<10} {:>12}",
            month_label(add_months(first, month as i32)),
            format_currency(*impact)
        ));
    }
    if !any {
        lines.push("  No event falls within the horizon".to_string());
    }

    let total: f64 = series.iter().skip(1).sum();
    lines.push(format!("  Total over the horizon: {}", format_currency(total)));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use wealthcast_core::config::{DebtBuilder, EventBuilder, ProjectionBuilder};
    use wealthcast_core::model::AssetClass;
    use wealthcast_core::{
        AssetBuilder, current_allocation, impact_series, recommended_plan, simulate,
        summarize_debts,
    };

    const NOW: Date = date(2026, 10, 19);

    #[test]
    fn test_projection_rows_follow_step() {
        let config = ProjectionBuilder::new()
            .horizon_months(25)
            .income("Salary", 2_000.0)
            .build()
            .unwrap();
        let text = render_projection("Test", &simulate(&config, NOW), 12);

        assert!(text.starts_with("Test (25 months)"));
        assert!(text.contains("Oct 2026"));
        assert!(text.contains("Oct 2027"));
        assert!(text.contains("Oct 2028"));
        // Final month is always shown
        assert!(text.contains("Nov 2028"));
        assert!(!text.contains("Nov 2026"));
        assert!(!text.contains("Warning"));
    }

    #[test]
    fn test_projection_shows_warning() {
        let config = ProjectionBuilder::new()
            .horizon_months(2)
            .income("Salary", 1_000.0)
            .expense("Rent", 1_200.0)
            .build()
            .unwrap();
        let text = render_projection("Deficit", &simulate(&config, NOW), 1);
        assert!(text.contains("fixed costs exceed income"));
    }

    #[test]
    fn test_plan_lists_classes_and_holdings() {
        let config = ProjectionBuilder::new()
            .asset(AssetBuilder::stock("Laggard").quantity(10.0).price(90.0).cost(100.0))
            .asset(AssetBuilder::cash("Savings").value(3_000.0))
            .target(AssetClass::Stock, 80.0)
            .target(AssetClass::Cash, 20.0)
            .investment_goal(500.0)
            .strategy(wealthcast_core::model::Strategy::Active)
            .build()
            .unwrap();
        let plan = recommended_plan(&config);
        let weights = current_allocation(&config.assets, &config.targets);
        let text = render_plan(config.investment_goal, &plan, &weights);

        assert!(text.starts_with("Monthly plan for 500.00"));
        assert!(text.contains("underweight"));
        assert!(text.contains("overweight"));
        assert!(text.contains("Laggard"));
        assert!(!text.contains("Left in cash"));
    }

    #[test]
    fn test_debts_table_and_schedule() {
        let config = ProjectionBuilder::new()
            .debt(DebtBuilder::new("Loan").payment(1_000.0).ends(2027, 8, 19))
            .build()
            .unwrap();
        let summaries = summarize_debts(&config.debts, NOW);
        let text = render_debts(&summaries);
        assert!(text.contains("10,000.00"));
        assert!(text.contains("Jul 2027"));

        let rows = summaries[0].schedule(&config.debts[0]);
        let table = render_schedule(&summaries[0], &rows, NOW);
        assert!(table.contains("Oct 2026"));
        assert!(table.contains("Jul 2027"));
        assert_eq!(table.lines().count(), 4 + rows.len());

        assert_eq!(render_debts(&[]), "No debts");
    }

    #[test]
    fn test_events_series() {
        let config = ProjectionBuilder::new()
            .event(EventBuilder::expense("Gym").amount(50.0).on(2026, 11, 1).monthly())
            .build()
            .unwrap();
        let series = impact_series(&config.events, 3, NOW);
        let text = render_events(&config.events, &series, NOW);
        assert!(text.contains("Gym"));
        assert!(text.contains("monthly"));
        assert!(text.contains("Jan 2027"));
        assert!(text.contains("Total over the horizon: -150.00"));
    }
}
