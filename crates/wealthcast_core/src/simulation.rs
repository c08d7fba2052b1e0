//! Monthly projection loop
//!
//! Month 0 is a snapshot of today. Each following month runs, in order:
//! debt service, events, growth, cash flow, investment and the savings
//! warning check. The loop is a left fold over month indices threading a
//! small `Copy` state, so runs are independent and deterministic.

use jiff::civil::Date;
use tracing::{debug, trace, warn};

use crate::allocation::allocate;
use crate::amortization::{self, DebtSummary};
use crate::config::{MAX_HORIZON_MONTHS, ProjectionConfig};
use crate::date_math::{add_months, month_label, month_start};
use crate::metrics::SimulationMetrics;
use crate::model::lenient::finite_or_zero;
use crate::model::{Debt, Projection, ProjectionPoint, ProjectionStats, SavingsWarning};
use crate::recurrence;
use crate::simulation_state::BucketState;

/// A debt with its remaining term fixed at the start of the run
#[derive(Debug, Clone, Copy)]
struct ScheduledDebt {
    monthly_payment: f64,
    monthly_cost: f64,
    rate: f64,
    remaining_months: u32,
}

impl ScheduledDebt {
    fn new(debt: &Debt, now: Date) -> Self {
        Self {
            monthly_payment: finite_or_zero(debt.monthly_payment),
            monthly_cost: debt.monthly_cost(),
            rate: finite_or_zero(debt.rate),
            remaining_months: debt.remaining_months(now),
        }
    }

    fn is_paying(&self, month: usize) -> bool {
        (month as u64) < u64::from(self.remaining_months)
    }

    /// Closed-form principal with the term reduced by `month`.
    fn principal_at(&self, month: usize) -> f64 {
        let left = u64::from(self.remaining_months).saturating_sub(month as u64);
        amortization::principal(self.monthly_payment, self.rate, left as u32)
    }
}

/// Everything that stays fixed for the length of a run
struct RunContext<'a> {
    config: &'a ProjectionConfig,
    now: Date,
    first_month: Date,
    monthly_income: f64,
    monthly_expenses: f64,
    debts: Vec<ScheduledDebt>,
}

/// State carried from one month to the next
#[derive(Debug, Clone, Copy)]
struct Carry {
    buckets: BucketState,
    warning: SavingsWarning,
}

struct MonthStep {
    carry: Carry,
    point: ProjectionPoint,
    drew_savings: bool,
}

impl<'a> RunContext<'a> {
    fn new(config: &'a ProjectionConfig, now: Date) -> Self {
        Self {
            config,
            now,
            first_month: month_start(now),
            monthly_income: config.budget.monthly_income(),
            monthly_expenses: config.budget.monthly_expenses(),
            debts: config.debts.iter().map(|d| ScheduledDebt::new(d, now)).collect(),
        }
    }

    fn month_date(&self, month: usize) -> Date {
        add_months(self.first_month, month as i32)
    }

    fn debt_payments(&self, month: usize) -> f64 {
        self.debts
            .iter()
            .filter(|d| d.is_paying(month))
            .map(|d| d.monthly_cost)
            .sum()
    }

    fn principal(&self, month: usize) -> f64 {
        self.debts.iter().map(|d| d.principal_at(month)).sum()
    }

    fn point(&self, month: usize, buckets: &BucketState) -> ProjectionPoint {
        let date = self.month_date(month);
        let assets = buckets.total_value();
        let debt = self.principal(month);
        ProjectionPoint {
            month,
            date,
            month_label: month_label(date),
            assets,
            debt,
            net_worth: assets - debt,
            unrealized_gain: buckets.unrealized_gain(),
            cash_flow: 0.0,
            events_impact: 0.0,
            debt_payments: 0.0,
            invested: 0.0,
            buckets: buckets.values,
        }
    }

    fn step(&self, carry: Carry, month: usize) -> MonthStep {
        let debt_payments = self.debt_payments(month);
        let events_impact = recurrence::monthly_impact(&self.config.events, month, self.now);
        let net_cash_flow =
            self.monthly_income - (self.monthly_expenses + debt_payments) + events_impact;

        let buckets = carry
            .buckets
            .grown(&self.config.yields)
            .deposit_cash(net_cash_flow);

        let goal = finite_or_zero(self.config.investment_goal).max(0.0);
        let invest = buckets.cash().max(0.0).min(goal);
        let (buckets, invested) = if invest > 0.0 {
            let drawn = buckets.withdraw_cash(invest);
            let plan = allocate(
                invest,
                &drawn.values,
                &self.config.targets,
                self.config.strategy,
                &self.config.assets,
            );
            let allocated = plan.total();
            let next = drawn.invest(&plan.per_class()).deposit_cash(invest - allocated);
            (next, allocated)
        } else {
            (buckets, 0.0)
        };

        let drew_savings = net_cash_flow < invest;
        let warning = if drew_savings {
            let structural_surplus = self.monthly_income - self.monthly_expenses - debt_payments;
            carry.warning.merge(classify(structural_surplus, invest))
        } else {
            carry.warning
        };

        let point = ProjectionPoint {
            cash_flow: net_cash_flow,
            events_impact,
            debt_payments,
            invested,
            ..self.point(month, &buckets)
        };
        trace!(
            month,
            cash_flow = net_cash_flow,
            invested,
            net_worth = point.net_worth,
            "Projected month"
        );

        MonthStep {
            carry: Carry { buckets, warning },
            point,
            drew_savings,
        }
    }

    fn stats(&self, initial: &BucketState, last: &Carry) -> ProjectionStats {
        let summaries: Vec<DebtSummary> = self
            .config
            .debts
            .iter()
            .map(|d| DebtSummary::for_debt(d, self.now))
            .collect();
        let total_debt: f64 = summaries.iter().map(|s| s.principal).sum();
        let total_interest: f64 = summaries.iter().map(|s| s.remaining_interest).sum();
        let current_payments = self.debt_payments(0);
        let monthly_surplus = self.monthly_income - self.monthly_expenses - current_payments;
        let savings_rate = if self.monthly_income > 0.0 {
            monthly_surplus / self.monthly_income * 100.0
        } else {
            0.0
        };

        let total_assets = initial.total_value();

        ProjectionStats {
            net_worth: total_assets - total_debt,
            total_assets,
            total_debt,
            total_interest,
            monthly_surplus,
            savings_rate,
            final_buckets: last.buckets.values,
            monthly_income: self.monthly_income,
            monthly_expenses: self.monthly_expenses,
            savings_used: last.warning,
        }
    }
}

/// Why a month had to dip into savings.
fn classify(structural_surplus: f64, invest: f64) -> SavingsWarning {
    if structural_surplus < invest {
        if structural_surplus < 0.0 {
            SavingsWarning::StructuralDeficit
        } else {
            SavingsWarning::StructuralInvestment
        }
    } else {
        SavingsWarning::Event
    }
}

fn clamp_horizon(requested: usize) -> usize {
    if requested > MAX_HORIZON_MONTHS {
        warn!(
            requested,
            max = MAX_HORIZON_MONTHS,
            "Projection horizon too long, clamping"
        );
    }
    requested.min(MAX_HORIZON_MONTHS)
}

fn run(
    config: &ProjectionConfig,
    horizon: usize,
    now: Date,
    mut metrics: Option<&mut SimulationMetrics>,
) -> Projection {
    let ctx = RunContext::new(config, now);
    let initial = Carry {
        buckets: BucketState::from_assets(&config.assets),
        warning: SavingsWarning::None,
    };
    let first = ctx.point(0, &initial.buckets);

    let mut series = Vec::with_capacity(horizon + 1);
    series.push(first);

    let last = (1..=horizon).fold(initial, |carry, month| {
        let step = ctx.step(carry, month);
        if let Some(m) = metrics.as_deref_mut() {
            m.record_month(
                step.point.invested,
                step.point.events_impact,
                step.point.debt_payments,
            );
            if step.drew_savings {
                m.record_savings_draw();
            }
            m.record_warning(month, step.point.date, step.carry.warning);
        }
        series.push(step.point);
        step.carry
    });

    let stats = ctx.stats(&initial.buckets, &last);
    debug!(
        months = horizon,
        strategy = %config.strategy,
        final_net_worth = series.last().map(|p| p.net_worth).unwrap_or_default(),
        savings_used = %stats.savings_used,
        "Projection complete"
    );

    Projection { series, stats }
}

/// Project `config` forward from `now`.
///
/// Returns `horizon + 1` points; point 0 is today's snapshot.
pub fn simulate(config: &ProjectionConfig, now: Date) -> Projection {
    run(config, clamp_horizon(config.horizon_months), now, None)
}

/// Like [`simulate`], also collecting [`SimulationMetrics`].
pub fn simulate_with_metrics(
    config: &ProjectionConfig,
    now: Date,
) -> (Projection, SimulationMetrics) {
    let mut metrics = SimulationMetrics::new();
    let horizon = clamp_horizon(config.horizon_months);
    let projection = run(config, horizon, now, Some(&mut metrics));
    (projection, metrics)
}

/// Run one independent projection per horizon, in the order given.
#[cfg(feature = "parallel")]
pub fn simulate_horizons(
    config: &ProjectionConfig,
    horizons: &[usize],
    now: Date,
) -> Vec<Projection> {
    use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

    horizons
        .par_iter()
        .map(|&h| run(config, clamp_horizon(h), now, None))
        .collect()
}

/// Run one independent projection per horizon, in the order given.
#[cfg(not(feature = "parallel"))]
pub fn simulate_horizons(
    config: &ProjectionConfig,
    horizons: &[usize],
    now: Date,
) -> Vec<Projection> {
    horizons
        .iter()
        .map(|&h| run(config, clamp_horizon(h), now, None))
        .collect()
}
