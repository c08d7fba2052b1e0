use super::gap::gap_split;
use super::{AllocationPlan, AllocationPolicy, AllocationRequest, HoldingAllocation};
use crate::model::{Asset, AssetClass, Strategy};

/// Holdings receiving less than this are dropped from the breakdown.
const MIN_HOLDING_AMOUNT: f64 = 1.0;

/// `smart` at the class level, then conviction weighting inside each class.
///
/// Inside a funded class, each holding's weight is
/// `valueShare × (bestPerformance − performance)`: lagging holdings are topped
/// up, scaled by how much of the class they already are. The gap from the
/// leader is linear, which keeps deeply negative positions from soaking up
/// the whole amount. When every weight is zero (a single holding, or all tied
/// with the leader) the class amount is split evenly.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvictionWeighted;

impl AllocationPolicy for ConvictionWeighted {
    fn strategy(&self) -> Strategy {
        Strategy::Active
    }

    fn allocate(&self, request: &AllocationRequest<'_>) -> AllocationPlan {
        let classes = gap_split(request);
        let holdings = classes
            .iter()
            .filter(|line| line.amount > 0.0)
            .flat_map(|line| split_across_holdings(line.class, line.amount, request.holdings))
            .collect();

        AllocationPlan { classes, holdings }
    }
}

fn split_across_holdings(
    class: AssetClass,
    amount: f64,
    holdings: &[Asset],
) -> Vec<HoldingAllocation> {
    let members: Vec<&Asset> = holdings.iter().filter(|a| a.class == class).collect();
    if members.is_empty() {
        return Vec::new();
    }

    let class_total: f64 = members.iter().map(|a| a.current_value().max(0.0)).sum();
    let performance: Vec<f64> = members.iter().map(|a| a.performance()).collect();
    let best = performance.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let weights: Vec<f64> = members
        .iter()
        .zip(&performance)
        .map(|(asset, &perf)| {
            let share = if class_total > 0.0 {
                asset.current_value().max(0.0) / class_total
            } else {
                0.0
            };
            share * (best - perf)
        })
        .collect();
    let weight_total: f64 = weights.iter().sum();
    let even = amount / members.len() as f64;

    let mut lines: Vec<HoldingAllocation> = members
        .iter()
        .zip(&performance)
        .zip(&weights)
        .map(|((asset, &perf), &weight)| HoldingAllocation {
            asset_id: asset.id.clone(),
            name: asset.name.clone(),
            class,
            amount: if weight_total > 0.0 {
                amount * weight / weight_total
            } else {
                even
            },
            performance: perf,
        })
        .filter(|line| line.amount >= MIN_HOLDING_AMOUNT)
        .collect();

    lines.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    lines
}
