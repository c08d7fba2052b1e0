use super::{AllocationPlan, AllocationPolicy, AllocationReason, AllocationRequest, ClassAllocation};
use crate::model::lenient::finite_or_zero;
use crate::model::{AssetClass, Strategy};

/// Gap-proportional rebalancing through new money only.
///
/// Each class's target value is its share of `currentTotal + amount`. Classes
/// below target split the amount in proportion to their gap; classes at or
/// above target get nothing. Nothing is ever sold.
#[derive(Debug, Clone, Copy, Default)]
pub struct GapRebalance;

impl AllocationPolicy for GapRebalance {
    fn strategy(&self) -> Strategy {
        Strategy::Smart
    }

    fn allocate(&self, request: &AllocationRequest<'_>) -> AllocationPlan {
        AllocationPlan {
            classes: gap_split(request),
            holdings: Vec::new(),
        }
    }
}

/// Class lines for the gap-proportional split; shared with the `active` policy.
pub(super) fn gap_split(request: &AllocationRequest<'_>) -> Vec<ClassAllocation> {
    let amount = request.investable();
    let current = |class: AssetClass| finite_or_zero(request.current.get(class));
    let current_total: f64 = AssetClass::INVESTABLE.iter().map(|&c| current(c)).sum();
    let projected_total = current_total + amount;

    let lines: Vec<(AssetClass, f64, f64, f64)> = AssetClass::INVESTABLE
        .iter()
        .map(|&class| {
            let share = request.target_share(class);
            let target_value = projected_total * share;
            (class, share, target_value, target_value - current(class))
        })
        .collect();

    let positive_gaps: f64 = lines.iter().map(|&(_, _, _, gap)| gap.max(0.0)).sum();

    lines
        .into_iter()
        .map(|(class, share, target_value, gap)| {
            let underweight = gap > 0.0;
            let amount = if underweight && positive_gaps > 0.0 {
                amount * gap / positive_gaps
            } else {
                0.0
            };
            ClassAllocation {
                class,
                amount,
                target_percent: share * 100.0,
                current_value: current(class),
                target_value: Some(target_value),
                gap: Some(gap),
                reason: if underweight {
                    AllocationReason::Underweight
                } else {
                    AllocationReason::Overweight
                },
            }
        })
        .collect()
}
