use super::{AllocationPlan, AllocationPolicy, AllocationReason, AllocationRequest, ClassAllocation};
use crate::model::{AssetClass, Strategy};

/// Dollar-cost averaging: `amount × target / totalTarget`, whatever the
/// current balances are.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSplit;

impl AllocationPolicy for FixedSplit {
    fn strategy(&self) -> Strategy {
        Strategy::Dca
    }

    fn allocate(&self, request: &AllocationRequest<'_>) -> AllocationPlan {
        let amount = request.investable();
        let classes = AssetClass::INVESTABLE
            .iter()
            .map(|&class| {
                let share = request.target_share(class);
                ClassAllocation {
                    class,
                    amount: amount * share,
                    target_percent: share * 100.0,
                    current_value: request.current.get(class),
                    target_value: None,
                    gap: None,
                    reason: AllocationReason::FixedSplit,
                }
            })
            .collect();

        AllocationPlan {
            classes,
            holdings: Vec::new(),
        }
    }
}
