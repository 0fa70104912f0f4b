use super::hydrology::RECHARGE_PIT;
use super::round_to;
use crate::remote::{ArAnalysis, CostBenefitAnalysis, RwhAnalysis};

const TANK_COST_PER_LITER_INR: f64 = 8.0;
const PIT_COST_INR: f64 = 25_000.0;
const TRENCH_COST_INR: f64 = 40_000.0;
const MAINTENANCE_SHARE: f64 = 0.02;
const MUNICIPAL_COST_PER_KL_INR: f64 = 30.0;

/// Simplified life-cycle costing of the storage tank plus any recharge structure.
pub fn cost_benefit(rwh: &RwhAnalysis, ar: &ArAnalysis) -> CostBenefitAnalysis {
    let mut investment = rwh.recommended_tank_size_liters as f64 * TANK_COST_PER_LITER_INR;
    if ar.is_feasible {
        investment += match ar.recommended_structure_type.as_deref() {
            Some(RECHARGE_PIT) => PIT_COST_INR,
            _ => TRENCH_COST_INR,
        };
    }

    let savings_liters = rwh.potential_annual_runoff_liters;
    let monetary_savings = savings_liters / 1000.0 * MUNICIPAL_COST_PER_KL_INR;
    let payback_period_years =
        (monetary_savings > 0.0).then(|| round_to(investment / monetary_savings, 1));

    CostBenefitAnalysis {
        estimated_initial_investment: round_to(investment, 2),
        annual_operating_maintenance_cost: round_to(investment * MAINTENANCE_SHARE, 2),
        annual_water_savings_liters: savings_liters,
        annual_monetary_savings: round_to(monetary_savings, 2),
        payback_period_years,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::hydrology::recharge_analysis;
    use crate::analysis::Permeability;

    fn rwh(runoff: f64, tank: u64) -> RwhAnalysis {
        RwhAnalysis {
            potential_annual_runoff_liters: runoff,
            recommended_tank_size_liters: tank,
            notes: String::new(),
        }
    }

    #[test]
    fn pit_adds_fixed_cost_to_tank() {
        let ar = recharge_analysis(20.0, Permeability::Moderate, 23.72);
        let cba = cost_benefit(&rwh(57_120.0, 3_000), &ar);

        assert_eq!(cba.estimated_initial_investment, 49_000.0);
        assert_eq!(cba.annual_operating_maintenance_cost, 980.0);
        assert!((cba.annual_monetary_savings - 1_713.6).abs() < 1e-9);
        assert_eq!(cba.payback_period_years, Some(28.6));
    }

    #[test]
    fn trench_costs_more_and_infeasible_sites_pay_only_for_tank() {
        let trench = recharge_analysis(30.0, Permeability::High, 15.0);
        assert_eq!(
            cost_benefit(&rwh(10_000.0, 500), &trench).estimated_initial_investment,
            44_000.0
        );

        let none = recharge_analysis(5.0, Permeability::High, 15.0);
        assert_eq!(
            cost_benefit(&rwh(10_000.0, 500), &none).estimated_initial_investment,
            4_000.0
        );
    }

    #[test]
    fn zero_savings_has_no_payback() {
        let ar = recharge_analysis(0.0, Permeability::High, 15.0);
        assert_eq!(cost_benefit(&rwh(0.0, 0), &ar).payback_period_years, None);
    }
}
