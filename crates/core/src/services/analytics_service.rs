use crate::models::goal::{self, Goal};
use crate::models::investment::{self, Investment};

/// Totals shown above the investments table.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InvestmentTotals {
    pub total_invested: f64,
    pub total_current: f64,
    /// `total_current - total_invested`
    pub total_gain: f64,
    /// Overall return on the invested sum; 0 when nothing is invested.
    pub overall_returns_pct: f64,
}

/// Totals shown above the goals list.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GoalTotals {
    pub total_target: f64,
    pub total_current: f64,
    /// Saved share of all targets combined. Not clamped: saving past the
    /// targets shows above 100.
    pub savings_pct: f64,
}

/// Client-side aggregation over lists the backend returned in full.
///
/// Pure arithmetic, no I/O.
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn investment_totals(&self, investments: &[Investment]) -> InvestmentTotals {
        let total_invested: f64 = investments.iter().map(|i| i.invested).sum();
        let total_current: f64 = investments.iter().map(|i| i.current_value).sum();
        InvestmentTotals {
            total_invested,
            total_current,
            total_gain: total_current - total_invested,
            overall_returns_pct: if total_invested > 0.0 {
                investment::returns_pct(total_invested, total_current)
            } else {
                0.0
            },
        }
    }

    #[must_use]
    pub fn goal_totals(&self, goals: &[Goal]) -> GoalTotals {
        let total_target: f64 = goals.iter().map(|g| g.target_amount).sum();
        let total_current: f64 = goals.iter().map(|g| g.current_amount).sum();
        GoalTotals {
            total_target,
            total_current,
            savings_pct: if total_target > 0.0 {
                total_current / total_target * 100.0
            } else {
                0.0
            },
        }
    }

    /// Monthly savings against the configured target. 0 unless savings are positive.
    #[must_use]
    pub fn savings_goal_pct(&self, monthly_savings: f64, target: f64) -> f64 {
        if monthly_savings > 0.0 && target > 0.0 {
            monthly_savings / target * 100.0
        } else {
            0.0
        }
    }

    /// Progress of one goal, clamped for display.
    #[must_use]
    pub fn goal_progress_pct(&self, goal: &Goal) -> f64 {
        goal::progress_pct(goal.current_amount, goal.target_amount)
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
