use chrono::{TimeZone, Utc};
use money_tracker_core::models::dashboard::{DashboardSummary, Trend};
use money_tracker_core::models::financials::{FinancialField, FinancialsUpdate, UserFinancials};
use money_tracker_core::models::goal::{Goal, GoalStatus};
use money_tracker_core::models::id::RecordId;
use money_tracker_core::models::investment::{
    GoalLink, Investment, ReturnBand, INVESTMENT_TYPES,
};
use money_tracker_core::models::session::{MeResponse, SessionState};
use serde_json::json;

// ═══════════════════════════════════════════════════════════════════
//  RecordId
// ═══════════════════════════════════════════════════════════════════

mod record_id {
    use super::*;

    #[test]
    fn numeric_and_text_ids() {
        let n: RecordId = serde_json::from_value(json!(42)).unwrap();
        let s: RecordId = serde_json::from_value(json!("65f1c0")).unwrap();
        assert_eq!(n, RecordId::Number(42));
        assert_eq!(s, RecordId::Text("65f1c0".into()));
    }

    #[test]
    fn serialises_unchanged() {
        assert_eq!(serde_json::to_value(RecordId::from(42)).unwrap(), json!(42));
        assert_eq!(serde_json::to_value(RecordId::from("a-1")).unwrap(), json!("a-1"));
    }

    #[test]
    fn display_is_path_segment() {
        assert_eq!(RecordId::from(42).to_string(), "42");
        assert_eq!(RecordId::from("a-1").to_string(), "a-1");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Investment
// ═══════════════════════════════════════════════════════════════════

mod investment {
    use super::*;

    fn with_values(invested: f64, current_value: f64) -> Investment {
        serde_json::from_value(json!({
            "id": 1,
            "name": "Test",
            "type": "Stocks",
            "invested": invested,
            "current_value": current_value
        }))
        .unwrap()
    }

    #[test]
    fn type_field_maps_to_kind() {
        let inv = with_values(1.0, 1.0);
        assert_eq!(inv.kind, "Stocks");
        let back = serde_json::to_value(&inv).unwrap();
        assert_eq!(back["type"], "Stocks");
    }

    #[test]
    fn null_amounts_read_as_zero() {
        let inv: Investment = serde_json::from_value(json!({
            "id": 3, "name": "FD", "type": "Fixed Deposit",
            "invested": null
        }))
        .unwrap();
        assert_eq!(inv.invested, 0.0);
        assert_eq!(inv.current_value, 0.0);
        assert_eq!(inv.returns_pct(), 0.0);
    }

    #[test]
    fn purchase_date_formats() {
        let plain: Investment = serde_json::from_value(json!({
            "id": 1, "purchase_date": "2024-01-15"
        }))
        .unwrap();
        let full: Investment = serde_json::from_value(json!({
            "id": 1, "purchase_date": "2024-01-15T00:00:00+05:30"
        }))
        .unwrap();
        let junk: Investment = serde_json::from_value(json!({
            "id": 1, "purchase_date": ""
        }))
        .unwrap();

        assert_eq!(
            plain.purchase_date,
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(
            full.purchase_date,
            Some(Utc.with_ymd_and_hms(2024, 1, 14, 18, 30, 0).unwrap())
        );
        assert_eq!(junk.purchase_date, None);
    }

    #[test]
    fn returns_and_gain() {
        let inv = with_values(50_000.0, 56_000.0);
        assert!((inv.returns_pct() - 12.0).abs() < 1e-9);
        assert_eq!(inv.gain(), 6_000.0);
        assert_eq!(inv.return_band(), ReturnBand::High);
    }

    #[test]
    fn return_bands() {
        assert_eq!(with_values(100.0, 105.0).return_band(), ReturnBand::Medium);
        assert_eq!(with_values(100.0, 100.0).return_band(), ReturnBand::Medium);
        assert_eq!(with_values(100.0, 90.0).return_band(), ReturnBand::Low);
        assert_eq!(with_values(0.0, 90.0).return_band(), ReturnBand::Medium);
    }

    #[test]
    fn goal_link_body() {
        assert_eq!(
            serde_json::to_value(GoalLink { goal_id: None }).unwrap(),
            json!({"goal_id": null})
        );
        assert_eq!(
            serde_json::to_value(GoalLink {
                goal_id: Some(RecordId::from("g1"))
            })
            .unwrap(),
            json!({"goal_id": "g1"})
        );
    }

    #[test]
    fn form_types_include_common_categories() {
        assert!(INVESTMENT_TYPES.contains(&"Mutual Fund"));
        assert!(INVESTMENT_TYPES.contains(&"PPF"));
        assert_eq!(INVESTMENT_TYPES.last(), Some(&"Other"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Goal
// ═══════════════════════════════════════════════════════════════════

mod goal {
    use super::*;

    fn goal(current: f64, target: f64) -> Goal {
        serde_json::from_value(json!({
            "id": 1,
            "name": "Car",
            "target_amount": target,
            "current_amount": current
        }))
        .unwrap()
    }

    #[test]
    fn status_wire_labels() {
        let s: GoalStatus = serde_json::from_value(json!("In Progress")).unwrap();
        assert_eq!(s, GoalStatus::InProgress);
        assert_eq!(
            serde_json::to_value(GoalStatus::Completed).unwrap(),
            json!("Completed")
        );
        assert!(serde_json::from_value::<GoalStatus>(json!("Abandoned")).is_err());
    }

    #[test]
    fn status_defaults_to_planned() {
        assert_eq!(goal(0.0, 1.0).status, GoalStatus::Planned);
    }

    #[test]
    fn null_or_unknown_status_reads_as_planned() {
        let goals: Vec<Goal> = serde_json::from_value(json!([
            {"id": 1, "name": "Car", "status": "Completed"},
            {"id": 2, "name": "House", "status": null},
            {"id": 3, "name": "Trip", "status": "Active"},
            {"id": 4, "name": "Bike", "status": 3}
        ]))
        .unwrap();
        let statuses: Vec<GoalStatus> = goals.iter().map(|g| g.status).collect();
        assert_eq!(
            statuses,
            vec![
                GoalStatus::Completed,
                GoalStatus::Planned,
                GoalStatus::Planned,
                GoalStatus::Planned
            ]
        );
    }

    #[test]
    fn status_parses_from_text() {
        assert_eq!("in progress".parse::<GoalStatus>(), Ok(GoalStatus::InProgress));
        assert!("later".parse::<GoalStatus>().is_err());
        assert_eq!(GoalStatus::InProgress.to_string(), "In Progress");
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(goal(0.0, 300_000.0).progress_pct(), 0.0);
        assert_eq!(goal(250.0, 400.0).progress_pct(), 62.5);
        assert_eq!(goal(500.0, 400.0).progress_pct(), 100.0);
        assert_eq!(goal(-10.0, 400.0).progress_pct(), 0.0);
    }

    #[test]
    fn zero_target_has_no_progress() {
        assert_eq!(goal(100.0, 0.0).progress_pct(), 0.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Financials
// ═══════════════════════════════════════════════════════════════════

mod financials {
    use super::*;

    #[test]
    fn field_accessors() {
        let mut f: UserFinancials = serde_json::from_value(json!({
            "id": 7, "monthly_income": 80000, "monthly_expenses": null
        }))
        .unwrap();
        assert_eq!(FinancialField::Income.get(&f), 80_000.0);
        assert_eq!(FinancialField::Expenses.get(&f), 0.0);

        FinancialField::Savings.set(&mut f, 14_000.0);
        assert_eq!(f.monthly_savings, 14_000.0);
    }

    #[test]
    fn update_carries_only_named_fields() {
        let one = FinancialsUpdate::single(FinancialField::Savings, 14_000.0);
        assert_eq!(
            serde_json::to_value(&one).unwrap(),
            json!({"monthly_savings": 14000.0})
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Dashboard
// ═══════════════════════════════════════════════════════════════════

mod dashboard {
    use super::*;

    #[test]
    fn missing_sections_default_to_empty() {
        let summary: DashboardSummary = serde_json::from_value(json!({
            "total_investments": 1000
        }))
        .unwrap();
        assert_eq!(summary.total_investments, 1000.0);
        assert!(summary.investments.is_empty());
        assert!(summary.goals.is_empty());
        assert!(summary.recent_expenses.is_empty());
    }

    #[test]
    fn trend_from_status() {
        let summary: DashboardSummary = serde_json::from_value(json!({
            "investments": [
                {"id": 1, "status": "Growing"},
                {"id": 2, "status": "Declining"},
                {"id": 3}
            ]
        }))
        .unwrap();
        let trends: Vec<Trend> = summary.investments.iter().map(|i| i.trend()).collect();
        assert_eq!(trends, vec![Trend::Growing, Trend::Declining, Trend::Unknown]);
    }

    #[test]
    fn malformed_rows_are_dropped() {
        let summary: DashboardSummary = serde_json::from_value(json!({
            "total_investments": 5000,
            "investments": [{"name": "No id"}, {"id": 2, "name": "Nifty"}],
            "goals": [
                {"name": "X", "status": null},
                {"id": 9, "name": "Car", "status": null}
            ],
            "recent_expenses": null
        }))
        .unwrap();

        assert_eq!(summary.total_investments, 5000.0);
        assert_eq!(summary.investments.len(), 1);
        assert_eq!(summary.investments[0].id, RecordId::from(2));
        assert_eq!(summary.goals.len(), 1);
        assert_eq!(summary.goals[0].status, GoalStatus::Planned);
        assert!(summary.recent_expenses.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Session
// ═══════════════════════════════════════════════════════════════════

mod session {
    use super::*;

    fn state(body: serde_json::Value) -> SessionState {
        serde_json::from_value::<MeResponse>(body).unwrap().into_state()
    }

    #[test]
    fn nested_identity() {
        let s = state(json!({"loggedIn": true, "user": {"email": "a@b.c", "user_id": 1}}));
        assert_eq!(s.identity().unwrap().email, "a@b.c");
    }

    #[test]
    fn flat_identity() {
        let s = state(json!({"loggedIn": true, "email": "a@b.c", "user_id": "u1"}));
        assert_eq!(s.identity().unwrap().user_id, RecordId::from("u1"));
    }

    #[test]
    fn not_logged_in_ignores_identity() {
        let s = state(json!({"loggedIn": false, "email": "a@b.c", "user_id": 1}));
        assert_eq!(s, SessionState::Anonymous);
    }

    #[test]
    fn missing_flag_is_anonymous() {
        assert_eq!(state(json!({})), SessionState::Anonymous);
    }

    #[test]
    fn default_state_is_loading() {
        assert!(SessionState::default().is_loading());
    }
}
