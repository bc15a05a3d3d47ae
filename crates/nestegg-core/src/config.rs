//! Plan files
//!
//! A plan is stored as TOML. Every key is optional and falls back to the
//! built-in defaults; a `[[scenarios]]` list replaces the default scenario
//! set entirely.
//!
//! ```toml
//! horizon_years = 60
//!
//! [assumptions]
//! current_age = 35
//! selected_scenario = "Conservative"
//!
//! [[scenarios]]
//! name = "Conservative"
//! nominal_return = 0.04
//! inflation = 0.02
//! ```

use crate::{Plan, PlanError};
use std::path::Path;

impl Plan {
    /// Parse and validate a plan from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, PlanError> {
        let plan: Plan = toml::from_str(text)?;
        plan.validate()?;
        Ok(plan)
    }

    /// Render the plan as TOML
    pub fn to_toml_string(&self) -> Result<String, PlanError> {
        Ok(toml::to_string(self)?)
    }
}

/// Read a plan file from disk
pub fn load_plan(path: impl AsRef<Path>) -> Result<Plan, PlanError> {
    let text = std::fs::read_to_string(path)?;
    Plan::from_toml_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Scenario;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_is_default_plan() {
        let plan = Plan::from_toml_str("").unwrap();
        assert_eq!(plan, Plan::default());
    }

    #[test]
    fn partial_assumptions_keep_defaults() {
        let plan = Plan::from_toml_str(
            r#"
            horizon_years = 40

            [assumptions]
            current_age = 45
            start_year = 2030
            index_withdrawals = false
            "#,
        )
        .unwrap();
        assert_eq!(plan.horizon_years, 40);
        assert_eq!(plan.assumptions.current_age, 45);
        assert_eq!(plan.assumptions.start_year, Some(2030));
        assert!(!plan.assumptions.index_withdrawals);
        assert_eq!(plan.assumptions.retirement_age, 60);
        assert_eq!(plan.assumptions.balances.len(), 5);
        assert_eq!(plan.scenarios.len(), 4);
    }

    #[test]
    fn scenarios_replace_defaults() {
        let plan = Plan::from_toml_str(
            r#"
            [assumptions]
            selected_scenario = "Flat"

            [[scenarios]]
            name = "Flat"
            nominal_return = 0.0
            inflation = 0.0
            "#,
        )
        .unwrap();
        assert_eq!(plan.scenarios, vec![Scenario::new("Flat", 0.0, 0.0)]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Plan::from_toml_str("horizon = 10").unwrap_err();
        assert!(matches!(err, PlanError::Parse(_)));
    }

    #[test]
    fn invalid_plan_is_rejected_on_load() {
        let err = Plan::from_toml_str(
            r#"
            [[scenarios]]
            name = "A"
            nominal_return = 0.05
            inflation = 0.02

            [[scenarios]]
            name = "A"
            nominal_return = 0.06
            inflation = 0.02
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, PlanError::DuplicateScenario(name) if name == "A"));
    }

    #[test]
    fn default_plan_survives_toml() {
        let plan = Plan::default().with_start_year(2026);
        let text = plan.to_toml_string().unwrap();
        assert!(text.contains("horizon_years = 75"));
        assert!(text.contains("[[scenarios]]"));
        assert_eq!(Plan::from_toml_str(&text).unwrap(), plan);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_plan("/definitely/not/here/plan.toml").unwrap_err();
        assert!(matches!(err, PlanError::Io(_)));
    }
}
