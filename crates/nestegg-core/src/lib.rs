//! # nestegg-core
//!
//! Core domain model and traits for the nestegg retirement workbook generator.
//!
//! This crate provides:
//! - Domain types: `Scenario`, `LineItem`, `Assumptions`, `Plan`
//! - A build-time name table (`NameTable`) for spreadsheet named ranges
//! - Formula builders for the projection recurrence and summary lookups
//! - A native projection preview that mirrors the workbook formulas
//! - The `Renderer` trait and error types
//!
//! ## Example
//!
//! ```rust
//! use nestegg_core::{Plan, Projection};
//!
//! let plan = Plan::default().with_start_year(2025).with_scenario("Moderate");
//! let projection = Projection::simulate(&plan).unwrap();
//! assert_eq!(projection.rows.len(), 75);
//! assert!(projection.rows[0].working);
//! ```

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

pub mod config;
pub mod formula;
pub mod names;
pub mod projection;

pub use names::{col_to_letter, CellRef, NameTable, NamedRange};
pub use projection::{Projection, ProjectionRow, SummaryMetrics};

// ============================================================================
// Constants
// ============================================================================

/// Number of projected years when a plan does not say otherwise
pub const DEFAULT_HORIZON_YEARS: u32 = 75;

/// Largest horizon that fits below the Projection header row (1,048,576 sheet rows)
pub const MAX_HORIZON_YEARS: u32 = 1_048_575;

/// Sentinel shown by the summary when the portfolio never runs out
pub const NOT_DEPLETED: &str = "Not depleted";

/// Current calendar year from the local clock.
///
/// This is the only clock read in the workspace. Plans that pin
/// `start_year` never call it, which keeps generation reproducible.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

// ============================================================================
// Scenarios
// ============================================================================

/// A named market assumption: nominal investment return and inflation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Lookup key for the scenario selector; must be unique within a plan
    pub name: String,
    /// Nominal annual return as a fraction (0.06 = 6%)
    pub nominal_return: f64,
    /// Annual inflation as a fraction
    pub inflation: f64,
}

impl Scenario {
    pub fn new(name: impl Into<String>, nominal_return: f64, inflation: f64) -> Self {
        Self {
            name: name.into(),
            nominal_return,
            inflation,
        }
    }
}

/// The predefined scenario rows. The last one is meant to be edited.
pub fn default_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new("Conservative", 0.04, 0.02),
        Scenario::new("Moderate", 0.06, 0.025),
        Scenario::new("Aggressive", 0.08, 0.03),
        Scenario::new("Custom (edit)", 0.055, 0.023),
    ]
}

// ============================================================================
// Assumptions
// ============================================================================

/// One labeled amount inside a grouped input (a balance or a contribution)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LineItem {
    pub label: String,
    pub amount: f64,
}

impl LineItem {
    pub fn new(label: impl Into<String>, amount: f64) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// User-editable inputs written to the Assumptions sheet
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Assumptions {
    /// First projected year; `None` uses the current calendar year
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_year: Option<i32>,
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    pub base_salary: f64,
    pub bonus: f64,
    /// Annual salary growth as a fraction
    pub salary_growth: f64,
    /// Name of the scenario preselected in the workbook
    pub selected_scenario: String,
    /// Annual withdrawal in start-year dollars
    pub base_withdrawal: f64,
    /// Whether withdrawals grow with the price index
    pub index_withdrawals: bool,
    /// Starting portfolio balances, summed into `StartBalance`
    pub balances: Vec<LineItem>,
    /// Annual contributions while working, summed into `ContrAnnual`
    pub contributions: Vec<LineItem>,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            start_year: None,
            current_age: 30,
            retirement_age: 60,
            life_expectancy: 90,
            base_salary: 150_000.0,
            bonus: 15_000.0,
            salary_growth: 0.03,
            selected_scenario: "Moderate".into(),
            base_withdrawal: 60_000.0,
            index_withdrawals: true,
            balances: vec![
                LineItem::new("Taxable", 50_000.0),
                LineItem::new("401(k) / Traditional", 150_000.0),
                LineItem::new("Roth (IRA/401k)", 30_000.0),
                LineItem::new("HSA", 10_000.0),
                LineItem::new("Cash (treated as invested)", 20_000.0),
            ],
            contributions: vec![
                LineItem::new("Taxable contribution", 12_000.0),
                LineItem::new("401(k) employee", 23_000.0),
                LineItem::new("401(k) employer", 10_000.0),
                LineItem::new("Roth contribution", 6_500.0),
                LineItem::new("HSA employee", 4_000.0),
                LineItem::new("HSA employer", 1_000.0),
            ],
        }
    }
}

impl Assumptions {
    /// Start year, falling back to the clock
    pub fn resolved_start_year(&self) -> i32 {
        self.start_year.unwrap_or_else(current_year)
    }

    /// Sum of all starting balances
    pub fn starting_total(&self) -> f64 {
        self.balances.iter().map(|b| b.amount).sum()
    }

    /// Sum of all annual contributions
    pub fn contribution_total(&self) -> f64 {
        self.contributions.iter().map(|c| c.amount).sum()
    }

    /// Literal written to the indexing flag cell
    pub fn index_flag(&self) -> &'static str {
        if self.index_withdrawals {
            "Yes"
        } else {
            "No"
        }
    }
}

// ============================================================================
// Plan
// ============================================================================

/// Everything needed to generate one workbook
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Plan {
    /// Number of projected years (rows in the Projection sheet)
    pub horizon_years: u32,
    pub assumptions: Assumptions,
    pub scenarios: Vec<Scenario>,
}

impl Default for Plan {
    fn default() -> Self {
        Self {
            horizon_years: DEFAULT_HORIZON_YEARS,
            assumptions: Assumptions::default(),
            scenarios: default_scenarios(),
        }
    }
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the projection horizon
    pub fn with_horizon(mut self, years: u32) -> Self {
        self.horizon_years = years;
        self
    }

    /// Preselect a scenario by name
    pub fn with_scenario(mut self, name: impl Into<String>) -> Self {
        self.assumptions.selected_scenario = name.into();
        self
    }

    /// Pin the first projected year
    pub fn with_start_year(mut self, year: i32) -> Self {
        self.assumptions.start_year = Some(year);
        self
    }

    /// Replace the assumptions
    pub fn with_assumptions(mut self, assumptions: Assumptions) -> Self {
        self.assumptions = assumptions;
        self
    }

    /// Look up the preselected scenario (first match, like the sheet's MATCH)
    pub fn selected_scenario(&self) -> Result<&Scenario, PlanError> {
        let wanted = &self.assumptions.selected_scenario;
        self.scenarios
            .iter()
            .find(|s| &s.name == wanted)
            .ok_or_else(|| PlanError::UnknownScenario(wanted.clone()))
    }

    /// Check structural consistency.
    ///
    /// Age relationships are deliberately left alone: inconsistent ages
    /// produce odd numbers in the workbook, not a failed generation.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.horizon_years == 0 {
            return Err(PlanError::Invalid("horizon must be at least one year".into()));
        }
        if self.horizon_years > MAX_HORIZON_YEARS {
            return Err(PlanError::Invalid(format!(
                "horizon of {} years exceeds the sheet limit of {MAX_HORIZON_YEARS}",
                self.horizon_years
            )));
        }
        if self.scenarios.is_empty() {
            return Err(PlanError::Invalid("at least one scenario is required".into()));
        }
        let mut seen = HashSet::new();
        for scenario in &self.scenarios {
            if !seen.insert(scenario.name.as_str()) {
                return Err(PlanError::DuplicateScenario(scenario.name.clone()));
            }
        }
        if self.assumptions.balances.is_empty() {
            return Err(PlanError::Invalid("at least one starting balance is required".into()));
        }
        if self.assumptions.contributions.is_empty() {
            return Err(PlanError::Invalid("at least one contribution is required".into()));
        }
        self.selected_scenario()?;
        Ok(())
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render a plan to the output format
    fn render(&self, plan: &Plan) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Plan construction and configuration errors
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Invalid plan: {0}")]
    Invalid(String),

    #[error("Duplicate scenario name: {0}")]
    DuplicateScenario(String),

    #[error("Selected scenario not found: {0}")]
    UnknownScenario(String),

    #[error("Name used before definition: {0}")]
    UndefinedName(String),

    #[error("Name defined twice: {0}")]
    DuplicateName(String),

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<PlanError> for RenderError {
    fn from(err: PlanError) -> Self {
        Self::InvalidData(err.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_totals_match_reference_inputs() {
        let assumptions = Assumptions::default();
        assert_eq!(assumptions.starting_total(), 260_000.0);
        assert_eq!(assumptions.contribution_total(), 56_500.0);
        assert_eq!(assumptions.index_flag(), "Yes");
    }

    #[test]
    fn default_plan_is_valid() {
        let plan = Plan::default();
        assert!(plan.validate().is_ok());
        assert_eq!(plan.horizon_years, DEFAULT_HORIZON_YEARS);
        assert_eq!(plan.scenarios.len(), 4);
    }

    #[test]
    fn selected_scenario_resolves_moderate() {
        let plan = Plan::default();
        let scenario = plan.selected_scenario().unwrap();
        assert_eq!(scenario.name, "Moderate");
        assert_eq!(scenario.nominal_return, 0.06);
        assert_eq!(scenario.inflation, 0.025);
    }

    #[test]
    fn unknown_scenario_is_rejected() {
        let plan = Plan::default().with_scenario("Reckless");
        assert!(matches!(plan.validate(), Err(PlanError::UnknownScenario(name)) if name == "Reckless"));
    }

    #[test]
    fn duplicate_scenario_is_rejected() {
        let mut plan = Plan::default();
        plan.scenarios.push(Scenario::new("Moderate", 0.07, 0.02));
        assert!(matches!(plan.validate(), Err(PlanError::DuplicateScenario(_))));
    }

    #[test]
    fn zero_horizon_is_rejected() {
        let plan = Plan::default().with_horizon(0);
        assert!(matches!(plan.validate(), Err(PlanError::Invalid(_))));
    }

    #[test]
    fn horizon_beyond_sheet_rows_is_rejected() {
        assert!(Plan::default().with_horizon(MAX_HORIZON_YEARS).validate().is_ok());
        let plan = Plan::default().with_horizon(MAX_HORIZON_YEARS + 1);
        assert!(matches!(plan.validate(), Err(PlanError::Invalid(msg)) if msg.contains("sheet limit")));
        let plan = Plan::default().with_horizon(4_000_000_000);
        assert!(plan.validate().is_err());
    }

    #[test]
    fn empty_balance_group_is_rejected() {
        let mut plan = Plan::default();
        plan.assumptions.balances.clear();
        assert!(plan.validate().is_err());
    }

    #[test]
    fn inconsistent_ages_are_not_validated() {
        let mut plan = Plan::default();
        plan.assumptions.retirement_age = 20;
        plan.assumptions.life_expectancy = 10;
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn pinned_start_year_skips_clock() {
        let plan = Plan::default().with_start_year(2031);
        assert_eq!(plan.assumptions.resolved_start_year(), 2031);
    }

    #[test]
    fn plan_error_converts_to_invalid_data() {
        let err: RenderError = PlanError::UnknownScenario("X".into()).into();
        assert!(matches!(err, RenderError::InvalidData(msg) if msg.contains("X")));
    }
}
