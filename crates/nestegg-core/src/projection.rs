//! Native preview of the projection recurrence
//!
//! Evaluates the same per-year recurrence the Projection sheet encodes, so a
//! plan can be inspected from the command line and the recurrence can be
//! checked in tests. Nothing computed here is written into the workbook.

use crate::{Plan, PlanError, NOT_DEPLETED};
use serde::Serialize;

/// One projected year
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProjectionRow {
    pub year: i32,
    pub age: u32,
    pub working: bool,
    pub salary: f64,
    pub bonus: f64,
    pub total_income: f64,
    pub contributions: f64,
    /// Cumulative inflation factor since the start year (1.0 in the first row)
    pub price_index: f64,
    /// Nominal withdrawal; zero while working
    pub withdrawal: f64,
    pub return_rate: f64,
    pub start_balance: f64,
    pub end_balance: f64,
    /// End balance in start-year dollars
    pub real_end_balance: f64,
    pub depleted: bool,
}

/// Derived answers shown on the Summary sheet
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub retirement_age: u32,
    /// `None` where the sheet would show a lookup error
    pub balance_at_retirement: Option<f64>,
    /// First depleted year; `None` means "Not depleted"
    pub depletion_year: Option<i32>,
    /// May be negative when the portfolio runs dry before retirement
    pub sustainable_years: i64,
    pub balance_at_life_expectancy: Option<f64>,
}

impl SummaryMetrics {
    /// Depletion year as the Summary sheet displays it
    pub fn depletion_label(&self) -> String {
        self.depletion_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| NOT_DEPLETED.to_string())
    }
}

/// A full projection over the plan's horizon
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Projection {
    pub rows: Vec<ProjectionRow>,
    pub summary: SummaryMetrics,
}

impl Projection {
    /// Run the recurrence for every year of the plan's horizon
    pub fn simulate(plan: &Plan) -> Result<Self, PlanError> {
        plan.validate()?;
        let scenario = plan.selected_scenario()?;
        let a = &plan.assumptions;

        let start_year = a.resolved_start_year();
        let last_offset = plan.horizon_years - 1;
        a.current_age.checked_add(last_offset).ok_or_else(|| {
            PlanError::Invalid(format!(
                "current age {} plus {} years overflows",
                a.current_age, plan.horizon_years
            ))
        })?;
        i32::try_from(last_offset)
            .ok()
            .and_then(|offset| start_year.checked_add(offset))
            .ok_or_else(|| {
                PlanError::Invalid(format!(
                    "start year {start_year} plus {} years overflows",
                    plan.horizon_years
                ))
            })?;
        let contribution_total = a.contribution_total();
        let mut rows: Vec<ProjectionRow> = Vec::with_capacity(plan.horizon_years as usize);

        for offset in 0..plan.horizon_years {
            let age = a.current_age + offset;
            let working = age < a.retirement_age;

            let salary = if working {
                a.base_salary * (1.0 + a.salary_growth).powi(offset as i32)
            } else {
                0.0
            };
            let bonus = if working { a.bonus } else { 0.0 };
            let contributions = if working { contribution_total } else { 0.0 };

            let (price_index, start_balance) = match rows.last() {
                None => (1.0, a.starting_total()),
                Some(prev) => (prev.price_index * (1.0 + scenario.inflation), prev.end_balance),
            };

            let withdrawal = if working {
                0.0
            } else if a.index_withdrawals {
                a.base_withdrawal * price_index
            } else {
                a.base_withdrawal
            };

            let return_rate = scenario.nominal_return;
            let end_balance = (start_balance + contributions - withdrawal
                + start_balance * return_rate)
                .max(0.0);
            let real_end_balance = if price_index == 0.0 {
                0.0
            } else {
                end_balance / price_index
            };

            rows.push(ProjectionRow {
                year: start_year + offset as i32,
                age,
                working,
                salary,
                bonus,
                total_income: salary + bonus,
                contributions,
                price_index,
                withdrawal,
                return_rate,
                start_balance,
                end_balance,
                real_end_balance,
                depleted: end_balance <= 0.0,
            });
        }

        let summary = summarize(&rows, plan);
        Ok(Self { rows, summary })
    }

    /// First row with exactly this age, mirroring an exact MATCH
    pub fn row_at_age(&self, age: u32) -> Option<&ProjectionRow> {
        find_age(&self.rows, age)
    }

    /// First row flagged as depleted
    pub fn first_depleted(&self) -> Option<&ProjectionRow> {
        self.rows.iter().find(|r| r.depleted)
    }
}

fn find_age(rows: &[ProjectionRow], age: u32) -> Option<&ProjectionRow> {
    rows.iter().find(|r| r.age == age)
}

fn summarize(rows: &[ProjectionRow], plan: &Plan) -> SummaryMetrics {
    let a = &plan.assumptions;
    let depleted = rows.iter().find(|r| r.depleted);
    let sustainable_years = match depleted {
        Some(row) => i64::from(row.age) - i64::from(a.retirement_age),
        None => i64::from(a.life_expectancy) - i64::from(a.retirement_age) + 1,
    };

    SummaryMetrics {
        retirement_age: a.retirement_age,
        balance_at_retirement: find_age(rows, a.retirement_age).map(|r| r.end_balance),
        depletion_year: depleted.map(|r| r.year),
        sustainable_years,
        balance_at_life_expectancy: find_age(rows, a.life_expectancy).map(|r| r.end_balance),
    }
}
