//! Formula text for the generated workbook
//!
//! The generator never evaluates anything; it only writes these strings.
//! The projection recurrence for sheet row `R` reads:
//!
//! ```text
//! Year      =StartYear + ROW()-2
//! Working?  =B{R}<RetireAge
//! Price idx =1 (first row)            | =H{R-1}*(1+Inflation)
//! Start bal =StartBalance (first row) | =L{R-1}
//! End bal   =MAX(0, K{R} + G{R} - I{R} + K{R}*J{R})
//! ```
//!
//! Growth is applied to the start-of-year balance only, and the end balance
//! floors at zero.

use crate::names::{col_to_letter, name, sheet_prefix, CellRef, NameTable};
use crate::{PlanError, NOT_DEPLETED};

/// Worksheet names, in build order
pub mod sheet {
    pub const SCENARIOS: &str = "Scenarios";
    pub const ASSUMPTIONS: &str = "Assumptions";
    pub const PROJECTION: &str = "Projection";
    pub const SUMMARY: &str = "Summary";
    pub const README: &str = "README + W2 Helper";
}

/// 1-based sheet row holding the first projected year (row 1 is the header)
pub const FIRST_DATA_ROW: u32 = 2;

/// Columns of the Projection sheet, left to right
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectionColumn {
    Year,
    Age,
    Working,
    Salary,
    Bonus,
    TotalIncome,
    Contributions,
    PriceIndex,
    Withdrawal,
    ReturnRate,
    StartBalance,
    EndBalance,
    RealEndBalance,
    Depleted,
}

impl ProjectionColumn {
    pub const ALL: [Self; 14] = [
        Self::Year,
        Self::Age,
        Self::Working,
        Self::Salary,
        Self::Bonus,
        Self::TotalIncome,
        Self::Contributions,
        Self::PriceIndex,
        Self::Withdrawal,
        Self::ReturnRate,
        Self::StartBalance,
        Self::EndBalance,
        Self::RealEndBalance,
        Self::Depleted,
    ];

    /// Zero-based column index
    pub const fn index(self) -> u16 {
        self as u16
    }

    pub const fn header(self) -> &'static str {
        match self {
            Self::Year => "Year",
            Self::Age => "Age",
            Self::Working => "Working?",
            Self::Salary => "Salary",
            Self::Bonus => "Bonus",
            Self::TotalIncome => "Total Income",
            Self::Contributions => "Contributions",
            Self::PriceIndex => "Price Index",
            Self::Withdrawal => "Withdrawal (Nominal)",
            Self::ReturnRate => "Return",
            Self::StartBalance => "Start Balance",
            Self::EndBalance => "End Balance",
            Self::RealEndBalance => "End Balance (Real)",
            Self::Depleted => "Depleted?",
        }
    }

    pub fn letter(self) -> String {
        col_to_letter(self.index())
    }

    fn at(self, sheet_row: u32) -> String {
        format!("{}{}", self.letter(), sheet_row)
    }

    /// Whole-column reference on the Projection sheet, e.g. `Projection!$L:$L`
    pub fn whole_column(self) -> String {
        let letter = self.letter();
        format!("{}!${}:${}", sheet_prefix(sheet::PROJECTION), letter, letter)
    }
}

/// Builds the per-row projection formulas against a populated name table
pub struct ProjectionFormulas<'a> {
    names: &'a NameTable,
}

impl<'a> ProjectionFormulas<'a> {
    pub fn new(names: &'a NameTable) -> Self {
        Self { names }
    }

    /// All formulas of one projected year, `index` 0 being the first year
    pub fn row(&self, index: u32) -> Result<Vec<(ProjectionColumn, String)>, PlanError> {
        ProjectionColumn::ALL
            .iter()
            .map(|&col| self.formula(col, index).map(|f| (col, f)))
            .collect()
    }

    /// Formula for one cell of the projection
    pub fn formula(&self, column: ProjectionColumn, index: u32) -> Result<String, PlanError> {
        use ProjectionColumn as C;

        let r = index + FIRST_DATA_ROW;
        let first = index == 0;
        let n = |id: &str| self.names.reference(id);
        let working = C::Working.at(r);

        let formula = match column {
            C::Year => format!("={} + ROW()-{}", n(name::START_YEAR)?, FIRST_DATA_ROW),
            C::Age => format!("={} + ROW()-{}", n(name::START_AGE)?, FIRST_DATA_ROW),
            C::Working => format!("={}<{}", C::Age.at(r), n(name::RETIRE_AGE)?),
            C::Salary => format!(
                "=IF({}, {}*(1+{})^(ROW()-{}), 0)",
                working,
                n(name::BASE_SALARY)?,
                n(name::SALARY_GROWTH)?,
                FIRST_DATA_ROW
            ),
            C::Bonus => format!("=IF({}, {}, 0)", working, n(name::BONUS)?),
            C::TotalIncome => format!("={}+{}", C::Salary.at(r), C::Bonus.at(r)),
            C::Contributions => format!("=IF({}, {}, 0)", working, n(name::CONTR_ANNUAL)?),
            C::PriceIndex if first => "=1".to_string(),
            C::PriceIndex => format!(
                "={}*(1+{})",
                C::PriceIndex.at(r - 1),
                n(name::INFLATION)?
            ),
            C::Withdrawal => {
                let base = n(name::BASE_WITHDRAWAL)?;
                format!(
                    "=IF({}, 0, IF({}=\"Yes\", {}*{}, {}))",
                    working,
                    n(name::INDEX_WITHDRAW)?,
                    base,
                    C::PriceIndex.at(r),
                    base
                )
            }
            C::ReturnRate => format!("={}", n(name::RETURN_RATE)?),
            C::StartBalance if first => format!("={}", n(name::START_BALANCE)?),
            C::StartBalance => format!("={}", C::EndBalance.at(r - 1)),
            C::EndBalance => {
                let start = C::StartBalance.at(r);
                format!(
                    "=MAX(0, {} + {} - {} + {}*{})",
                    start,
                    C::Contributions.at(r),
                    C::Withdrawal.at(r),
                    start,
                    C::ReturnRate.at(r)
                )
            }
            C::RealEndBalance => {
                let index_cell = C::PriceIndex.at(r);
                format!(
                    "=IF({}=0,0, {}/{})",
                    index_cell,
                    C::EndBalance.at(r),
                    index_cell
                )
            }
            C::Depleted => format!("={}<=0", C::EndBalance.at(r)),
        };
        Ok(formula)
    }
}

/// Lookups over the finished Projection sheet
pub struct SummaryFormulas<'a> {
    names: &'a NameTable,
}

impl<'a> SummaryFormulas<'a> {
    pub fn new(names: &'a NameTable) -> Self {
        Self { names }
    }

    pub fn retirement_age(&self) -> Result<String, PlanError> {
        Ok(format!("={}", self.names.reference(name::RETIRE_AGE)?))
    }

    /// Nominal end balance in the row whose age equals `RetireAge`
    pub fn balance_at_retirement(&self) -> Result<String, PlanError> {
        self.balance_at_age(name::RETIRE_AGE)
    }

    /// Nominal end balance in the row whose age equals `LifeAge`
    pub fn balance_at_life_expectancy(&self) -> Result<String, PlanError> {
        self.balance_at_age(name::LIFE_AGE)
    }

    fn balance_at_age(&self, age_name: &str) -> Result<String, PlanError> {
        Ok(format!(
            "=INDEX({}, MATCH({}, {}, 0))",
            ProjectionColumn::EndBalance.whole_column(),
            self.names.reference(age_name)?,
            ProjectionColumn::Age.whole_column()
        ))
    }

    /// First depleted year, falling back to the "Not depleted" sentinel.
    /// This is the only lookup wrapped in a fallback.
    pub fn depletion_year(&self) -> String {
        format!(
            "=IFERROR(INDEX({}, MATCH(TRUE, {}, 0)), \"{}\")",
            ProjectionColumn::Year.whole_column(),
            ProjectionColumn::Depleted.whole_column(),
            NOT_DEPLETED
        )
    }

    /// Years the portfolio lasts after retirement. `depletion_cell` holds
    /// the [`Self::depletion_year`] formula.
    pub fn sustainable_years(&self, depletion_cell: CellRef) -> Result<String, PlanError> {
        let retire = self.names.reference(name::RETIRE_AGE)?;
        Ok(format!(
            "=IF({}=\"{}\", {}-{}+1, INDEX({}, MATCH(TRUE, {}, 0))-{})",
            depletion_cell.a1(),
            NOT_DEPLETED,
            self.names.reference(name::LIFE_AGE)?,
            retire,
            ProjectionColumn::Age.whole_column(),
            ProjectionColumn::Depleted.whole_column(),
            retire
        ))
    }
}

/// `=SUM(B9:B13)` over a single column span
pub fn sum(first: CellRef, last: CellRef) -> String {
    format!("=SUM({}:{})", first.a1(), last.a1())
}

/// Resolve a scenario attribute by matching the selector against the name column
pub fn scenario_lookup(values: &str, keys: &str, selector: CellRef) -> String {
    format!("=INDEX({}, MATCH({}, {}, 0))", values, selector.a1(), keys)
}
