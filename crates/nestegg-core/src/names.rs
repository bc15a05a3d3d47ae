//! Named ranges as a build-time symbol table
//!
//! Every formula that reads an assumption goes through [`NameTable::reference`],
//! so a name that has not been bound to a cell yet is caught while the
//! workbook is being built rather than showing up as `#NAME?` in the sheet.

use crate::PlanError;
use std::collections::HashMap;

/// Workbook-level names emitted by the generator
pub mod name {
    pub const SCENARIO_NAMES: &str = "ScenarioNames";
    pub const START_YEAR: &str = "StartYear";
    pub const START_AGE: &str = "StartAge";
    pub const RETIRE_AGE: &str = "RetireAge";
    pub const LIFE_AGE: &str = "LifeAge";
    pub const START_BALANCE: &str = "StartBalance";
    pub const CONTR_ANNUAL: &str = "ContrAnnual";
    pub const BASE_SALARY: &str = "BaseSalary";
    pub const BONUS: &str = "Bonus";
    pub const SALARY_GROWTH: &str = "SalaryGrowth";
    pub const RETURN_RATE: &str = "ReturnRate";
    pub const INFLATION: &str = "Inflation";
    pub const BASE_WITHDRAWAL: &str = "BaseWithdrawal";
    pub const INDEX_WITHDRAW: &str = "IndexWithdraw";
}

/// Convert column number to spreadsheet letter (0 -> A, 25 -> Z, 26 -> AA)
pub fn col_to_letter(col: u16) -> String {
    let mut result = String::new();
    let mut n = col as u32;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

/// Zero-based cell coordinate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub row: u32,
    pub col: u16,
}

impl CellRef {
    pub const fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Relative A1 reference, e.g. `B30`
    pub fn a1(&self) -> String {
        format!("{}{}", col_to_letter(self.col), self.row + 1)
    }

    /// Absolute A1 reference, e.g. `$B$30`
    pub fn absolute(&self) -> String {
        format!("${}${}", col_to_letter(self.col), self.row + 1)
    }
}

/// Quote a sheet name for use in a reference when it is not a bare identifier
pub fn sheet_prefix(sheet: &str) -> String {
    if sheet.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        sheet.to_string()
    } else {
        format!("'{}'", sheet.replace('\'', "''"))
    }
}

/// A name bound to one cell or a rectangular range on a sheet
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedRange {
    pub name: String,
    pub sheet: String,
    pub first: CellRef,
    /// Bottom-right corner; `None` for a single cell
    pub last: Option<CellRef>,
}

impl NamedRange {
    /// Sheet-qualified absolute reference, e.g. `Scenarios!$A$2:$A$5`
    pub fn range_ref(&self) -> String {
        let sheet = sheet_prefix(&self.sheet);
        match self.last {
            Some(last) if last != self.first => {
                format!("{}!{}:{}", sheet, self.first.absolute(), last.absolute())
            }
            _ => format!("{}!{}", sheet, self.first.absolute()),
        }
    }

    /// Text for the workbook's defined-name table
    pub fn refers_to(&self) -> String {
        format!("={}", self.range_ref())
    }
}

/// Insertion-ordered symbol table of workbook names
#[derive(Clone, Debug, Default)]
pub struct NameTable {
    entries: Vec<NamedRange>,
    index: HashMap<String, usize>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a name to a single cell
    pub fn define_cell(
        &mut self,
        name: &str,
        sheet: &str,
        cell: CellRef,
    ) -> Result<&NamedRange, PlanError> {
        self.insert(NamedRange {
            name: name.to_string(),
            sheet: sheet.to_string(),
            first: cell,
            last: None,
        })
    }

    /// Bind a name to a range
    pub fn define_range(
        &mut self,
        name: &str,
        sheet: &str,
        first: CellRef,
        last: CellRef,
    ) -> Result<&NamedRange, PlanError> {
        self.insert(NamedRange {
            name: name.to_string(),
            sheet: sheet.to_string(),
            first,
            last: Some(last),
        })
    }

    fn insert(&mut self, range: NamedRange) -> Result<&NamedRange, PlanError> {
        if self.index.contains_key(&range.name) {
            return Err(PlanError::DuplicateName(range.name));
        }
        let slot = self.entries.len();
        self.index.insert(range.name.clone(), slot);
        self.entries.push(range);
        Ok(&self.entries[slot])
    }

    /// Name text for use inside a formula. Fails if the name is not bound yet.
    pub fn reference(&self, name: &str) -> Result<&str, PlanError> {
        self.get(name)
            .map(|r| r.name.as_str())
            .ok_or_else(|| PlanError::UndefinedName(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&NamedRange> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Names in definition order
    pub fn iter(&self) -> impl Iterator<Item = &NamedRange> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
