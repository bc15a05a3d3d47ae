//! Retirement planning workbook renderer
//!
//! Generates an XLSX file whose numbers are all computed by the spreadsheet
//! itself. Sheets are built in a fixed order because later sheets read names
//! bound by earlier ones:
//!
//! - **Scenarios**: scenario name, nominal return, inflation
//! - **Assumptions**: editable inputs, auto totals, scenario selector
//! - **Projection**: one row per year, formula recurrence over named inputs
//! - **Summary**: lookups over the Projection sheet plus a balance chart
//! - **README + W2 Helper**: static instructions
//!
//! ## Named Ranges
//!
//! Every input a formula reads is bound to a workbook name (`StartAge`,
//! `ReturnRate`, ...) through a [`NameTable`]. Formula builders ask the table
//! for each name, so referencing a name before its cell exists fails the
//! render instead of producing `#NAME?` in the sheet.
//!
//! ## Example Output Structure
//!
//! ```text
//! Sheet: Projection
//! | Year | Age | Working? | ... | Start Balance | End Balance                    | ... |
//! |------|-----|----------|-----|---------------|--------------------------------|-----|
//! | =... | =...| =B2<...  | ... | =StartBalance | =MAX(0, K2 + G2 - I2 + K2*J2)  | ... |
//! | =... | =...| =B3<...  | ... | =L2           | =MAX(0, K3 + G3 - I3 + K3*J3)  | ... |
//! ```

use nestegg_core::formula::{
    self, sheet as sheet_names, ProjectionColumn, ProjectionFormulas, SummaryFormulas, FIRST_DATA_ROW,
};
use nestegg_core::names::{name, sheet_prefix};
use nestegg_core::{CellRef, LineItem, NameTable, Plan, RenderError, Renderer};
use rust_xlsxwriter::{
    Chart, ChartType, DataValidation, Format, FormatAlign, FormatBorder, Formula, Workbook,
    Worksheet, XlsxError,
};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

const LABEL_COL: u16 = 0;
const VALUE_COL: u16 = 1;

/// Column widths of the Projection sheet, A..N
const PROJECTION_WIDTHS: [u16; 14] = [7, 6, 10, 14, 12, 14, 15, 12, 17, 10, 16, 16, 18, 11];

const W2_ROWS: [(&str, &str); 5] = [
    (
        "Box 1 - Wages, tips, other comp",
        "Use as your base salary reference for last year.",
    ),
    (
        "Box 12 (Code D) - 401(k) employee",
        "Total employee pre-tax 401(k) contributions.",
    ),
    (
        "Box 12 (Code W) - HSA contributions",
        "Employee + employer HSA contributions shown here.",
    ),
    (
        "Box 3 - Social Security wages",
        "Cap may differ from Box 1; for reference only.",
    ),
    (
        "Box 5 - Medicare wages",
        "Often higher than Box 1 due to pre-tax deductions.",
    ),
];

fn xlsx_err(e: XlsxError) -> RenderError {
    RenderError::Format(e.to_string())
}

/// Retirement workbook renderer
#[derive(Clone, Debug)]
pub struct WorkbookGenerator {
    /// Currency symbol used in money formats
    pub currency: String,
    /// Whether to embed the balance chart on the Summary sheet
    pub include_chart: bool,
}

impl Default for WorkbookGenerator {
    fn default() -> Self {
        Self {
            currency: "$".into(),
            include_chart: true,
        }
    }
}

impl WorkbookGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set currency symbol
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Leave the chart off the Summary sheet
    pub fn no_chart(mut self) -> Self {
        self.include_chart = false;
        self
    }

    /// Generate workbook bytes
    pub fn render_to_bytes(&self, plan: &Plan) -> Result<Vec<u8>, RenderError> {
        plan.validate()?;

        let mut workbook = Workbook::new();
        let formats = self.create_formats();
        let mut names = NameTable::new();

        let scenarios = self.add_scenarios_sheet(&mut workbook, plan, &formats, &mut names)?;
        self.add_assumptions_sheet(&mut workbook, plan, &scenarios, &formats, &mut names)?;
        self.add_projection_sheet(&mut workbook, plan, &formats, &names)?;
        self.add_summary_sheet(&mut workbook, plan, &formats, &names)?;
        self.add_readme_sheet(&mut workbook, &formats)?;

        for named in names.iter() {
            workbook
                .define_name(named.name.as_str(), &named.refers_to())
                .map_err(xlsx_err)?;
        }
        debug!(names = names.len(), "defined workbook names");

        let buffer = workbook
            .save_to_buffer()
            .map_err(|e| RenderError::Format(format!("Failed to create workbook: {e}")))?;

        Ok(buffer)
    }

    /// Render and write the workbook to `path`.
    ///
    /// The workbook is assembled in memory, written to a temporary file next
    /// to `path` and renamed into place. On failure the target is left as it
    /// was: either the previous file or nothing.
    pub fn write_to_path(&self, plan: &Plan, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let path = path.as_ref();
        let bytes = self.render(plan)?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(&bytes)?;
        staged.as_file().sync_all()?;
        staged.persist(path).map_err(|e| RenderError::Io(e.error))?;

        info!(
            path = %path.display(),
            bytes = bytes.len(),
            years = plan.horizon_years,
            "workbook written"
        );
        Ok(())
    }

    /// Create reusable formats
    fn create_formats(&self) -> ExcelFormats {
        let money = format!("\"{}\"#,##0", self.currency);
        // Light yellow marks the cells users are expected to edit
        let input_fill: u32 = 0xFFF2CC;

        ExcelFormats {
            title: Format::new().set_bold().set_font_size(14),
            header: Format::new()
                .set_bold()
                .set_background_color(0xEEEEEE)
                .set_border(FormatBorder::Thin),
            bold: Format::new().set_bold(),
            wrap: Format::new().set_text_wrap().set_align(FormatAlign::Top),
            note: Format::new().set_italic().set_font_color(0x555555),
            plain: Format::new(),
            integer: Format::new().set_num_format("0"),
            currency: Format::new().set_num_format(&money),
            percent: Format::new().set_num_format("0.0%"),
            index: Format::new().set_num_format("0.0000"),
            input_integer: Format::new()
                .set_num_format("0")
                .set_background_color(input_fill),
            input_currency: Format::new()
                .set_num_format(&money)
                .set_background_color(input_fill),
            input_percent: Format::new()
                .set_num_format("0.0%")
                .set_background_color(input_fill),
            input_text: Format::new().set_background_color(input_fill),
        }
    }

    /// Add Scenarios sheet and bind `ScenarioNames`
    fn add_scenarios_sheet(
        &self,
        workbook: &mut Workbook,
        plan: &Plan,
        formats: &ExcelFormats,
        names: &mut NameTable,
    ) -> Result<ScenarioTable, RenderError> {
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_names::SCENARIOS).map_err(xlsx_err)?;

        let headers = ["Scenario Name", "Investment Return (nominal)", "Inflation"];
        for (col, header) in headers.iter().enumerate() {
            sheet
                .write_with_format(0, col as u16, *header, &formats.header)
                .map_err(xlsx_err)?;
        }
        sheet.set_column_width(0, 18).ok();
        sheet.set_column_width(1, 26).ok();
        sheet.set_column_width(2, 12).ok();

        // Only the last row is meant to be edited
        let editable = plan.scenarios.len() - 1;
        for (i, scenario) in plan.scenarios.iter().enumerate() {
            let row = 1 + i as u32;
            let (text_fmt, rate_fmt) = if i == editable {
                (&formats.input_text, &formats.input_percent)
            } else {
                (&formats.plain, &formats.percent)
            };
            sheet
                .write_with_format(row, 0, scenario.name.as_str(), text_fmt)
                .map_err(xlsx_err)?;
            sheet
                .write_with_format(row, 1, scenario.nominal_return, rate_fmt)
                .map_err(xlsx_err)?;
            sheet
                .write_with_format(row, 2, scenario.inflation, rate_fmt)
                .map_err(xlsx_err)?;
        }

        let last_row = plan.scenarios.len() as u32;
        names.define_range(
            name::SCENARIO_NAMES,
            sheet_names::SCENARIOS,
            CellRef::new(1, 0),
            CellRef::new(last_row, 0),
        )?;

        let column = |col: u16| {
            format!(
                "{}!{}:{}",
                sheet_prefix(sheet_names::SCENARIOS),
                CellRef::new(1, col).absolute(),
                CellRef::new(last_row, col).absolute()
            )
        };
        debug!(scenarios = plan.scenarios.len(), "scenarios sheet written");

        Ok(ScenarioTable {
            keys: column(0),
            returns: column(1),
            inflation: column(2),
        })
    }

    /// Add Assumptions sheet and bind every input name
    fn add_assumptions_sheet(
        &self,
        workbook: &mut Workbook,
        plan: &Plan,
        scenarios: &ScenarioTable,
        formats: &ExcelFormats,
        names: &mut NameTable,
    ) -> Result<(), RenderError> {
        let a = &plan.assumptions;
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_names::ASSUMPTIONS).map_err(xlsx_err)?;
        sheet.set_column_width(0, 44).ok();
        sheet.set_column_width(1, 20).ok();

        sheet
            .write_with_format(0, 0, "Retirement Simulation - Assumptions", &formats.title)
            .map_err(xlsx_err)?;

        let inputs = [
            (name::START_YEAR, "Current Year", f64::from(a.resolved_start_year())),
            (name::START_AGE, "Current Age (edit)", f64::from(a.current_age)),
            (name::RETIRE_AGE, "Retirement Age (edit)", f64::from(a.retirement_age)),
            (name::LIFE_AGE, "Life Expectancy Age (edit)", f64::from(a.life_expectancy)),
        ];
        for (i, (id, label, value)) in inputs.iter().enumerate() {
            let cell = write_input(sheet, 2 + i as u32, label, *value, &formats.input_integer)?;
            names.define_cell(id, sheet_names::ASSUMPTIONS, cell)?;
        }

        // Balances
        let mut row = 7;
        sheet
            .write_with_format(row, LABEL_COL, "Starting Portfolio Balances (edit)", &formats.bold)
            .map_err(xlsx_err)?;
        let total = write_group(sheet, row + 1, &a.balances, "Starting Total (auto)", formats)?;
        names.define_cell(name::START_BALANCE, sheet_names::ASSUMPTIONS, total)?;

        // Contributions
        row = total.row + 2;
        sheet
            .write_with_format(
                row,
                LABEL_COL,
                "Annual Contributions While Working (edit)",
                &formats.bold,
            )
            .map_err(xlsx_err)?;
        let total = write_group(
            sheet,
            row + 1,
            &a.contributions,
            "Total Contributions While Working (auto)",
            formats,
        )?;
        names.define_cell(name::CONTR_ANNUAL, sheet_names::ASSUMPTIONS, total)?;

        // Income
        row = total.row + 2;
        sheet
            .write_with_format(row, LABEL_COL, "Income (edit)", &formats.bold)
            .map_err(xlsx_err)?;
        let salary = write_input(sheet, row + 1, "Current base salary", a.base_salary, &formats.input_currency)?;
        names.define_cell(name::BASE_SALARY, sheet_names::ASSUMPTIONS, salary)?;
        let bonus = write_input(sheet, row + 2, "Annual bonus", a.bonus, &formats.input_currency)?;
        names.define_cell(name::BONUS, sheet_names::ASSUMPTIONS, bonus)?;
        let growth = write_input(sheet, row + 3, "Annual salary growth", a.salary_growth, &formats.input_percent)?;
        names.define_cell(name::SALARY_GROWTH, sheet_names::ASSUMPTIONS, growth)?;

        // Scenario selector
        row += 5;
        let selector = CellRef::new(row, VALUE_COL);
        sheet
            .write_with_format(row, LABEL_COL, "Selected Scenario (choose)", &formats.bold)
            .map_err(xlsx_err)?;
        sheet
            .write_with_format(row, VALUE_COL, a.selected_scenario.as_str(), &formats.input_text)
            .map_err(xlsx_err)?;
        let choices = DataValidation::new().allow_list_formula(Formula::new(format!(
            "={}",
            names.reference(name::SCENARIO_NAMES)?
        )));
        sheet
            .add_data_validation(row, VALUE_COL, row, VALUE_COL, &choices)
            .map_err(xlsx_err)?;

        let lookups = [
            (name::RETURN_RATE, "Investment Return (from scenario)", &scenarios.returns),
            (name::INFLATION, "Inflation (from scenario)", &scenarios.inflation),
        ];
        for (i, (id, label, values)) in lookups.iter().enumerate() {
            let cell = CellRef::new(row + 1 + i as u32, VALUE_COL);
            sheet.write(cell.row, LABEL_COL, *label).map_err(xlsx_err)?;
            let lookup = formula::scenario_lookup(values, &scenarios.keys, selector);
            sheet
                .write_formula_with_format(cell.row, cell.col, lookup.as_str(), &formats.percent)
                .map_err(xlsx_err)?;
            names.define_cell(id, sheet_names::ASSUMPTIONS, cell)?;
        }

        // Withdrawals
        row += 4;
        sheet
            .write_with_format(row, LABEL_COL, "Retirement Withdrawal (today's $)", &formats.bold)
            .map_err(xlsx_err)?;
        let base = write_input(
            sheet,
            row + 1,
            "Base annual withdrawal (edit)",
            a.base_withdrawal,
            &formats.input_currency,
        )?;
        names.define_cell(name::BASE_WITHDRAWAL, sheet_names::ASSUMPTIONS, base)?;

        let flag = CellRef::new(row + 2, VALUE_COL);
        sheet
            .write(flag.row, LABEL_COL, "Index withdrawals with inflation? (Yes/No)")
            .map_err(xlsx_err)?;
        sheet
            .write_with_format(flag.row, flag.col, a.index_flag(), &formats.input_text)
            .map_err(xlsx_err)?;
        let yes_no = DataValidation::new()
            .allow_list_strings(&["Yes", "No"])
            .map_err(xlsx_err)?;
        sheet
            .add_data_validation(flag.row, flag.col, flag.row, flag.col, &yes_no)
            .map_err(xlsx_err)?;
        names.define_cell(name::INDEX_WITHDRAW, sheet_names::ASSUMPTIONS, flag)?;

        // Notes
        row += 4;
        sheet
            .write_with_format(row, LABEL_COL, "Notes", &formats.bold)
            .map_err(xlsx_err)?;
        sheet
            .write_with_format(
                row + 1,
                LABEL_COL,
                "Edit the shaded values in column B. Choose a scenario or edit the 'Custom' row on the Scenarios sheet.\n\
                 Starting Total and Total Contributions are calculated automatically.\n\
                 Withdrawals are applied post-retirement and grow with inflation if set to Yes.",
                &formats.wrap,
            )
            .map_err(xlsx_err)?;
        sheet.set_row_height(row + 1, 60).ok();

        debug!(names = names.len(), "assumptions sheet written");
        Ok(())
    }

    /// Add Projection sheet: one formula row per projected year
    fn add_projection_sheet(
        &self,
        workbook: &mut Workbook,
        plan: &Plan,
        formats: &ExcelFormats,
        names: &NameTable,
    ) -> Result<(), RenderError> {
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_names::PROJECTION).map_err(xlsx_err)?;
        sheet.set_freeze_panes(1, 0).ok();

        for column in ProjectionColumn::ALL {
            let col = column.index();
            sheet
                .write_with_format(0, col, column.header(), &formats.header)
                .map_err(xlsx_err)?;
            sheet
                .set_column_width(col, PROJECTION_WIDTHS[col as usize])
                .ok();
        }

        let formulas = ProjectionFormulas::new(names);
        for index in 0..plan.horizon_years {
            let row = index + FIRST_DATA_ROW - 1;
            for (column, text) in formulas.row(index)? {
                let written = match formats.for_projection(column) {
                    Some(fmt) => {
                        sheet.write_formula_with_format(row, column.index(), text.as_str(), fmt)
                    }
                    None => sheet.write_formula(row, column.index(), text.as_str()),
                };
                written.map_err(xlsx_err)?;
            }
        }

        debug!(years = plan.horizon_years, "projection sheet written");
        Ok(())
    }

    /// Add Summary sheet with lookups over the projection
    fn add_summary_sheet(
        &self,
        workbook: &mut Workbook,
        plan: &Plan,
        formats: &ExcelFormats,
        names: &NameTable,
    ) -> Result<(), RenderError> {
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_names::SUMMARY).map_err(xlsx_err)?;
        sheet.set_column_width(0, 38).ok();
        sheet.set_column_width(1, 25).ok();

        sheet
            .write_with_format(0, 0, "Retirement Simulation - Summary", &formats.title)
            .map_err(xlsx_err)?;

        let summary = SummaryFormulas::new(names);
        let depletion_cell = CellRef::new(4, VALUE_COL);
        let metrics = [
            ("Chosen retirement age", summary.retirement_age()?, &formats.integer),
            (
                "Total savings at retirement (nominal)",
                summary.balance_at_retirement()?,
                &formats.currency,
            ),
            ("Year portfolio depletes (if any)", summary.depletion_year(), &formats.integer),
            (
                "Years sustainable post-retirement",
                summary.sustainable_years(depletion_cell)?,
                &formats.integer,
            ),
            (
                "Ending balance at life expectancy (nominal)",
                summary.balance_at_life_expectancy()?,
                &formats.currency,
            ),
        ];
        for (i, (label, text, fmt)) in metrics.iter().enumerate() {
            let row = 2 + i as u32;
            sheet.write(row, LABEL_COL, *label).map_err(xlsx_err)?;
            sheet
                .write_formula_with_format(row, VALUE_COL, text.as_str(), fmt)
                .map_err(xlsx_err)?;
        }

        sheet
            .write_with_format(8, LABEL_COL, "How to use", &formats.bold)
            .map_err(xlsx_err)?;
        sheet
            .write_with_format(
                9,
                LABEL_COL,
                "1) Go to the Assumptions sheet and edit values in column B.\n\
                 2) Pick a Scenario or adjust the Custom row on the Scenarios sheet.\n\
                 3) Review the Projection sheet for per-year cashflows and balances.\n\
                 4) Return to this Summary for key answers like balance at retirement and years sustainable.",
                &formats.wrap,
            )
            .map_err(xlsx_err)?;
        sheet.set_row_height(9, 90).ok();

        if self.include_chart {
            add_balance_chart(sheet, plan.horizon_years)?;
        }

        debug!(chart = self.include_chart, "summary sheet written");
        Ok(())
    }

    /// Add README sheet with instructions and the W-2 mapping table
    fn add_readme_sheet(
        &self,
        workbook: &mut Workbook,
        formats: &ExcelFormats,
    ) -> Result<(), RenderError> {
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_names::README).map_err(xlsx_err)?;
        sheet.set_column_width(0, 42).ok();
        sheet.set_column_width(1, 52).ok();

        sheet
            .write_with_format(0, 0, "Quick Start", &formats.title)
            .map_err(xlsx_err)?;
        sheet
            .write_with_format(
                2,
                0,
                "\u{2022} Edit assumptions on the Assumptions sheet (column B).\n\
                 \u{2022} Choose a scenario on the Assumptions sheet.\n\
                 \u{2022} Check the Summary and Projection sheets for results.\n\
                 \u{2022} This model ignores detailed taxes and account-specific withdrawal ordering to stay simple. \
                 Refine later if needed (e.g., taxable-first withdrawals, RMDs, Social Security).",
                &formats.wrap,
            )
            .map_err(xlsx_err)?;
        sheet.set_row_height(2, 90).ok();

        sheet
            .write_with_format(6, 0, "W-2 Mapping Helper (Optional)", &formats.bold)
            .map_err(xlsx_err)?;
        sheet
            .write_with_format(7, 0, "Field", &formats.header)
            .map_err(xlsx_err)?;
        sheet
            .write_with_format(7, 1, "How to use", &formats.header)
            .map_err(xlsx_err)?;
        for (i, (field, tip)) in W2_ROWS.iter().enumerate() {
            let row = 8 + i as u32;
            sheet.write(row, 0, *field).map_err(xlsx_err)?;
            sheet
                .write_with_format(row, 1, *tip, &formats.wrap)
                .map_err(xlsx_err)?;
        }
        sheet
            .write_with_format(
                9 + W2_ROWS.len() as u32,
                0,
                "Reference only; no values on this sheet feed the projection.",
                &formats.note,
            )
            .map_err(xlsx_err)?;

        Ok(())
    }
}

/// Write a labeled input value in column B and return its cell
fn write_input(
    sheet: &mut Worksheet,
    row: u32,
    label: &str,
    value: f64,
    format: &Format,
) -> Result<CellRef, RenderError> {
    sheet.write(row, LABEL_COL, label).map_err(xlsx_err)?;
    sheet
        .write_with_format(row, VALUE_COL, value, format)
        .map_err(xlsx_err)?;
    Ok(CellRef::new(row, VALUE_COL))
}

/// Write one row per item followed by an auto-sum row; returns the sum cell
fn write_group(
    sheet: &mut Worksheet,
    first_row: u32,
    items: &[LineItem],
    total_label: &str,
    formats: &ExcelFormats,
) -> Result<CellRef, RenderError> {
    for (i, item) in items.iter().enumerate() {
        write_input(
            sheet,
            first_row + i as u32,
            &item.label,
            item.amount,
            &formats.input_currency,
        )?;
    }

    let total = CellRef::new(first_row + items.len() as u32, VALUE_COL);
    let sum = formula::sum(
        CellRef::new(first_row, VALUE_COL),
        CellRef::new(total.row - 1, VALUE_COL),
    );
    sheet.write(total.row, LABEL_COL, total_label).map_err(xlsx_err)?;
    sheet
        .write_formula_with_format(total.row, total.col, sum.as_str(), &formats.currency)
        .map_err(xlsx_err)?;
    Ok(total)
}

/// Line chart of nominal end balance by year over the whole horizon
fn add_balance_chart(sheet: &mut Worksheet, horizon_years: u32) -> Result<(), RenderError> {
    let first = FIRST_DATA_ROW - 1;
    let last = first + horizon_years - 1;
    let year = ProjectionColumn::Year.index();
    let balance = ProjectionColumn::EndBalance.index();

    let mut chart = Chart::new(ChartType::Line);
    chart
        .add_series()
        .set_name("End Balance (Nominal)")
        .set_categories((sheet_names::PROJECTION, first, year, last, year))
        .set_values((sheet_names::PROJECTION, first, balance, last, balance));
    chart.title().set_name("Portfolio Balance Over Time");
    chart.x_axis().set_name("Year");
    chart.y_axis().set_name("Balance");
    // 1.2x the default 480x288
    chart.set_width(576).set_height(346);

    sheet
        .insert_chart_with_offset(2, 3, &chart, 10, 10)
        .map_err(xlsx_err)?;
    Ok(())
}

/// Cell ranges of the scenario table, used by the selector lookups
struct ScenarioTable {
    keys: String,
    returns: String,
    inflation: String,
}

/// Reusable workbook formats
struct ExcelFormats {
    title: Format,
    header: Format,
    bold: Format,
    wrap: Format,
    note: Format,
    plain: Format,
    integer: Format,
    currency: Format,
    percent: Format,
    index: Format,
    // Shaded formats for user-editable cells
    input_integer: Format,
    input_currency: Format,
    input_percent: Format,
    input_text: Format,
}

impl ExcelFormats {
    /// Number format for a projection column; `None` for booleans
    fn for_projection(&self, column: ProjectionColumn) -> Option<&Format> {
        use ProjectionColumn as C;
        match column {
            C::Year | C::Age => Some(&self.integer),
            C::Working | C::Depleted => None,
            C::PriceIndex => Some(&self.index),
            C::ReturnRate => Some(&self.percent),
            C::Salary
            | C::Bonus
            | C::TotalIncome
            | C::Contributions
            | C::Withdrawal
            | C::StartBalance
            | C::EndBalance
            | C::RealEndBalance => Some(&self.currency),
        }
    }
}

impl Renderer for WorkbookGenerator {
    type Output = Vec<u8>;

    fn render(&self, plan: &Plan) -> Result<Vec<u8>, RenderError> {
        self.render_to_bytes(plan)
    }
}
