//! # nestegg-render
//!
//! Workbook generation for nestegg plans.
//!
//! The generator writes formulas, named ranges, validation lists and a chart;
//! it never evaluates a formula. Spreadsheet software computes every number
//! when the file is opened.
//!
//! ## Example
//!
//! ```rust,ignore
//! use nestegg_core::{Plan, Renderer};
//! use nestegg_render::WorkbookGenerator;
//!
//! let plan = Plan::default();
//! let generator = WorkbookGenerator::new().currency("$");
//! generator.write_to_path(&plan, "Retirement_Simulation.xlsx")?;
//!
//! // Or keep the bytes in memory
//! let xlsx_bytes = generator.render(&plan)?;
//! ```

pub mod excel;

pub use excel::WorkbookGenerator;

/// File name used when no output path is given
pub const DEFAULT_OUTPUT: &str = "Retirement_Simulation.xlsx";
