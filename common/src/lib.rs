//! Nutrition Calculator Common Library
//!
//! CLIとデスクトップで共有される型とユーティリティ

pub mod types;
pub mod nutrients;
pub mod report;
pub mod session;
pub mod error;
pub mod export;

pub use types::{Ingredient, LookupResponse, NutrientRecord, NutrientSample, NutritionTotal, Recipe};
pub use nutrients::{label_for, NutrientLabel, NUTRIENT_LABELS};
pub use report::{render_html, render_text, report_rows, ReportRow};
pub use session::{Page, Session};
pub use error::{Error, Result};
