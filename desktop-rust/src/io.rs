use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use nutrition_calc::cli::ReportFormat;
use nutrition_calc::export::export_report;
use nutrition_calc_common::{NutritionTotal, Recipe};

pub fn save_report(path: &Path, format: ReportFormat, recipe: &Recipe, total: &NutritionTotal) -> Result<PathBuf> {
    export_report(recipe, total, format, path).with_context(|| format!("write {}", path.display()))
}

pub fn default_report_name(format: ReportFormat) -> String {
    format!("nutrition-report.{}", format.extension())
}
