pub mod excel;

use crate::cli::ReportFormat;
use crate::error::Result;
use nutrition_calc_common::{render_html, render_text, NutritionTotal, Recipe};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const REPORT_TITLE: &str = "Nutrition Report";

/// JSON出力（キー順はレシピの入力順と栄養素の初出順）
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    recipe: &'a Recipe,
    total_nutrients: &'a NutritionTotal,
}

/// 出力先がディレクトリ（または拡張子なし）なら `<dir>/<title>.<ext>` にする
pub fn output_path_for_format(output: &Path, title: &str, format: ReportFormat) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", title, format.extension()))
    } else {
        output.to_path_buf()
    }
}

/// 指定形式でレポートを文字列に整形（Excel以外）
pub fn render_report(recipe: &Recipe, total: &NutritionTotal, format: ReportFormat) -> Result<String> {
    let rendered = match format {
        ReportFormat::Text | ReportFormat::Excel => render_text(recipe, total),
        ReportFormat::Html => render_html(recipe, total),
        ReportFormat::Json => serde_json::to_string_pretty(&JsonReport {
            recipe,
            total_nutrients: total,
        })?,
    };
    Ok(rendered)
}

/// レポートをファイルに書き出し、書き出したパスを返す
pub fn export_report(
    recipe: &Recipe,
    total: &NutritionTotal,
    format: ReportFormat,
    output: &Path,
) -> Result<PathBuf> {
    let output_path = output_path_for_format(output, "nutrition-report", format);
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    match format {
        ReportFormat::Excel => excel::generate_excel(recipe, total, &output_path, REPORT_TITLE)?,
        _ => std::fs::write(&output_path, render_report(recipe, total, format)?)?,
    }

    tracing::info!(path = %output_path.display(), ?format, "report written");
    Ok(output_path)
}
