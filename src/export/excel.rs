//! Excel生成（CLI版）
//!
//! 共通ライブラリの excel_core でバッファを作りファイルに保存する

use crate::error::{NutritionError, Result};
use nutrition_calc_common::export::excel_core::generate_report_buffer;
use nutrition_calc_common::{NutritionTotal, Recipe};
use std::path::Path;

pub fn generate_excel(
    recipe: &Recipe,
    total: &NutritionTotal,
    output_path: &Path,
    title: &str,
) -> Result<()> {
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();
    let buffer = generate_report_buffer(recipe, total, title, Some(&generated_at))
        .map_err(NutritionError::ExcelGeneration)?;
    std::fs::write(output_path, buffer)
        .map_err(|e| NutritionError::ExcelGeneration(format!("保存エラー: {}", e)))?;
    Ok(())
}
