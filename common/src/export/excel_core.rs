//! Excel生成（共通ライブラリ）
//!
//! 食材一覧シートと栄養素合計シートを持つブックを生成する。
//! 合計シートはラベルテーブルにある栄養素のみを出力する。

use crate::report::{report_rows, INPUT_FOODS_HEADING, TOTAL_HEADING};
use crate::types::{NutritionTotal, Recipe};
use rust_xlsxwriter::*;

const NAME_COL_WIDTH: f64 = 32.0;
const VALUE_COL_WIDTH: f64 = 16.0;
const UNIT_COL_WIDTH: f64 = 10.0;

/// Excelをバッファに生成
///
/// # Arguments
/// * `recipe` - 入力食材
/// * `total` - 栄養素合計
/// * `title` - 1行目に出すタイトル
/// * `generated_at` - 2行目に出す作成日時（Noneなら省略）
pub fn generate_report_buffer(
    recipe: &Recipe,
    total: &NutritionTotal,
    title: &str,
    generated_at: Option<&str>,
) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let title_format = Format::new().set_bold().set_font_size(14.0);

    let heading_format = Format::new()
        .set_bold()
        .set_font_size(11.0)
        .set_font_color(Color::RGB(0x2E7D32));

    let header_format = Format::new()
        .set_bold()
        .set_font_size(10.0)
        .set_font_color(Color::RGB(0x555555))
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xAAAAAA));

    let text_format = Format::new()
        .set_font_size(11.0)
        .set_align(FormatAlign::Left)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let number_format = Format::new()
        .set_font_size(11.0)
        .set_num_format("0.00")
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Report")
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    worksheet.set_column_width(0, NAME_COL_WIDTH)
        .map_err(|e| format!("列幅設定エラー: {}", e))?;
    worksheet.set_column_width(1, VALUE_COL_WIDTH)
        .map_err(|e| format!("列幅設定エラー: {}", e))?;
    worksheet.set_column_width(2, UNIT_COL_WIDTH)
        .map_err(|e| format!("列幅設定エラー: {}", e))?;

    let mut row: u32 = 0;

    worksheet.write_string_with_format(row, 0, title, &title_format)
        .map_err(|e| format!("タイトル書き込みエラー: {}", e))?;
    row += 1;
    if let Some(stamp) = generated_at {
        worksheet.write_string(row, 0, stamp)
            .map_err(|e| format!("日時書き込みエラー: {}", e))?;
        row += 1;
    }
    row += 1;

    // 入力食材
    worksheet.write_string_with_format(row, 0, INPUT_FOODS_HEADING, &heading_format)
        .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
    row += 1;
    worksheet.write_string_with_format(row, 0, "Ingredient", &header_format)
        .map_err(|e| format!("ヘッダ書き込みエラー: {}", e))?;
    worksheet.write_string_with_format(row, 1, "Quantity", &header_format)
        .map_err(|e| format!("ヘッダ書き込みエラー: {}", e))?;
    row += 1;
    for ingredient in recipe {
        worksheet.write_string_with_format(row, 0, &ingredient.name, &text_format)
            .map_err(|e| format!("食材書き込みエラー: {}", e))?;
        worksheet.write_string_with_format(row, 1, &ingredient.quantity, &text_format)
            .map_err(|e| format!("分量書き込みエラー: {}", e))?;
        row += 1;
    }
    row += 1;

    // 栄養素合計
    worksheet.write_string_with_format(row, 0, TOTAL_HEADING, &heading_format)
        .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
    row += 1;
    for (col, header) in ["Nutrient", "Quantity", "Unit"].iter().enumerate() {
        worksheet.write_string_with_format(row, col as u16, *header, &header_format)
            .map_err(|e| format!("ヘッダ書き込みエラー: {}", e))?;
    }
    row += 1;
    for report_row in report_rows(total) {
        worksheet.write_string_with_format(row, 0, report_row.label, &text_format)
            .map_err(|e| format!("栄養素書き込みエラー: {}", e))?;
        worksheet.write_number_with_format(row, 1, report_row.quantity, &number_format)
            .map_err(|e| format!("数量書き込みエラー: {}", e))?;
        worksheet.write_string_with_format(row, 2, &report_row.unit, &text_format)
            .map_err(|e| format!("単位書き込みエラー: {}", e))?;
        row += 1;
    }

    // バッファに書き出し
    workbook.save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NutrientSample;

    #[test]
    fn test_generate_report_buffer_is_xlsx() {
        let mut recipe = Recipe::new();
        recipe.insert("apple", "1 medium");
        let mut total = NutritionTotal::new();
        total.add_sample(&NutrientSample { code: "ENERC_KCAL".into(), quantity: 95.0, unit: "kcal".into() });

        let buffer = generate_report_buffer(&recipe, &total, "Nutrition Report", Some("2026-01-01 00:00")).unwrap();
        // xlsx は zip コンテナ
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn test_generate_report_buffer_empty() {
        let buffer = generate_report_buffer(&Recipe::new(), &NutritionTotal::new(), "Empty", None).unwrap();
        assert!(!buffer.is_empty());
    }
}
