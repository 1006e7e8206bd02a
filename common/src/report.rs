//! 結果レポートの整形
//!
//! 入力食材の一覧と、ラベルテーブルにある栄養素のみの合計表を出力する。

use crate::nutrients::label_for;
use crate::types::{NutritionTotal, Recipe};

pub const INPUT_FOODS_HEADING: &str = "Input Foods:";
pub const TOTAL_HEADING: &str = "Total Nutrition per Serving:";

/// レポート1行
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub code: String,
    pub label: &'static str,
    pub quantity: f64,
    pub unit: String,
}

impl ReportRow {
    /// 小数2桁 + 単位
    pub fn amount(&self) -> String {
        format_amount(self.quantity, &self.unit)
    }
}

pub fn format_amount(quantity: f64, unit: &str) -> String {
    if unit.is_empty() {
        format!("{:.2}", quantity)
    } else {
        format!("{:.2} {}", quantity, unit)
    }
}

/// 合計から表示対象の行を取り出す（合計の並び順を維持）
pub fn report_rows(total: &NutritionTotal) -> Vec<ReportRow> {
    total
        .iter()
        .filter_map(|(code, record)| {
            label_for(code).map(|label| ReportRow {
                code: code.to_string(),
                label,
                quantity: record.quantity,
                unit: record.unit.clone(),
            })
        })
        .collect()
}

/// プレーンテキストのレポート
pub fn render_text(recipe: &Recipe, total: &NutritionTotal) -> String {
    let rows = report_rows(total);
    let label_width = rows.iter().map(|r| r.label.len()).max().unwrap_or(0);

    let mut text = String::new();
    text.push_str(INPUT_FOODS_HEADING);
    text.push('\n');
    for ingredient in recipe {
        text.push_str(&format!("  {}: {}\n", ingredient.name, ingredient.quantity));
    }
    text.push('\n');
    text.push_str(TOTAL_HEADING);
    text.push('\n');
    for row in &rows {
        text.push_str(&format!("  {:<width$}  {}\n", row.label, row.amount(), width = label_width));
    }
    text
}

/// HTMLのレポート
pub fn render_html(recipe: &Recipe, total: &NutritionTotal) -> String {
    let mut html = format!("<b>{}</b><br><br>", escape_html(INPUT_FOODS_HEADING));
    for ingredient in recipe {
        html.push_str(&format!(
            "{}: {}<br>",
            escape_html(&ingredient.name),
            escape_html(&ingredient.quantity)
        ));
    }
    html.push_str(&format!("<br><b>{}</b><br><br>", escape_html(TOTAL_HEADING)));
    html.push_str("<table border=\"1\" cellpadding=\"5\">");
    for row in report_rows(total) {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>",
            escape_html(row.label),
            escape_html(&row.amount())
        ));
    }
    html.push_str("</table>");
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NutrientSample;

    fn sample_total() -> NutritionTotal {
        let mut total = NutritionTotal::new();
        for (code, quantity, unit) in [
            ("ENERC_KCAL", 200.0, "kcal"),
            ("FOLAC", 3.0, "µg"),
            ("PROCNT", 1.234, "g"),
        ] {
            total.add_sample(&NutrientSample { code: code.into(), quantity, unit: unit.into() });
        }
        total
    }

    fn sample_recipe() -> Recipe {
        let mut recipe = Recipe::new();
        recipe.insert("apple", "1 medium");
        recipe.insert("banana", "1 medium");
        recipe
    }

    #[test]
    fn test_rows_skip_unlabelled_codes() {
        let rows = report_rows(&sample_total());
        let codes: Vec<&str> = rows.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["ENERC_KCAL", "PROCNT"]);
        assert_eq!(rows[0].label, "Calories");
        assert_eq!(rows[1].amount(), "1.23 g");
    }

    #[test]
    fn test_format_amount_without_unit() {
        assert_eq!(format_amount(0.256, ""), "0.26");
        assert_eq!(format_amount(95.0, "kcal"), "95.00 kcal");
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&sample_recipe(), &sample_total());
        assert!(text.starts_with("Input Foods:\n  apple: 1 medium\n  banana: 1 medium\n"));
        assert!(text.contains("Total Nutrition per Serving:"));
        assert!(text.contains("Calories  200.00 kcal"));
        assert!(text.contains("Protein   1.23 g"));
        assert!(!text.contains("FOLAC"));
    }

    #[test]
    fn test_render_html() {
        let html = render_html(&sample_recipe(), &sample_total());
        assert!(html.starts_with("<b>Input Foods:</b><br><br>apple: 1 medium<br>"));
        assert!(html.contains("<tr><td>Calories</td><td>200.00 kcal</td></tr>"));
        assert!(html.ends_with("</table>"));
        assert!(!html.contains("FOLAC"));
    }

    #[test]
    fn test_render_html_escapes_user_text() {
        let mut recipe = Recipe::new();
        recipe.insert("mac & cheese", "<1 cup>");
        let html = render_html(&recipe, &NutritionTotal::new());
        assert!(html.contains("mac &amp; cheese: &lt;1 cup&gt;<br>"));
    }

    #[test]
    fn test_empty_report() {
        let text = render_text(&Recipe::new(), &NutritionTotal::new());
        assert_eq!(text, "Input Foods:\n\nTotal Nutrition per Serving:\n");
    }
}
