//! 対話式の栄養計算
//!
//! ようこそ → 食材入力（入力履歴を表示）→ 結果 の3画面をターミナルで順に進む。
//! 画面間の状態は `Session` に持たせる。

use crate::aggregator::aggregate_with_progress;
use crate::cli::ReportFormat;
use crate::error::{NutritionError, Result};
use crate::export::export_report;
use crate::lookup::NutritionLookup;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};
use nutrition_calc_common::{render_text, Recipe, Session};
use std::path::Path;

/// 食材入力画面での操作
#[derive(Debug, PartialEq, Eq)]
pub enum EntryAction {
    /// 食材名を入力
    Ingredient(String),
    /// 入力を終えて計算
    Done,
}

/// 食材名プロンプトの入力を解釈（空欄か "done" で終了）
pub fn parse_entry_input(input: &str) -> EntryAction {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("done") {
        EntryAction::Done
    } else {
        EntryAction::Ingredient(trimmed.to_string())
    }
}

/// 入力履歴の表
pub fn format_history(recipe: &Recipe) -> String {
    let name_width = recipe
        .iter()
        .map(|i| i.name.chars().count())
        .chain(std::iter::once("Ingredient Name".len()))
        .max()
        .unwrap_or(0);

    let mut table = format!("  {:<width$}  {}\n", "Ingredient Name", "Quantity", width = name_width);
    for ingredient in recipe {
        let pad = name_width - ingredient.name.chars().count();
        table.push_str(&format!(
            "  {}{}  {}\n",
            ingredient.name,
            " ".repeat(pad),
            ingredient.quantity
        ));
    }
    table
}

/// 対話式で栄養計算を実行
pub async fn run_interactive<L: NutritionLookup>(
    lookup: &L,
    output: Option<&Path>,
    format: ReportFormat,
) -> Result<()> {
    let mut session = Session::new();

    // ようこそ画面
    println!("🥗 Welcome to Nutrition Calculator!\n");
    let go = Confirm::new()
        .with_prompt("Let's Calculate")
        .default(true)
        .interact()
        .map_err(|e| NutritionError::CliExecution(e.to_string()))?;
    if !go {
        return Ok(());
    }
    session.start()?;

    // 食材入力画面
    println!("---");
    println!("食材と分量を入力してください（食材名を空欄か done で計算開始）");
    println!("---\n");
    loop {
        let name = match prompt_ingredient()? {
            EntryAction::Done => break,
            EntryAction::Ingredient(name) => name,
        };
        let quantity: String = Input::new()
            .with_prompt(format!("Quantity of {}", name))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| NutritionError::CliExecution(e.to_string()))?;

        if session.add_ingredient(&name, &quantity)? {
            println!("\nIngredient History:");
            print!("{}", format_history(session.recipe()));
            println!();
        } else {
            println!("  → 分量が空のためスキップ\n");
        }
    }

    // 集計
    let progress = ProgressBar::new(session.recipe().len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{pos}/{len}] {msg}")
            .map_err(|e| NutritionError::CliExecution(e.to_string()))?,
    );
    let total = aggregate_with_progress(session.recipe(), lookup, &progress).await;
    progress.finish_and_clear();
    session.complete(total?)?;

    // 結果画面
    if let Some(total) = session.total() {
        println!("\n{}", render_text(session.recipe(), total));
        if let Some(output) = output {
            let path = export_report(session.recipe(), total, format, output)?;
            println!("✔ レポートを保存: {}", path.display());
        }
    }

    Ok(())
}

fn prompt_ingredient() -> Result<EntryAction> {
    let input: String = Input::new()
        .with_prompt("Ingredient")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| NutritionError::CliExecution(e.to_string()))?;
    Ok(parse_entry_input(&input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entry_input() {
        assert_eq!(parse_entry_input(""), EntryAction::Done);
        assert_eq!(parse_entry_input("  "), EntryAction::Done);
        assert_eq!(parse_entry_input("DONE"), EntryAction::Done);
        assert_eq!(parse_entry_input(" rolled oats "), EntryAction::Ingredient("rolled oats".into()));
    }

    #[test]
    fn test_format_history() {
        let mut recipe = Recipe::new();
        recipe.insert("apple", "1 medium");
        recipe.insert("whole wheat bread", "2 slices");
        let table = format_history(&recipe);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "  Ingredient Name    Quantity");
        assert_eq!(lines[1], "  apple              1 medium");
        assert_eq!(lines[2], "  whole wheat bread  2 slices");
    }

    #[test]
    fn test_format_history_empty() {
        assert_eq!(format_history(&Recipe::new()), "  Ingredient Name  Quantity\n");
    }
}
