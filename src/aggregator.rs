//! レシピ全体の栄養素集計
//!
//! 食材ごとに1回ずつ順番に検索し、同じ栄養素コードの数量を合算する。
//! `aggregate` は1件でも検索に失敗すれば全体を失敗とする。
//! `aggregate_partial` は失敗した食材を除外して集計を続ける。

use crate::error::{NutritionError, Result};
use crate::lookup::NutritionLookup;
use indicatif::ProgressBar;
use nutrition_calc_common::{Ingredient, LookupResponse, NutritionTotal, Recipe};

/// 食材1件の検索結果
#[derive(Debug)]
pub struct IngredientOutcome {
    pub ingredient: Ingredient,
    pub result: Result<LookupResponse>,
}

/// 失敗を除外した集計結果
#[derive(Debug, Default)]
pub struct PartialTotal {
    pub total: NutritionTotal,
    pub failures: Vec<(Ingredient, NutritionError)>,
}

impl PartialTotal {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub async fn aggregate<L: NutritionLookup>(recipe: &Recipe, lookup: &L) -> Result<NutritionTotal> {
    aggregate_with_progress(recipe, lookup, &ProgressBar::hidden()).await
}

/// 全件成功時のみ合計を返す
pub async fn aggregate_with_progress<L: NutritionLookup>(
    recipe: &Recipe,
    lookup: &L,
    progress: &ProgressBar,
) -> Result<NutritionTotal> {
    tracing::info!(ingredients = recipe.len(), "aggregating recipe nutrition");

    let mut total = NutritionTotal::new();
    for ingredient in recipe {
        progress.set_message(ingredient.name.clone());
        let response = lookup.lookup(&ingredient.query()).await?;
        absorb(&mut total, ingredient, &response);
        progress.inc(1);
    }

    tracing::info!(nutrients = total.len(), "aggregation complete");
    Ok(total)
}

/// 食材ごとの成功/失敗を返す（失敗しても残りの食材を検索する）
pub async fn aggregate_each<L: NutritionLookup>(
    recipe: &Recipe,
    lookup: &L,
    progress: &ProgressBar,
) -> Vec<IngredientOutcome> {
    let mut outcomes = Vec::with_capacity(recipe.len());
    for ingredient in recipe {
        progress.set_message(ingredient.name.clone());
        let result = lookup.lookup(&ingredient.query()).await;
        if let Err(e) = &result {
            tracing::warn!(ingredient = %ingredient.name, error = %e, "lookup failed");
        }
        outcomes.push(IngredientOutcome {
            ingredient: ingredient.clone(),
            result,
        });
        progress.inc(1);
    }
    outcomes
}

/// 成功した食材のみで集計し、失敗を併せて返す
pub async fn aggregate_partial<L: NutritionLookup>(
    recipe: &Recipe,
    lookup: &L,
    progress: &ProgressBar,
) -> PartialTotal {
    let mut partial = PartialTotal::default();
    for outcome in aggregate_each(recipe, lookup, progress).await {
        match outcome.result {
            Ok(response) => absorb(&mut partial.total, &outcome.ingredient, &response),
            Err(e) => partial.failures.push((outcome.ingredient, e)),
        }
    }
    partial
}

fn absorb(total: &mut NutritionTotal, ingredient: &Ingredient, response: &LookupResponse) {
    if !response.has_nutrients() {
        tracing::debug!(ingredient = %ingredient.name, "response has no totalNutrients; skipped");
        return;
    }
    for sample in response.samples() {
        if let Some(existing) = total.get(&sample.code) {
            if existing.unit != sample.unit {
                tracing::debug!(
                    code = %sample.code,
                    kept = %existing.unit,
                    reported = %sample.unit,
                    "unit differs from first response; summing raw quantity"
                );
            }
        }
    }
    total.absorb(response);
}
