//! 栄養計算の型定義
//!
//! CLIとデスクトップで共有される型:
//! - Recipe: 食材名→分量の順序付きマップ
//! - NutrientSample: 検索APIが返す栄養素1件
//! - NutritionTotal: レシピ全体の栄養素合計
//! - LookupResponse: 検索APIレスポンス（必要な部分のみ）

use crate::error::{Error, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 食材1件（名前と分量）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub name: String,
    /// 分量はパースせずそのまま検索クエリに渡す
    pub quantity: String,
}

impl Ingredient {
    /// 検索クエリ `"<分量> <食材名>"` を組み立てる
    pub fn query(&self) -> String {
        format!("{} {}", self.quantity, self.name)
    }
}

/// レシピ（食材名→分量）
///
/// 追加順を保持する。同じ食材名を再度追加した場合は位置を変えずに分量を上書きする。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recipe {
    entries: Vec<Ingredient>,
}

impl Recipe {
    pub fn new() -> Self {
        Self::default()
    }

    /// 食材を追加（既存の食材名なら分量を上書き）
    pub fn insert(&mut self, name: impl Into<String>, quantity: impl Into<String>) {
        let name = name.into();
        let quantity = quantity.into();
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => existing.quantity = quantity,
            None => self.entries.push(Ingredient { name, quantity }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.quantity.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ingredient> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `name=quantity` 形式の文字列を解析
    pub fn parse_pair(pair: &str) -> Result<(String, String)> {
        let (name, quantity) = pair
            .split_once('=')
            .ok_or_else(|| Error::Parse(format!("expected name=quantity, got '{}'", pair)))?;
        let name = name.trim();
        let quantity = quantity.trim();
        if name.is_empty() || quantity.is_empty() {
            return Err(Error::Parse(format!("empty name or quantity in '{}'", pair)));
        }
        Ok((name.to_string(), quantity.to_string()))
    }

    /// JSONオブジェクト文字列から読み込み（キー順を保持）
    pub fn from_json(json: &str) -> Result<Self> {
        let recipe: Self = serde_json::from_str(json)?;
        Ok(recipe)
    }
}

impl<'a> IntoIterator for &'a Recipe {
    type Item = &'a Ingredient;
    type IntoIter = std::slice::Iter<'a, Ingredient>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for Recipe {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, &entry.quantity)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Recipe {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct RecipeVisitor;

        impl<'de> Visitor<'de> for RecipeVisitor {
            type Value = Recipe;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping ingredient names to quantities")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Recipe, A::Error> {
                let mut recipe = Recipe::new();
                while let Some((name, quantity)) = access.next_entry::<String, String>()? {
                    recipe.insert(name, quantity);
                }
                Ok(recipe)
            }
        }

        deserializer.deserialize_map(RecipeVisitor)
    }
}

/// 検索APIレスポンス中の栄養素1件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutrientSample {
    #[serde(skip)]
    pub code: String,
    pub quantity: f64,
    pub unit: String,
}

/// 合計値1件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientRecord {
    pub quantity: f64,
    pub unit: String,
}

/// 栄養素合計（栄養素コード→数量・単位）
///
/// 単位は最初にそのコードを含んだレスポンスの値で固定され、以降変更されない。
/// 数量は単位が異なっても数値としてそのまま加算する。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NutritionTotal {
    entries: Vec<(String, NutrientRecord)>,
}

impl NutritionTotal {
    pub fn new() -> Self {
        Self::default()
    }

    /// サンプル1件を加算
    pub fn add_sample(&mut self, sample: &NutrientSample) {
        let index = match self.entries.iter().position(|(code, _)| *code == sample.code) {
            Some(index) => index,
            None => {
                self.entries.push((
                    sample.code.clone(),
                    NutrientRecord { quantity: 0.0, unit: sample.unit.clone() },
                ));
                self.entries.len() - 1
            }
        };
        self.entries[index].1.quantity += sample.quantity;
    }

    /// レスポンス1件分を加算（totalNutrientsが無ければ何もしない）
    pub fn absorb(&mut self, response: &LookupResponse) {
        for sample in response.samples() {
            self.add_sample(sample);
        }
    }

    /// 複数レスポンスを順に加算した合計
    pub fn from_responses<'a, I>(responses: I) -> Self
    where
        I: IntoIterator<Item = &'a LookupResponse>,
    {
        let mut total = Self::new();
        for response in responses {
            total.absorb(response);
        }
        total
    }

    pub fn get(&self, code: &str) -> Option<&NutrientRecord> {
        self.entries
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, record)| record)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NutrientRecord)> {
        self.entries.iter().map(|(code, record)| (code.as_str(), record))
    }

    pub fn codes(&self) -> Vec<&str> {
        self.entries.iter().map(|(code, _)| code.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for NutritionTotal {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (code, record) in &self.entries {
            map.serialize_entry(code, record)?;
        }
        map.end()
    }
}

/// 検索APIレスポンス
///
/// `totalNutrients` 以外のフィールドは無視する。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupResponse {
    total_nutrients: Option<Vec<NutrientSample>>,
}

impl LookupResponse {
    pub fn new(samples: Vec<NutrientSample>) -> Self {
        Self { total_nutrients: Some(samples) }
    }

    /// `totalNutrients` を含まないレスポンス
    pub fn without_nutrients() -> Self {
        Self { total_nutrients: None }
    }

    pub fn has_nutrients(&self) -> bool {
        self.total_nutrients.is_some()
    }

    pub fn samples(&self) -> &[NutrientSample] {
        self.total_nutrients.as_deref().unwrap_or(&[])
    }

    /// JSON文字列からパース
    ///
    /// `totalNutrients` はドキュメント上のキー順のまま読む。
    /// レスポンスがオブジェクトでない場合、または栄養素エントリの型が不正な場合はエラー。
    pub fn from_json(json: &str) -> Result<Self> {
        let body: ResponseBody = serde_json::from_str(json)?;
        Ok(Self {
            total_nutrients: body.total_nutrients.map(|samples| samples.0),
        })
    }
}

/// レスポンス本文（`totalNutrients` 以外は読み捨てる）
#[derive(Deserialize)]
struct ResponseBody {
    #[serde(rename = "totalNutrients", default)]
    total_nutrients: Option<OrderedSamples>,
}

/// JSONオブジェクトのキー順を保ったまま栄養素を読むためのラッパー
struct OrderedSamples(Vec<NutrientSample>);

impl<'de> Deserialize<'de> for OrderedSamples {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct SamplesVisitor;

        impl<'de> Visitor<'de> for SamplesVisitor {
            type Value = OrderedSamples;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping nutrient codes to {quantity, unit}")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<OrderedSamples, A::Error> {
                let mut samples = Vec::new();
                while let Some((code, mut sample)) = access.next_entry::<String, NutrientSample>()? {
                    sample.code = code;
                    samples.push(sample);
                }
                Ok(OrderedSamples(samples))
            }
        }

        deserializer.deserialize_map(SamplesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(code: &str, quantity: f64, unit: &str) -> NutrientSample {
        NutrientSample { code: code.into(), quantity, unit: unit.into() }
    }

    #[test]
    fn test_ingredient_query() {
        let ingredient = Ingredient { name: "apple".into(), quantity: "1 medium".into() };
        assert_eq!(ingredient.query(), "1 medium apple");
    }

    #[test]
    fn test_recipe_keeps_insertion_order() {
        let mut recipe = Recipe::new();
        recipe.insert("rice", "1 cup");
        recipe.insert("egg", "2");
        recipe.insert("butter", "10 g");
        let names: Vec<&str> = recipe.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["rice", "egg", "butter"]);
    }

    #[test]
    fn test_recipe_reinsert_overwrites_in_place() {
        let mut recipe = Recipe::new();
        recipe.insert("rice", "1 cup");
        recipe.insert("egg", "2");
        recipe.insert("rice", "2 cups");
        assert_eq!(recipe.len(), 2);
        assert_eq!(recipe.get("rice"), Some("2 cups"));
        assert_eq!(recipe.iter().next().map(|i| i.name.as_str()), Some("rice"));
    }

    #[test]
    fn test_recipe_json_preserves_document_order() {
        let recipe = Recipe::from_json(r#"{"zucchini": "1", "apple": "2 large", "milk": "1 cup"}"#).unwrap();
        let names: Vec<&str> = recipe.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["zucchini", "apple", "milk"]);

        let json = serde_json::to_string(&recipe).unwrap();
        assert_eq!(json, r#"{"zucchini":"1","apple":"2 large","milk":"1 cup"}"#);
    }

    #[test]
    fn test_recipe_json_rejects_non_string_quantity() {
        assert!(Recipe::from_json(r#"{"apple": 1}"#).is_err());
    }

    #[test]
    fn test_parse_pair() {
        let (name, quantity) = Recipe::parse_pair(" olive oil = 2 tbsp ").unwrap();
        assert_eq!(name, "olive oil");
        assert_eq!(quantity, "2 tbsp");

        assert!(Recipe::parse_pair("apple").is_err());
        assert!(Recipe::parse_pair("apple=").is_err());
        assert!(Recipe::parse_pair("=1 cup").is_err());
    }

    #[test]
    fn test_first_unit_wins() {
        let mut total = NutritionTotal::new();
        total.add_sample(&sample("NA", 100.0, "mg"));
        total.add_sample(&sample("NA", 0.5, "g"));
        let record = total.get("NA").unwrap();
        assert_eq!(record.unit, "mg");
        assert!((record.quantity - 100.5).abs() < 1e-9);
    }

    #[test]
    fn test_total_keeps_first_seen_order() {
        let first = LookupResponse::new(vec![sample("PROCNT", 1.0, "g"), sample("FAT", 2.0, "g")]);
        let second = LookupResponse::new(vec![sample("WATER", 3.0, "g"), sample("PROCNT", 4.0, "g")]);
        let total = NutritionTotal::from_responses([&first, &second]);
        assert_eq!(total.codes(), vec!["PROCNT", "FAT", "WATER"]);
        assert_eq!(total.get("PROCNT").unwrap().quantity, 5.0);
    }

    #[test]
    fn test_response_without_nutrients_contributes_nothing() {
        let mut total = NutritionTotal::new();
        total.absorb(&LookupResponse::new(vec![sample("FAT", 2.0, "g")]));
        total.absorb(&LookupResponse::without_nutrients());
        assert_eq!(total.len(), 1);
        assert_eq!(total.get("FAT").unwrap().quantity, 2.0);
    }

    #[test]
    fn test_response_from_json_defaults_missing_fields() {
        let response = LookupResponse::from_json(
            r#"{"calories": 10, "totalNutrients": {"SUGAR": {"unit": "g"}, "K": {"quantity": 12.5}}}"#,
        )
        .unwrap();
        let samples = response.samples();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0], sample("SUGAR", 0.0, "g"));
        assert_eq!(samples[1], sample("K", 12.5, ""));
    }

    #[test]
    fn test_response_from_json_keeps_document_order() {
        let response = LookupResponse::from_json(
            r#"{"totalNutrients": {
                "PROCNT": {"quantity": 12.6, "unit": "g"},
                "CHOLE": {"quantity": 372.0, "unit": "mg"},
                "ENERC_KCAL": {"quantity": 143.0, "unit": "kcal"},
                "CA": {"quantity": 56.0, "unit": "mg"}
            }}"#,
        )
        .unwrap();
        let codes: Vec<&str> = response.samples().iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["PROCNT", "CHOLE", "ENERC_KCAL", "CA"]);

        let total = NutritionTotal::from_responses([&response]);
        assert_eq!(total.codes(), vec!["PROCNT", "CHOLE", "ENERC_KCAL", "CA"]);
    }

    #[test]
    fn test_response_from_json_null_total_nutrients() {
        let response = LookupResponse::from_json(r#"{"totalNutrients": null}"#).unwrap();
        assert!(!response.has_nutrients());
    }

    #[test]
    fn test_response_from_json_without_total_nutrients() {
        let response = LookupResponse::from_json(r#"{"uri": "x", "calories": 0}"#).unwrap();
        assert!(!response.has_nutrients());
        assert!(response.samples().is_empty());
    }

    #[test]
    fn test_response_from_json_rejects_non_object() {
        assert!(matches!(LookupResponse::from_json("[1, 2]"), Err(Error::Json(_))));
        assert!(matches!(LookupResponse::from_json("\"ok\""), Err(Error::Json(_))));
        assert!(matches!(LookupResponse::from_json("not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_response_from_json_rejects_bad_quantity() {
        let result = LookupResponse::from_json(r#"{"totalNutrients": {"FAT": {"quantity": "lots", "unit": "g"}}}"#);
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_total_serializes_as_ordered_object() {
        let mut total = NutritionTotal::new();
        total.add_sample(&sample("ENERC_KCAL", 200.0, "kcal"));
        total.add_sample(&sample("CA", 12.0, "mg"));
        let json = serde_json::to_string(&total).unwrap();
        assert_eq!(
            json,
            r#"{"ENERC_KCAL":{"quantity":200.0,"unit":"kcal"},"CA":{"quantity":12.0,"unit":"mg"}}"#
        );
    }
}
