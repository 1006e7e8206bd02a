//! 栄養素ラベル定義
//!
//! 栄養素コード（検索APIのスキーマ）から表示名への固定テーブル。
//! テーブルに無いコードはレポートに表示しない。

use std::collections::HashMap;

/// 栄養素ラベル（コード, 表示名）
pub struct NutrientLabel {
    pub code: &'static str,
    pub label: &'static str,
}

/// 表示順のラベルテーブル
pub const NUTRIENT_LABELS: &[NutrientLabel] = &[
    NutrientLabel { code: "ENERC_KCAL", label: "Calories" },
    NutrientLabel { code: "FAT", label: "Total Fat" },
    NutrientLabel { code: "FASAT", label: "Saturated Fat" },
    NutrientLabel { code: "FAMS", label: "Monounsaturated Fat" },
    NutrientLabel { code: "FAPU", label: "Polyunsaturated Fat" },
    NutrientLabel { code: "CHOCDF", label: "Total Carbohydrates" },
    NutrientLabel { code: "FIBTG", label: "Dietary Fiber" },
    NutrientLabel { code: "SUGAR", label: "Sugars" },
    NutrientLabel { code: "PROCNT", label: "Protein" },
    NutrientLabel { code: "CHOLE", label: "Cholesterol" },
    NutrientLabel { code: "NA", label: "Sodium" },
    NutrientLabel { code: "CA", label: "Calcium" },
    NutrientLabel { code: "MG", label: "Magnesium" },
    NutrientLabel { code: "K", label: "Potassium" },
    NutrientLabel { code: "FE", label: "Iron" },
    NutrientLabel { code: "ZN", label: "Zinc" },
    NutrientLabel { code: "P", label: "Phosphorus" },
    NutrientLabel { code: "VITA_RAE", label: "Vitamin A" },
    NutrientLabel { code: "VITC", label: "Vitamin C" },
    NutrientLabel { code: "THIA", label: "Thiamin (Vitamin B1)" },
    NutrientLabel { code: "RIBF", label: "Riboflavin (Vitamin B2)" },
    NutrientLabel { code: "NIA", label: "Niacin (Vitamin B3)" },
    NutrientLabel { code: "VITB6A", label: "Vitamin B6" },
    NutrientLabel { code: "FOLDFE", label: "Folate (Vitamin B9)" },
    NutrientLabel { code: "TOCPHA", label: "Vitamin E" },
    NutrientLabel { code: "VITK1", label: "Vitamin K" },
    NutrientLabel { code: "WATER", label: "Water" },
];

lazy_static::lazy_static! {
    static ref LABEL_INDEX: HashMap<&'static str, &'static str> = NUTRIENT_LABELS
        .iter()
        .map(|entry| (entry.code, entry.label))
        .collect();
}

/// 栄養素コードの表示名を取得（未知のコードはNone）
pub fn label_for(code: &str) -> Option<&'static str> {
    LABEL_INDEX.get(code).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_known_labels() {
        assert_eq!(label_for("ENERC_KCAL"), Some("Calories"));
        assert_eq!(label_for("PROCNT"), Some("Protein"));
        assert_eq!(label_for("FOLDFE"), Some("Folate (Vitamin B9)"));
        assert_eq!(label_for("WATER"), Some("Water"));
    }

    #[test]
    fn test_unknown_label_is_none() {
        assert_eq!(label_for("FOLAC"), None);
        assert_eq!(label_for(""), None);
        assert_eq!(label_for("procnt"), None);
    }

    #[test]
    fn test_every_table_entry_resolves() {
        for entry in NUTRIENT_LABELS {
            assert_eq!(label_for(entry.code), Some(entry.label));
        }
    }

    #[test]
    fn test_codes_are_unique() {
        let codes: HashSet<&str> = NUTRIENT_LABELS.iter().map(|e| e.code).collect();
        assert_eq!(codes.len(), NUTRIENT_LABELS.len());
        assert_eq!(NUTRIENT_LABELS.len(), 27);
    }
}
