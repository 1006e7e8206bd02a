use thiserror::Error;

#[derive(Error, Debug)]
pub enum NutritionError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIの認証情報が設定されていません。環境変数 EDAMAM_APP_ID / EDAMAM_APP_KEY か `nutrition-calc config --set-app-id ID --set-app-key KEY` で設定してください")]
    MissingCredentials,

    #[error("栄養データの取得に失敗 ({query}): {reason}")]
    LookupFailure { query: String, reason: String },

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] nutrition_calc_common::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("レシピが不正: {0}")]
    InvalidRecipe(String),

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),
}

impl NutritionError {
    pub fn lookup(query: &str, reason: impl Into<String>) -> Self {
        NutritionError::LookupFailure {
            query: query.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NutritionError>;
