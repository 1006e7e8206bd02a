use crate::error::{NutritionError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "https://api.edamam.com/api/nutrition-data";

const ENV_APP_ID: &str = "EDAMAM_APP_ID";
const ENV_APP_KEY: &str = "EDAMAM_APP_KEY";
const ENV_API_URL: &str = "EDAMAM_API_URL";

/// 検索APIの認証情報
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub app_id: String,
    pub app_key: String,
}

// app_key はログに出さない
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("app_key", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub app_id: Option<String>,
    pub app_key: Option<String>,
    pub api_url: String,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_id: None,
            app_key: None,
            api_url: DEFAULT_API_URL.into(),
            timeout_seconds: 30,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| NutritionError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("nutrition-calc").join("config.json"))
    }

    /// 認証情報を取得（環境変数を優先）
    pub fn credentials(&self) -> Result<Credentials> {
        let app_id = env_or(ENV_APP_ID, self.app_id.as_deref());
        let app_key = env_or(ENV_APP_KEY, self.app_key.as_deref());

        match (app_id, app_key) {
            (Some(app_id), Some(app_key)) => Ok(Credentials { app_id, app_key }),
            _ => Err(NutritionError::MissingCredentials),
        }
    }

    /// APIのURL（環境変数 EDAMAM_API_URL で上書き可能）
    pub fn api_url(&self) -> String {
        env_or(ENV_API_URL, Some(&self.api_url)).unwrap_or_else(|| DEFAULT_API_URL.into())
    }

    pub fn set_app_id(&mut self, app_id: String) {
        self.app_id = Some(app_id);
    }

    pub fn set_app_key(&mut self, app_key: String) {
        self.app_key = Some(app_key);
    }
}

fn env_or(name: &str, fallback: Option<&str>) -> Option<String> {
    let non_blank = |v: &str| {
        let v = v.trim();
        (!v.is_empty()).then(|| v.to_string())
    };
    std::env::var(name)
        .ok()
        .and_then(|v| non_blank(&v))
        .or_else(|| fallback.and_then(non_blank))
}
