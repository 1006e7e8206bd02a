//! Edamam Nutrition Analysis API クライアント

use super::NutritionLookup;
use crate::config::{Config, Credentials};
use crate::error::{NutritionError, Result};
use nutrition_calc_common::LookupResponse;
use std::time::Duration;

pub struct EdamamClient {
    http: reqwest::Client,
    api_url: String,
    credentials: Credentials,
}

impl EdamamClient {
    pub fn new(api_url: impl Into<String>, credentials: Credentials, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NutritionError::Config(format!("HTTPクライアント初期化エラー: {}", e)))?;
        Ok(Self {
            http,
            api_url: api_url.into(),
            credentials,
        })
    }

    /// 設定から生成（認証情報が無ければエラー）
    pub fn from_config(config: &Config) -> Result<Self> {
        let credentials = config.credentials()?;
        Self::new(
            config.api_url(),
            credentials,
            Duration::from_secs(config.timeout_seconds),
        )
    }
}

impl NutritionLookup for EdamamClient {
    async fn lookup(&self, query: &str) -> Result<LookupResponse> {
        tracing::debug!(query, url = %self.api_url, "nutrition lookup request");

        let response = self
            .http
            .get(&self.api_url)
            .query(&[
                ("app_id", self.credentials.app_id.as_str()),
                ("app_key", self.credentials.app_key.as_str()),
                ("ingr", query),
            ])
            .send()
            .await
            .map_err(|e| {
                let reason = if e.is_timeout() {
                    "タイムアウト".to_string()
                } else {
                    format!("通信エラー: {}", e)
                };
                NutritionError::lookup(query, reason)
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| NutritionError::lookup(query, format!("レスポンス読み込みエラー: {}", e)))?;

        if !status.is_success() {
            return Err(NutritionError::lookup(
                query,
                format!("HTTP {}: {}", status, body.trim()),
            ));
        }

        tracing::debug!(query, status = status.as_u16(), bytes = body.len(), "nutrition lookup response");

        LookupResponse::from_json(&body)
            .map_err(|e| NutritionError::lookup(query, format!("レスポンス解析エラー: {}", e)))
    }
}
