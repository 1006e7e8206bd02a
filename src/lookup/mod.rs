//! 栄養データ検索
//!
//! 検索サービスは `NutritionLookup` トレイトの背後に置き、
//! 本番実装は Edamam の HTTP クライアント。

mod edamam;

pub use edamam::EdamamClient;

use crate::error::Result;
use nutrition_calc_common::LookupResponse;
use std::future::Future;

pub trait NutritionLookup {
    /// クエリ（"<分量> <食材名>"）1件分の栄養データを取得
    fn lookup(&self, query: &str) -> impl Future<Output = Result<LookupResponse>> + Send;
}
