//! Nutrition Calculator
//!
//! 食材ごとに栄養データ検索APIへ問い合わせ、レシピ全体の栄養素を合計する。

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod lookup;
pub mod shell;
