//! 画面遷移とセッション状態
//!
//! ようこそ → 食材入力 → 結果 の一方向の遷移のみ。
//! 各画面は渡されたSessionを読み書きし、グローバル状態は持たない。

use crate::error::{Error, Result};
use crate::types::{Recipe, NutritionTotal};

/// 画面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Welcome,
    Entry,
    Result,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Welcome => "Welcome",
            Page::Entry => "Ingredients",
            Page::Result => "Result",
        }
    }
}

/// 1回の計算セッション
#[derive(Debug, Clone, Default)]
pub struct Session {
    page: Page,
    recipe: Recipe,
    total: Option<NutritionTotal>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn total(&self) -> Option<&NutritionTotal> {
        self.total.as_ref()
    }

    /// ようこそ画面 → 食材入力画面
    pub fn start(&mut self) -> Result<()> {
        self.expect_page(Page::Welcome)?;
        self.page = Page::Entry;
        Ok(())
    }

    /// 食材を追加
    ///
    /// 前後の空白を除去し、名前か分量が空なら何もせず `false` を返す。
    pub fn add_ingredient(&mut self, name: &str, quantity: &str) -> Result<bool> {
        self.expect_page(Page::Entry)?;
        let name = name.trim();
        let quantity = quantity.trim();
        if name.is_empty() || quantity.is_empty() {
            return Ok(false);
        }
        self.recipe.insert(name, quantity);
        Ok(true)
    }

    /// 食材入力画面 → 結果画面
    pub fn complete(&mut self, total: NutritionTotal) -> Result<()> {
        self.expect_page(Page::Entry)?;
        self.total = Some(total);
        self.page = Page::Result;
        Ok(())
    }

    fn expect_page(&self, expected: Page) -> Result<()> {
        if self.page == expected {
            Ok(())
        } else {
            Err(Error::Navigation(format!(
                "expected {} page, currently on {} page",
                expected.title(),
                self.page.title()
            )))
        }
    }
}
