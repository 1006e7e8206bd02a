use nutrition_calc::cli::ReportFormat;
use nutrition_calc_common::{NutritionTotal, Session};

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub session: Session,
    pub ingredient_input: String,
    pub quantity_input: String,
    pub calculating: bool,
    pub status: String,
    pub save_format: ReportFormat,
}

/// ワーカースレッドからの通知（集計は全件揃ってから1回だけ届く）
pub enum UiMessage {
    CalcDone(Result<NutritionTotal, String>),
}
