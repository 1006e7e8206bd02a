use std::sync::mpsc::{self, Receiver};

use eframe::egui::{self, Color32, RichText};
use eframe::egui::{FontData, FontDefinitions, FontFamily};

use nutrition_calc::aggregator::aggregate;
use nutrition_calc::cli::ReportFormat;
use nutrition_calc::config::Config;
use nutrition_calc::lookup::EdamamClient;
use nutrition_calc_common::{report_rows, NutritionTotal, Page, Recipe};

use crate::io::{default_report_name, save_report};
use crate::model::{AppState, UiMessage};

const ACCENT_PURPLE: Color32 = Color32::from_rgb(128, 0, 128);
const ACCENT_GREEN: Color32 = Color32::from_rgb(46, 125, 50);

#[derive(Default)]
pub struct DesktopApp {
    state: AppState,
    calc_rx: Option<Receiver<UiMessage>>,
}

impl DesktopApp {
    fn go_to_entry(&mut self) {
        if let Err(err) = self.state.session.start() {
            self.state.status = err.to_string();
        }
    }

    fn add_ingredient(&mut self) {
        let name = self.state.ingredient_input.clone();
        let quantity = self.state.quantity_input.clone();
        match self.state.session.add_ingredient(&name, &quantity) {
            Ok(true) => {
                self.state.ingredient_input.clear();
                self.state.quantity_input.clear();
                self.state.status.clear();
            }
            Ok(false) => self.state.status = "Enter both an ingredient and a quantity".to_string(),
            Err(err) => self.state.status = err.to_string(),
        }
    }

    fn run_calculate(&mut self) {
        if self.state.calculating {
            return;
        }
        let recipe = self.state.session.recipe().clone();
        let (tx, rx) = mpsc::channel();
        self.calc_rx = Some(rx);
        self.state.calculating = true;
        self.state.status = "Calculating...".to_string();

        std::thread::spawn(move || {
            let result = calculate_blocking(&recipe).map_err(|err| err.to_string());
            let _ = tx.send(UiMessage::CalcDone(result));
        });
    }

    fn save_report_dialog(&mut self) {
        let Some(total) = self.state.session.total() else {
            return;
        };
        let format = self.state.save_format;
        let Some(path) = rfd::FileDialog::new()
            .add_filter(format.to_string(), &[format.extension()])
            .set_file_name(default_report_name(format))
            .save_file()
        else {
            return;
        };
        match save_report(&path, format, self.state.session.recipe(), total) {
            Ok(written) => self.state.status = format!("Saved {}", written.display()),
            Err(err) => self.state.status = format!("Save failed: {err:#}"),
        }
    }

    fn poll_messages(&mut self) {
        let Some(rx) = &self.calc_rx else {
            return;
        };
        if let Ok(UiMessage::CalcDone(result)) = rx.try_recv() {
            self.calc_rx = None;
            self.state.calculating = false;
            match result {
                Ok(total) => {
                    self.state.status.clear();
                    if let Err(err) = self.state.session.complete(total) {
                        self.state.status = err.to_string();
                    }
                }
                Err(message) => {
                    tracing::warn!(error = %message, "nutrition calculation failed");
                    self.state.status = format!("Calculation failed: {message}");
                }
            }
        }
    }

    fn render_welcome(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.label(RichText::new("Welcome to Nutrition Calculator!").size(40.0).color(Color32::BLACK));
            ui.add_space(24.0);
            let button = egui::Button::new(RichText::new("Let's Calculate").size(20.0))
                .fill(Color32::LIGHT_GREEN);
            if ui.add(button).clicked() {
                self.go_to_entry();
            }
        });
    }

    fn render_entry(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Enter Ingredient:").size(16.0).color(ACCENT_PURPLE));
        ui.add_enabled(
            !self.state.calculating,
            egui::TextEdit::singleline(&mut self.state.ingredient_input),
        );
        ui.label(RichText::new("Enter Quantity:").size(16.0).color(ACCENT_PURPLE));
        let quantity = ui.add_enabled(
            !self.state.calculating,
            egui::TextEdit::singleline(&mut self.state.quantity_input),
        );
        let submitted = quantity.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let add = egui::Button::new(RichText::new("Add Ingredient").size(16.0)).fill(Color32::LIGHT_BLUE);
            if ui.add_enabled(!self.state.calculating, add).clicked() || submitted {
                self.add_ingredient();
            }
            let calc = egui::Button::new(RichText::new("Calculate Nutrition").size(16.0)).fill(Color32::LIGHT_GREEN);
            if ui.add_enabled(!self.state.calculating, calc).clicked() {
                self.run_calculate();
            }
            if self.state.calculating {
                ui.spinner();
            }
        });

        ui.add_space(12.0);
        ui.label(RichText::new("Ingredient History:").size(16.0).color(ACCENT_PURPLE));
        render_history(ui, self.state.session.recipe());
    }

    fn render_result(&mut self, ui: &mut egui::Ui) {
        let Some(total) = self.state.session.total() else {
            return;
        };
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("Total Nutrition per Serving:")
                    .size(24.0)
                    .strong()
                    .color(ACCENT_GREEN),
            );
        });
        ui.separator();

        egui::ScrollArea::vertical().auto_shrink([false, true]).show(ui, |ui| {
            ui.label(RichText::new("Input Foods:").strong());
            for ingredient in self.state.session.recipe() {
                ui.label(format!("{}: {}", ingredient.name, ingredient.quantity));
            }
            ui.add_space(12.0);
            render_totals(ui, total);
        });

        ui.separator();
        ui.horizontal(|ui| {
            ui.radio_value(&mut self.state.save_format, ReportFormat::Html, "HTML");
            ui.radio_value(&mut self.state.save_format, ReportFormat::Excel, "Excel");
            ui.radio_value(&mut self.state.save_format, ReportFormat::Json, "JSON");
            ui.radio_value(&mut self.state.save_format, ReportFormat::Text, "Text");
            if ui.button("Save Report").clicked() {
                self.save_report_dialog();
            }
        });
    }
}

fn render_history(ui: &mut egui::Ui, recipe: &Recipe) {
    egui::ScrollArea::vertical().auto_shrink([false, true]).show(ui, |ui| {
        egui::Grid::new("history_grid")
            .striped(true)
            .num_columns(2)
            .min_col_width(ui.available_width() / 2.0 - 8.0)
            .show(ui, |ui| {
                ui.label(RichText::new("Ingredient Name").strong());
                ui.label(RichText::new("Quantity").strong());
                ui.end_row();
                for ingredient in recipe {
                    ui.label(ingredient.name.as_str());
                    ui.label(ingredient.quantity.as_str());
                    ui.end_row();
                }
            });
    });
}

fn render_totals(ui: &mut egui::Ui, total: &NutritionTotal) {
    egui::Grid::new("totals_grid")
        .striped(true)
        .num_columns(2)
        .min_col_width(160.0)
        .show(ui, |ui| {
            for row in report_rows(total) {
                ui.label(row.label);
                ui.label(row.amount());
                ui.end_row();
            }
        });
}

/// ワーカースレッド上で集計を完了まで実行
fn calculate_blocking(recipe: &Recipe) -> nutrition_calc::error::Result<NutritionTotal> {
    if recipe.is_empty() {
        return Ok(NutritionTotal::new());
    }
    let config = Config::load()?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async {
        let client = EdamamClient::from_config(&config)?;
        aggregate(recipe, &client).await
    })
}

pub fn configure_fonts(ctx: &egui::Context) {
    let mut fonts = FontDefinitions::default();
    let candidates = [
        r"C:\Windows\Fonts\meiryo.ttc",
        "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    ];

    for path in candidates {
        if let Ok(data) = std::fs::read(path) {
            fonts.font_data.insert("ui_fallback".to_string(), FontData::from_owned(data));
            fonts.families
                .entry(FontFamily::Proportional)
                .or_default()
                .push("ui_fallback".to_string());
            ctx.set_fonts(fonts);
            return;
        }
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.calculating {
            ctx.request_repaint();
        }
        self.poll_messages();

        let page = self.state.session.page();
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(page.title()).color(Color32::from_gray(120)));
                if !self.state.status.is_empty() {
                    ui.separator();
                    ui.label(RichText::new(&self.state.status).color(Color32::from_rgb(200, 80, 80)));
                }
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).fill(Color32::from_rgb(255, 192, 203)))
            .show(ctx, |ui| match page {
                Page::Welcome => self.render_welcome(ui),
                Page::Entry => self.render_entry(ui),
                Page::Result => self.render_result(ui),
            });
    }
}
