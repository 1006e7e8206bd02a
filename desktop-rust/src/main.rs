mod app;
mod io;
mod model;

use app::{configure_fonts, DesktopApp};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> eframe::Result<()> {
    let _ = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Nutrition Calculator",
        options,
        Box::new(|cc| {
            configure_fonts(&cc.egui_ctx);
            Box::new(DesktopApp::default())
        }),
    )
}
