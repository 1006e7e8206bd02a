use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use nutrition_calc::{aggregator, cli, config, error, export, lookup, shell};
use nutrition_calc_common::{NutritionTotal, Recipe, NUTRIENT_LABELS};
use cli::{Cli, Commands, ReportFormat};
use config::Config;
use error::{NutritionError, Result};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "nutrition_calc=debug" } else { "nutrition_calc=warn" };
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_level.parse()?))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    run(cli).await?;
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Interactive { output, format } => {
            let client = lookup::EdamamClient::from_config(&config)?;
            shell::run_interactive(&client, output.as_deref(), format).await?;
        }

        Commands::Calc { ingredients, recipe, format, output, keep_going } => {
            println!("🥗 nutrition-calc - 栄養計算\n");

            // 1. レシピ組み立て
            let recipe = build_recipe(&ingredients, recipe.as_deref())?;
            println!("[1/3] 食材 {}件", recipe.len());
            if format == ReportFormat::Excel && output.is_none() {
                return Err(NutritionError::CliExecution(
                    "excel形式では --output の指定が必要です".into(),
                ));
            }

            // 2. 検索・集計
            println!("[2/3] 栄養データを取得中...");
            let total = calculate(&recipe, &config, keep_going).await?;
            println!("✔ 栄養素 {}種類\n", total.len());

            // 3. 出力
            println!("[3/3] レポート出力");
            match output {
                Some(output) => {
                    let path = export::export_report(&recipe, &total, format, &output)?;
                    println!("✔ レポートを保存: {}", path.display());
                }
                None => {
                    println!();
                    println!("{}", export::render_report(&recipe, &total, format)?);
                }
            }
        }

        Commands::Labels => {
            for entry in NUTRIENT_LABELS {
                println!("{:<10} {}", entry.code, entry.label);
            }
        }

        Commands::Config { set_app_id, set_app_key, show } => {
            let mut config = config;
            let changed = set_app_id.is_some() || set_app_key.is_some();

            if let Some(app_id) = set_app_id {
                config.set_app_id(app_id);
            }
            if let Some(app_key) = set_app_key {
                config.set_app_key(app_key);
            }
            if changed {
                config.save()?;
                println!("✔ 認証情報を設定しました");
            }

            if show {
                println!("設定:");
                println!("  API URL: {}", config.api_url());
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  アプリケーションID: {}", config.app_id.as_deref().unwrap_or("未設定"));
                println!("  アプリケーションキー: {}", if config.app_key.is_some() { "設定済み" } else { "未設定" });
                println!("  認証情報の解決: {}", if config.credentials().is_ok() { "OK" } else { "未設定" });
            }
        }
    }

    Ok(())
}

/// レシピを集計（空のレシピは検索せず空の合計）
async fn calculate(recipe: &Recipe, config: &Config, keep_going: bool) -> Result<NutritionTotal> {
    if recipe.is_empty() {
        return Ok(NutritionTotal::new());
    }

    let client = lookup::EdamamClient::from_config(config)?;
    let progress = ProgressBar::new(recipe.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("  {bar:30} {pos}/{len} {msg}")
            .map_err(|e| NutritionError::CliExecution(e.to_string()))?,
    );

    if keep_going {
        let partial = aggregator::aggregate_partial(recipe, &client, &progress).await;
        progress.finish_and_clear();
        for (ingredient, err) in &partial.failures {
            println!("⚠ {} を除外: {}", ingredient.name, err);
        }
        Ok(partial.total)
    } else {
        let total = aggregator::aggregate_with_progress(recipe, &client, &progress).await;
        progress.finish_and_clear();
        total
    }
}

/// 引数とJSONファイルからレシピを組み立てる（ファイル → 引数の順に追加）
fn build_recipe(pairs: &[String], recipe_file: Option<&std::path::Path>) -> Result<Recipe> {
    let mut recipe = match recipe_file {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            Recipe::from_json(&content)
                .map_err(|e| NutritionError::InvalidRecipe(format!("{}: {}", path.display(), e)))?
        }
        None => Recipe::new(),
    };

    for pair in pairs {
        let (name, quantity) = Recipe::parse_pair(pair)
            .map_err(|e| NutritionError::InvalidRecipe(e.to_string()))?;
        recipe.insert(name, quantity);
    }

    Ok(recipe)
}
