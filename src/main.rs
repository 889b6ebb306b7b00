use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tester_lookup::{cache, cli, config, interactive, loader, lookup, render, server, status};
use cache::DatasetCache;
use cli::{Cli, Commands};
use config::Config;
use status::ConsoleStatus;
use tester_lookup_common::{Dataset, TextResolution, WaveSpec};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load().context("設定の読み込みに失敗")?;
    if let Some(source) = cli.source.clone() {
        config.source = Some(source);
    }
    let wave = WaveSpec::new(cli.wave.unwrap_or(config.target_wave));

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Find { name, json, debug } => {
            let query = lookup::validate_query(&name)?;
            let cache = open_cache(&config)?;
            let dataset = load_with_spinner(&cache)?;
            let items = dataset.find_assignments(query, &wave);

            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else if items.is_empty() {
                println!("Адреса не найдены для этого ФИО в {}", wave);
            } else {
                println!("✔ Найдено адресов: {}\n", items.len());
                for (i, item) in items.iter().enumerate() {
                    println!("{}\n", render::format_assignment(i, item));
                }
            }

            if debug {
                let diagnostics = dataset.explain_assignments(query, &wave);
                println!("{}", serde_json::to_string_pretty(&diagnostics)?);
            }
        }

        Commands::Text { partner, method } => {
            let cache = open_cache(&config)?;
            let dataset = load_with_spinner(&cache)?;

            match dataset.resolve_text(&partner, &method) {
                TextResolution::Found { column, text } => {
                    println!("✔ Столбец {}\n\n{}", column, text);
                }
                TextResolution::Fallback { text } => {
                    println!("⚠ Точного совпадения нет, общий текст\n\n{}", text);
                }
                TextResolution::NotFound => println!("Текст не найден"),
                TextResolution::InvalidStructure { rows } => {
                    anyhow::bail!("Неверная структура листа \"Тексты\" (строк: {})", rows);
                }
            }
        }

        Commands::Interactive => {
            let cache = open_cache(&config)?;
            load_with_spinner(&cache)?;
            interactive::run_interactive(&cache, &wave, &ConsoleStatus)?;
        }

        Commands::Serve { port } => {
            let cache = Arc::new(open_cache(&config)?);
            if let Err(e) = cache.refresh() {
                // 起動は続け、最初のリクエストで再試行する
                tracing::warn!(error = %e, "初回読み込みに失敗");
            }

            let state = server::AppState { cache, wave };
            server::serve(state, port.unwrap_or(config.port)).await?;
        }

        Commands::Inspect => {
            let source = loader::open_source(&config)?;
            let report = source.inspect()?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Config { set_source, set_wave, show } => {
            if let Some(path) = set_source {
                config.set_source(path)?;
                println!("✔ データファイルを設定しました");
            }

            if let Some(n) = set_wave {
                config.set_target_wave(n)?;
                println!("✔ 対象のволнаを設定しました: {}", n);
            }

            if show {
                println!("設定:");
                println!(
                    "  データファイル: {}",
                    config.source.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "未設定（自動検索）".into())
                );
                println!("  Выборка: {}", config.selection_sheet);
                println!("  Тексты: {}", config.texts_sheet);
                println!("  волна: {}", config.target_wave);
                println!("  キャッシュTTL: {}秒", config.cache_ttl_seconds);
                println!("  ポート: {}", config.port);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "tester_lookup=debug,tower_http=debug" } else { "tester_lookup=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_cache(config: &Config) -> anyhow::Result<DatasetCache> {
    let source = loader::open_source(config).context("データファイルを開けません")?;
    Ok(DatasetCache::new(source, Duration::from_secs(config.cache_ttl_seconds)))
}

fn load_with_spinner(cache: &DatasetCache) -> anyhow::Result<Arc<Dataset>> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message(format!("Загрузка {}...", cache.source().path().display()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let loaded = cache.get();
    spinner.finish_and_clear();

    let dataset = loaded.context("Ошибка загрузки данных")?;
    println!("✔ Данные загружены ({})", dataset.assignments.len());
    Ok(dataset)
}
