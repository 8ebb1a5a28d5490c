use clap::Parser;
use dialoguer::Input;
use food_scan_common::{encyclopedia, ProfileStore};
use food_scan_rust::{chat, cli, config, error, ocr, pipeline, report, scanner, session};
use cli::{Cli, Commands};
use config::Config;
use error::{FoodScanError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use report::{RenderOptions, ScanReport};
use std::io::IsTerminal;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;
    let color = std::io::stdout().is_terminal();

    match cli.command {
        Commands::Scan { path, profile, json, output, details } => {
            let quiet = json && output.is_none();
            let say = |msg: &str| {
                if !quiet {
                    println!("{}", msg);
                }
            };
            say("🥫 food-scan - 原材料スキャン\n");

            let profiles = profile_store(profile.resolve()?);

            // 1. 画像スキャン
            say("[1/3] 画像をスキャン中...");
            let images = scanner::scan_path(&path)?;
            if images.is_empty() {
                return Err(FoodScanError::NoImagesFound(path.display().to_string()));
            }
            say(&format!("✔ {}枚の画像を検出\n", images.len()));

            // 2. OCR → 3. 判定
            say("[2/3] OCR実行中...");
            let engine = ocr::from_config(&config);
            let mut scan = pipeline::ScanSession::new();
            let mut reports: Vec<ScanReport> = Vec::new();

            for image in &images {
                let pb = spinner(format!("{} を認識中", image.file_name), quiet);
                let result = scan.recognize(&engine, &image.path).await.map(|_| ());
                pb.finish_and_clear();

                match result {
                    Ok(()) => {
                        let mut report = scan.analyze(&profiles).clone();
                        report.captured_at = image.date.clone();
                        reports.push(report);
                    }
                    // エンジン自体がない場合は続けても無意味
                    Err(e @ FoodScanError::OcrEngineMissing(_)) => return Err(e),
                    Err(e) => {
                        log::warn!("{}: {}", image.file_name, e);
                        say(&format!("⚠ {}: {}", image.file_name, e));
                    }
                }
            }
            say(&format!("✔ {}/{}枚を認識\n", reports.len(), images.len()));

            say("[3/3] 判定結果");
            say(&format!("プロフィール: {}\n", profiles.display_name("Guest")));
            emit_reports(&reports, json, output.as_deref(), color, details)?;
        }

        Commands::Analyze { text, file, profile, json, details } => {
            let raw = match (text, file) {
                (Some(text), _) => text,
                (None, Some(file)) => {
                    if !file.exists() {
                        return Err(FoodScanError::FileNotFound(file.display().to_string()));
                    }
                    std::fs::read_to_string(&file)?
                }
                (None, None) => std::io::read_to_string(std::io::stdin())?,
            };

            let profiles = profile_store(profile.resolve()?);
            let mut scan = pipeline::ScanSession::new();
            scan.load_text("text", raw);
            let report = scan.analyze(&profiles).clone();

            emit_reports(&[report], json, None, color, details)?;
        }

        Commands::Ingredients { query, name } => {
            if let Some(name) = name {
                match encyclopedia::lookup(&name) {
                    Some(entry) => {
                        println!("{}", entry.name);
                        println!("  {}", entry.description);
                        println!("  健康: {}", entry.health);
                    }
                    None => println!("{}", encyclopedia::describe(&name)),
                }
            } else {
                println!("{}", session::format_ingredients(query.as_deref().unwrap_or("")));
            }
        }

        Commands::Chat { question } => {
            let mut chat = chat::session_from_config(&config)?;

            let pb = spinner(format!("AIサーバーを確認中 ({})", config.chat_base_url()), false);
            let ready = chat.wait_until_available().await;
            pb.finish_and_clear();
            ready?;
            println!("✔ 接続しました（モデル: {}）\n", chat.model());

            match question {
                Some(question) => {
                    let pb = spinner("回答を待っています".to_string(), false);
                    let turn = chat.ask(&question).await;
                    pb.finish_and_clear();
                    println!("{}", turn?.reply);
                }
                None => {
                    println!("質問を入力（retry: 再接続, clear: 履歴消去, 空行/quit: 終了）");
                    loop {
                        let line: String = Input::new()
                            .with_prompt("you")
                            .allow_empty(true)
                            .interact_text()?;

                        match line.trim() {
                            "" | "quit" | "q" => break,
                            "clear" => {
                                chat.clear();
                                println!("✔ 履歴を消去しました");
                            }
                            "retry" => match chat.retry().await {
                                Ok(()) => println!("✔ 接続しました"),
                                Err(e) => println!("⚠ {}", e),
                            },
                            question => {
                                let pb = spinner("回答を待っています".to_string(), false);
                                let turn = chat.ask(question).await;
                                pb.finish_and_clear();
                                match turn {
                                    Ok(turn) if turn.fallback => println!("⚠ {}\n", turn.reply),
                                    Ok(turn) => println!("🤖 {}\n", turn.reply),
                                    Err(e) => println!("⚠ {}", e),
                                }
                            }
                        }
                    }
                }
            }
        }

        Commands::Session { profile } => {
            session::run_interactive(config, profile.resolve()?).await?;
        }

        Commands::Config { show, set_model, set_ollama_url, set_tesseract } => {
            let mut config = config;

            if let Some(model) = set_model {
                config.set_model(model)?;
                println!("✔ モデルを設定しました");
            }

            if let Some(url) = set_ollama_url {
                config.set_ollama_url(url)?;
                println!("✔ OllamaサーバーURLを設定しました");
            }

            if let Some(command) = set_tesseract {
                config.set_tesseract_command(command)?;
                println!("✔ OCRコマンドを設定しました");
            }

            if show {
                println!("設定 ({}):", Config::config_path()?.display());
                println!("  Ollama URL: {}", config.chat_base_url());
                println!("  モデル: {}", config.model);
                println!(
                    "  死活確認: {}秒間隔 × {}回",
                    config.probe_interval_seconds, config.probe_max_attempts
                );
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  OCRコマンド: {} (-l {})", config.tesseract_command, config.ocr_language);
                println!("  最大画像サイズ: {}px", config.max_image_size);
            }
        }
    }

    Ok(())
}

/// RUST_LOG優先。未指定時は warn、-v で debug
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn profile_store(profile: Option<food_scan_common::UserProfile>) -> ProfileStore {
    match profile {
        Some(p) => ProfileStore::with_profile(p),
        None => ProfileStore::new(),
    }
}

fn spinner(message: String, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// 結果をテキストまたはJSONで出力
fn emit_reports(
    reports: &[ScanReport],
    json: bool,
    output: Option<&std::path::Path>,
    color: bool,
    details: bool,
) -> Result<()> {
    if let Some(output) = output {
        std::fs::write(output, report::to_json(reports)?)?;
        println!("✔ 結果を保存: {}", output.display());
    } else if json {
        println!("{}", report::to_json(reports)?);
        return Ok(());
    }

    let options = RenderOptions { color, details };
    for r in reports {
        println!("{}", report::render_text(r, options));
    }
    Ok(())
}
