//! 対話モード
//!
//! 1つのプロフィールを、スキャン・テキスト修正・辞典・チャットの各操作で共有する。
//! プロフィールの変更は `ProfileStore::update` 経由のみ。

use crate::chat::{self, ChatBackend, ChatSession};
use crate::config::Config;
use crate::error::{FoodScanError, Result};
use crate::ocr;
use crate::pipeline::{ScanSession, ScanState};
use crate::report::{self, RenderOptions};
use dialoguer::{Editor, Input};
use food_scan_common::{encyclopedia, parse_entries, ProfileStore, UserProfile};
use std::path::PathBuf;

const HELP: &str = "\
コマンド:
  scan <画像>            ラベル画像をOCR
  text                   OCRテキストをエディタで修正
  paste                  テキストを直接入力（空行で終了）
  analyze                現在のテキストを解析
  allergies <a, b, ...>  アレルギーを追加
  restrictions <a, ...>  食事制限を追加
  name <表示名>          表示名を設定
  profile                プロフィールを表示
  reset                  プロフィールを破棄
  ingredients [検索語]   成分辞典を検索
  ask <質問>             ローカルAIに質問
  retry                  AIサーバーへの接続を再試行
  help                   このヘルプ
  quit                   終了";

/// 対話コマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Scan(PathBuf),
    EditText,
    PasteText,
    Analyze,
    AddAllergies(String),
    AddRestrictions(String),
    SetName(String),
    ShowProfile,
    ResetProfile,
    Ingredients(String),
    Ask(String),
    Retry,
    Help,
    Quit,
    /// 空入力
    Nothing,
    Unknown(String),
}

/// 入力行をコマンドに変換
pub fn parse_command(line: &str) -> SessionCommand {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head.to_lowercase().as_str() {
        "" => SessionCommand::Nothing,
        "scan" | "s" if !rest.is_empty() => SessionCommand::Scan(PathBuf::from(rest)),
        "text" | "edit" => SessionCommand::EditText,
        "paste" => SessionCommand::PasteText,
        "analyze" | "a" => SessionCommand::Analyze,
        "allergies" | "allergy" if !rest.is_empty() => SessionCommand::AddAllergies(rest.to_string()),
        "restrictions" | "restriction" if !rest.is_empty() => {
            SessionCommand::AddRestrictions(rest.to_string())
        }
        "name" if !rest.is_empty() => SessionCommand::SetName(rest.to_string()),
        "profile" | "p" => SessionCommand::ShowProfile,
        "reset" => SessionCommand::ResetProfile,
        "ingredients" | "i" => SessionCommand::Ingredients(rest.to_string()),
        "ask" | "chat" if !rest.is_empty() => SessionCommand::Ask(rest.to_string()),
        "retry" => SessionCommand::Retry,
        "help" | "h" | "?" => SessionCommand::Help,
        "quit" | "q" | "exit" => SessionCommand::Quit,
        _ => SessionCommand::Unknown(line.to_string()),
    }
}

/// プロフィールを表示用に整形
pub fn format_profile(store: &ProfileStore) -> String {
    let Some(profile) = store.profile() else {
        return "プロフィール未設定（すべての成分がSafeと判定されます）".to_string();
    };

    let join = |set: &std::collections::BTreeSet<String>| {
        if set.is_empty() {
            "-".to_string()
        } else {
            set.iter().cloned().collect::<Vec<_>>().join(", ")
        }
    };

    let mut out = format!("プロフィール: {}\n", store.display_name("Guest"));
    out.push_str(&format!("  アレルギー: {}\n", join(&profile.allergies)));
    out.push_str(&format!("  食事制限:   {}", join(&profile.restrictions)));
    if let Some(goals) = &profile.goals {
        out.push_str(&format!("\n  目標:       {}", goals));
    }
    out
}

/// 辞典の検索結果を整形
pub fn format_ingredients(query: &str) -> String {
    let entries = encyclopedia::search(query);
    if entries.is_empty() {
        return format!("「{}」に一致する成分はありません", query);
    }

    entries
        .iter()
        .map(|e| format!("• {}\n    {}\n    健康: {}", e.name, e.description, e.health))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 対話モード本体
pub struct Session<B: ChatBackend> {
    config: Config,
    profiles: ProfileStore,
    scan: ScanSession,
    chat: ChatSession<B>,
    /// チャットサーバー確認済みか
    chat_checked: bool,
}

impl<B: ChatBackend> Session<B> {
    pub fn new(config: Config, profiles: ProfileStore, chat: ChatSession<B>) -> Self {
        Self {
            config,
            profiles,
            scan: ScanSession::new(),
            chat,
            chat_checked: false,
        }
    }

    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    pub fn scan(&self) -> &ScanSession {
        &self.scan
    }

    /// 入力ループ
    pub async fn run(&mut self) -> Result<()> {
        println!("🥫 food-scan - 対話モード（help でコマンド一覧）\n");
        println!("{}\n", format_profile(&self.profiles));

        loop {
            let line: String = Input::new()
                .with_prompt(format!("food-scan [{}]", self.profiles.display_name("Guest")))
                .allow_empty(true)
                .interact_text()?;

            let command = parse_command(&line);
            if command == SessionCommand::Quit {
                println!("終了します");
                break;
            }

            // 端末入出力のエラー以外は表示して続行
            match self.execute(command).await {
                Ok(()) => {}
                Err(e @ (FoodScanError::Prompt(_) | FoodScanError::Io(_))) => return Err(e),
                Err(e) => println!("⚠ {}", e),
            }
        }

        Ok(())
    }

    /// コマンドを1つ実行
    pub async fn execute(&mut self, command: SessionCommand) -> Result<()> {
        match command {
            SessionCommand::Scan(path) => {
                if !path.exists() {
                    return Err(FoodScanError::FileNotFound(path.display().to_string()));
                }
                println!("- OCR実行中: {}", path.display());
                let engine = ocr::from_config(&self.config);
                let text = self.scan.recognize(&engine, &path).await?;
                println!("✔ 認識テキスト:\n{}\n", text);
                println!("（text で修正、analyze で解析）");
            }

            SessionCommand::EditText => {
                if let Some(edited) = Editor::new().edit(self.scan.text())? {
                    self.scan.edit_text(edited);
                    println!("✔ テキストを更新しました");
                }
            }

            SessionCommand::PasteText => {
                let text = read_lines_until_blank()?;
                if self.scan.state() == &ScanState::Idle {
                    self.scan.load_text("入力テキスト", text);
                } else {
                    self.scan.edit_text(text);
                }
                println!("✔ テキストを取り込みました");
            }

            SessionCommand::Analyze => {
                let options = RenderOptions { color: true, details: true };
                let report = self.scan.analyze(&self.profiles);
                print!("{}", report::render_text(report, options));
            }

            SessionCommand::AddAllergies(list) => {
                let entries = parse_entries(&list);
                self.profiles.update(|p| p.allergies.extend(entries));
                self.after_profile_change();
            }

            SessionCommand::AddRestrictions(list) => {
                let entries = parse_entries(&list);
                self.profiles.update(|p| p.restrictions.extend(entries));
                self.after_profile_change();
            }

            SessionCommand::SetName(name) => {
                self.profiles.update(|p| p.display_name = Some(name));
                println!("✔ 表示名: {}", self.profiles.display_name("Guest"));
            }

            SessionCommand::ShowProfile => println!("{}", format_profile(&self.profiles)),

            SessionCommand::ResetProfile => {
                self.profiles.reset();
                self.after_profile_change();
            }

            SessionCommand::Ingredients(query) => println!("{}", format_ingredients(&query)),

            SessionCommand::Ask(question) => self.ask(&question).await?,

            SessionCommand::Retry => {
                println!("- AIサーバーに再接続中...");
                self.chat.retry().await?;
                self.chat_checked = true;
                println!("✔ 接続しました（モデル: {}）", self.chat.model());
            }

            SessionCommand::Help => println!("{}", HELP),
            SessionCommand::Nothing | SessionCommand::Quit => {}
            SessionCommand::Unknown(line) => println!("不明なコマンド: {}（help で一覧）", line),
        }

        Ok(())
    }

    async fn ask(&mut self, question: &str) -> Result<()> {
        if !self.chat_checked {
            println!("- AIサーバーを確認中...");
            self.chat_checked = true;
            self.chat.wait_until_available().await?;
        } else if !self.chat.is_available() {
            println!("- AIサーバーを再確認中...");
        }

        let turn = self.chat.ask(question).await?;
        let marker = if turn.fallback { "⚠" } else { "🤖" };
        println!("{} {}\n", marker, turn.reply);
        Ok(())
    }

    fn after_profile_change(&mut self) {
        println!("{}", format_profile(&self.profiles));
        if !self.scan.is_stale(&self.profiles) {
            return;
        }
        if let Some(report) = self.scan.reclassify(&self.profiles) {
            println!("\n再判定:");
            print!("{}", report::render_text(report, RenderOptions { color: true, details: false }));
        }
    }
}

/// 空行まで複数行を読み込む
fn read_lines_until_blank() -> Result<String> {
    println!("テキストを入力（空行で終了）:");
    let mut lines = Vec::new();
    loop {
        let line: String = Input::new()
            .with_prompt(">")
            .allow_empty(true)
            .interact_text()?;
        if line.trim().is_empty() {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

/// 設定とプロフィールから対話モードを開始
pub async fn run_interactive(config: Config, profile: Option<UserProfile>) -> Result<()> {
    let chat = chat::session_from_config(&config)?;
    let profiles = match profile {
        Some(p) => ProfileStore::with_profile(p),
        None => ProfileStore::new(),
    };

    Session::new(config, profiles, chat).run().await
}
