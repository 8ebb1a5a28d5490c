use clap::{Args, Parser, Subcommand};
use crate::error::Result;
use food_scan_common::UserProfile;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "food-scan")]
#[command(about = "食品ラベル原材料スキャン・アレルギー判定ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// 判定に使うプロフィール指定
#[derive(Args, Debug, Clone, Default)]
pub struct ProfileArgs {
    /// アレルギー（カンマ/セミコロン区切り）
    #[arg(short, long)]
    pub allergies: Option<String>,

    /// 食事制限（カンマ/セミコロン区切り）
    #[arg(short, long)]
    pub restrictions: Option<String>,

    /// プロフィールJSONファイル
    #[arg(short, long)]
    pub profile: Option<PathBuf>,

    /// 表示名
    #[arg(long)]
    pub name: Option<String>,
}

impl ProfileArgs {
    /// 指定がなければNone（全成分Safe扱い）
    ///
    /// ファイル指定とインライン指定の両方があれば統合する。
    pub fn resolve(&self) -> Result<Option<UserProfile>> {
        let mut profile = match &self.profile {
            Some(path) => Some(UserProfile::from_file(path)?),
            None => None,
        };

        if self.allergies.is_some() || self.restrictions.is_some() || self.name.is_some() {
            let mut inline = UserProfile::from_entries(
                self.allergies.as_deref().unwrap_or(""),
                self.restrictions.as_deref().unwrap_or(""),
            );
            inline.display_name = self.name.clone();

            match profile.as_mut() {
                Some(p) => p.merge(inline),
                None => profile = Some(inline),
            }
        }

        Ok(profile)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// 食品ラベル画像をOCRして原材料を判定
    Scan {
        /// 画像ファイルまたは画像フォルダ
        #[arg(required = true)]
        path: PathBuf,

        #[command(flatten)]
        profile: ProfileArgs,

        /// JSONで出力
        #[arg(long)]
        json: bool,

        /// 出力ファイル（JSON）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 成分ごとの説明を表示
        #[arg(short, long)]
        details: bool,
    },

    /// OCR済みテキストを判定（OCRを省略）
    Analyze {
        /// 判定するテキスト
        #[arg(short, long, conflicts_with = "file")]
        text: Option<String>,

        /// テキストファイル（省略時は標準入力）
        #[arg(short, long)]
        file: Option<PathBuf>,

        #[command(flatten)]
        profile: ProfileArgs,

        /// JSONで出力
        #[arg(long)]
        json: bool,

        /// 成分ごとの説明を表示
        #[arg(short, long)]
        details: bool,
    },

    /// 成分辞典を検索
    Ingredients {
        /// 検索語（名前・説明の部分一致、省略時は全件）
        query: Option<String>,

        /// 成分名を指定して詳細表示
        #[arg(short, long)]
        name: Option<String>,
    },

    /// ローカルAIに質問
    Chat {
        /// 質問（省略時は対話モード）
        question: Option<String>,
    },

    /// 対話モード（スキャン・プロフィール・辞典・チャット）
    Session {
        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// チャットモデルを設定
        #[arg(long)]
        set_model: Option<String>,

        /// OllamaサーバーURLを設定
        #[arg(long)]
        set_ollama_url: Option<String>,

        /// tesseractコマンドを設定
        #[arg(long)]
        set_tesseract: Option<String>,
    },
}
