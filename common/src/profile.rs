//! ユーザープロフィール
//!
//! アレルギー・食事制限の申告を保持する。永続化はせず、プロセス内でのみ有効。
//! 参照側は `ProfileStore` のハンドルを明示的に受け取り、変更は `update` / `reset` のみで行う。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// ユーザープロフィール
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    /// アレルギー（自由記述）
    pub allergies: BTreeSet<String>,
    /// 食事制限（自由記述）
    pub restrictions: BTreeSet<String>,
    /// 表示名
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// 健康目標（表示のみ、判定には使わない）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<String>,
}

impl UserProfile {
    /// カンマ区切りの入力からプロフィールを作成
    pub fn from_entries(allergies: &str, restrictions: &str) -> Self {
        Self {
            allergies: parse_entries(allergies),
            restrictions: parse_entries(restrictions),
            ..Default::default()
        }
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(Error::InvalidProfile("expected a JSON object".into()));
        }
        let profile: Self = serde_json::from_value(value)?;
        Ok(profile)
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// アレルギー・制限ともに空か
    pub fn is_empty(&self) -> bool {
        self.allergies.is_empty() && self.restrictions.is_empty()
    }

    /// 別のプロフィールの申告を取り込む（表示名・目標は指定があれば上書き）
    pub fn merge(&mut self, other: UserProfile) {
        self.allergies.extend(other.allergies);
        self.restrictions.extend(other.restrictions);
        if other.display_name.is_some() {
            self.display_name = other.display_name;
        }
        if other.goals.is_some() {
            self.goals = other.goals;
        }
    }
}

/// 自由記述の入力を申告リストに分割
///
/// カンマ・セミコロンで区切り、トリムして空要素を除く。
pub fn parse_entries(input: &str) -> BTreeSet<String> {
    input
        .split([',', ';'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// プロフィールの保持先
///
/// 未設定（None）の場合、判定は空プロフィールとして扱われる。
#[derive(Debug, Default)]
pub struct ProfileStore {
    profile: Option<UserProfile>,
    revision: u64,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: UserProfile) -> Self {
        Self {
            profile: Some(profile),
            revision: 1,
        }
    }

    /// 現在のプロフィール
    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// 変更回数（判定結果の再計算要否の判断に使う）
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// プロフィールを変更する（唯一の変更口）
    ///
    /// 未設定の場合は空プロフィールから始める。
    pub fn update<F>(&mut self, f: F)
    where
        F: FnOnce(&mut UserProfile),
    {
        let profile = self.profile.get_or_insert_with(UserProfile::default);
        f(profile);
        self.revision += 1;
    }

    /// プロフィールを破棄
    pub fn reset(&mut self) {
        self.profile = None;
        self.revision += 1;
    }

    /// 表示名（未設定時はフォールバック）
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.profile
            .as_ref()
            .and_then(|p| p.display_name.as_deref())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(fallback)
    }
}
