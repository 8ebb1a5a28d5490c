//! food-scan: 食品ラベルの原材料をOCRで読み取り、プロフィールに応じて判定する

pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod ocr;
pub mod pipeline;
pub mod report;
pub mod scanner;
pub mod session;
