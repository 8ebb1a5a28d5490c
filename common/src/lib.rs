//! Food Scan Common Library
//!
//! CLIと対話セッションで共有される型と成分解析ロジック（I/Oなし）

pub mod types;
pub mod error;
pub mod normalizer;
pub mod parser;
pub mod classifier;
pub mod profile;
pub mod analyzer;
pub mod encyclopedia;
pub mod chat;
pub mod generation;

pub use types::{ClassifiedIngredient, Extraction, ExtractionStatus, IngredientToken, SeverityTier};
pub use error::{Error, Result};
pub use normalizer::normalize_lines;
pub use parser::{extract_declaration, extract_ingredients, find_declaration_line};
pub use classifier::{classify, classify_all, classify_with_profile, worst_severity};
pub use profile::{parse_entries, ProfileStore, UserProfile};
pub use analyzer::{analyze_text, reclassify, IngredientAnalysis, SeveritySummary};
pub use encyclopedia::EncyclopediaEntry;
pub use chat::{ChatMessage, ChatRequest, ChatResponse, Role, Transcript};
pub use generation::{Generation, Ticket};
