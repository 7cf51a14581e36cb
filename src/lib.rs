//! Food AI Library
//!
//! 食品パッケージ写真をマルチモーダルLLMで解析し、結果をローカル履歴に保存する

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod rules;

pub use analyzer::{AnalysisOutcome, AnalysisResult, OpenRouterClient};
pub use config::Config;
pub use error::{FoodAiError, Result};
pub use history::{EntrySummary, HistoryEntry, HistoryStore};
pub use rules::RuleSet;
