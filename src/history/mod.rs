//! 解析履歴モジュール
//!
//! 保存済み解析のローカルストア:
//! - HistoryStore: history.json と画像コピーの管理
//! - HistoryEntry / EntrySummary: 保存レコードの構造

mod store;
mod types;

pub use store::HistoryStore;
pub use types::{EntrySummary, HistoryEntry};
