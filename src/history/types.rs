//! 履歴レコードの型定義

use crate::analyzer::AnalysisResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 一覧表示用の要約
///
/// analysis を深掘りしなくても読めるように、保存時に主要な特性を射影しておく。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntrySummary {
    pub energy_value: Value,
    pub total_sugar: Value,
}

/// 保存済み解析1件
///
/// save で生成されたあとは変更されない。削除時には images が参照する
/// コピーも一緒に消える。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryEntry {
    /// エントリ識別子（UUID v4）
    pub id: String,
    /// 保存時刻（UTC, RFC 3339）
    pub timestamp: String,
    /// 製品名（保存時の解析結果から複製)
    pub name: String,
    /// 製品カテゴリ（保存時の解析結果から複製）
    pub category: String,
    /// 主要特性の射影
    pub summary: EntrySummary,
    /// 解析結果の全文
    pub analysis: AnalysisResult,
    /// ストアルートからの相対パス（`/` 区切り）
    pub images: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_deserializes_with_missing_fields() {
        // 手編集や旧フォーマットで欠けた項目は既定値で埋める
        let entry: HistoryEntry = serde_json::from_str("{}").expect("デシリアライズ成功");
        assert_eq!(entry.id, "");
        assert_eq!(entry.timestamp, "");
        assert!(entry.images.is_empty());
        assert_eq!(entry.analysis, AnalysisResult::template());
    }

    #[test]
    fn test_entry_roundtrip() {
        let entry = HistoryEntry {
            id: "abc".into(),
            timestamp: "2026-08-21T10:00:00.000000Z".into(),
            name: "りんごピューレ".into(),
            category: "3".into(),
            summary: EntrySummary {
                energy_value: json!("250 kcal"),
                total_sugar: json!("12 g"),
            },
            analysis: AnalysisResult::from_value(json!({"name": "りんごピューレ"})),
            images: vec!["images/abc_0.jpg".into()],
        };

        let raw = serde_json::to_string(&entry).expect("シリアライズ成功");
        let restored: HistoryEntry = serde_json::from_str(&raw).expect("デシリアライズ成功");

        assert_eq!(restored.id, "abc");
        assert_eq!(restored.summary.energy_value, json!("250 kcal"));
        assert_eq!(restored.images, vec!["images/abc_0.jpg".to_string()]);
    }

    #[test]
    fn test_summary_defaults_to_null() {
        let summary = EntrySummary::default();
        assert_eq!(summary.energy_value, Value::Null);
        assert_eq!(summary.total_sugar, Value::Null);
    }
}
