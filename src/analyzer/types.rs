//! 解析結果の型定義

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// モデルが返した製品解析結果
///
/// 抽出したJSONオブジェクトをそのまま保持する。スキーマの強制はせず、
/// 欠けている項目はアクセサ側で既定値に落とす。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisResult(Value);

impl Default for AnalysisResult {
    fn default() -> Self {
        Self::template()
    }
}

impl AnalysisResult {
    /// 既定テンプレート（全項目が未判定値）
    ///
    /// API呼び出しや応答抽出に失敗したときの代替結果としても使う。
    pub fn template() -> Self {
        Self(json!({
            "name": "N/A",
            "category": "N/A",
            "characteristics": {
                "energy_value": "N/A",          // kcal/100g
                "sodium": "N/A",                // mg/100g
                "total_sugar": "N/A",           // g/100g
                "free_sugar": "N/A",            // g/100g
                "total_protein": "N/A",         // g/100g
                "total_fat": "N/A",             // g/100g
                "fruit_content": "N/A",         // %
                "age_marking": "N/A",           // 対象月齢
                "high_sugar_front_packaging": "false",
                "labeling": "true"
            },
            "additional_info": {
                "containings": "N/A",
                "description": "N/A",
                "manufacturer_address": "N/A",
                "storing_conditions": "N/A"
            }
        }))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// 製品名（欠落時は "N/A"）
    pub fn name(&self) -> String {
        self.top_level_string("name")
    }

    /// 製品カテゴリ（欠落時は "N/A"）
    pub fn category(&self) -> String {
        self.top_level_string("category")
    }

    /// characteristics 配下の値（欠落時は Null）
    pub fn characteristic(&self, key: &str) -> Value {
        self.0
            .get("characteristics")
            .and_then(|c| c.get(key))
            .cloned()
            .unwrap_or(Value::Null)
    }

    /// characteristics オブジェクト全体
    pub fn characteristics(&self) -> Option<&Map<String, Value>> {
        self.0.get("characteristics").and_then(|v| v.as_object())
    }

    /// 基準比較の結果（モデルが comparison を返した場合のみ）
    pub fn comparison(&self) -> Option<&Map<String, Value>> {
        self.0.get("comparison").and_then(|v| v.as_object())
    }

    fn top_level_string(&self, key: &str) -> String {
        match self.0.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => "N/A".to_string(),
            Some(other) => other.to_string(),
        }
    }
}

// =====================================================
// テスト
// =====================================================
