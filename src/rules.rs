//! 栄養要件ルールセット
//!
//! プロンプトに逐語的に埋め込む要件文書を扱う。内容は不透明なテキストとして
//! 渡すだけで、構造の解釈や検証は行わない。

use crate::error::{FoodAiError, Result};
use std::path::Path;

/// 同梱の既定ルールセット（WHO欧州地域事務局の乳幼児食品プロファイルモデル準拠）
const DEFAULT_RULES: &str = r#"{
  "categories": {
    "1": {
      "name": "ドライシリアル・穀物加工品",
      "energy_value": "60 kcal/100g 以上",
      "sodium": "50 mg/100kcal 以下",
      "total_sugar": "施行の際に添加糖無しであること",
      "free_sugar": "0 g（遊離糖の添加禁止）",
      "total_fat": "4.5 g/100kcal 以下",
      "fruit_content": "果実由来の糖を主原料にしない",
      "age_marking": "6ヶ月以上の表示必須",
      "high_sugar_front_packaging": "糖含有30%超はパッケージ正面に高糖警告が必要",
      "labeling": "母乳代替でない旨と対象月齢の表示必須"
    },
    "2": {
      "name": "乳製品ベースの食事",
      "energy_value": "60 kcal/100g 以上",
      "sodium": "50 mg/100kcal 以下",
      "total_sugar": "10 g/100g 以下",
      "free_sugar": "0 g（遊離糖の添加禁止）",
      "total_protein": "乳タンパク質 2.2 g/100kcal 以上",
      "total_fat": "4.5 g/100kcal 以下",
      "age_marking": "6ヶ月以上の表示必須",
      "high_sugar_front_packaging": "該当時は正面警告必須",
      "labeling": "対象月齢の表示必須"
    },
    "3": {
      "name": "果実・野菜ピューレ / スムージー",
      "energy_value": "60 kcal/100g 以上",
      "sodium": "50 mg/100kcal 以下",
      "total_sugar": "果実由来糖のみ許容",
      "free_sugar": "0 g（果汁・濃縮果汁の添加も遊離糖扱い）",
      "fruit_content": "果実100%飲料は乳幼児向けとして不可",
      "age_marking": "6ヶ月以上の表示必須",
      "high_sugar_front_packaging": "エネルギーの30%超が糖の場合は正面警告必須",
      "labeling": "スクイズパウチは吸い口から直接与えない旨の表示必須"
    },
    "4": {
      "name": "肉・魚ベースの食事",
      "energy_value": "60 kcal/100g 以上",
      "sodium": "50 mg/100kcal 以下",
      "total_sugar": "10 g/100g 以下",
      "free_sugar": "0 g（遊離糖の添加禁止）",
      "total_protein": "名称に含む肉・魚 40 g/100g 以上",
      "total_fat": "6.0 g/100kcal 以下",
      "age_marking": "6ヶ月以上の表示必須",
      "high_sugar_front_packaging": "該当時は正面警告必須",
      "labeling": "対象月齢の表示必須"
    },
    "5": {
      "name": "スナック・フィンガーフード",
      "energy_value": "50 kcal/1食分 以下",
      "sodium": "50 mg/100kcal 以下",
      "total_sugar": "15 g/100g 以下",
      "free_sugar": "0 g（遊離糖の添加禁止）",
      "total_fat": "4.5 g/100kcal 以下",
      "fruit_content": "乾燥果実チップはスナックとして不可",
      "age_marking": "6ヶ月以上の表示必須",
      "high_sugar_front_packaging": "糖含有15%超は正面警告必須",
      "labeling": "1食分量の表示必須"
    }
  }
}"#;

/// 製品カテゴリ別の栄養要件文書
#[derive(Debug, Clone)]
pub struct RuleSet {
    document: String,
}

impl RuleSet {
    /// 同梱の既定ルールセットを返す
    pub fn bundled() -> Self {
        Self {
            document: DEFAULT_RULES.to_string(),
        }
    }

    /// ファイルからルールセットを読み込む
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FoodAiError::FileNotFound(path.display().to_string()));
        }
        let document = std::fs::read_to_string(path)?;
        Ok(Self { document })
    }

    /// プロンプトへ埋め込む本文
    pub fn document(&self) -> &str {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_rules_not_empty() {
        let rules = RuleSet::bundled();
        assert!(!rules.document().is_empty());
        assert!(rules.document().contains("categories"));
    }

    #[test]
    fn test_from_file_missing() {
        let result = RuleSet::from_file(Path::new("/nonexistent/rules.json"));
        assert!(matches!(result, Err(FoodAiError::FileNotFound(_))));
    }
}
