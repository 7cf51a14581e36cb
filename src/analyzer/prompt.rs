//! プロンプト生成モジュール
//!
//! ルールセット文書と出力テンプレートを逐語的に埋め込んだ解析指示文を
//! 組み立てる。指示ブロックはリクエストにつき1つだけ。

use super::types::AnalysisResult;
use crate::rules::RuleSet;

/// 解析指示プロンプト生成
///
/// # Arguments
/// * `rules` - 要件文書（そのまま埋め込む）
///
/// # Returns
/// 解析用のプロンプト文字列
pub fn build_analysis_prompt(rules: &RuleSet) -> String {
    let rules_document = rules.document();
    let template =
        serde_json::to_string_pretty(AnalysisResult::template().as_value()).unwrap_or_default();

    format!(
        r#"あなたは乳幼児向け食品の栄養表示を審査する検査員です。画像に写っている情報とテキストに基づいて、製品情報を埋めてください。

## 製品要件データベース
{rules_document}

## 出力形式（厳密にこのJSONオブジェクト形式で出力）
{template}

## 比較手順
- 製品が要件データベースのどの単一の数値カテゴリに属するかを判定
- そのカテゴリの要件一覧を探し、製品の各特性と1つずつ比較
- 比較結果は出力オブジェクトに comparison フィールドとして追加
- 要件が定義されていない、または値が要件を満たす場合は true
- 値が要件を満たさない場合は false
- 要件はあるが製品側の値が読み取れない場合は "NaN"

## 注意
- パッケージから読み取れない項目は "N/A" のままにする
- 数値は単位も含めて正確に（例: "250 kcal", "0.3 g"）
- JSONオブジェクトのみ出力。説明文は不要
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_rules_document() {
        let rules = RuleSet::bundled();
        let prompt = build_analysis_prompt(&rules);

        // ルールセット本文が逐語的に含まれていること
        assert!(prompt.contains(rules.document()));
    }

    #[test]
    fn test_prompt_contains_template_keys() {
        let prompt = build_analysis_prompt(&RuleSet::bundled());

        assert!(prompt.contains("\"name\""));
        assert!(prompt.contains("\"characteristics\""));
        assert!(prompt.contains("\"energy_value\""));
        assert!(prompt.contains("\"free_sugar\""));
        assert!(prompt.contains("\"manufacturer_address\""));
        assert!(prompt.contains("\"storing_conditions\""));
    }

    #[test]
    fn test_prompt_contains_comparison_instructions() {
        let prompt = build_analysis_prompt(&RuleSet::bundled());

        assert!(prompt.contains("comparison"));
        assert!(prompt.contains("\"NaN\""));
        assert!(prompt.contains("JSONオブジェクトのみ出力"));
    }

    #[test]
    fn test_prompt_embeds_custom_rules_verbatim() {
        let temp_dir = std::env::temp_dir().join("food-ai-test-prompt-rules");
        std::fs::create_dir_all(&temp_dir).unwrap();

        let path = temp_dir.join("rules.txt");
        std::fs::write(&path, "カテゴリ9: ナトリウム 10mg 以下").unwrap();

        let rules = RuleSet::from_file(&path).unwrap();
        let prompt = build_analysis_prompt(&rules);
        assert!(prompt.contains("カテゴリ9: ナトリウム 10mg 以下"));

        std::fs::remove_dir_all(&temp_dir).ok();
    }
}
