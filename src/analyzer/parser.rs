//! モデル応答のパース
//!
//! モデルの自由形式テキストからJSONオブジェクト部分を切り出して解析結果に
//! 変換する。抽出に失敗しても呼び出し元にエラーを返さず、既定テンプレートへ
//! 退避するフェイルソフト版を基本とする。

use super::types::AnalysisResult;
use thiserror::Error;

/// 抽出失敗の理由
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("応答に `{{` と `}}` の組が含まれていません")]
    NoJson,

    #[error("切り出した範囲をJSONとして解釈できません: {0}")]
    Parse(#[from] serde_json::Error),
}

/// 応答テキストからJSONオブジェクト部分を切り出す
///
/// 最初の `{` から最後の `}` までの素朴な範囲切り出し。モデルがJSONを
/// 散文やコードフェンスで包んでも拾える。オブジェクトの後ろに `}` を含む
/// テキストが続くケースは諦めてパース失敗に倒す。
pub fn extract_json(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&response[start..=end])
}

/// 応答テキストを解析結果に変換する（失敗は Err で返す版)
pub fn try_parse_response(response: &str) -> Result<AnalysisResult, ExtractError> {
    let json_str = extract_json(response).ok_or(ExtractError::NoJson)?;
    let value: serde_json::Value = serde_json::from_str(json_str)?;
    Ok(AnalysisResult::from_value(value))
}

/// 応答テキストを解析結果に変換する（フェイルソフト版）
///
/// 抽出できない場合は診断と応答全文を stderr に出し、既定テンプレートを返す。
pub fn parse_response(response: &str) -> AnalysisResult {
    match try_parse_response(response) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("モデル出力をJSONとして解釈できません: {}", e);
            eprintln!("{}", response);
            AnalysisResult::template()
        }
    }
}

// =====================================================
// テスト
// =====================================================
