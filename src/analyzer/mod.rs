//! 解析オーケストレーション
//!
//! 画像エンコード → リクエスト組み立て → API呼び出し → 応答抽出の単発フロー。
//! モデル側の失敗（API・応答形式）は既定テンプレートへ退避し、画像の読み込み
//! 失敗だけを Err として呼び出し元へ返す。

mod encode;
mod openrouter;
mod parser;
mod prompt;
mod types;

pub use encode::{detect_mime, encode_image};
pub use openrouter::{build_request, ChatRequest, ContentPart, ImageUrl, Message, OpenRouterClient};
pub use parser::{extract_json, parse_response, try_parse_response, ExtractError};
pub use prompt::build_analysis_prompt;
pub use types::AnalysisResult;

use crate::error::Result;
use crate::rules::RuleSet;
use std::path::{Path, PathBuf};

/// 解析の結末
///
/// 最終的な結果だけでなく、どの経路でその結果になったかを区別できるようにする。
/// 「本当に空に近い解析が返った」のか「失敗してテンプレートに退避した」のかは
/// 結果の中身だけでは見分けられない。
#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    /// モデル出力からJSONを抽出できた
    Parsed(AnalysisResult),
    /// API呼び出しが失敗した
    ApiFailed(String),
    /// モデル出力からJSONを抽出できなかった
    ParseFailed(String),
}

impl AnalysisOutcome {
    /// 最終的な解析結果（失敗経路では既定テンプレート）
    pub fn into_result(self) -> AnalysisResult {
        match self {
            AnalysisOutcome::Parsed(result) => result,
            AnalysisOutcome::ApiFailed(_) | AnalysisOutcome::ParseFailed(_) => {
                AnalysisResult::template()
            }
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, AnalysisOutcome::Parsed(_))
    }
}

/// 複数画像を1リクエストで解析する
///
/// 画像が読めない場合だけ Err。API呼び出しと応答抽出の失敗は stderr に
/// 診断を出したうえで失敗側の [`AnalysisOutcome`] として返す。
pub async fn analyze_images(
    client: &OpenRouterClient,
    rules: &RuleSet,
    image_paths: &[PathBuf],
    verbose: bool,
) -> Result<AnalysisOutcome> {
    let mut data_urls = Vec::with_capacity(image_paths.len());
    for path in image_paths {
        data_urls.push(encode_image(path)?);
    }

    let content = build_request(rules, &data_urls);

    if verbose {
        if let Some(ContentPart::Text { text }) = content.first() {
            println!("  プロンプト長: {} chars, 画像: {}枚", text.len(), data_urls.len());
        }
    }

    let raw = match client.complete(content).await {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("OpenRouter側でエラーが発生: {}", e);
            return Ok(AnalysisOutcome::ApiFailed(e.to_string()));
        }
    };

    if verbose {
        println!("  レスポンス長: {} chars", raw.len());
    }

    match try_parse_response(&raw) {
        Ok(result) => Ok(AnalysisOutcome::Parsed(result)),
        Err(e) => {
            eprintln!("モデル出力をJSONとして解釈できません: {}", e);
            eprintln!("{}", raw);
            Ok(AnalysisOutcome::ParseFailed(e.to_string()))
        }
    }
}

/// 1枚だけ解析する（複数枚版へ委譲）
pub async fn analyze_image(
    client: &OpenRouterClient,
    rules: &RuleSet,
    image_path: &Path,
    verbose: bool,
) -> Result<AnalysisOutcome> {
    analyze_images(client, rules, &[image_path.to_path_buf()], verbose).await
}
