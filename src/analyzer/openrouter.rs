//! OpenRouter API連携
//!
//! OpenAI互換の chat/completions エンドポイントへの単発リクエストを扱う。
//! リクエストの組み立て（[`build_request`]）はネットワークI/Oを伴わない。

use super::prompt::build_analysis_prompt;
use crate::config::Config;
use crate::error::{FoodAiError, Result};
use crate::rules::RuleSet;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// chat/completions リクエスト本体
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

/// ユーザーメッセージ（role + マルチモーダルパート列）
#[derive(Debug, Serialize)]
pub struct Message {
    pub role: String,
    pub content: Vec<ContentPart>,
}

/// マルチモーダルメッセージの1パート
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// リクエストのパート列を組み立てる
///
/// 先頭に指示ブロックを1つ置き、そのあとに data URL 化した画像を入力順で並べる。
pub fn build_request(rules: &RuleSet, data_urls: &[String]) -> Vec<ContentPart> {
    let mut parts = Vec::with_capacity(data_urls.len() + 1);
    parts.push(ContentPart::Text {
        text: build_analysis_prompt(rules),
    });

    for url in data_urls {
        parts.push(ContentPart::ImageUrl {
            image_url: ImageUrl { url: url.clone() },
        });
    }

    parts
}

/// OpenRouterクライアント
///
/// 設定から構築して呼び出し側が保持する。プロセス全体で共有する隠れた
/// 状態は持たない。
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenRouterClient {
    /// 設定からクライアントを構築する
    ///
    /// APIキーは環境変数 `OPENROUTER_API_KEY` または設定ファイルから取る。
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.get_api_key()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| FoodAiError::ApiCall(format!("HTTPクライアント構築失敗: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// 単発のチャット補完を実行し、モデルの応答テキストを返す
    pub async fn complete(&self, content: Vec<ContentPart>) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content,
            }],
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| FoodAiError::ApiCall(format!("リクエスト送信失敗: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FoodAiError::ApiCall(format!(
                "APIエラー ({}): {}",
                status, body
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| FoodAiError::ApiCall(format!("応答の読み取りに失敗: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| FoodAiError::ApiCall("応答に choices が含まれていません".to_string()))
    }
}

// =====================================================
// テスト
// =====================================================
