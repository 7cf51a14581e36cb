//! 解析パイプラインテスト
//!
//! エンコード・応答抽出・失敗時のテンプレート退避を検証

use food_ai_rust::analyzer::{self, encode_image, parse_response, AnalysisResult, OpenRouterClient};
use food_ai_rust::config::Config;
use food_ai_rust::error::FoodAiError;
use food_ai_rust::rules::RuleSet;
use serde_json::json;
use std::path::Path;
use tempfile::tempdir;

/// 存在しない画像のエンコード
#[test]
fn test_encode_missing_image() {
    let result = encode_image(Path::new("/nonexistent/package.jpg"));
    assert!(matches!(result, Err(FoodAiError::FileNotFound(_))));
}

/// 応答がJSONを含まない場合はテンプレートに退避
#[test]
fn test_parse_response_without_json() {
    let responses = [
        "",
        "申し訳ありませんが、画像を解析できませんでした。",
        "```\nno json here\n```",
    ];

    for response in responses {
        let result = parse_response(response);
        assert_eq!(result, AnalysisResult::template(), "入力: {:?}", response);
    }
}

/// 応答の散文に埋まったJSONを抽出できる
#[test]
fn test_parse_response_embedded_json() {
    let response = r#"解析結果は以下の通りです。

```json
{
  "name": "ベビーオートミール",
  "category": "1",
  "characteristics": {"energy_value": "380 kcal"},
  "comparison": {"energy_value": true, "sodium": "NaN"}
}
```

ご確認ください。"#;

    let result = parse_response(response);
    assert_eq!(result.name(), "ベビーオートミール");
    assert_eq!(result.category(), "1");
    assert_eq!(result.characteristic("energy_value"), json!("380 kcal"));

    let comparison = result.comparison().expect("comparison が取得できること");
    assert_eq!(comparison["energy_value"], json!(true));
    assert_eq!(comparison["sodium"], json!("NaN"));
}

/// 壊れたJSON範囲はテンプレートに退避
#[test]
fn test_parse_response_invalid_span() {
    let result = parse_response(r#"{"name": "test"} 補足: 辞書の閉じ括弧 } はここ"#);
    assert_eq!(result, AnalysisResult::template());
}

/// 空オブジェクトの応答はテンプレートにならない
#[test]
fn test_parse_response_empty_object() {
    let result = parse_response("{}");
    assert_ne!(result, AnalysisResult::template());
    assert_eq!(result.as_value(), &json!({}));
}

/// 画像が読めない場合は解析自体がエラー
#[tokio::test]
async fn test_analyze_missing_image_is_error() {
    let config = Config {
        api_key: Some("test-key".to_string()),
        base_url: "http://127.0.0.1:9".to_string(),
        model: "test-model".to_string(),
        timeout_seconds: 2,
    };
    let client = OpenRouterClient::new(&config).expect("クライアント構築失敗");

    let result = analyzer::analyze_images(
        &client,
        &RuleSet::bundled(),
        &[Path::new("/nonexistent/package.jpg").to_path_buf()],
        false,
    )
    .await;

    assert!(matches!(result, Err(FoodAiError::FileNotFound(_))));
}

/// API到達不能時は ApiFailed になり、最終結果はテンプレート
#[tokio::test]
async fn test_analyze_unreachable_endpoint_falls_back() {
    let dir = tempdir().expect("Failed to create temp dir");
    let image = dir.path().join("package.jpg");
    std::fs::write(&image, b"fake image data").unwrap();

    // 到達不能なローカルポートに向ける
    let config = Config {
        api_key: Some("test-key".to_string()),
        base_url: "http://127.0.0.1:9".to_string(),
        model: "test-model".to_string(),
        timeout_seconds: 2,
    };
    let client = OpenRouterClient::new(&config).expect("クライアント構築失敗");

    let outcome = analyzer::analyze_images(&client, &RuleSet::bundled(), &[image], false)
        .await
        .expect("画像が読める限り Err にはならない");

    assert!(!outcome.is_parsed());
    assert!(matches!(outcome, analyzer::AnalysisOutcome::ApiFailed(_)));
    assert_eq!(outcome.into_result(), AnalysisResult::template());
}

/// APIキー未設定ではクライアントを構築できない
#[test]
fn test_client_requires_api_key() {
    // 環境変数が立っている環境ではこの検証はできない
    if std::env::var("OPENROUTER_API_KEY").is_ok() {
        eprintln!("OPENROUTER_API_KEY が設定されているためスキップ");
        return;
    }

    let config = Config {
        api_key: None,
        ..Config::default()
    };
    let result = OpenRouterClient::new(&config);
    assert!(matches!(result, Err(FoodAiError::MissingApiKey)));
}

/// エラーのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        FoodAiError::Config("テスト設定エラー".to_string()),
        FoodAiError::FileNotFound("package.jpg".to_string()),
        FoodAiError::ApiCall("API呼び出し失敗".to_string()),
        FoodAiError::Interactive("入力中断".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// MissingApiKeyエラーのメッセージ確認
#[test]
fn test_missing_api_key_message() {
    let err = FoodAiError::MissingApiKey;
    let display = format!("{}", err);

    assert!(display.contains("APIキー"));
    assert!(display.contains("food-ai config"));
}

/// IOエラー・JSONエラーからの変換
#[test]
fn test_error_conversions() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: FoodAiError = io_err.into();
    assert!(matches!(err, FoodAiError::Io(_)));

    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: FoodAiError = json_err.into();
    assert!(matches!(err, FoodAiError::JsonParse(_)));
}
