use clap::Parser;
use dialoguer::Confirm;
use food_ai_rust::{analyzer, cli, config, error, history, rules};

use analyzer::{AnalysisOutcome, AnalysisResult, OpenRouterClient};
use cli::{Cli, Commands};
use config::Config;
use error::{FoodAiError, Result};
use history::HistoryStore;
use rules::RuleSet;
use serde_json::Value;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { images, rules, output, save, store } => {
            println!("🍼 food-ai-rust - パッケージ解析\n");

            let rule_set = match rules {
                Some(path) => RuleSet::from_file(&path)?,
                None => RuleSet::bundled(),
            };

            let client = OpenRouterClient::new(&config)?;

            // 1. 解析
            println!("[1/2] AI解析中... ({}枚, モデル: {})", images.len(), client.model());
            let outcome = analyzer::analyze_images(&client, &rule_set, &images, cli.verbose).await?;
            match &outcome {
                AnalysisOutcome::Parsed(_) => println!("✔ 解析完了\n"),
                AnalysisOutcome::ApiFailed(_) | AnalysisOutcome::ParseFailed(_) => {
                    println!("⚠ 解析に失敗したため既定テンプレートを返します\n");
                }
            }
            let result = outcome.into_result();

            // 2. 出力
            println!("[2/2] 結果を出力中...");
            print_analysis(&result)?;

            if let Some(path) = output {
                let json = serde_json::to_string_pretty(result.as_value())?;
                std::fs::write(&path, json)?;
                println!("✔ 結果を保存: {}", path.display());
            }

            if save {
                let store = HistoryStore::open(resolve_store_root(store)?);
                let entry = store.save(&result, &images)?;
                println!("✔ 履歴に保存: {} (画像{}枚)", entry.id, entry.images.len());
            }

            println!("\n✅ 完了");
        }

        Commands::History { show, delete, yes, store } => {
            let store = HistoryStore::open(resolve_store_root(store)?);

            if let Some(id) = delete {
                let confirmed = yes
                    || Confirm::new()
                        .with_prompt(format!("エントリ {} と画像コピーを削除しますか?", id))
                        .default(false)
                        .interact()
                        .map_err(|e| FoodAiError::Interactive(e.to_string()))?;

                if !confirmed {
                    println!("キャンセルしました");
                } else if store.delete(&id)? {
                    println!("✔ 削除しました: {}", id);
                } else {
                    println!("エントリが見つかりません: {}", id);
                }
            } else if let Some(id) = show {
                match store.find(&id) {
                    Some(entry) => {
                        println!("id: {}", entry.id);
                        println!("日時: {}", entry.timestamp);
                        println!("製品名: {}", entry.name);
                        println!("カテゴリ: {}", entry.category);
                        if !entry.images.is_empty() {
                            println!("画像: {}", entry.images.join(", "));
                        }
                        println!("{}", serde_json::to_string_pretty(entry.analysis.as_value())?);
                    }
                    None => println!("エントリが見つかりません: {}", id),
                }
            } else {
                let entries = store.list();
                if entries.is_empty() {
                    println!("履歴はまだありません: {}", store.history_path().display());
                } else {
                    println!("履歴: {}件\n", entries.len());
                    for entry in &entries {
                        println!("  {}  {} [{}]", entry.timestamp, entry.name, entry.category);
                        println!(
                            "    エネルギー: {}  糖類: {}  id: {}",
                            format_value(&entry.summary.energy_value),
                            format_value(&entry.summary.total_sugar),
                            entry.id
                        );
                    }
                }
            }
        }

        Commands::Config { set_api_key, set_model, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if let Some(model) = set_model {
                config.set_model(model)?;
                println!("✔ モデルを設定しました");
            }

            if show {
                println!("設定:");
                println!("  エンドポイント: {}", config.base_url);
                println!("  モデル: {}", config.model);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  APIキー: {}", if config.api_key.is_some() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}

/// 履歴ストアのルートを決める（--store 指定が無ければ既定の場所）
fn resolve_store_root(store: Option<PathBuf>) -> Result<PathBuf> {
    match store {
        Some(path) => Ok(path),
        None => Config::history_dir(),
    }
}

/// 解析結果を整形して表示
fn print_analysis(result: &AnalysisResult) -> Result<()> {
    println!("  製品名: {}", result.name());
    println!("  カテゴリ: {}", result.category());

    if let Some(characteristics) = result.characteristics() {
        println!("  特性:");
        for (key, value) in characteristics {
            println!("    {}: {}", key, format_value(value));
        }
    }

    if let Some(comparison) = result.comparison() {
        println!("  基準比較:");
        for (key, value) in comparison {
            let mark = match value {
                Value::Bool(true) => "✔",
                Value::Bool(false) => "✘",
                // "NaN": 要件はあるが製品側の値が読み取れない
                _ => "−",
            };
            println!("    {} {}", mark, key);
        }
    }

    println!();
    println!("{}", serde_json::to_string_pretty(result.as_value())?);
    Ok(())
}

/// JSON値の表示用整形（文字列はそのまま、Nullは "N/A"）
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "N/A".to_string(),
        other => other.to_string(),
    }
}
