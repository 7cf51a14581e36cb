//! 画像のエンコード
//!
//! 画像ファイルを data URL（base64）へ変換する。リクエスト本体にインラインで
//! 埋め込むため、URLアップロードや外部ストレージは使わない。

use crate::error::{FoodAiError, Result};
use base64::{engine::general_purpose, Engine as _};
use std::path::Path;

/// 拡張子からMIMEタイプを判定する
///
/// 判定できない場合は "image/jpeg" に倒す（中身の検証はしない）。
pub fn detect_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        _ => "image/jpeg",
    }
}

/// 画像ファイルを data URL にエンコードする
pub fn encode_image(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(FoodAiError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let encoded = general_purpose::STANDARD.encode(&bytes);
    Ok(format!("data:{};base64,{}", detect_mime(path), encoded))
}

// =====================================================
// テスト
// =====================================================
