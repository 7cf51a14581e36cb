//! 解析履歴ストア
//!
//! 単一のJSONドキュメント（history.json）と images/ 配下の画像コピーで
//! 構成する追記型ストア。読み込みは常にフェイルソフト（欠損・破損は空扱い）、
//! 書き込みの失敗だけを呼び出し元へ伝播する。

use super::types::{EntrySummary, HistoryEntry};
use crate::analyzer::AnalysisResult;
use crate::error::Result;
use chrono::{SecondsFormat, Utc};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use uuid::Uuid;

const HISTORY_FILE_NAME: &str = "history.json";
const IMAGES_DIR_NAME: &str = "images";

/// 履歴ストア
///
/// ルートディレクトリを基準に history.json と images/ を管理する。
/// 画像参照はルートからの相対パス（`/` 区切り）で記録するため、ディレクトリ
/// ごと移動してもそのまま読める。
#[derive(Debug, Clone)]
pub struct HistoryStore {
    root: PathBuf,
}

impl HistoryStore {
    /// ルートディレクトリを指定してストアを開く（この時点ではI/Oしない）
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn history_path(&self) -> PathBuf {
        self.root.join(HISTORY_FILE_NAME)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join(IMAGES_DIR_NAME)
    }

    /// 解析結果を保存し、元画像をストア配下へコピーする
    ///
    /// 存在しない画像パスは黙ってスキップし、コピーの失敗もエントリ保存を
    /// 妨げない。ドキュメント書き込みの失敗だけが Err になる。
    pub fn save(&self, analysis: &AnalysisResult, image_paths: &[PathBuf]) -> Result<HistoryEntry> {
        self.ensure_dirs()?;

        let id = Uuid::new_v4().to_string();
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        let mut images = Vec::new();
        for (index, path) in image_paths.iter().enumerate() {
            if !path.exists() {
                continue;
            }

            let ext = path
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_default();
            let file_name = format!("{}_{}{}", id, index, ext);

            if fs::copy(path, self.images_dir().join(&file_name)).is_ok() {
                images.push(format!("{}/{}", IMAGES_DIR_NAME, file_name));
            }
        }

        let entry = HistoryEntry {
            id,
            timestamp,
            name: analysis.name(),
            category: analysis.category(),
            summary: EntrySummary {
                energy_value: analysis.characteristic("energy_value"),
                total_sugar: analysis.characteristic("total_sugar"),
            },
            analysis: analysis.clone(),
            images,
        };

        let mut entries = self.load_entries();
        entries.insert(0, entry.clone()); // 新しいものを先頭に
        self.write_entries(&entries)?;

        Ok(entry)
    }

    /// 履歴を新しい順で返す
    ///
    /// ドキュメントが無い・読めない・壊れている場合は空として扱う。
    /// timestamp が欠けたエントリは空文字として末尾に回る。
    pub fn list(&self) -> Vec<HistoryEntry> {
        let mut entries = self.load_entries();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }

    /// idで指定したエントリを取得する
    pub fn find(&self, id: &str) -> Option<HistoryEntry> {
        self.load_entries().into_iter().find(|e| e.id == id)
    }

    /// idで指定したエントリを削除し、参照している画像コピーも消す
    ///
    /// 一致するエントリがあった場合だけドキュメントを書き直し、true を返す。
    /// 画像ファイルが既に無くてもエラーにしない。
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut entries = self.load_entries();
        let Some(position) = entries.iter().position(|e| e.id == id) else {
            return Ok(false);
        };

        let removed = entries.remove(position);
        for relative in &removed.images {
            let path = self.root.join(relative);
            if path.exists() {
                let _ = fs::remove_file(&path);
            }
        }

        self.write_entries(&entries)?;
        Ok(true)
    }

    fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(self.images_dir())?;
        Ok(())
    }

    fn load_entries(&self) -> Vec<HistoryEntry> {
        let path = self.history_path();
        if !path.exists() {
            return Vec::new();
        }

        let file = match File::open(&path) {
            Ok(f) => f,
            Err(_) => return Vec::new(),
        };

        let reader = BufReader::new(file);
        serde_json::from_reader(reader).unwrap_or_default()
    }

    fn write_entries(&self, entries: &[HistoryEntry]) -> Result<()> {
        self.ensure_dirs()?;
        let file = File::create(self.history_path())?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, entries)?;
        Ok(())
    }
}
