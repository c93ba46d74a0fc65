//! エラー型

use thiserror::Error;

/// プロジェクト一覧取得のエラー（すべてフォールバック表示で回復する）
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedError {
    #[error("windowがありません")]
    NoWindow,

    #[error("fetch失敗: {0}")]
    Network(String),

    #[error("GitHub APIエラー: {0}")]
    Status(u16),

    #[error("JSON解析失敗: {0}")]
    Parse(String),

    #[error("タイムアウト ({0}ms)")]
    Timeout(u32),
}

/// LocalStorageのエラー（キャッシュなしとして扱う）
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    #[error("LocalStorageが使えません")]
    Unavailable,

    #[error("書き込み失敗: {0}")]
    Write(String),

    #[error("シリアライズ失敗: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialize(e.to_string())
    }
}
