//! データ構造体モジュール

use serde::{Deserialize, Serialize};

// ============================================
// プロジェクト（GitHubリポジトリ）
// ============================================

/// 表示用のリポジトリ概要
///
/// フィールド名はGitHub APIのレスポンスと同じにしてあるので、
/// APIレスポンスとキャッシュの両方をこの型で読める。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    #[serde(default = "placeholder_url")]
    pub html_url: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn placeholder_url() -> String {
    "#".to_string()
}

/// LocalStorageに保存するキャッシュ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEnvelope {
    pub data: Vec<ProjectSummary>,
    pub timestamp: u64,
}

/// API取得に失敗した時に表示する固定リスト
pub fn fallback_projects() -> Vec<ProjectSummary> {
    vec![ProjectSummary {
        name: "Islamic Text Dataset".to_string(),
        description: Some(
            "OCR'd 50+ Islamic books, tafsirs, and collected text versions of Quran and Hadith \
             to feed AI models for Islamic studies and research."
                .to_string(),
        ),
        language: Some("Python".to_string()),
        stargazers_count: 0,
        forks_count: 0,
        html_url: "https://github.com/Monotheist0".to_string(),
        updated_at: None,
    }]
}

// ============================================
// フィード結果
// ============================================

/// 表示データの取得元
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedOrigin {
    Cache,
    Remote,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedOutcome {
    pub projects: Vec<ProjectSummary>,
    pub origin: FeedOrigin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_github_repo() {
        let json = r#"{
            "name": "repo",
            "description": null,
            "language": "Rust",
            "stargazers_count": 3,
            "forks_count": 1,
            "html_url": "https://github.com/u/repo",
            "updated_at": "2024-06-01T10:00:00Z",
            "private": false
        }"#;
        let p: ProjectSummary = serde_json::from_str(json).unwrap();
        assert_eq!(p.name, "repo");
        assert_eq!(p.description, None);
        assert_eq!(p.language.as_deref(), Some("Rust"));
        assert_eq!(p.stargazers_count, 3);
        assert_eq!(p.updated_at.as_deref(), Some("2024-06-01T10:00:00Z"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let p: ProjectSummary = serde_json::from_str(r#"{"name": "bare"}"#).unwrap();
        assert_eq!(p.stargazers_count, 0);
        assert_eq!(p.forks_count, 0);
        assert_eq!(p.html_url, "#");
    }

    #[test]
    fn test_fallback_has_single_entry() {
        let list = fallback_projects();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "Islamic Text Dataset");
    }
}
