//! プロジェクトカードの表示内容
//!
//! 欠けている項目の補完とリンク先の判定だけを行う。
//! 文字列は加工せずに渡し、エスケープは `view!` に任せる。

use crate::models::{FeedOrigin, FeedOutcome, ProjectSummary};

pub const NO_DESCRIPTION: &str = "No description available.";
pub const UNKNOWN_LANGUAGE: &str = "Unknown";
const PLACEHOLDER_URL: &str = "#";

#[derive(Debug, Clone, PartialEq)]
pub struct CardFields {
    pub name: String,
    pub description: String,
    pub language: String,
    pub stars: u32,
    pub forks: u32,
    /// 「View on GitHub」リンクのhref
    pub link: String,
    /// カードクリックで開くURL
    pub open_url: Option<String>,
}

impl CardFields {
    pub fn from_project(project: &ProjectSummary) -> Self {
        let link = if project.html_url.is_empty() {
            PLACEHOLDER_URL.to_string()
        } else {
            project.html_url.clone()
        };
        Self {
            name: project.name.clone(),
            description: project.description.clone().unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            language: project.language.clone().unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string()),
            stars: project.stargazers_count,
            forks: project.forks_count,
            open_url: outbound_url(Some(&link)).map(str::to_string),
            link,
        }
    }
}

/// カードクリックで開くURL（プレースホルダーなら開かない）
pub fn outbound_url(url: Option<&str>) -> Option<&str> {
    url.filter(|url| !url.is_empty() && *url != PLACEHOLDER_URL)
}

/// 取得に失敗してフォールバック一覧を出している時は注意書きを付ける
pub fn shows_fallback_notice(outcome: &FeedOutcome) -> bool {
    outcome.origin == FeedOrigin::Fallback
}
