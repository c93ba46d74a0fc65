//! 設定値モジュール
//!
//! ページ数・アニメーション時間・キャッシュ期限などの定数をまとめる。
//! GitHubユーザー名は build.rs で埋め込み、`?user=` で上書きできる。

/// ビルド時に埋め込まれたGitHubユーザー名
pub const DEFAULT_GITHUB_USER: &str = env!("BOOK_GITHUB_USER");

/// キャッシュ保存キー
pub const CACHE_KEY: &str = "github_repos";
/// サウンド設定保存キー
pub const SOUND_KEY: &str = "soundEnabled";

#[derive(Debug, Clone, PartialEq)]
pub struct BookConfig {
    pub total_pages: usize,
    /// ページめくりのアニメーション時間（CSSのtransitionと一致させること）
    pub settle_ms: u32,
    /// このページに到達したらプロジェクト一覧を先読みする
    pub feed_trigger_page: usize,
    /// プロジェクト一覧を表示するページ
    pub projects_page: usize,
    pub top_projects: usize,
    pub cache_ttl_ms: u64,
    pub request_timeout_ms: u32,
    pub swipe: SwipeConfig,
    pub github_user: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    pub narrow_threshold: f64,
    pub wide_threshold: f64,
    pub narrow_breakpoint: f64,
    /// 横移動は縦移動のこの倍数を超える必要がある
    pub ratio: f64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            narrow_threshold: 70.0,
            wide_threshold: 100.0,
            narrow_breakpoint: 768.0,
            ratio: 3.0,
        }
    }
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            total_pages: 7,
            settle_ms: 800,
            feed_trigger_page: 3,
            projects_page: 4,
            top_projects: 6,
            cache_ttl_ms: 60 * 60 * 1000,
            request_timeout_ms: 10_000,
            swipe: SwipeConfig::default(),
            github_user: DEFAULT_GITHUB_USER.to_string(),
        }
    }
}

impl BookConfig {
    /// 設定を読み込む（URLパラメータ `?user=xxx` があればユーザー名を差し替え）
    pub fn load() -> Self {
        let mut config = Self::default();
        if let Some(user) = user_from_url_params() {
            log::info!("[config] GitHub user overridden: {}", user);
            config.github_user = user;
        }
        config
    }

    pub fn repos_url(&self) -> String {
        format!("https://api.github.com/users/{}/repos", self.github_user)
    }
}

fn user_from_url_params() -> Option<String> {
    let window = web_sys::window()?;
    let search = window.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params
        .get("user")
        .map(|u| u.trim().to_string())
        .filter(|u| is_valid_github_user(u))
}

/// GitHubユーザー名として使える文字列か（英数字とハイフン、39文字以内）
pub fn is_valid_github_user(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 39
        && !name.starts_with('-')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BookConfig::default();
        assert_eq!(config.total_pages, 7);
        assert_eq!(config.settle_ms, 800);
        assert_eq!(config.cache_ttl_ms, 3_600_000);
        assert!(config.repos_url().starts_with("https://api.github.com/users/"));
        assert!(config.repos_url().ends_with("/repos"));
    }

    #[test]
    fn test_github_user_validation() {
        assert!(is_valid_github_user("Monotheist0"));
        assert!(is_valid_github_user("some-user"));
        assert!(!is_valid_github_user(""));
        assert!(!is_valid_github_user("-bad"));
        assert!(!is_valid_github_user("a/b"));
        assert!(!is_valid_github_user(&"x".repeat(40)));
    }
}
