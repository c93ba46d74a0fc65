//! GitHub REST API 連携

use futures::future::{select, Either};
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::config::BookConfig;
use crate::error::FeedError;
use crate::feed::RepoSource;
use crate::models::ProjectSummary;

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// ユーザーの公開リポジトリ一覧を取得する
pub struct GitHubSource {
    url: String,
    timeout_ms: u32,
}

impl GitHubSource {
    pub fn new(config: &BookConfig) -> Self {
        Self {
            url: config.repos_url(),
            timeout_ms: config.request_timeout_ms,
        }
    }
}

impl RepoSource for GitHubSource {
    async fn fetch_repositories(&self) -> Result<Vec<ProjectSummary>, FeedError> {
        let request = fetch_repos(&self.url);
        let timeout = TimeoutFuture::new(self.timeout_ms);
        futures::pin_mut!(request);
        futures::pin_mut!(timeout);

        match select(request, timeout).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => Err(FeedError::Timeout(self.timeout_ms)),
        }
    }
}

async fn fetch_repos(url: &str) -> Result<Vec<ProjectSummary>, FeedError> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| FeedError::Network(format!("Request作成失敗: {:?}", e)))?;
    request
        .headers()
        .set("Accept", GITHUB_ACCEPT)
        .map_err(|e| FeedError::Network(format!("ヘッダー設定失敗: {:?}", e)))?;

    let window = web_sys::window().ok_or(FeedError::NoWindow)?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| FeedError::Network(format!("{:?}", e)))?;

    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| FeedError::Network("Responseへの変換失敗".to_string()))?;

    if !resp.ok() {
        return Err(FeedError::Status(resp.status()));
    }

    let json = JsFuture::from(resp.json().map_err(|e| FeedError::Parse(format!("{:?}", e)))?)
        .await
        .map_err(|e| FeedError::Parse(format!("{:?}", e)))?;

    serde_wasm_bindgen::from_value(json).map_err(|e| FeedError::Parse(e.to_string()))
}
