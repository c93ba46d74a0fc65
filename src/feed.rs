//! プロジェクト一覧の取得
//!
//! キャッシュ → GitHub API → フォールバック の順に解決する。
//! 取得元は [`RepoSource`]、保存先は [`KeyValueStore`] として差し替え可能。

use std::cell::Cell;
use std::cmp::Reverse;

use chrono::{DateTime, NaiveDate};

use crate::error::FeedError;
use crate::models::{fallback_projects, FeedOrigin, FeedOutcome, ProjectSummary};
use crate::utils::cache::{load_cached_projects, save_projects_to_cache, KeyValueStore};

/// リポジトリ一覧の取得元
#[allow(async_fn_in_trait)]
pub trait RepoSource {
    async fn fetch_repositories(&self) -> Result<Vec<ProjectSummary>, FeedError>;
}

// ============================================
// 並べ替え
// ============================================

/// `updated_at` をミリ秒に変換（RFC 3339 または YYYY-MM-DD）
fn updated_millis(project: &ProjectSummary) -> Option<i64> {
    let raw = project.updated_at.as_deref()?;
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.timestamp_millis())
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc().timestamp_millis())
        })
}

/// スター数の多い順、同数なら更新日の新しい順に並べて上位 `top` 件を返す
pub fn rank_projects(mut projects: Vec<ProjectSummary>, top: usize) -> Vec<ProjectSummary> {
    projects.sort_by_cached_key(|p| (Reverse(p.stargazers_count), Reverse(updated_millis(p))));
    projects.truncate(top);
    projects
}

// ============================================
// 読み込み
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    Idle,
    Loading,
    Loaded,
}

pub struct ProjectFeed<S, R> {
    store: S,
    source: R,
    phase: Cell<FeedPhase>,
    top: usize,
    ttl_ms: u64,
}

impl<S: KeyValueStore, R: RepoSource> ProjectFeed<S, R> {
    pub fn new(store: S, source: R, top: usize, ttl_ms: u64) -> Self {
        Self {
            store,
            source,
            phase: Cell::new(FeedPhase::Idle),
            top,
            ttl_ms,
        }
    }

    /// 未読み込みなら一覧を解決して返す。読み込み中・読み込み済みならNone。
    ///
    /// 失敗は呼び出し元に返さず、フォールバック一覧で置き換える。
    pub async fn ensure_loaded(&self, now: u64) -> Option<FeedOutcome> {
        if self.phase.get() != FeedPhase::Idle {
            return None;
        }
        // await より前に状態を変えておく（再入防止）
        self.phase.set(FeedPhase::Loading);

        if let Some(projects) = load_cached_projects(&self.store, now, self.ttl_ms) {
            log::info!("[feed] キャッシュから{}件を表示", projects.len());
            self.phase.set(FeedPhase::Loaded);
            return Some(FeedOutcome {
                projects,
                origin: FeedOrigin::Cache,
            });
        }

        let outcome = match self.source.fetch_repositories().await {
            Ok(repos) => {
                let projects = rank_projects(repos, self.top);
                if let Err(e) = save_projects_to_cache(&self.store, &projects, now) {
                    log::warn!("[feed] キャッシュ保存に失敗: {}", e);
                }
                log::info!("[feed] GitHubから{}件を取得", projects.len());
                FeedOutcome {
                    projects,
                    origin: FeedOrigin::Remote,
                }
            }
            Err(e) => {
                log::error!("[feed] プロジェクト取得に失敗: {}", e);
                FeedOutcome {
                    projects: fallback_projects(),
                    origin: FeedOrigin::Fallback,
                }
            }
        };

        self.phase.set(FeedPhase::Loaded);
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CACHE_KEY;
    use crate::models::CacheEnvelope;
    use crate::utils::cache::memory::MemoryStore;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use std::cell::RefCell;

    const HOUR: u64 = 3_600_000;
    const MINUTE: u64 = 60_000;

    fn repo(name: &str, stars: u32, updated: &str) -> ProjectSummary {
        ProjectSummary {
            name: name.to_string(),
            description: None,
            language: None,
            stargazers_count: stars,
            forks_count: 0,
            html_url: format!("https://github.com/u/{}", name),
            updated_at: Some(updated.to_string()),
        }
    }

    /// 呼び出し回数を数える取得元
    struct ScriptedSource {
        response: Result<Vec<ProjectSummary>, FeedError>,
        calls: Cell<usize>,
    }

    impl ScriptedSource {
        fn ok(repos: Vec<ProjectSummary>) -> Self {
            Self { response: Ok(repos), calls: Cell::new(0) }
        }

        fn err(e: FeedError) -> Self {
            Self { response: Err(e), calls: Cell::new(0) }
        }
    }

    impl RepoSource for &ScriptedSource {
        async fn fetch_repositories(&self) -> Result<Vec<ProjectSummary>, FeedError> {
            self.calls.set(self.calls.get() + 1);
            self.response.clone()
        }
    }

    fn names(projects: &[ProjectSummary]) -> Vec<&str> {
        projects.iter().map(|p| p.name.as_str()).collect()
    }

    fn seed_cache(store: &MemoryStore, timestamp: u64) {
        let envelope = CacheEnvelope { data: vec![repo("cached", 1, "2024-01-01")], timestamp };
        store.set(CACHE_KEY, &serde_json::to_string(&envelope).unwrap()).unwrap();
    }

    #[test]
    fn test_rank_stars_then_recency() {
        let ranked = rank_projects(
            vec![
                repo("A", 5, "2024-01-01"),
                repo("B", 5, "2024-06-01"),
                repo("C", 10, "2023-01-01"),
            ],
            6,
        );
        assert_eq!(names(&ranked), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_rank_handles_rfc3339_and_truncates() {
        let mut repos: Vec<_> = (0..8)
            .map(|i| repo(&format!("r{}", i), 1, &format!("2024-01-0{}T12:00:00Z", i + 1)))
            .collect();
        repos.push(repo("undated", 1, "not a date"));
        let ranked = rank_projects(repos, 6);
        assert_eq!(ranked.len(), 6);
        assert_eq!(ranked[0].name, "r7");
        assert!(!names(&ranked).contains(&"undated"));
    }

    #[test]
    fn test_fresh_cache_skips_network() {
        let store = MemoryStore::default();
        seed_cache(&store, 0);
        let source = ScriptedSource::ok(vec![repo("remote", 1, "2024-01-01")]);
        let feed = ProjectFeed::new(store, &source, 6, HOUR);

        let outcome = block_on(feed.ensure_loaded(59 * MINUTE)).unwrap();
        assert_eq!(outcome.origin, FeedOrigin::Cache);
        assert_eq!(names(&outcome.projects), vec!["cached"]);
        assert_eq!(source.calls.get(), 0);
        assert_eq!(feed.phase.get(), FeedPhase::Loaded);
    }

    #[test]
    fn test_stale_cache_refetches_and_overwrites() {
        let store = MemoryStore::default();
        seed_cache(&store, 0);
        let source = ScriptedSource::ok(vec![repo("remote", 1, "2024-01-01")]);
        let feed = ProjectFeed::new(store, &source, 6, HOUR);

        let now = 61 * MINUTE;
        let outcome = block_on(feed.ensure_loaded(now)).unwrap();
        assert_eq!(outcome.origin, FeedOrigin::Remote);
        assert_eq!(source.calls.get(), 1);

        let cached: CacheEnvelope =
            serde_json::from_str(&feed.store.get(CACHE_KEY).unwrap()).unwrap();
        assert_eq!(cached.timestamp, now);
        assert_eq!(names(&cached.data), vec!["remote"]);
    }

    #[test]
    fn test_network_failure_renders_fallback() {
        let source = ScriptedSource::err(FeedError::Network("offline".to_string()));
        let feed = ProjectFeed::new(MemoryStore::default(), &source, 6, HOUR);

        let outcome = block_on(feed.ensure_loaded(0)).unwrap();
        assert_eq!(outcome.origin, FeedOrigin::Fallback);
        assert_eq!(outcome.projects, fallback_projects());
        assert_eq!(feed.phase.get(), FeedPhase::Loaded);
        // フォールバックはキャッシュしない
        assert!(feed.store.get(CACHE_KEY).is_none());
    }

    #[test]
    fn test_cache_write_failure_is_ignored() {
        let store = MemoryStore { read_only: true, ..Default::default() };
        let source = ScriptedSource::ok(vec![repo("remote", 1, "2024-01-01")]);
        let feed = ProjectFeed::new(store, &source, 6, HOUR);

        let outcome = block_on(feed.ensure_loaded(0)).unwrap();
        assert_eq!(outcome.origin, FeedOrigin::Remote);
    }

    #[test]
    fn test_second_call_is_noop() {
        let source = ScriptedSource::ok(vec![repo("remote", 1, "2024-01-01")]);
        let feed = ProjectFeed::new(MemoryStore::default(), &source, 6, HOUR);

        assert!(block_on(feed.ensure_loaded(0)).is_some());
        assert!(block_on(feed.ensure_loaded(0)).is_none());
        assert_eq!(source.calls.get(), 1);
    }

    /// 応答をテスト側から送るまで待つ取得元
    struct PendingSource {
        rx: RefCell<Option<oneshot::Receiver<Vec<ProjectSummary>>>>,
    }

    impl RepoSource for PendingSource {
        async fn fetch_repositories(&self) -> Result<Vec<ProjectSummary>, FeedError> {
            let rx = self.rx.borrow_mut().take().ok_or(FeedError::NoWindow)?;
            rx.await.map_err(|e| FeedError::Network(e.to_string()))
        }
    }

    #[test]
    fn test_reentrant_call_while_loading_is_noop() {
        let (tx, rx) = oneshot::channel();
        let source = PendingSource { rx: RefCell::new(Some(rx)) };
        let feed = ProjectFeed::new(MemoryStore::default(), source, 6, HOUR);

        block_on(async {
            let mut first = Box::pin(feed.ensure_loaded(0));
            assert!(futures::poll!(first.as_mut()).is_pending());
            assert_eq!(feed.phase.get(), FeedPhase::Loading);
            assert!(feed.ensure_loaded(0).await.is_none());

            tx.send(vec![repo("late", 2, "2024-01-01")]).unwrap();
            let outcome = first.await.unwrap();
            assert_eq!(names(&outcome.projects), vec!["late"]);
        });
        assert_eq!(feed.phase.get(), FeedPhase::Loaded);
    }
}
