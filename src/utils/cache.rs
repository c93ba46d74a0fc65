//! LocalStorageキャッシュ管理

use crate::config::{CACHE_KEY, SOUND_KEY};
use crate::error::StorageError;
use crate::models::{CacheEnvelope, ProjectSummary};

/// キーバリューストア（ブラウザのLocalStorage、テストではメモリ）
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

/// window.localStorage
#[derive(Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// キャッシュが有効期限内か
pub fn is_fresh(timestamp: u64, now: u64, ttl_ms: u64) -> bool {
    now.saturating_sub(timestamp) < ttl_ms
}

/// 有効なキャッシュを読み込む（期限切れ・破損していれば削除してNone）
pub fn load_cached_projects(
    store: &impl KeyValueStore,
    now: u64,
    ttl_ms: u64,
) -> Option<Vec<ProjectSummary>> {
    let json = store.get(CACHE_KEY)?;
    let envelope: CacheEnvelope = match serde_json::from_str(&json) {
        Ok(envelope) => envelope,
        Err(e) => {
            log::warn!("[cache] 破損したキャッシュを破棄: {}", e);
            store.remove(CACHE_KEY);
            return None;
        }
    };
    if is_fresh(envelope.timestamp, now, ttl_ms) {
        Some(envelope.data)
    } else {
        store.remove(CACHE_KEY);
        None
    }
}

/// プロジェクト一覧をキャッシュに保存
pub fn save_projects_to_cache(
    store: &impl KeyValueStore,
    projects: &[ProjectSummary],
    now: u64,
) -> Result<(), StorageError> {
    let envelope = CacheEnvelope {
        data: projects.to_vec(),
        timestamp: now,
    };
    let json = serde_json::to_string(&envelope)?;
    store.set(CACHE_KEY, &json)
}

/// サウンド設定を読み込み（"true" 以外はオフ）
pub fn load_sound_preference(store: &impl KeyValueStore) -> bool {
    store.get(SOUND_KEY).as_deref() == Some("true")
}

pub fn save_sound_preference(store: &impl KeyValueStore, enabled: bool) {
    if let Err(e) = store.set(SOUND_KEY, if enabled { "true" } else { "false" }) {
        log::warn!("[sound] 設定の保存に失敗: {}", e);
    }
}

#[cfg(test)]
pub mod memory {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// テスト用のメモリストア
    #[derive(Default)]
    pub struct MemoryStore {
        pub items: RefCell<HashMap<String, String>>,
        pub read_only: bool,
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.items.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.read_only {
                return Err(StorageError::Write("quota exceeded".to_string()));
            }
            self.items.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) {
            self.items.borrow_mut().remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryStore;
    use super::*;

    const HOUR: u64 = 3_600_000;
    const MINUTE: u64 = 60_000;

    fn sample() -> Vec<ProjectSummary> {
        vec![ProjectSummary {
            name: "cached".to_string(),
            description: None,
            language: Some("Rust".to_string()),
            stargazers_count: 1,
            forks_count: 0,
            html_url: "https://github.com/u/cached".to_string(),
            updated_at: None,
        }]
    }

    #[test]
    fn test_freshness_window() {
        assert!(is_fresh(0, 59 * MINUTE, HOUR));
        assert!(!is_fresh(0, HOUR, HOUR));
        assert!(!is_fresh(0, 61 * MINUTE, HOUR));
        // 時計が巻き戻っても新しい扱い
        assert!(is_fresh(1000, 10, HOUR));
    }

    #[test]
    fn test_roundtrip_within_window() {
        let store = MemoryStore::default();
        save_projects_to_cache(&store, &sample(), 1_000).unwrap();
        let loaded = load_cached_projects(&store, 1_000 + 59 * MINUTE, HOUR);
        assert_eq!(loaded, Some(sample()));
    }

    #[test]
    fn test_expired_entry_is_removed() {
        let store = MemoryStore::default();
        save_projects_to_cache(&store, &sample(), 1_000).unwrap();
        assert_eq!(load_cached_projects(&store, 1_000 + 61 * MINUTE, HOUR), None);
        assert!(store.get(CACHE_KEY).is_none());
    }

    #[test]
    fn test_corrupt_entry_is_absent() {
        let store = MemoryStore::default();
        store.set(CACHE_KEY, "{not json").unwrap();
        assert_eq!(load_cached_projects(&store, 0, HOUR), None);
        assert!(store.get(CACHE_KEY).is_none());
    }

    #[test]
    fn test_write_failure_is_reported() {
        let store = MemoryStore { read_only: true, ..Default::default() };
        assert!(matches!(
            save_projects_to_cache(&store, &sample(), 0),
            Err(StorageError::Write(_))
        ));
    }

    #[test]
    fn test_sound_preference() {
        let store = MemoryStore::default();
        assert!(!load_sound_preference(&store));
        save_sound_preference(&store, true);
        assert!(load_sound_preference(&store));
        save_sound_preference(&store, false);
        assert!(!load_sound_preference(&store));
        store.set(SOUND_KEY, "yes").unwrap();
        assert!(!load_sound_preference(&store));
    }
}
