//! ユーティリティモジュール

pub mod cache;
pub mod github;
pub mod log_trace;
pub mod share;
pub mod sound;

// 共通ヘルパー

/// 現在時刻（エポックミリ秒）
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

pub fn current_year() -> u32 {
    js_sys::Date::new_0().get_full_year()
}
