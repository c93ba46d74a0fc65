//! 時系列トレースログ
//!
//! `log` クレートのバックエンド。ブラウザのコンソールへ出力しつつ、
//! 直近のログをメモリに保持して後から確認できるようにする。

use log::{Level, LevelFilter, Log, Metadata, Record};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Mutex;

const MAX_LOG_ENTRIES: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    pub category: String,
    pub message: String,
}

pub struct LogTrace {
    logs: Mutex<VecDeque<LogEntry>>,
}

static LOG_TRACE: LogTrace = LogTrace::new();

impl LogTrace {
    const fn new() -> Self {
        LogTrace {
            logs: Mutex::new(VecDeque::new()),
        }
    }

    fn push(&self, entry: LogEntry) {
        if let Ok(mut logs) = self.logs.lock() {
            if logs.len() >= MAX_LOG_ENTRIES {
                logs.pop_front();
            }
            logs.push_back(entry);
        }
    }

    fn snapshot(&self) -> Vec<LogEntry> {
        self.logs
            .lock()
            .map(|logs| logs.iter().cloned().collect())
            .unwrap_or_default()
    }
}

/// "[category] message" 形式からカテゴリを取り出す
fn split_category(message: &str) -> (&str, &str) {
    message
        .strip_prefix('[')
        .and_then(|rest| rest.split_once(']'))
        .map(|(category, rest)| (category, rest.trim_start()))
        .unwrap_or(("app", message))
}

fn timestamp() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::new_0().to_iso_string().as_string().unwrap_or_default()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        chrono::Utc::now().to_rfc3339()
    }
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        Level::Info => web_sys::console::info_1(&value),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(_level: Level, line: &str) {
    eprintln!("{}", line);
}

impl Log for LogTrace {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let text = record.args().to_string();
        let (category, message) = split_category(&text);
        write_console(record.level(), &format!("[{}] {}", category, message));

        self.push(LogEntry {
            timestamp: timestamp(),
            level: record.level().as_str().to_lowercase(),
            category: category.to_string(),
            message: message.to_string(),
        });
    }

    fn flush(&self) {}
}

/// ロガーを登録（2回目以降は無視）
pub fn init() {
    if log::set_logger(&LOG_TRACE).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}

pub fn recent_logs() -> Vec<LogEntry> {
    LOG_TRACE.snapshot()
}

pub fn get_logs_json() -> String {
    serde_json::to_string_pretty(&recent_logs()).unwrap_or_else(|_| "[]".to_string())
}
