use leptos::*;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

mod components;
mod config;
mod error;
mod feed;
mod input;
mod models;
mod pager;
mod render;
mod utils;
mod views;

use components::ToastState;
use config::BookConfig;
use feed::ProjectFeed;
use input::command_for_key;
use models::FeedOutcome;
use pager::{FlipEffect, NavCommand, Pager};
use utils::cache::{load_sound_preference, LocalStore};
use utils::github::GitHubSource;
use utils::sound::SoundEngine;
use views::BookView;

const TOAST_MS: u32 = 2000;
const INSTANT_RENDER_MS: u32 = 20;
const SETTLE_RETRY_MS: u32 = 16;

// ============================================
// 共有状態
// ============================================

type LiveFeed = ProjectFeed<LocalStore, GitHubSource>;

/// アプリ全体で共有する状態（ハンドルのみなのでCopy）
#[derive(Clone, Copy)]
pub struct BookContext {
    pub config: StoredValue<BookConfig>,
    pub pager: RwSignal<Pager>,
    /// 初回描画中はトランジションを無効にする
    pub instant: RwSignal<bool>,
    /// プロジェクト一覧（None = 読み込み中）
    pub projects: RwSignal<Option<FeedOutcome>>,
    pub toast: RwSignal<ToastState>,
    pub sound_enabled: RwSignal<bool>,
    pub sound: StoredValue<SoundEngine>,
    feed: StoredValue<Rc<LiveFeed>>,
}

impl BookContext {
    fn new(config: BookConfig) -> Self {
        let sound_on = load_sound_preference(&LocalStore);
        let feed = ProjectFeed::new(
            LocalStore,
            GitHubSource::new(&config),
            config.top_projects,
            config.cache_ttl_ms,
        );
        Self {
            pager: create_rw_signal(Pager::new(&config)),
            instant: create_rw_signal(true),
            projects: create_rw_signal(None),
            toast: create_rw_signal(ToastState::default()),
            sound_enabled: create_rw_signal(sound_on),
            sound: store_value(SoundEngine::new(sound_on)),
            feed: store_value(Rc::new(feed)),
            config: store_value(config),
        }
    }

    /// ナビゲーション要求を状態機械に渡し、受理されたら後処理を実行する
    pub fn navigate(&self, command: NavCommand) {
        let mut next = self.pager.get_untracked();
        let Some(flip) = next.apply(command, utils::now_ms()) else {
            return;
        };
        log::info!("[pager] {} → {}", flip.from, flip.to);
        self.pager.set(next);

        for effect in flip.effects() {
            match effect {
                FlipEffect::ScheduleSettle => self.schedule_settle(),
                FlipEffect::PlaySound => self.sound.with_value(|s| s.play_flip()),
                FlipEffect::LoadFeed => self.load_projects(),
            }
        }
    }

    /// CSSのtransitionと同じ時間が経ったらアニメーションを終了する
    fn schedule_settle(&self) {
        let pager = self.pager;
        let settle_ms = self.config.with_value(|c| c.settle_ms);
        spawn_local(async move {
            gloo::timers::future::TimeoutFuture::new(settle_ms).await;
            // 満了前に戻った場合は少し待って再確認（破棄済みなら終了）
            while !pager.try_update(|p| p.settle(utils::now_ms())).unwrap_or(true) {
                gloo::timers::future::TimeoutFuture::new(SETTLE_RETRY_MS).await;
            }
        });
    }

    /// プロジェクト一覧を読み込む（2回目以降は何もしない）
    pub fn load_projects(&self) {
        let feed = self.feed.get_value();
        let projects = self.projects;
        spawn_local(async move {
            let now = utils::now_ms() as u64;
            if let Some(outcome) = feed.ensure_loaded(now).await {
                projects.set(Some(outcome));
            }
        });
    }

    pub fn show_toast(&self, message: &str) {
        let toast = self.toast;
        let Some(generation) = toast.try_update(|t| t.show(message)) else {
            return;
        };
        spawn_local(async move {
            gloo::timers::future::TimeoutFuture::new(TOAST_MS).await;
            toast.update(|t| {
                t.expire(generation);
            });
        });
    }
}

// ============================================
// グローバル関数（インラインHTMLから呼ぶ）
// ============================================

fn expose_globals(ctx: BookContext) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let jump = Closure::<dyn Fn(u32)>::new(move |page: u32| {
        ctx.navigate(NavCommand::Jump(page as usize));
    });
    let dump_logs = Closure::<dyn Fn() -> String>::new(utils::log_trace::get_logs_json);

    register_global(&window, "jumpToPage", jump.as_ref().unchecked_ref());
    register_global(&window, "dumpBookLogs", dump_logs.as_ref().unchecked_ref());
    jump.forget();
    dump_logs.forget();
}

fn register_global(window: &web_sys::Window, name: &str, func: &js_sys::Function) {
    if let Err(e) = js_sys::Reflect::set(window, &JsValue::from_str(name), func) {
        log::warn!("[app] {} の登録に失敗: {:?}", name, e);
    }
}

// ============================================
// タッチ操作
// ============================================

fn setup_touch_navigation(ctx: BookContext) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let touch_supported =
        js_sys::Reflect::has(&window, &JsValue::from_str("ontouchstart")).unwrap_or(false);
    if !touch_supported {
        return;
    }

    let start = store_value((0.0_f64, 0.0_f64));

    let _ = window_event_listener(ev::touchstart, move |ev: web_sys::TouchEvent| {
        if let Some(touch) = ev.changed_touches().get(0) {
            start.set_value((f64::from(touch.screen_x()), f64::from(touch.screen_y())));
        }
    });

    let _ = window_event_listener(ev::touchend, move |ev: web_sys::TouchEvent| {
        let Some(touch) = ev.changed_touches().get(0) else {
            return;
        };
        let (start_x, start_y) = start.get_value();
        let dx = f64::from(touch.screen_x()) - start_x;
        let dy = f64::from(touch.screen_y()) - start_y;
        let viewport_width = web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|w| w.as_f64())
            .unwrap_or(1024.0);
        let swipe = ctx.config.with_value(|c| c.swipe);
        if let Some(command) = input::command_for_swipe(&swipe, dx, dy, viewport_width) {
            ctx.navigate(command);
        }
    });
}

// ============================================
// メインアプリ
// ============================================

#[component]
fn App() -> impl IntoView {
    let ctx = BookContext::new(BookConfig::load());
    provide_context(ctx);

    let _ = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if let Some(command) = command_for_key(&ev.key()) {
            ctx.navigate(command);
        }
    });
    setup_touch_navigation(ctx);
    expose_globals(ctx);

    // 初回はアニメーションなしで描画し、少し待ってからトランジションを有効にする
    spawn_local(async move {
        gloo::timers::future::TimeoutFuture::new(INSTANT_RENDER_MS).await;
        ctx.instant.set(false);
    });

    ctx.load_projects();

    view! {
        <BookView />
    }
}

fn main() {
    console_error_panic_hook::set_once();
    utils::log_trace::init();
    log::info!("[app] flipbook portfolio 起動");
    mount_to_body(App);
}
