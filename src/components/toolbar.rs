//! サウンド切り替え・共有ボタン・トースト

use leptos::*;

use crate::utils::cache::{save_sound_preference, LocalStore};
use crate::utils::share::{current_url, share_or_copy, BrowserShare, ShareContent};
use crate::utils::sound::sound_icon;
use crate::BookContext;

#[component]
pub fn Toolbar() -> impl IntoView {
    let ctx = use_context::<BookContext>().expect("BookContext not found");

    let toggle_sound = move |_| {
        ctx.sound.update_value(|s| {
            s.toggle();
        });
        let enabled = ctx.sound.with_value(|s| s.is_enabled());
        ctx.sound_enabled.set(enabled);
        save_sound_preference(&LocalStore, enabled);
    };

    let share = move |_| {
        let Some(url) = current_url() else {
            return;
        };
        spawn_local(async move {
            let outcome = share_or_copy(&BrowserShare, &ShareContent::for_url(&url)).await;
            if let Some(message) = outcome.toast_message() {
                ctx.show_toast(message);
            }
        });
    };

    view! {
        <div class="toolbar">
            <button
                id="soundToggle"
                class="sound-toggle"
                aria-pressed=move || ctx.sound_enabled.get().to_string()
                on:click=toggle_sound
            >
                <span class="sound-icon">{move || sound_icon(ctx.sound_enabled.get())}</span>
            </button>
            <button class="share-button" on:click=share>"Share"</button>
        </div>
    }
}

/// 表示中のトースト
///
/// 表示するたびに世代が進み、古いタイマーは新しいトーストを消さない。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastState {
    message: Option<String>,
    generation: u64,
}

impl ToastState {
    /// 表示して、この表示の世代を返す
    pub fn show(&mut self, message: &str) -> u64 {
        self.generation += 1;
        self.message = Some(message.to_string());
        self.generation
    }

    /// 指定の世代がまだ表示中なら消す
    pub fn expire(&mut self, generation: u64) -> bool {
        if self.generation != generation || self.message.is_none() {
            return false;
        }
        self.message = None;
        true
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

#[component]
pub fn Toast() -> impl IntoView {
    let ctx = use_context::<BookContext>().expect("BookContext not found");

    view! {
        {move || ctx.toast.with(|t| t.message().map(str::to_string)).map(|message| view! {
            <div class="toast" role="status">{message}</div>
        })}
    }
}
