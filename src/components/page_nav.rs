//! ページナビゲーション（前後ボタン・ページ番号・進捗バー・ドット）

use leptos::*;

use crate::pager::{BookFrame, NavCommand};
use crate::BookContext;

/// 前へ/次へボタンとページ番号
#[component]
pub fn PageNav(frame: Memo<BookFrame>) -> impl IntoView {
    let ctx = use_context::<BookContext>().expect("BookContext not found");

    view! {
        <nav class="page-nav">
            <button
                id="prevBtn"
                class="nav-btn prev"
                disabled=move || frame.with(|f| f.prev_disabled)
                on:click=move |_| ctx.navigate(NavCommand::Previous)
            >
                "← Prev"
            </button>
            <span id="pageIndicator" class="page-indicator">
                {move || frame.with(|f| f.indicator.clone())}
            </span>
            <button
                id="nextBtn"
                class="nav-btn next"
                disabled=move || frame.with(|f| f.next_disabled)
                on:click=move |_| ctx.navigate(NavCommand::Next)
            >
                "Next →"
            </button>
        </nav>
    }
}

#[component]
pub fn ProgressBar(frame: Memo<BookFrame>) -> impl IntoView {
    view! {
        <div class="progress-bar">
            <div
                id="progressFill"
                class="progress-fill"
                style:width=move || frame.with(|f| format!("{}%", f.progress_percent))
            ></div>
        </div>
    }
}

/// ドットインジケーター（クリックでそのページへ）
#[component]
pub fn PageDots(frame: Memo<BookFrame>) -> impl IntoView {
    let ctx = use_context::<BookContext>().expect("BookContext not found");
    let total = ctx.pager.with_untracked(|p| p.total());

    view! {
        <div class="page-dots" role="tablist">
            {(1..=total).map(|page| {
                let is_active = move || frame.with(|f| f.active_dot == page);
                view! {
                    <button
                        class="dot"
                        class:active=is_active
                        role="tab"
                        aria-selected=move || is_active().to_string()
                        aria-label=format!("Go to page {}", page)
                        on:click=move |_| ctx.navigate(NavCommand::Jump(page))
                    ></button>
                }
            }).collect_view()}
        </div>
    }
}
