//! プロジェクト一覧パネル

use leptos::*;
use wasm_bindgen::JsCast;

use crate::input::{should_contain_wheel, ScrollMetrics};
use crate::models::ProjectSummary;
use crate::render::{shows_fallback_notice, CardFields};
use crate::BookContext;

/// 内側でスクロールできる間はホイールを外へ伝えない
pub fn contain_wheel(ev: web_sys::WheelEvent) {
    let Some(element) = ev
        .current_target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
    else {
        return;
    };
    let metrics = ScrollMetrics {
        scroll_top: f64::from(element.scroll_top()),
        scroll_height: f64::from(element.scroll_height()),
        client_height: f64::from(element.client_height()),
    };
    if should_contain_wheel(metrics, ev.delta_y()) {
        ev.stop_propagation();
    }
}

fn open_in_new_tab(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.open_with_url_and_target_and_features(url, "_blank", "noopener,noreferrer") {
        log::warn!("[projects] 新しいタブを開けません: {:?}", e);
    }
}

/// プロジェクトカード（リンク以外をクリックしても新しいタブで開く）
#[component]
pub fn ProjectCard(project: ProjectSummary) -> impl IntoView {
    let card = CardFields::from_project(&project);
    let open_url = card.open_url.clone();
    let open_card = move |_: web_sys::MouseEvent| {
        if let Some(url) = open_url.as_deref() {
            open_in_new_tab(url);
        }
    };

    view! {
        <div class="project-card" on:click=open_card>
            <h4 class="project-title">{card.name}</h4>
            <p class="project-description">{card.description}</p>
            <div class="project-stats">
                <span class="language-badge">{card.language}</span>
                <span class="stat-item"><span>"⭐"</span><span>{card.stars}</span></span>
                <span class="stat-item"><span>"🍴"</span><span>{card.forks}</span></span>
                <a
                    href=card.link
                    class="project-link"
                    target="_blank"
                    rel="noopener noreferrer"
                    on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()
                >
                    "View on GitHub →"
                </a>
            </div>
        </div>
    }
}

#[component]
fn FallbackNotice() -> impl IntoView {
    view! {
        <div class="projects-notice">
            <p>"Unable to load projects from GitHub."</p>
            <p class="projects-notice-sub">"Please check back later or visit my GitHub directly."</p>
        </div>
    }
}

#[component]
fn EmptyProjects() -> impl IntoView {
    view! {
        <div class="projects-empty">
            <p>"No projects available at the moment."</p>
        </div>
    }
}

#[component]
pub fn ProjectList() -> impl IntoView {
    let ctx = use_context::<BookContext>().expect("BookContext not found");
    let projects = ctx.projects;

    view! {
        {move || match projects.get() {
            Some(outcome) => {
                let notice = shows_fallback_notice(&outcome).then(|| view! { <FallbackNotice /> });
                let cards = if outcome.projects.is_empty() {
                    view! { <EmptyProjects /> }.into_view()
                } else {
                    outcome.projects
                        .into_iter()
                        .map(|project| view! { <ProjectCard project=project /> })
                        .collect_view()
                };
                view! {
                    <div id="projectsContainer" class="projects-container" on:wheel=contain_wheel>
                        {notice}
                        {cards}
                    </div>
                }.into_view()
            }
            None => view! {
                <div id="projectsContainer" class="projects-container loading">
                    <p class="projects-loading">"Loading projects..."</p>
                </div>
            }.into_view(),
        }}
    }
}
