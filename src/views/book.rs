//! 本のビュー
//!
//! 各ページの見た目（めくり済み/現在/未読）は Pager の描画情報から決まる。

use leptos::*;

use crate::components::{contain_wheel, PageDots, PageNav, ProgressBar, ProjectList, Toast, Toolbar};
use crate::input::ClickZone;
use crate::pager::{BookFrame, PageVisual};
use crate::utils::current_year;
use crate::BookContext;

/// 固定ページの中身
struct PageContent {
    title: &'static str,
    paragraphs: &'static [&'static str],
}

const PAGES: &[PageContent] = &[
    PageContent {
        title: "The Chronicles of Masud",
        paragraphs: &["A portfolio in seven pages. Turn the page to begin."],
    },
    PageContent {
        title: "About",
        paragraphs: &[
            "Developer and researcher building tools around text, data and the web.",
            "Use the arrows, swipe, or the dots below to move through the book.",
        ],
    },
    PageContent {
        title: "Skills",
        paragraphs: &[
            "Python · Rust · JavaScript",
            "OCR pipelines · dataset curation · web front-ends",
        ],
    },
    PageContent {
        title: "Projects",
        paragraphs: &[],
    },
    PageContent {
        title: "Experience",
        paragraphs: &["Independent projects and open-source contributions."],
    },
    PageContent {
        title: "Education",
        paragraphs: &["Continuous self-study in software engineering and Islamic sciences."],
    },
    PageContent {
        title: "Contact",
        paragraphs: &["Reach out through GitHub, or share this book with a friend."],
    },
];

#[component]
fn Page(index: usize, frame: Memo<BookFrame>) -> impl IntoView {
    let ctx = use_context::<BookContext>().expect("BookContext not found");
    let projects_page = ctx.config.with_value(|c| c.projects_page);
    let content = PAGES.get(index - 1);
    let title = content.map(|c| c.title).unwrap_or_default();
    let paragraphs = content.map(|c| c.paragraphs).unwrap_or_default();

    let visual = create_memo(move |_| {
        frame.with(|f| {
            f.pages.get(index - 1).cloned().unwrap_or_else(|| {
                PageVisual::derive(index, ctx.pager.with_untracked(|p| p.current()))
            })
        })
    });

    view! {
        <section
            class=move || visual.with(|v| v.class_name())
            class:no-transition=move || ctx.instant.get()
            style:transform=move || visual.with(|v| v.transform())
            data-page=move || visual.with(|v| v.index)
        >
            <div class="content" on:wheel=contain_wheel>
                <h2 class="page-title">{title}</h2>
                {paragraphs.iter().map(|text| view! { <p>{*text}</p> }).collect_view()}
                {(index == projects_page).then(|| view! { <ProjectList /> })}
            </div>
            <span class="page-number">{index}</span>
        </section>
    }
}

#[component]
pub fn BookView() -> impl IntoView {
    let ctx = use_context::<BookContext>().expect("BookContext not found");
    let frame = create_memo(move |_| ctx.pager.with(|p| p.frame()));
    let total = ctx.pager.with_untracked(|p| p.total());

    let zone_click =
        move |zone: ClickZone| move |_: web_sys::MouseEvent| ctx.navigate(zone.command());

    view! {
        <div class="book-app">
            <Toolbar />
            <div class="book" class:animating=move || ctx.pager.with(|p| p.is_animating())>
                {(1..=total).map(|index| view! { <Page index=index frame=frame /> }).collect_view()}
                <div class="click-area left" on:click=zone_click(ClickZone::Left)></div>
                <div class="click-area right" on:click=zone_click(ClickZone::Right)></div>
            </div>
            <PageNav frame=frame />
            <ProgressBar frame=frame />
            <PageDots frame=frame />
            <footer class="copyright">{format!("© {} MD Masud Ur Rahman", current_year())}</footer>
            <Toast />
        </div>
    }
}
