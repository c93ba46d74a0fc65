//! UIコンポーネントモジュール

pub mod page_nav;
pub mod project_list;
pub mod toolbar;

pub use page_nav::{PageDots, PageNav, ProgressBar};
pub use project_list::{contain_wheel, ProjectList};
pub use toolbar::{Toast, ToastState, Toolbar};
