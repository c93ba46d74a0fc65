//! 共有ボタン
//!
//! Web Share API があればそれを使い、なければ（またはキャンセルされたら）
//! URLをクリップボードにコピーする。Clipboard API も無い環境では
//! textarea を選択して execCommand("copy") で代替する。

use js_sys::{Function, Object, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

pub const COPIED_MESSAGE: &str = "Link copied to clipboard!";
pub const SELECTION_COPIED_MESSAGE: &str = "Link copied!";

#[derive(Debug, Clone, PartialEq)]
pub struct ShareContent {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl ShareContent {
    pub fn for_url(url: &str) -> Self {
        Self {
            title: "The Chronicles of Masud".to_string(),
            text: "Check out my portfolio - The Chronicles of Masud!".to_string(),
            url: url.to_string(),
        }
    }

    fn to_js(&self) -> Result<Object, JsValue> {
        let payload = Object::new();
        Reflect::set(&payload, &"title".into(), &self.title.as_str().into())?;
        Reflect::set(&payload, &"text".into(), &self.text.as_str().into())?;
        Reflect::set(&payload, &"url".into(), &self.url.as_str().into())?;
        Ok(payload)
    }
}

/// コピーの手段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMethod {
    ClipboardApi,
    Selection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Copied(CopyMethod),
    Failed,
}

impl ShareOutcome {
    /// トーストに出す文言（出さない場合はNone）
    pub fn toast_message(self) -> Option<&'static str> {
        match self {
            ShareOutcome::Copied(CopyMethod::ClipboardApi) => Some(COPIED_MESSAGE),
            ShareOutcome::Copied(CopyMethod::Selection) => Some(SELECTION_COPIED_MESSAGE),
            ShareOutcome::Shared | ShareOutcome::Failed => None,
        }
    }
}

/// 共有・コピーに使うブラウザ機能
///
/// `None` はその機能が存在しないことを表す。
#[allow(async_fn_in_trait)]
pub trait ShareBackend {
    async fn share(&self, content: &ShareContent) -> Option<Result<(), String>>;
    async fn write_clipboard(&self, text: &str) -> Option<Result<(), String>>;
    fn copy_with_selection(&self, text: &str) -> Result<(), String>;
}

pub async fn share_or_copy<B: ShareBackend>(backend: &B, content: &ShareContent) -> ShareOutcome {
    match backend.share(content).await {
        Some(Ok(())) => return ShareOutcome::Shared,
        Some(Err(e)) => log::info!("[share] 共有がキャンセル/失敗: {}", e),
        None => {}
    }
    match backend.write_clipboard(&content.url).await {
        Some(Ok(())) => return ShareOutcome::Copied(CopyMethod::ClipboardApi),
        Some(Err(e)) => log::warn!("[share] Clipboard API でのコピー失敗: {}", e),
        None => log::info!("[share] Clipboard API 非対応、選択コピーで代替"),
    }
    match backend.copy_with_selection(&content.url) {
        Ok(()) => ShareOutcome::Copied(CopyMethod::Selection),
        Err(e) => {
            log::warn!("[share] クリップボードへのコピー失敗: {}", e);
            ShareOutcome::Failed
        }
    }
}

/// 現在のページURL
pub fn current_url() -> Option<String> {
    web_sys::window()?.location().href().ok()
}

// ============================================
// ブラウザ実装
// ============================================

pub struct BrowserShare;

fn js_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

/// navigator に指定のプロパティがあるか
fn navigator_has(navigator: &web_sys::Navigator, name: &str) -> bool {
    Reflect::get(navigator, &JsValue::from_str(name))
        .map(|v| !v.is_undefined() && !v.is_null())
        .unwrap_or(false)
}

impl ShareBackend for BrowserShare {
    async fn share(&self, content: &ShareContent) -> Option<Result<(), String>> {
        let navigator = web_sys::window()?.navigator();
        let func = Reflect::get(&navigator, &JsValue::from_str("share"))
            .ok()?
            .dyn_into::<Function>()
            .ok()?;

        let result = async {
            let payload = content.to_js()?;
            let promise: Promise = func.call1(&navigator, &payload)?.dyn_into()?;
            JsFuture::from(promise).await?;
            Ok::<(), JsValue>(())
        };
        Some(result.await.map_err(js_error))
    }

    async fn write_clipboard(&self, text: &str) -> Option<Result<(), String>> {
        let navigator = web_sys::window()?.navigator();
        if !navigator_has(&navigator, "clipboard") {
            return None;
        }
        let promise = navigator.clipboard().write_text(text);
        Some(JsFuture::from(promise).await.map(|_| ()).map_err(js_error))
    }

    fn copy_with_selection(&self, text: &str) -> Result<(), String> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| "documentがありません".to_string())?;
        let body = document.body().ok_or_else(|| "bodyがありません".to_string())?;

        let textarea: web_sys::HtmlTextAreaElement = document
            .create_element("textarea")
            .and_then(|el| el.dyn_into().map_err(JsValue::from))
            .map_err(js_error)?;
        textarea.set_value(text);
        textarea
            .set_attribute("style", "position:fixed;top:0;left:0;opacity:0;")
            .map_err(js_error)?;
        body.append_child(&textarea).map_err(js_error)?;
        textarea.select();

        let copied = document
            .dyn_ref::<web_sys::HtmlDocument>()
            .ok_or_else(|| JsValue::from_str("HtmlDocumentではありません"))
            .and_then(|doc| doc.exec_command("copy"));
        // 失敗しても textarea は必ず取り除く
        let _ = body.remove_child(&textarea);

        if copied.map_err(js_error)? {
            Ok(())
        } else {
            Err("execCommand(\"copy\") が拒否されました".to_string())
        }
    }
}
