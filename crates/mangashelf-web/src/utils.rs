use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::anyhow;
use futures::{
    future::{abortable, AbortHandle},
    Future,
};
use futures_signals::signal::Mutable;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlElement, ScrollBehavior, ScrollToOptions, Storage, Window};

thread_local! {
    static WINDOW: Window = web_sys::window().unwrap_throw();
    static DOCUMENT: Document = WINDOW.with(|w| w.document().unwrap_throw());
    static BODY: HtmlElement = DOCUMENT.with(|d| d.body().unwrap_throw());
    static LOCAL_STORAGE: Storage = WINDOW.with(|w| w.local_storage().unwrap_throw().unwrap_throw());
    static API_HOST: std::cell::RefCell<String> = std::cell::RefCell::new(String::new());
}

pub struct AsyncState {
    id: usize,
    handle: AbortHandle,
}

impl AsyncState {
    fn new(handle: AbortHandle) -> Self {
        static ID: AtomicUsize = AtomicUsize::new(0);
        let id = ID.fetch_add(1, Ordering::SeqCst);

        Self { id, handle }
    }
}

/// Runs one future at a time; loading a new one aborts the previous.
pub struct AsyncLoader {
    loading: Mutable<Option<AsyncState>>,
}

impl Default for AsyncLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl AsyncLoader {
    pub fn new() -> Self {
        Self {
            loading: Mutable::new(None),
        }
    }

    pub fn cancel(&self) {
        self.replace(None)
    }

    fn replace(&self, value: Option<AsyncState>) {
        let mut loading = self.loading.lock_mut();
        if let Some(state) = loading.as_mut() {
            state.handle.abort();
        }
        *loading = value;
    }

    pub fn load<F>(&self, fut: F)
    where
        F: Future<Output = ()> + 'static,
    {
        let (fut, handle) = abortable(fut);

        let state = AsyncState::new(handle);
        let id = state.id;

        self.replace(Some(state));

        let loading = self.loading.clone();

        spawn_local(async move {
            match fut.await {
                Ok(()) => {
                    let mut loading = loading.lock_mut();

                    if let Some(current_id) = loading.as_ref().map(|x| x.id) {
                        if current_id == id {
                            *loading = None;
                        }
                    }
                }
                Err(_) => {
                    debug!("task {} superseded", id);
                }
            }
        });
    }
}

/// Resolves the REST base url once at start-up. An embedding host may inject
/// `window.__MANGASHELF_API__`, otherwise requests go to the page origin.
pub fn initialize_urls() {
    let api_host = match js_sys::eval("window.__MANGASHELF_API__") {
        Ok(val) if val.is_string() => val.as_string().unwrap_or_default(),
        _ => window()
            .location()
            .origin()
            .unwrap_throw(),
    };

    API_HOST.with(|s| *s.borrow_mut() = api_host.trim_end_matches('/').to_string());
}

pub fn api_host() -> String {
    API_HOST.with(|v| v.borrow().clone())
}

pub fn api_url(path: &str) -> String {
    format!("{}{}", api_host(), path)
}

pub fn apply_theme(theme: Option<String>) {
    let mut status_bar_color = "#5b749b";
    let dark = match theme.as_deref() {
        Some("dark") => true,
        Some("light") => false,
        None | Some(_) => window()
            .match_media("(prefers-color-scheme: dark)")
            .unwrap_throw()
            .map(|m| m.matches())
            .unwrap_or(false),
    };

    let root = document().document_element().unwrap_throw();
    if dark {
        body().class_list().add_1("dark").unwrap_throw();
        root.set_attribute("data-theme", "dark").unwrap_throw();
        status_bar_color = "#090909";
    } else {
        body().class_list().remove_1("dark").unwrap_throw();
        root.set_attribute("data-theme", "light").unwrap_throw();
    }

    if let Err(e) = apply_theme_color(status_bar_color) {
        debug!("theme color not applied: {}", e);
    }
}

pub fn apply_theme_color(status_bar_color: &str) -> Result<(), anyhow::Error> {
    document()
        .query_selector("meta[name=\"theme-color\"]")
        .map_err(|e| anyhow!("error query meta: {:?}", e))?
        .ok_or_else(|| anyhow!("no theme-color meta"))?
        .set_attribute("content", status_bar_color)
        .map_err(|e| anyhow!("error set content: {:?}", e))?;

    Ok(())
}

pub fn scroll_to_top() {
    let options = ScrollToOptions::new();
    options.set_top(0.0);
    options.set_behavior(ScrollBehavior::Smooth);
    window().scroll_to_with_scroll_to_options(&options);
}

pub fn token() -> Option<String> {
    local_storage()
        .get("token")
        .ok()
        .flatten()
        .filter(|token| !token.is_empty())
}

pub fn window() -> Window {
    WINDOW.with(|s| s.clone())
}

pub fn local_storage() -> Storage {
    LOCAL_STORAGE.with(|s| s.clone())
}

pub fn document() -> Document {
    DOCUMENT.with(|d| d.clone())
}

pub fn body() -> HtmlElement {
    BODY.with(|d| d.clone())
}
