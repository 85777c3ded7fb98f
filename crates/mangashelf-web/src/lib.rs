#[macro_use]
extern crate log;

mod app;
mod common;
mod home;
mod login;
mod manga;
mod query;
mod reader;
mod register;
mod session;
mod settings;
mod utils;

use utils::window;
use wasm_bindgen::{prelude::*, JsCast};

use app::App;
use common::{AppearanceSettings, Theme};
use web_sys::MediaQueryListEvent;

#[wasm_bindgen(start)]
pub async fn main_js() -> Result<(), JsValue> {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    utils::initialize_urls();
    info!("api host: {}", utils::api_host());

    utils::apply_theme(Some(AppearanceSettings::stored_theme().to_string()));

    // only the auto theme follows the system scheme
    let closure = Closure::wrap(Box::new(|e: MediaQueryListEvent| {
        if AppearanceSettings::stored_theme() != Theme::Auto {
            return;
        }
        if e.matches() {
            utils::body().class_list().add_1("dark").unwrap_throw();
        } else {
            utils::body().class_list().remove_1("dark").unwrap_throw();
        }
    }) as Box<dyn FnMut(_)>);

    if let Ok(Some(media_query_list)) = window().match_media("(prefers-color-scheme: dark)") {
        media_query_list.set_onchange(Some(closure.as_ref().unchecked_ref()))
    }

    closure.forget();

    dominator::append_dom(&dominator::body(), App::render(App::new()));

    Ok(())
}
