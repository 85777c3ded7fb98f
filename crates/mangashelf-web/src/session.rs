use dominator::routing;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;

use crate::common::{notification, Route};
use crate::query;
use crate::utils::local_storage;

pub const LOGOUT_REDIRECT_MS: u32 = 1_000;

const SESSION_KEYS: [&str; 3] = ["token", "user", "theme"];

pub fn store_token(token: &str) {
    if let Err(e) = local_storage().set_item("token", token) {
        error!("failed to store token: {:?}", e);
    }
}

fn clear_session() -> Result<(), wasm_bindgen::JsValue> {
    let storage = local_storage();
    for key in SESSION_KEYS {
        storage.remove_item(key)?;
    }

    Ok(())
}

/// Drops a token the server no longer accepts and sends the user to login.
pub fn expire() {
    let _ = local_storage().remove_item("token");
    routing::go_to_url(&Route::Login.url());
}

pub fn logout() {
    spawn_local(async move {
        if let Err(e) = query::user_logout().await {
            error!("logout request failed: {}", e);
            let _ = local_storage().clear();
            routing::go_to_url(&Route::Login.url());
            return;
        }

        if let Err(e) = clear_session() {
            error!("failed to clear session: {:?}", e);
            let _ = local_storage().clear();
            routing::go_to_url(&Route::Login.url());
            return;
        }

        notification::success("Logged out");
        TimeoutFuture::new(LOGOUT_REDIRECT_MS).await;
        routing::go_to_url(&Route::Login.url());
    });
}
