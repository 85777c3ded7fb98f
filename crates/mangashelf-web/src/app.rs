use std::rc::Rc;

use dominator::{clone, html, link, Dom};
use futures_signals::signal::{Mutable, SignalExt};
use mangashelf_schema::User;

use crate::common::{notification, Route};
use crate::home::Home;
use crate::login::Login;
use crate::manga::Manga;
use crate::query;
use crate::reader::Reader;
use crate::register::Register;
use crate::session;
use crate::settings::Settings;
use crate::utils::AsyncLoader;

pub struct App {
    pub user: Mutable<Option<User>>,
    pub loader: AsyncLoader,
}

impl App {
    pub fn new() -> Rc<Self> {
        Rc::new(App {
            user: Mutable::new(None),
            loader: AsyncLoader::new(),
        })
    }

    fn fetch_user(app: Rc<Self>) {
        app.loader.load(clone!(app => async move {
            match query::fetch_me().await {
                Ok(user) => {
                    info!("signed in as {}", user.username);
                    app.user.set(Some(user));
                }
                Err(e) if e.is_unauthorized() => {
                    warn!("{}", e);
                    app.user.set(None);
                    session::expire();
                }
                Err(e) => {
                    error!("failed to fetch user: {}", e);
                }
            }
        }));
    }

    fn render_not_found() -> Dom {
        html!("div", {
            .class("not-found")
            .children(&mut [
                html!("h1", {
                    .text("Page not found")
                }),
                link!(Route::Home.url(), {
                    .text("Back to library")
                }),
            ])
        })
    }

    pub fn render(app: Rc<Self>) -> Dom {
        html!("div", {
            .future(Route::signal().for_each(clone!(app => move |route| {
                if route == Route::Login {
                    app.user.set(None);
                } else if route.requires_auth() && app.user.lock_ref().is_none() {
                    Self::fetch_user(app.clone());
                }

                async {}
            })))
            .child_signal(Route::signal().map(|route| {
                match route {
                    Route::Home => Some(Home::render(Home::new())),
                    Route::Login => Some(Login::render(Login::new())),
                    Route::Register => Some(Register::render(Register::new())),
                    Route::Manga(manga_id) => Some(Manga::render(Manga::new(manga_id))),
                    Route::Reader(manga_id, page) => Some(Reader::render(Reader::new(manga_id, page))),
                    Route::Settings => Some(Settings::render(Settings::new())),
                    Route::NotFound => Some(Self::render_not_found()),
                }
            }))
            .children(&mut [
                notification::render(),
            ])
        })
    }
}
