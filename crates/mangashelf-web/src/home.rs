use std::rc::Rc;

use dominator::{clone, events, html, with_node, Dom, EventOptions};
use futures_signals::map_ref;
use futures_signals::signal::{Mutable, SignalExt};
use futures_signals::signal_vec::SignalVecExt;
use gloo_timers::future::TimeoutFuture;
use mangashelf_schema::Manga;
use web_sys::HtmlInputElement;

use crate::common::{
    notification, search, LibraryPreferences, MangaCard, Pager, Pagination, Sidebar, Spinner,
};
use crate::query;
use crate::session;
use crate::utils::{scroll_to_top, AsyncLoader};

pub const SEARCH_DEBOUNCE_MS: u32 = 300;
pub const POPULAR_COUNT: usize = 10;

pub struct Home {
    mangas: Mutable<Vec<Manga>>,
    filtered: Mutable<Vec<Manga>>,
    keyword: Mutable<String>,
    pagination: Mutable<Pagination>,
    manga_count: Mutable<Option<usize>>,
    refreshing: Mutable<bool>,
    loader: AsyncLoader,
    search_loader: AsyncLoader,
    refresh_loader: AsyncLoader,
    spinner: Rc<Spinner>,
}

impl Home {
    pub fn new() -> Rc<Self> {
        let preferences = LibraryPreferences::load();

        Rc::new(Self {
            mangas: Mutable::new(vec![]),
            filtered: Mutable::new(vec![]),
            keyword: Mutable::new("".to_string()),
            pagination: Mutable::new(Pagination::new(preferences.items_per_page.get())),
            manga_count: Mutable::new(None),
            refreshing: Mutable::new(false),
            loader: AsyncLoader::new(),
            search_loader: AsyncLoader::new(),
            refresh_loader: AsyncLoader::new(),
            spinner: Spinner::new_with_fullscreen(true),
        })
    }

    pub fn fetch_manga_list(home: Rc<Self>) {
        home.spinner.set_active(true);
        home.loader.load(clone!(home => async move {
            match query::fetch_manga_list().await {
                Ok(mangas) => {
                    info!("fetched {} manga", mangas.len());
                    home.mangas.set(mangas);
                    Self::apply_filter(&home);
                }
                Err(e) if e.is_unauthorized() => {
                    session::expire();
                }
                Err(e) => {
                    error!("failed to fetch manga list: {}", e);
                    notification::error("Failed to load manga list");
                }
            }
            home.spinner.set_active(false);
        }));
    }

    /// Recomputes the visible list from the keyword and goes back to page 1.
    fn apply_filter(home: &Self) {
        let filtered = search::filter(&home.mangas.lock_ref(), &home.keyword.lock_ref());
        home.pagination.lock_mut().reset(filtered.len());
        home.manga_count.set(Some(filtered.len()));
        home.filtered.set(filtered);
    }

    fn search(home: Rc<Self>, keyword: String) {
        home.keyword.set_neq(keyword);
        home.search_loader.load(clone!(home => async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            Self::apply_filter(&home);
        }));
    }

    fn go_home(home: Rc<Self>) {
        scroll_to_top();
        Self::fetch_manga_list(home);
    }

    pub fn refresh_library(home: Rc<Self>) {
        if home.refreshing.get() {
            return;
        }

        home.refreshing.set_neq(true);
        home.refresh_loader.load(clone!(home => async move {
            match query::refresh_library().await {
                Ok(res) if res.success => {
                    notification::success(res.message.unwrap_or_else(|| "Library refreshed".to_string()));
                    Self::fetch_manga_list(home.clone());
                }
                Ok(res) => {
                    if let Some(details) = res.details.as_deref() {
                        debug!("refresh details: {}", details);
                    }
                    notification::error(res.error.unwrap_or_else(|| "Failed to refresh library".to_string()));
                }
                Err(e) if e.is_unauthorized() => {
                    session::expire();
                }
                Err(e) => {
                    error!("failed to refresh library: {}", e);
                    notification::error("Connection error while refreshing the library");
                }
            }
            home.refreshing.set_neq(false);
        }));
    }

    fn render_topbar(home: Rc<Self>) -> Dom {
        html!("div", {
            .class("topbar")
            .children(&mut [
                html!("div", {
                    .class("search-bar")
                    .children(&mut [
                        html!("span", {
                            .class("material-icons")
                            .text("search")
                        }),
                        html!("input" => HtmlInputElement, {
                            .attr("type", "text")
                            .attr("placeholder", "Search by title, artist or genre")
                            .prop_signal("value", home.keyword.signal_cloned())
                            .with_node!(input => {
                                .event(clone!(home => move |_: events::Input| {
                                    Self::search(home.clone(), input.value());
                                }))
                                .event_with_options(&EventOptions::preventable(), |e: events::KeyDown| {
                                    if e.key() == "Enter" {
                                        e.prevent_default();
                                    }
                                })
                            })
                        }),
                    ])
                }),
                html!("button", {
                    .attr("id", "refresh-library-btn")
                    .class("refresh-btn")
                    .class_signal("loading", home.refreshing.signal())
                    .attr_signal("disabled", home.refreshing.signal().map(|refreshing| refreshing.then_some("true")))
                    .event(clone!(home => move |_: events::Click| {
                        Self::refresh_library(home.clone());
                    }))
                    .children(&mut [
                        html!("span", {
                            .class("material-icons")
                            .text("refresh")
                        }),
                        html!("span", {
                            .class("btn-text")
                            .text_signal(home.refreshing.signal().map(|refreshing| if refreshing { "Refreshing..." } else { "Refresh" }))
                        }),
                    ])
                }),
            ])
        })
    }

    fn render_popular(home: Rc<Self>) -> Dom {
        html!("section", {
            .class("popular")
            .visible_signal(home.mangas.signal_ref(|mangas| !mangas.is_empty()))
            .children(&mut [
                html!("h2", {
                    .text("Popular")
                }),
                html!("div", {
                    .attr("id", "popular-grid")
                    .class("books-row")
                    .children_signal_vec(home.mangas.signal_ref(|mangas| {
                        mangas.iter().take(POPULAR_COUNT).cloned().collect::<Vec<_>>()
                    }).to_signal_vec().map(|manga| MangaCard::render(&manga)))
                }),
            ])
        })
    }

    fn render_grid(home: Rc<Self>) -> Dom {
        let page = map_ref! {
            let filtered = home.filtered.signal_cloned(),
            let pagination = home.pagination.signal() =>
            filtered[pagination.slice_range(filtered.len())].to_vec()
        };

        html!("section", {
            .class("library")
            .children(&mut [
                html!("h2", {
                    .text("Library")
                }),
                html!("div", {
                    .attr("id", "books-grid")
                    .class("books-grid")
                    .children_signal_vec(page.to_signal_vec().map(|manga| MangaCard::render(&manga)))
                }),
                html!("p", {
                    .class("empty")
                    .visible_signal(map_ref! {
                        let count = home.manga_count.signal(),
                        let loading = home.spinner.signal() =>
                        *count == Some(0) && !*loading
                    })
                    .text("No manga found")
                }),
                Pager::render(Pager::new(home.pagination.clone(), |_| scroll_to_top())),
            ])
        })
    }

    pub fn render(home: Rc<Self>) -> Dom {
        Self::fetch_manga_list(home.clone());

        let sidebar = Sidebar::new_for_library(
            home.manga_count.clone(),
            clone!(home => move || Self::go_home(home.clone())),
        );

        html!("div", {
            .class("layout")
            .children(&mut [
                Sidebar::render(sidebar),
                html!("main", {
                    .class("main-content")
                    .children(&mut [
                        Self::render_topbar(home.clone()),
                        Self::render_popular(home.clone()),
                        Self::render_grid(home.clone()),
                        Spinner::render(&home.spinner),
                    ])
                }),
            ])
        })
    }
}
