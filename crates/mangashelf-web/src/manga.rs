use std::rc::Rc;

use dominator::{clone, html, link, Dom};
use futures_signals::signal::{Mutable, SignalExt};
use mangashelf_schema::Manga as MangaDetail;

use crate::common::{notification, Route, Sidebar, Spinner};
use crate::query;
use crate::session;
use crate::utils::AsyncLoader;

pub struct Manga {
    id: i64,
    detail: Mutable<Option<MangaDetail>>,
    loader: AsyncLoader,
    spinner: Rc<Spinner>,
}

impl Manga {
    pub fn new(id: i64) -> Rc<Self> {
        Rc::new(Self {
            id,
            detail: Mutable::new(None),
            loader: AsyncLoader::new(),
            spinner: Spinner::new_with_fullscreen(true),
        })
    }

    fn fetch_detail(manga: Rc<Self>) {
        manga.spinner.set_active(true);
        manga.loader.load(clone!(manga => async move {
            match query::fetch_manga(manga.id).await {
                Ok(detail) => {
                    manga.detail.set(Some(detail));
                }
                Err(e) if e.is_unauthorized() => {
                    session::expire();
                }
                Err(e) => {
                    error!("failed to fetch manga {}: {}", manga.id, e);
                    notification::error(format!("Failed to load manga: {}", e));
                }
            }
            manga.spinner.set_active(false);
        }));
    }

    fn render_tags(label: &str, values: &[String]) -> Option<Dom> {
        if values.is_empty() {
            return None;
        }

        Some(html!("div", {
            .class("detail-tags")
            .children(&mut [
                html!("span", {
                    .class("detail-label")
                    .text(label)
                }),
            ])
            .children(values.iter().map(|value| html!("span", {
                .class("chip")
                .text(value)
            })))
        }))
    }

    fn render_detail(detail: &MangaDetail) -> Dom {
        html!("div", {
            .class("manga-detail")
            .children(&mut [
                html!("div", {
                    .class("detail-cover")
                    .children(&mut [
                        html!("img", {
                            .attr("src", &detail.cover_image)
                            .attr("alt", &detail.title)
                        })
                    ])
                }),
                html!("div", {
                    .class("detail-info")
                    .children(&mut [
                        html!("h1", {
                            .text(&detail.title)
                        }),
                        html!("p", {
                            .class("book-author")
                            .text(detail.artist_or_unknown())
                        }),
                        html!("div", {
                            .class("book-meta")
                            .children(&mut [
                                html!("span", {
                                    .text(&format!("{} views", detail.views))
                                }),
                                html!("span", {
                                    .text(&format!("{} pages", detail.page_count))
                                }),
                            ])
                            .apply_if(detail.language.is_some(), |dom| {
                                dom.child(html!("span", {
                                    .text(detail.language.as_deref().unwrap_or_default())
                                }))
                            })
                        }),
                    ])
                    .apply_if(detail.description.as_deref().is_some_and(|d| !d.is_empty()), |dom| {
                        dom.child(html!("p", {
                            .class("description")
                            .text(detail.description.as_deref().unwrap_or_default())
                        }))
                    })
                    .children(Self::render_tags("Genres", &detail.genres))
                    .children(Self::render_tags("Tags", &detail.tags))
                    .children(&mut [
                        link!(Route::Reader(detail.id, 0).url(), {
                            .class(["button", "read-button"])
                            .children(&mut [
                                html!("span", {
                                    .class("material-icons")
                                    .text("menu_book")
                                }),
                                html!("span", {
                                    .text("Read")
                                }),
                            ])
                        })
                    ])
                }),
            ])
        })
    }

    pub fn render(manga: Rc<Self>) -> Dom {
        Self::fetch_detail(manga.clone());

        html!("div", {
            .class("layout")
            .children(&mut [
                Sidebar::render(Sidebar::new()),
                html!("main", {
                    .class("main-content")
                    .child_signal(manga.detail.signal_cloned().map(|detail| detail.as_ref().map(Self::render_detail)))
                    .children(&mut [
                        Spinner::render(&manga.spinner),
                    ])
                }),
            ])
        })
    }
}
