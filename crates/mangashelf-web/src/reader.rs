use std::rc::Rc;

use dominator::{clone, events, html, link, Dom};
use futures_signals::map_ref;
use futures_signals::signal::{Mutable, SignalExt};
use mangashelf_schema::MangaImage;
use wasm_bindgen::prelude::*;

use crate::common::{notification, NotificationKind, Route, Spinner};
use crate::query;
use crate::session;
use crate::utils::{window, AsyncLoader};

/// Keeps `page` inside `[0, total)`. An empty chapter pins to 0.
pub fn clamp_page(page: usize, total: usize) -> usize {
    page.min(total.saturating_sub(1))
}

pub struct Reader {
    manga_id: i64,
    images: Mutable<Vec<MangaImage>>,
    current_page: Mutable<usize>,
    loader: AsyncLoader,
    spinner: Rc<Spinner>,
}

impl Reader {
    pub fn new(manga_id: i64, page: usize) -> Rc<Self> {
        Rc::new(Self {
            manga_id,
            images: Mutable::new(vec![]),
            current_page: Mutable::new(page),
            loader: AsyncLoader::new(),
            spinner: Spinner::new_with_fullscreen(true),
        })
    }

    fn fetch_images(reader: Rc<Self>) {
        reader.spinner.set_active(true);
        reader.loader.load(clone!(reader => async move {
            // view count is best effort, the chapter still opens
            match query::mark_manga_viewed(reader.manga_id).await {
                Ok(viewed) => {
                    debug!("{} now has {} views", viewed.title, viewed.views);
                }
                Err(e) if e.is_unauthorized() => {
                    session::expire();
                    return;
                }
                Err(e) => {
                    warn!("failed to mark manga {} viewed: {}", reader.manga_id, e);
                }
            }

            match query::fetch_manga_images(reader.manga_id).await {
                Ok(result) => {
                    debug!("manga {} has {} pages", reader.manga_id, result.total_pages);
                    if result.images.is_empty() {
                        notification::show(NotificationKind::Info, "This manga has no pages");
                    }
                    reader.images.set(result.images);
                    Self::go_to_page(&reader, reader.current_page.get());
                }
                Err(e) if e.is_unauthorized() => {
                    session::expire();
                }
                Err(e) => {
                    error!("failed to fetch images of manga {}: {}", reader.manga_id, e);
                    notification::error(format!("Failed to load pages: {}", e));
                }
            }
            reader.spinner.set_active(false);
        }));
    }

    /// Moves to `page` and mirrors it into the url hash without going
    /// through the router, so the reader is not rendered again.
    fn go_to_page(reader: &Self, page: usize) {
        let page = clamp_page(page, reader.images.lock_ref().len());
        reader.current_page.set_neq(page);

        let url = Route::Reader(reader.manga_id, page).url();
        if let Err(e) = window()
            .history()
            .and_then(|history| history.replace_state_with_url(&JsValue::NULL, "", Some(&url)))
        {
            debug!("page not written to url: {:?}", e);
        }
    }

    fn prev_page(reader: &Self) {
        let page = reader.current_page.get();
        if page > 0 {
            Self::go_to_page(reader, page - 1);
        }
    }

    fn next_page(reader: &Self) {
        Self::go_to_page(reader, reader.current_page.get() + 1);
    }

    fn render_topbar(reader: Rc<Self>) -> Dom {
        html!("div", {
            .class("reader-topbar")
            .children(&mut [
                link!(Route::Manga(reader.manga_id).url(), {
                    .class("back-link")
                    .children(&mut [
                        html!("span", {
                            .class("material-icons")
                            .text("arrow_back")
                        })
                    ])
                }),
                html!("span", {
                    .class("page-indicator")
                    .text_signal(map_ref! {
                        let page = reader.current_page.signal(),
                        let total = reader.images.signal_ref(|images| images.len()) =>
                        if *total == 0 {
                            "".to_string()
                        } else {
                            format!("{} / {}", page + 1, total)
                        }
                    })
                }),
            ])
        })
    }

    fn render_page(reader: Rc<Self>) -> Dom {
        html!("div", {
            .class("reader-page")
            .child_signal(map_ref! {
                let page = reader.current_page.signal(),
                let images = reader.images.signal_cloned() =>
                images.get(*page).map(|image| html!("img", {
                    .attr("src", &image.url)
                    .attr("alt", &image.filename)
                }))
            })
        })
    }

    fn render_controls(reader: Rc<Self>) -> Dom {
        let at_start = reader.current_page.signal().map(|page| page == 0);
        let at_end = map_ref! {
            let page = reader.current_page.signal(),
            let total = reader.images.signal_ref(|images| images.len()) =>
            *page + 1 >= *total
        };

        html!("div", {
            .class("reader-controls")
            .children(&mut [
                html!("button", {
                    .attr("id", "prev-page")
                    .attr_signal("disabled", at_start.map(|disabled| disabled.then_some("true")))
                    .event(clone!(reader => move |_: events::Click| Self::prev_page(&reader)))
                    .children(&mut [
                        html!("span", {
                            .class("material-icons")
                            .text("chevron_left")
                        })
                    ])
                }),
                html!("button", {
                    .attr("id", "next-page")
                    .attr_signal("disabled", at_end.map(|disabled| disabled.then_some("true")))
                    .event(clone!(reader => move |_: events::Click| Self::next_page(&reader)))
                    .children(&mut [
                        html!("span", {
                            .class("material-icons")
                            .text("chevron_right")
                        })
                    ])
                }),
            ])
        })
    }

    pub fn render(reader: Rc<Self>) -> Dom {
        Self::fetch_images(reader.clone());

        html!("div", {
            .class("reader")
            .global_event(clone!(reader => move |e: events::KeyDown| {
                match e.key().as_str() {
                    "ArrowLeft" => Self::prev_page(&reader),
                    "ArrowRight" => Self::next_page(&reader),
                    _ => {}
                }
            }))
            .children(&mut [
                Self::render_topbar(reader.clone()),
                Self::render_page(reader.clone()),
                Self::render_controls(reader.clone()),
                Spinner::render(&reader.spinner),
            ])
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 10), 0);
        assert_eq!(clamp_page(9, 10), 9);
        assert_eq!(clamp_page(25, 10), 9);
        assert_eq!(clamp_page(3, 0), 0);
    }
}
