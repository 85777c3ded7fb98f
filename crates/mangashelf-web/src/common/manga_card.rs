use dominator::{html, link, Dom};
use mangashelf_schema::Manga;

use crate::common::route::Route;

pub struct MangaCard;

impl MangaCard {
    fn render_meta(icon: &str, value: i64) -> Dom {
        html!("div", {
            .class("book-meta-item")
            .children(&mut [
                html!("span", {
                    .class("material-icons")
                    .text(icon)
                }),
                html!("span", {
                    .text(&value.to_string())
                }),
            ])
        })
    }

    pub fn render(manga: &Manga) -> Dom {
        link!(Route::Manga(manga.id).url(), {
            .class("book-card")
            .children(&mut [
                html!("div", {
                    .class("book-cover")
                    .children(&mut [
                        html!("img", {
                            .attr("src", &manga.cover_image)
                            .attr("alt", &manga.title)
                            .attr("loading", "lazy")
                        })
                    ])
                }),
                html!("div", {
                    .class("book-info")
                    .children(&mut [
                        html!("h3", {
                            .class("book-title")
                            .text(&manga.title)
                        }),
                        html!("p", {
                            .class("book-author")
                            .text(manga.artist_or_unknown())
                        }),
                        html!("div", {
                            .class("book-meta")
                            .children(&mut [
                                Self::render_meta("visibility", manga.views),
                                Self::render_meta("collections", manga.page_count),
                            ])
                        }),
                    ])
                }),
            ])
        })
    }
}
