use std::rc::Rc;

use dominator::{clone, events, html, link, with_node, Dom, EventOptions};
use futures_signals::signal::{Mutable, SignalExt};
use web_sys::{HtmlElement, Node};

use super::Route;
use crate::session;

pub struct Sidebar {
    collapsed: Mutable<bool>,
    open: Mutable<bool>,
    manga_count: Mutable<Option<usize>>,
    on_home: Option<Box<dyn Fn()>>,
}

impl Sidebar {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            collapsed: Mutable::new(false),
            open: Mutable::new(false),
            manga_count: Mutable::new(None),
            on_home: None,
        })
    }

    /// Sidebar for the library page: shows `manga_count` next to the home
    /// link and runs `on_home` whenever that link is clicked.
    pub fn new_for_library<F>(manga_count: Mutable<Option<usize>>, on_home: F) -> Rc<Self>
    where
        F: Fn() + 'static,
    {
        Rc::new(Self {
            collapsed: Mutable::new(false),
            open: Mutable::new(false),
            manga_count,
            on_home: Some(Box::new(on_home)),
        })
    }

    fn render_item(icon: &str, label: &str) -> Vec<Dom> {
        vec![
            html!("span", {
                .class("material-icons")
                .text(icon)
            }),
            html!("span", {
                .class("menu-label")
                .text(label)
            }),
        ]
    }

    fn render_mobile_toggle(sidebar: Rc<Self>) -> Dom {
        html!("button", {
            .attr("id", "mobile-menu-toggle")
            .class("mobile-menu-toggle")
            .event(clone!(sidebar => move |_: events::Click| {
                sidebar.open.replace_with(|open| !*open);
            }))
            .children(&mut [
                html!("span", {
                    .class("material-icons")
                    .text("menu")
                })
            ])
        })
    }

    fn render_nav(sidebar: Rc<Self>) -> Dom {
        html!("nav", {
            .attr("id", "sidebar")
            .class("sidebar")
            .class_signal("collapsed", sidebar.collapsed.signal())
            .class_signal("open", sidebar.open.signal())
            .children(&mut [
                html!("div", {
                    .class("sidebar-header")
                    .children(&mut [
                        html!("span", {
                            .class("logo")
                            .text("Mangashelf")
                        }),
                        html!("button", {
                            .attr("id", "collapse-menu")
                            .event(clone!(sidebar => move |_: events::Click| {
                                sidebar.collapsed.replace_with(|collapsed| !*collapsed);
                            }))
                            .children(&mut [
                                html!("span", {
                                    .class("material-icons")
                                    .text_signal(sidebar.collapsed.signal().map(|collapsed| if collapsed { "chevron_right" } else { "chevron_left" }))
                                })
                            ])
                        }),
                    ])
                }),
                html!("ul", {
                    .class("categories")
                    .children(&mut [
                        html!("li", {
                            .attr("id", "home-link")
                            .class_signal("active", Route::signal().map(|route| matches!(route, Route::Home)))
                            .children(&mut [
                                link!(Route::Home.url(), {
                                    .event(clone!(sidebar => move |_: events::Click| {
                                        if let Some(on_home) = sidebar.on_home.as_ref() {
                                            on_home();
                                        }
                                    }))
                                    .children(Self::render_item("home", "Home"))
                                })
                            ])
                            .child_signal(sidebar.manga_count.signal().map(|count| count.map(|count| html!("span", {
                                .attr("id", "manga-count")
                                .class("badge")
                                .text(&count.to_string())
                            }))))
                        }),
                        html!("li", {
                            .attr("id", "settings-link")
                            .class_signal("active", Route::signal().map(|route| matches!(route, Route::Settings)))
                            .children(&mut [
                                link!(Route::Settings.url(), {
                                    .children(Self::render_item("settings", "Settings"))
                                })
                            ])
                        }),
                        html!("li", {
                            .attr("id", "logout-link")
                            .class("logout")
                            .event_with_options(&EventOptions::preventable(), |e: events::Click| {
                                e.prevent_default();
                                session::logout();
                            })
                            .children(Self::render_item("logout", "Logout"))
                        }),
                    ])
                }),
            ])
        })
    }

    pub fn render(sidebar: Rc<Self>) -> Dom {
        html!("div" => HtmlElement, {
            .class("sidebar-container")
            .with_node!(container => {
                .global_event(clone!(sidebar => move |e: events::Click| {
                    if !sidebar.open.get() {
                        return;
                    }
                    let inside = e
                        .dyn_target::<Node>()
                        .map(|target| container.contains(Some(&target)))
                        .unwrap_or(false);
                    if !inside {
                        sidebar.open.set_neq(false);
                    }
                }))
            })
            .children(&mut [
                Self::render_mobile_toggle(sidebar.clone()),
                Self::render_nav(sidebar),
            ])
        })
    }
}
