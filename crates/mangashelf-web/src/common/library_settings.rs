use std::rc::Rc;

use dominator::{clone, events, html, with_node, Dom};
use futures_signals::signal::{Mutable, SignalExt};
use serde::{Deserialize, Serialize};
use web_sys::HtmlSelectElement;

use crate::{common::pagination::DEFAULT_ITEMS_PER_PAGE, utils::local_storage};

const KEY: &str = "settings:library";

pub const ITEMS_PER_PAGE_CHOICES: [usize; 4] = [10, 20, 40, 80];

#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibraryPreferences {
    pub items_per_page: Mutable<usize>,
}

impl Default for LibraryPreferences {
    fn default() -> Self {
        Self {
            items_per_page: Mutable::new(DEFAULT_ITEMS_PER_PAGE),
        }
    }
}

impl LibraryPreferences {
    pub fn load() -> Rc<Self> {
        let settings = if let Ok(Some(settings)) = local_storage().get_item(KEY) {
            serde_json::from_str::<Self>(&settings).unwrap_or_default()
        } else {
            Self::default()
        };

        settings.items_per_page.set(sanitize_items_per_page(settings.items_per_page.get()));

        Rc::new(settings)
    }

    fn save(&self) {
        match serde_json::to_string(self) {
            Ok(settings) => {
                let _ = local_storage().set_item(KEY, &settings);
            }
            Err(e) => error!("failed to serialize library settings: {}", e),
        }
    }

    pub fn render(settings: Rc<Self>) -> Dom {
        html!("div", {
            .class("settings-section")
            .children(&mut [
                html!("label", {
                    .style("margin", "0.5rem")
                    .text("Manga per page")
                }),
                html!("select" => HtmlSelectElement, {
                    .children(ITEMS_PER_PAGE_CHOICES.iter().map(|count| html!("option", {
                        .attr("value", &count.to_string())
                        .text(&count.to_string())
                    })))
                    .prop_signal("value", settings.items_per_page.signal().map(|count| count.to_string()))
                    .with_node!(select => {
                        .event(clone!(settings => move |_: events::Change| {
                            if let Ok(count) = select.value().parse::<usize>() {
                                settings.items_per_page.set_neq(sanitize_items_per_page(count));
                                settings.save();
                            }
                        }))
                    })
                }),
            ])
        })
    }
}

fn sanitize_items_per_page(count: usize) -> usize {
    if ITEMS_PER_PAGE_CHOICES.contains(&count) {
        count
    } else {
        DEFAULT_ITEMS_PER_PAGE
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sanitize_items_per_page() {
        assert_eq!(sanitize_items_per_page(40), 40);
        assert_eq!(sanitize_items_per_page(0), DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(sanitize_items_per_page(33), DEFAULT_ITEMS_PER_PAGE);
    }
}
