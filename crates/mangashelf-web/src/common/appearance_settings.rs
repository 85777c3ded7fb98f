use dominator::{clone, events, html, Dom};
use futures_signals::signal::{Mutable, SignalExt};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

use crate::utils::{apply_theme, local_storage};

const KEY: &str = "settings:appearance";

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum Theme {
    Light,
    #[default]
    Dark,
    Auto,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::Auto];

    fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::Auto => "Auto",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
            Theme::Auto => write!(f, ""),
        }
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AppearanceSettings {
    pub theme: Mutable<Theme>,
}

impl AppearanceSettings {
    pub fn new() -> Rc<Self> {
        let stored = local_storage().get_item(KEY).ok().flatten();
        Rc::new(Self::from_stored(stored.as_deref()))
    }

    fn from_stored(settings: Option<&str>) -> Self {
        settings
            .and_then(|settings| serde_json::from_str::<AppearanceSettings>(settings).ok())
            .unwrap_or_default()
    }

    /// Theme to apply on start-up. Read from `settings:appearance`, which
    /// outlives logout, and dark when nothing has been stored yet.
    pub fn stored_theme() -> Theme {
        Self::new().theme.get()
    }

    pub fn save(&self) {
        let theme = self.theme.get().to_string();
        match serde_json::to_string(self) {
            Ok(settings) => {
                let _ = local_storage().set_item(KEY, &settings);
            }
            Err(e) => error!("failed to serialize appearance settings: {}", e),
        }
        let _ = local_storage().set_item("theme", &theme);
    }

    fn render_theme(settings: Rc<Self>) -> Dom {
        html!("div", {
            .children(&mut [
                html!("label", {
                    .style("margin", "0.5rem")
                    .text("Theme")
                }),
                html!("div", {
                    .class("settings-row")
                    .children(Theme::ALL.iter().map(|theme| {
                        let theme = *theme;
                        html!("button", {
                            .style("width", "33.333333%")
                            .class_signal("active", settings.theme.signal().map(move |x| x == theme))
                            .text(theme.label())
                            .event(clone!(settings => move |_: events::Click| settings.theme.set_neq(theme)))
                        })
                    }))
                })
            ])
        })
    }

    pub fn render(settings: Rc<Self>) -> Dom {
        html!("div", {
            .future(settings.theme.signal().for_each(clone!(settings => move |theme| {
                settings.save();
                apply_theme(Some(theme.to_string()));

                async {}
            })))
            .class("settings-section")
            .children(&mut [
                Self::render_theme(settings),
            ])
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_theme_names() {
        assert_eq!(Theme::Dark.to_string(), "dark");
        assert_eq!(Theme::Light.to_string(), "light");
        assert_eq!(Theme::Auto.to_string(), "");
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn test_theme_from_stored_settings() {
        let settings = AppearanceSettings::from_stored(Some(r#"{"theme":"Light"}"#));
        assert_eq!(settings.theme.get(), Theme::Light);

        let settings = AppearanceSettings::from_stored(Some(r#"{"theme":"Auto"}"#));
        assert_eq!(settings.theme.get(), Theme::Auto);

        assert_eq!(AppearanceSettings::from_stored(None).theme.get(), Theme::Dark);
        assert_eq!(AppearanceSettings::from_stored(Some("not json")).theme.get(), Theme::Dark);
    }
}
