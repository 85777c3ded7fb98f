use std::rc::Rc;

use dominator::{clone, events, html, with_node, Dom};
use futures_signals::signal::{Mutable, SignalExt};
use mangashelf_schema::DirectoryValidation;
use web_sys::HtmlInputElement;

use crate::common::{
    notification, AppearanceSettings, LibraryPreferences, NotificationKind, Sidebar, Spinner,
};
use crate::query;
use crate::session;
use crate::utils::AsyncLoader;

pub const MANGA_DIRECTORY_KEY: &str = "manga_directory";

/// Trimmed directory, or `None` when nothing usable was typed.
pub fn normalize_directory(directory: &str) -> Option<String> {
    let directory = directory.trim();
    (!directory.is_empty()).then(|| directory.to_string())
}

pub fn describe_validation(result: &DirectoryValidation) -> String {
    format!(
        "{} manga folders, {} images found",
        result.manga_folders.unwrap_or(0),
        result.image_count.unwrap_or(0)
    )
}

pub struct Settings {
    manga_directory: Mutable<String>,
    validation: Mutable<Option<String>>,
    saving: Mutable<bool>,
    validating: Mutable<bool>,
    loader: AsyncLoader,
    action_loader: AsyncLoader,
    appearance_settings: Rc<AppearanceSettings>,
    library_preferences: Rc<LibraryPreferences>,
    spinner: Rc<Spinner>,
}

impl Settings {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            manga_directory: Mutable::new("".to_string()),
            validation: Mutable::new(None),
            saving: Mutable::new(false),
            validating: Mutable::new(false),
            loader: AsyncLoader::new(),
            action_loader: AsyncLoader::new(),
            appearance_settings: AppearanceSettings::new(),
            library_preferences: LibraryPreferences::load(),
            spinner: Spinner::new_with_fullscreen(true),
        })
    }

    fn fetch_settings(settings: Rc<Self>) {
        settings.spinner.set_active(true);
        settings.loader.load(clone!(settings => async move {
            match query::fetch_settings().await {
                Ok(res) => {
                    if let Some(directory) = res.get(MANGA_DIRECTORY_KEY) {
                        settings.manga_directory.set(directory.to_string());
                    }
                }
                Err(e) if e.is_unauthorized() => {
                    session::expire();
                }
                Err(e) => {
                    error!("failed to fetch settings: {}", e);
                    notification::error(format!("Failed to load settings: {}", e));
                }
            }
            settings.spinner.set_active(false);
        }));
    }

    fn directory(settings: &Self) -> Option<String> {
        let directory = normalize_directory(&settings.manga_directory.lock_ref());
        if directory.is_none() {
            notification::error("Manga directory cannot be empty");
        }
        directory
    }

    fn validate_directory(settings: Rc<Self>) {
        if settings.validating.get() {
            return;
        }
        let Some(directory) = Self::directory(&settings) else {
            return;
        };

        settings.validating.set_neq(true);
        settings.validation.set(None);
        settings.action_loader.load(clone!(settings => async move {
            match query::validate_directory(directory).await {
                Ok(res) if res.success => {
                    if res.image_count.unwrap_or(0) == 0 {
                        notification::show(NotificationKind::Warning, "No images found in this directory");
                    }
                    settings.validation.set(Some(describe_validation(&res)));
                }
                Ok(res) => {
                    notification::error(res.error.unwrap_or_else(|| "Directory is not valid".to_string()));
                }
                Err(e) if e.is_unauthorized() => {
                    session::expire();
                }
                Err(e) => {
                    error!("failed to validate directory: {}", e);
                    notification::error(format!("Validation failed: {}", e));
                }
            }
            settings.validating.set_neq(false);
        }));
    }

    fn save_directory(settings: Rc<Self>) {
        if settings.saving.get() {
            return;
        }
        let Some(directory) = Self::directory(&settings) else {
            return;
        };

        settings.saving.set_neq(true);
        settings.action_loader.load(clone!(settings => async move {
            match query::update_manga_directory(directory.clone()).await {
                Ok(res) if res.success => {
                    info!("manga directory set to {}", directory);
                    settings.manga_directory.set(directory);
                    notification::success(res.message.unwrap_or_else(|| "Settings saved".to_string()));
                }
                Ok(res) => {
                    notification::error(res.error.unwrap_or_else(|| "Failed to save settings".to_string()));
                }
                Err(e) if e.is_unauthorized() => {
                    session::expire();
                }
                Err(e) => {
                    error!("failed to save settings: {}", e);
                    notification::error(format!("Failed to save settings: {}", e));
                }
            }
            settings.saving.set_neq(false);
        }));
    }

    fn render_directory(settings: Rc<Self>) -> Dom {
        html!("section", {
            .class("settings-card")
            .children(&mut [
                html!("h2", {
                    .text("Library directory")
                }),
                html!("input" => HtmlInputElement, {
                    .attr("id", "manga-directory")
                    .attr("type", "text")
                    .attr("placeholder", "/path/to/manga")
                    .prop_signal("value", settings.manga_directory.signal_cloned())
                    .with_node!(input => {
                        .event(clone!(settings => move |_: events::Input| {
                            settings.validation.set(None);
                            settings.manga_directory.set(input.value());
                        }))
                    })
                }),
                html!("div", {
                    .class("settings-actions")
                    .children(&mut [
                        html!("button", {
                            .attr("id", "validate-directory")
                            .attr_signal("disabled", settings.validating.signal().map(|busy| busy.then_some("true")))
                            .text_signal(settings.validating.signal().map(|busy| if busy { "Validating..." } else { "Validate" }))
                            .event(clone!(settings => move |_: events::Click| {
                                Self::validate_directory(settings.clone());
                            }))
                        }),
                        html!("button", {
                            .attr("id", "save-directory")
                            .class("primary")
                            .attr_signal("disabled", settings.saving.signal().map(|busy| busy.then_some("true")))
                            .text_signal(settings.saving.signal().map(|busy| if busy { "Saving..." } else { "Save" }))
                            .event(clone!(settings => move |_: events::Click| {
                                Self::save_directory(settings.clone());
                            }))
                        }),
                    ])
                }),
                html!("p", {
                    .class("field-hint")
                    .child_signal(settings.validation.signal_cloned().map(|message| message.map(|message| html!("span", {
                        .text(&message)
                    }))))
                }),
            ])
        })
    }

    pub fn render(settings: Rc<Self>) -> Dom {
        Self::fetch_settings(settings.clone());

        html!("div", {
            .class("layout")
            .children(&mut [
                Sidebar::render(Sidebar::new()),
                html!("main", {
                    .class(["main-content", "settings"])
                    .children(&mut [
                        html!("h1", {
                            .text("Settings")
                        }),
                        html!("section", {
                            .class("settings-card")
                            .children(&mut [
                                html!("h2", {
                                    .text("Appearance")
                                }),
                                AppearanceSettings::render(settings.appearance_settings.clone()),
                            ])
                        }),
                        html!("section", {
                            .class("settings-card")
                            .children(&mut [
                                html!("h2", {
                                    .text("Library")
                                }),
                                LibraryPreferences::render(settings.library_preferences.clone()),
                            ])
                        }),
                        Self::render_directory(settings.clone()),
                        Spinner::render(&settings.spinner),
                    ])
                }),
            ])
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_normalize_directory() {
        assert_eq!(normalize_directory("  /srv/manga "), Some("/srv/manga".to_string()));
        assert_eq!(normalize_directory("   "), None);
        assert_eq!(normalize_directory(""), None);
    }

    #[test]
    fn test_describe_validation() {
        let result = DirectoryValidation {
            success: true,
            manga_folders: Some(4),
            image_count: Some(120),
            ..Default::default()
        };
        assert_eq!(describe_validation(&result), "4 manga folders, 120 images found");

        let missing = DirectoryValidation {
            success: true,
            ..Default::default()
        };
        assert_eq!(describe_validation(&missing), "0 manga folders, 0 images found");
    }
}
