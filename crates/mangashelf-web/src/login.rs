use std::rc::Rc;

use dominator::{clone, events, html, link, routing, with_node, Dom, EventOptions};
use futures_signals::signal::{Mutable, SignalExt};
use gloo_timers::future::TimeoutFuture;
use web_sys::HtmlInputElement;

use crate::common::validation::LoginForm;
use crate::common::{notification, PasswordInput, Route, Spinner};
use crate::query;
use crate::session;
use crate::utils::AsyncLoader;

pub const LOGIN_REDIRECT_MS: u32 = 1_000;

pub struct Login {
    username: Mutable<String>,
    password: Mutable<String>,
    loading: Mutable<bool>,
    loader: AsyncLoader,
}

impl Login {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            username: Mutable::new("".to_string()),
            password: Mutable::new("".to_string()),
            loading: Mutable::new(false),
            loader: AsyncLoader::new(),
        })
    }

    fn form(&self) -> LoginForm {
        LoginForm {
            username: self.username.get_cloned(),
            password: self.password.get_cloned(),
        }
    }

    pub fn login(login: Rc<Self>) {
        if login.loading.get() {
            return;
        }

        let form = login.form();
        if let Err(e) = form.validate() {
            notification::error(e.to_string());
            return;
        }

        login.loading.set_neq(true);
        login.loader.load(clone!(login => async move {
            match query::user_login(form.username, form.password).await {
                Ok(res) => {
                    if let Some(token) = res.token.as_deref() {
                        session::store_token(token);
                    }
                    login.loading.set_neq(false);
                    notification::success("Logged in");
                    TimeoutFuture::new(LOGIN_REDIRECT_MS).await;
                    routing::go_to_url(&Route::Home.url());
                }
                Err(e) => {
                    error!("login failed: {}", e);
                    notification::error(format!("Login failed: {}", e));
                    login.loading.set_neq(false);
                }
            }
        }));
    }

    /// Submit button shared by the auth forms. Disabled with a spinner while
    /// `loading` is set.
    pub fn render_submit<F>(label: &str, loading: Mutable<bool>, on_submit: F) -> Dom
    where
        F: Fn() + 'static,
    {
        html!("button", {
            .class("auth-button")
            .attr("type", "submit")
            .class_signal("loading", loading.signal())
            .attr_signal("disabled", loading.signal().map(|loading| loading.then_some("true")))
            .event_with_options(&EventOptions::preventable(), move |e: events::Click| {
                e.prevent_default();
                on_submit();
            })
            .children(&mut [
                html!("span", {
                    .class("button-text")
                    .visible_signal(loading.signal().map(|loading| !loading))
                    .text(label)
                }),
                Spinner::render_inline(loading.signal()),
            ])
        })
    }

    fn render_form(login: Rc<Self>) -> Dom {
        html!("form", {
            .attr("id", "login-form")
            .class("auth-form")
            .event(|_: events::Input| notification::hide())
            .event_with_options(&EventOptions::preventable(), clone!(login => move |e: events::KeyDown| {
                if e.key() == "Enter" {
                    e.prevent_default();
                    Self::login(login.clone());
                }
            }))
            .children(&mut [
                html!("input" => HtmlInputElement, {
                    .attr("type", "text")
                    .attr("name", "username")
                    .attr("placeholder", "Username")
                    .attr("autocomplete", "username")
                    .prop_signal("value", login.username.signal_cloned())
                    .with_node!(input => {
                        .event(clone!(login => move |_: events::Input| {
                            login.username.set(input.value());
                        }))
                    })
                }),
                PasswordInput::render(PasswordInput::new(login.password.clone(), "password", "Password")),
                Self::render_submit("Login", login.loading.clone(), clone!(login => move || Self::login(login.clone()))),
            ])
        })
    }

    pub fn render(login: Rc<Self>) -> Dom {
        html!("div", {
            .class("auth-page")
            .children(&mut [
                html!("div", {
                    .class("auth-card")
                    .children(&mut [
                        html!("h1", {
                            .text("Mangashelf")
                        }),
                        Self::render_form(login),
                        html!("p", {
                            .class("auth-switch")
                            .children(&mut [
                                html!("span", {
                                    .text("No account yet? ")
                                }),
                                link!(Route::Register.url(), {
                                    .text("Register")
                                }),
                            ])
                        }),
                    ])
                })
            ])
        })
    }
}
