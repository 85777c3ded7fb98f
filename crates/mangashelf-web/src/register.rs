use std::rc::Rc;

use dominator::{clone, events, html, link, routing, with_node, Dom, EventOptions};
use futures_signals::map_ref;
use futures_signals::signal::{Mutable, SignalExt};
use gloo_timers::future::TimeoutFuture;
use web_sys::HtmlInputElement;

use crate::common::validation::{confirm_mismatch, RegisterForm};
use crate::common::{notification, PasswordInput, Route};
use crate::login::Login;
use crate::query;
use crate::utils::AsyncLoader;

pub const REGISTER_REDIRECT_MS: u32 = 2_000;

pub struct Register {
    username: Mutable<String>,
    email: Mutable<String>,
    password: Mutable<String>,
    confirm_password: Mutable<String>,
    loading: Mutable<bool>,
    loader: AsyncLoader,
}

impl Register {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            username: Mutable::new("".to_string()),
            email: Mutable::new("".to_string()),
            password: Mutable::new("".to_string()),
            confirm_password: Mutable::new("".to_string()),
            loading: Mutable::new(false),
            loader: AsyncLoader::new(),
        })
    }

    fn form(&self) -> RegisterForm {
        RegisterForm {
            username: self.username.get_cloned(),
            email: self.email.get_cloned(),
            password: self.password.get_cloned(),
            confirm_password: self.confirm_password.get_cloned(),
        }
    }

    pub fn register(register: Rc<Self>) {
        if register.loading.get() {
            return;
        }

        let form = register.form();
        if let Err(e) = form.validate() {
            notification::error(e.to_string());
            return;
        }

        register.loading.set_neq(true);
        register.loader.load(clone!(register => async move {
            match query::user_register(form.username, form.email, form.password).await {
                Ok(_) => {
                    register.loading.set_neq(false);
                    notification::success("Registered, redirecting to login...");
                    TimeoutFuture::new(REGISTER_REDIRECT_MS).await;
                    routing::go_to_url(&Route::Login.url());
                }
                Err(e) => {
                    error!("register failed: {}", e);
                    notification::error(format!("Register failed: {}", e));
                    register.loading.set_neq(false);
                }
            }
        }));
    }

    fn render_text_input(value: &Mutable<String>, name: &str, kind: &str, placeholder: &str) -> Dom {
        html!("input" => HtmlInputElement, {
            .attr("type", kind)
            .attr("name", name)
            .attr("placeholder", placeholder)
            .prop_signal("value", value.signal_cloned())
            .with_node!(input => {
                .event(clone!(value => move |_: events::Input| {
                    value.set(input.value());
                }))
            })
        })
    }

    fn render_form(register: Rc<Self>) -> Dom {
        let mismatch = map_ref! {
            let password = register.password.signal_cloned(),
            let confirm = register.confirm_password.signal_cloned() =>
            confirm_mismatch(password, confirm)
        }
        .broadcast();

        html!("form", {
            .attr("id", "register-form")
            .class("auth-form")
            .event(|_: events::Input| notification::hide())
            .event_with_options(&EventOptions::preventable(), clone!(register => move |e: events::KeyDown| {
                if e.key() == "Enter" {
                    e.prevent_default();
                    Self::register(register.clone());
                }
            }))
            .children(&mut [
                Self::render_text_input(&register.username, "username", "text", "Username"),
                Self::render_text_input(&register.email, "email", "email", "Email"),
                PasswordInput::render(PasswordInput::new(register.password.clone(), "password", "Password")),
                PasswordInput::render_with_invalid(
                    PasswordInput::new(register.confirm_password.clone(), "confirm-password", "Confirm password"),
                    mismatch.signal(),
                ),
            ])
            .child_signal(mismatch.signal().map(|mismatch| mismatch.then(|| html!("span", {
                .class("field-hint")
                .text("Passwords do not match")
            }))))
            .children(&mut [
                Login::render_submit("Register", register.loading.clone(), clone!(register => move || Self::register(register.clone()))),
            ])
        })
    }

    pub fn render(register: Rc<Self>) -> Dom {
        html!("div", {
            .class("auth-page")
            .children(&mut [
                html!("div", {
                    .class("auth-card")
                    .children(&mut [
                        html!("h1", {
                            .text("Create account")
                        }),
                        Self::render_form(register),
                        html!("p", {
                            .class("auth-switch")
                            .children(&mut [
                                html!("span", {
                                    .text("Already registered? ")
                                }),
                                link!(Route::Login.url(), {
                                    .text("Login")
                                }),
                            ])
                        }),
                    ])
                })
            ])
        })
    }
}
