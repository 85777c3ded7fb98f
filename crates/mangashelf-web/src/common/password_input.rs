use std::rc::Rc;

use dominator::{clone, events, html, with_node, Dom};
use futures_signals::signal::{Mutable, Signal, SignalExt};
use web_sys::HtmlInputElement;

/// Password field with a show/hide toggle.
pub struct PasswordInput {
    value: Mutable<String>,
    visible: Mutable<bool>,
    name: &'static str,
    placeholder: &'static str,
}

impl PasswordInput {
    pub fn new(value: Mutable<String>, name: &'static str, placeholder: &'static str) -> Rc<Self> {
        Rc::new(Self {
            value,
            visible: Mutable::new(false),
            name,
            placeholder,
        })
    }

    pub fn render(this: Rc<Self>) -> Dom {
        Self::render_with_invalid(this, futures_signals::signal::always(false))
    }

    /// `invalid` marks the field, e.g. while a confirmation does not match.
    pub fn render_with_invalid<S>(this: Rc<Self>, invalid: S) -> Dom
    where
        S: Signal<Item = bool> + 'static,
    {
        html!("div", {
            .class("password-field")
            .children(&mut [
                html!("input" => HtmlInputElement, {
                    .attr("name", this.name)
                    .attr("id", this.name)
                    .attr("placeholder", this.placeholder)
                    .attr_signal("type", this.visible.signal().map(|visible| if visible { "text" } else { "password" }))
                    .class_signal("invalid", invalid)
                    .prop_signal("value", this.value.signal_cloned())
                    .with_node!(input => {
                        .event(clone!(this => move |_: events::Input| {
                            this.value.set(input.value());
                        }))
                    })
                }),
                html!("button", {
                    .class("toggle-password")
                    .attr("type", "button")
                    .event(clone!(this => move |_: events::Click| {
                        this.visible.replace_with(|visible| !*visible);
                    }))
                    .children(&mut [
                        html!("span", {
                            .class("material-icons")
                            .text_signal(this.visible.signal().map(|visible| if visible { "visibility_off" } else { "visibility" }))
                        })
                    ])
                }),
            ])
        })
    }
}
