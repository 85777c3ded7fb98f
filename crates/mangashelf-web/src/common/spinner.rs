use dominator::{html, Dom};
use futures_signals::signal::{self, Mutable, Signal};
use std::rc::Rc;

pub struct Spinner {
    active: Mutable<bool>,
    fullscreen: bool,
}

impl Spinner {
    pub fn new_with_fullscreen(fullscreen: bool) -> Rc<Self> {
        Rc::new(Self {
            active: Mutable::new(false),
            fullscreen,
        })
    }

    pub fn set_active(&self, active: bool) {
        self.active.set_neq(active);
    }

    pub fn signal(&self) -> impl Signal<Item = bool> + use<> {
        self.active.signal()
    }

    pub fn render(this: &Self) -> Dom {
        html!("div", {
            .class("spinner")
            .class_signal("fullscreen", signal::always(this.fullscreen))
            .visible_signal(this.active.signal())
            .children(&mut [
                html!("div", {
                    .class("loader")
                })
            ])
        })
    }

    /// Inline spinner for buttons waiting on a request.
    pub fn render_inline<S>(visible: S) -> Dom
    where
        S: Signal<Item = bool> + 'static,
    {
        html!("span", {
            .class("loading-spinner")
            .visible_signal(visible)
            .children(&mut [
                html!("div", {
                    .class("loader")
                })
            ])
        })
    }
}
