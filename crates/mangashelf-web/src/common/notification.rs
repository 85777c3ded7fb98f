use std::rc::Rc;

use dominator::{clone, events, html, Dom};
use futures_signals::signal::{Mutable, SignalExt};
use gloo_timers::future::TimeoutFuture;

use crate::utils::AsyncLoader;

pub const NOTIFICATION_TIMEOUT_MS: u32 = 5_000;

thread_local! {
    static NOTIFICATION: std::cell::RefCell<Rc<Notification>> = std::cell::RefCell::new(Notification::new());
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
    Warning,
}

impl NotificationKind {
    pub fn class(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
            NotificationKind::Warning => "warning",
        }
    }

    /// Material icon name.
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Success => "check_circle",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
            NotificationKind::Warning => "warning",
        }
    }
}

pub fn show(kind: NotificationKind, message: impl Into<String>) {
    NOTIFICATION.with(|n| n.borrow().show(kind, message.into()));
}

pub fn success(message: impl Into<String>) {
    show(NotificationKind::Success, message);
}

pub fn error(message: impl Into<String>) {
    show(NotificationKind::Error, message);
}

pub fn hide() {
    NOTIFICATION.with(|n| n.borrow().hide());
}

pub fn render() -> Dom {
    NOTIFICATION.with(|n| Notification::render(n.borrow().clone()))
}

pub struct Notification {
    message: Mutable<Option<(NotificationKind, String)>>,
    timer: AsyncLoader,
}

impl Notification {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            message: Mutable::new(None),
            timer: AsyncLoader::new(),
        })
    }

    /// Replaces whatever is on screen. The previous hide timer is aborted so
    /// it cannot dismiss the new message early.
    pub fn show(&self, kind: NotificationKind, message: String) {
        self.message.set(Some((kind, message)));

        let current = self.message.clone();
        self.timer.load(async move {
            TimeoutFuture::new(NOTIFICATION_TIMEOUT_MS).await;
            current.set(None);
        });
    }

    pub fn hide(&self) {
        if self.message.lock_ref().is_some() {
            self.timer.cancel();
            self.message.set(None);
        }
    }

    pub fn render(notification: Rc<Self>) -> Dom {
        html!("div", {
            .attr("id", "alert")
            .attr("role", "alert")
            .class("alert")
            .visible_signal(notification.message.signal_ref(|message| message.is_some()))
            .child_signal(notification.message.signal_cloned().map(|message| message.map(|(kind, text)| html!("div", {
                .class(["alert-body", kind.class()])
                .children(&mut [
                    html!("span", {
                        .class(["material-icons", "alert-icon"])
                        .text(kind.icon())
                    }),
                    html!("span", {
                        .class("alert-message")
                        .text(&text)
                    }),
                ])
            }))))
            .children(&mut [
                html!("button", {
                    .class("alert-close")
                    .event(clone!(notification => move |_: events::Click| notification.hide()))
                    .children(&mut [
                        html!("span", {
                            .class("material-icons")
                            .text("close")
                        })
                    ])
                })
            ])
        })
    }
}
