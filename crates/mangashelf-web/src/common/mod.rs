mod route;
pub use route::Route;

mod manga_card;
pub use manga_card::MangaCard;

mod spinner;
pub use spinner::Spinner;

mod appearance_settings;
pub use appearance_settings::*;

mod library_settings;
pub use library_settings::*;

mod password_input;
pub use password_input::PasswordInput;

mod sidebar;
pub use sidebar::Sidebar;

pub mod notification;
pub use notification::NotificationKind;

pub mod pagination;
pub use pagination::{Pager, Pagination};

pub mod search;

pub mod validation;
