use dominator::routing;
use futures_signals::signal::{Signal, SignalExt};
use wasm_bindgen::prelude::*;
use web_sys::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Manga(i64),
    /// Page index is 0-based here and 1-based in the url hash.
    Reader(i64, usize),
    Settings,
    NotFound,
}

impl Route {
    pub fn signal() -> impl Signal<Item = Self> {
        routing::url()
            .signal_ref(|url| Url::new(url).unwrap_throw())
            .map(|url| Self::parse(&url.pathname(), &url.hash()))
    }

    pub fn parse(pathname: &str, hash: &str) -> Self {
        let mut paths = pathname.split('/').collect::<Vec<_>>();
        paths.retain(|path| !path.is_empty());

        match paths.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["settings"] => Route::Settings,
            ["manga", id] => match id.parse() {
                Ok(id) => Route::Manga(id),
                Err(_) => Route::NotFound,
            },
            ["read", id] => match id.parse() {
                Ok(id) => {
                    let page = hash
                        .strip_prefix('#')
                        .and_then(|h| h.parse::<usize>().ok())
                        .unwrap_or(1);
                    Route::Reader(id, page.saturating_sub(1))
                }
                Err(_) => Route::NotFound,
            },
            _ => Route::NotFound,
        }
    }

    pub fn url(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Manga(id) => format!("/manga/{}", id),
            Route::Reader(id, page) => format!("/read/{}#{}", id, page + 1),
            Route::Settings => "/settings".to_string(),
            Route::NotFound => "/notfound".to_string(),
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login | Route::Register | Route::NotFound)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/", ""), Route::Home);
        assert_eq!(Route::parse("/login", ""), Route::Login);
        assert_eq!(Route::parse("/register/", ""), Route::Register);
        assert_eq!(Route::parse("/settings", ""), Route::Settings);
        assert_eq!(Route::parse("/manga/12", ""), Route::Manga(12));
        assert_eq!(Route::parse("/manga/abc", ""), Route::NotFound);
        assert_eq!(Route::parse("/library/shelf", ""), Route::NotFound);
    }

    #[test]
    fn test_reader_page_from_hash() {
        assert_eq!(Route::parse("/read/3", ""), Route::Reader(3, 0));
        assert_eq!(Route::parse("/read/3", "#5"), Route::Reader(3, 4));
        assert_eq!(Route::parse("/read/3", "#0"), Route::Reader(3, 0));
        assert_eq!(Route::parse("/read/3", "#x"), Route::Reader(3, 0));
    }

    #[test]
    fn test_url_round_trips_through_parse() {
        for route in [
            Route::Home,
            Route::Login,
            Route::Register,
            Route::Settings,
            Route::Manga(8),
            Route::Reader(8, 11),
        ] {
            let url = route.url();
            let (path, hash) = match url.find('#') {
                Some(i) => url.split_at(i),
                None => (url.as_str(), ""),
            };
            assert_eq!(Route::parse(path, hash), route);
        }
    }

    #[test]
    fn test_auth_required() {
        assert!(Route::Home.requires_auth());
        assert!(Route::Reader(1, 0).requires_auth());
        assert!(!Route::Login.requires_auth());
        assert!(!Route::Register.requires_auth());
    }
}
