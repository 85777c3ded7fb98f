use std::ops::{Range, RangeInclusive};
use std::rc::Rc;

use dominator::{clone, events, html, Dom};
use futures_signals::signal::{Mutable, SignalExt};

pub const MAX_VISIBLE_PAGES: usize = 5;
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Page counter over a list that lives elsewhere. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: usize,
    pub items_per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl Pagination {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
            total_items: 0,
            total_pages: 0,
        }
    }

    pub fn reset(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.total_pages = total_items.div_ceil(self.items_per_page);
        self.current_page = 1;
    }

    pub fn go_to(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages {
            return false;
        }

        self.current_page = page;
        true
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }

    /// Page buttons to show, centered on the current page where possible.
    /// Empty when there are no pages.
    pub fn window(&self) -> RangeInclusive<usize> {
        let start = self
            .current_page
            .saturating_sub(MAX_VISIBLE_PAGES / 2)
            .max(1);
        let end = (start + MAX_VISIBLE_PAGES - 1).min(self.total_pages);

        start..=end
    }

    pub fn slice_range(&self, len: usize) -> Range<usize> {
        let start = ((self.current_page - 1) * self.items_per_page).min(len);
        let end = (start + self.items_per_page).min(len);

        start..end
    }
}

pub struct Pager {
    state: Mutable<Pagination>,
    on_change: Box<dyn Fn(usize)>,
}

impl Pager {
    pub fn new<F>(state: Mutable<Pagination>, on_change: F) -> Rc<Self>
    where
        F: Fn(usize) + 'static,
    {
        Rc::new(Self {
            state,
            on_change: Box::new(on_change),
        })
    }

    fn change_page(&self, page: usize) {
        let changed = self.state.lock_mut().go_to(page);
        if changed {
            (self.on_change)(page);
        }
    }

    fn render_buttons(pager: Rc<Self>, state: Pagination) -> Vec<Dom> {
        let mut buttons = vec![html!("button", {
            .text("Previous")
            .apply_if(!state.has_prev(), |dom| dom.attr("disabled", ""))
            .event(clone!(pager => move |_: events::Click| {
                pager.change_page(state.current_page - 1);
            }))
        })];

        for page in state.window() {
            buttons.push(html!("button", {
                .apply_if(page == state.current_page, |dom| dom.class("active"))
                .text(&page.to_string())
                .event(clone!(pager => move |_: events::Click| {
                    pager.change_page(page);
                }))
            }));
        }

        buttons.push(html!("button", {
            .text("Next")
            .apply_if(!state.has_next(), |dom| dom.attr("disabled", ""))
            .event(clone!(pager => move |_: events::Click| {
                pager.change_page(state.current_page + 1);
            }))
        }));

        buttons
    }

    pub fn render(pager: Rc<Self>) -> Dom {
        html!("div", {
            .class("pagination")
            .children_signal_vec(pager.state.signal().map(clone!(pager => move |state| {
                if state.is_visible() {
                    Self::render_buttons(pager.clone(), state)
                } else {
                    vec![]
                }
            })).to_signal_vec())
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn paged(total_items: usize, current_page: usize) -> Pagination {
        let mut state = Pagination::new(20);
        state.reset(total_items);
        state.current_page = current_page;
        state
    }

    #[test]
    fn test_reset_computes_total_pages() {
        let mut state = Pagination::new(20);
        state.current_page = 3;
        state.reset(41);

        assert_eq!(state.total_pages, 3);
        assert_eq!(state.total_items, 41);
        assert_eq!(state.current_page, 1);

        state.reset(40);
        assert_eq!(state.total_pages, 2);

        state.reset(0);
        assert_eq!(state.total_pages, 0);
        assert!(!state.is_visible());
    }

    #[test]
    fn test_go_to_rejects_out_of_range() {
        let mut state = paged(100, 1);

        assert!(!state.go_to(0));
        assert!(!state.go_to(6));
        assert_eq!(state.current_page, 1);

        assert!(state.go_to(5));
        assert_eq!(state.current_page, 5);
    }

    #[test]
    fn test_window_at_start() {
        assert_eq!(paged(200, 1).window(), 1..=5);
        assert_eq!(paged(200, 2).window(), 1..=5);
        assert_eq!(paged(200, 3).window(), 1..=5);
    }

    #[test]
    fn test_window_slides_with_current_page() {
        assert_eq!(paged(200, 4).window(), 2..=6);
        assert_eq!(paged(200, 7).window(), 5..=9);
    }

    #[test]
    fn test_window_is_clamped_to_last_page() {
        // 10 pages, on the last one: start stays at current - 2
        assert_eq!(paged(200, 10).window(), 8..=10);
        assert_eq!(paged(60, 2).window(), 1..=3);
    }

    #[test]
    fn test_window_never_exceeds_max_visible() {
        for total_items in [0, 1, 19, 20, 21, 99, 100, 1000] {
            let mut state = Pagination::new(20);
            state.reset(total_items);
            for page in 1..=state.total_pages {
                state.current_page = page;
                let window = state.window();
                assert!(window.clone().count() <= MAX_VISIBLE_PAGES);
                assert!(window.contains(&page));
                assert!(*window.end() <= state.total_pages);
            }
        }
    }

    #[test]
    fn test_empty_window() {
        assert_eq!(paged(0, 1).window().count(), 0);
    }

    #[test]
    fn test_slice_range() {
        assert_eq!(paged(45, 1).slice_range(45), 0..20);
        assert_eq!(paged(45, 3).slice_range(45), 40..45);
        assert_eq!(paged(0, 1).slice_range(0), 0..0);
    }

    #[test]
    fn test_prev_next() {
        let state = paged(45, 1);
        assert!(!state.has_prev());
        assert!(state.has_next());

        let state = paged(45, 3);
        assert!(state.has_prev());
        assert!(!state.has_next());
    }
}
