use serde::Serialize;

/// Page-number window for a paginated listing, with the item range of the
/// current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub current_page: u32,
    pub total_items: u64,
    pub per_page: u32,
    pub max_visible: u32,
}

impl PageWindow {
    pub fn new(current_page: u32, total_items: u64, per_page: u32, max_visible: u32) -> Self {
        let mut window = Self {
            current_page: 1,
            total_items,
            per_page: per_page.max(1),
            max_visible: max_visible.max(1),
        };
        window.current_page = window.clamp(current_page);
        window
    }

    pub fn total_pages(&self) -> u32 {
        self.total_items.div_ceil(u64::from(self.per_page)) as u32
    }

    /// Page numbers to render, centred on the current page when possible.
    pub fn page_numbers(&self) -> Vec<u32> {
        let total = self.total_pages();
        if total == 0 {
            return Vec::new();
        }

        let half = self.max_visible / 2;
        let mut start = self.current_page.saturating_sub(half).max(1);
        let end = (start + self.max_visible - 1).min(total);

        if end - start + 1 < self.max_visible {
            start = (end + 1).saturating_sub(self.max_visible).max(1);
        }

        (start..=end).collect()
    }

    /// 1-based index of the first item on the current page, 0 when empty.
    pub fn start_index(&self) -> u64 {
        if self.total_items == 0 {
            return 0;
        }
        u64::from(self.current_page - 1) * u64::from(self.per_page) + 1
    }

    pub fn end_index(&self) -> u64 {
        (u64::from(self.current_page) * u64::from(self.per_page)).min(self.total_items)
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn go_to(&mut self, page: u32) {
        self.current_page = self.clamp(page);
    }

    pub fn next(&mut self) {
        self.go_to(self.current_page.saturating_add(1));
    }

    pub fn prev(&mut self) {
        self.go_to(self.current_page.saturating_sub(1));
    }

    fn clamp(&self, page: u32) -> u32 {
        page.clamp(1, self.total_pages().max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centres_window_on_current_page() {
        let window = PageWindow::new(5, 100, 10, 5);
        assert_eq!(window.total_pages(), 10);
        assert_eq!(window.page_numbers(), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn shifts_window_back_near_the_end() {
        let window = PageWindow::new(10, 100, 10, 5);
        assert_eq!(window.page_numbers(), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn short_listings_show_every_page() {
        let window = PageWindow::new(1, 25, 10, 5);
        assert_eq!(window.page_numbers(), vec![1, 2, 3]);
        assert_eq!(window.start_index(), 1);
        assert_eq!(window.end_index(), 10);
    }

    #[test]
    fn empty_listing() {
        let window = PageWindow::new(3, 0, 10, 5);
        assert_eq!(window.current_page, 1);
        assert!(window.page_numbers().is_empty());
        assert_eq!(window.start_index(), 0);
        assert_eq!(window.end_index(), 0);
        assert!(!window.has_prev());
        assert!(!window.has_next());
    }

    #[test]
    fn navigation_is_clamped() {
        let mut window = PageWindow::new(1, 42, 10, 5);
        window.prev();
        assert_eq!(window.current_page, 1);

        window.go_to(99);
        assert_eq!(window.current_page, 5);
        assert_eq!(window.start_index(), 41);
        assert_eq!(window.end_index(), 42);
        assert!(!window.has_next());

        window.prev();
        assert_eq!(window.current_page, 4);
        assert!(window.has_prev());
        assert!(window.has_next());
    }
}
