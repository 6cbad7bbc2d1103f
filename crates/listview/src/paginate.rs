//! Paginator: page slicing and the page-link control sequence.
//!
//! Responsibilities:
//! - Track the current page and page size ([`PageState`]) with clamping helpers.
//! - Slice a filtered view into a [`Page`] with its display bounds.
//! - Produce the windowed page-link sequence with ellipsis collapsing.
//!
//! Does NOT handle:
//! - Filtering (see [`crate::filter`]).
//! - Deciding when to clamp or reset (see [`crate::state`]).
//!
//! Invariants:
//! - `current_page >= 1` and `page_size >= 1` for every constructed [`PageState`].
//! - `total_pages >= 1`, even for an empty view.
//! - Out-of-range pages produce an empty slice, never a panic.

use std::fmt;

/// Width of the page-link window when the caller does not configure one.
pub const DEFAULT_MAX_VISIBLE_PAGES: usize = 5;

/// Number of pages for `item_count` items: `max(1, ceil(item_count / page_size))`.
pub fn total_pages(item_count: usize, page_size: usize) -> usize {
    item_count.div_ceil(page_size.max(1)).max(1)
}

/// Current page (1-based) and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    page_size: usize,
}

impl PageState {
    /// First page at the given size.
    pub fn new(page_size: usize) -> Self {
        Self::at(1, page_size)
    }

    /// Arbitrary page at the given size. The page is not clamped to any item count.
    pub fn at(current_page: usize, page_size: usize) -> Self {
        Self {
            current_page: current_page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self, item_count: usize) -> usize {
        total_pages(item_count, self.page_size)
    }

    /// Clamp the current page into `[1, total_pages(item_count)]`.
    pub fn clamp(&mut self, item_count: usize) {
        let last = self.total_pages(item_count);
        self.current_page = self.current_page.clamp(1, last);
    }

    /// Move to `page`, clamped to the valid range for `item_count`.
    pub fn go_to(&mut self, page: usize, item_count: usize) {
        self.current_page = page;
        self.clamp(item_count);
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Change the page size and return to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
    }

    /// Advance one page. Returns false when already on the last page.
    pub fn next(&mut self, item_count: usize) -> bool {
        if self.current_page < self.total_pages(item_count) {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page. Returns false when already on the first page.
    pub fn previous(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }
}

/// One page of a filtered view plus its bounds.
///
/// `start_index` is 0-based inclusive and `end_index` exclusive, so the 1-based
/// display range is `start_index + 1 ..= end_index`.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<I> {
    pub items: I,
    pub current_page: usize,
    pub total_pages: usize,
    pub start_index: usize,
    pub end_index: usize,
    pub total_items: usize,
}

impl<I> Page<I> {
    /// True when the page holds no items (empty view or out-of-range page).
    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Footer label, e.g. `Showing 11 to 12 of 12 findings`.
    pub fn range_label(&self, noun: &str) -> String {
        if self.is_empty() {
            return format!("No {noun} found");
        }
        format!(
            "Showing {} to {} of {} {noun}",
            self.start_index + 1,
            self.end_index,
            self.total_items
        )
    }

    /// Transform the item container, keeping the bounds.
    pub fn map_items<J>(self, f: impl FnOnce(I) -> J) -> Page<J> {
        Page {
            items: f(self.items),
            current_page: self.current_page,
            total_pages: self.total_pages,
            start_index: self.start_index,
            end_index: self.end_index,
            total_items: self.total_items,
        }
    }
}

/// Slice `filtered` to the page described by `page`.
pub fn paginate<T>(filtered: &[T], page: PageState) -> Page<&[T]> {
    let total_items = filtered.len();
    let start_index = (page.current_page - 1).saturating_mul(page.page_size);
    let end_index = start_index.saturating_add(page.page_size).min(total_items);
    let items = filtered.get(start_index..end_index).unwrap_or(&[]);

    Page {
        items,
        current_page: page.current_page,
        total_pages: total_pages(total_items, page.page_size),
        start_index,
        end_index,
        total_items,
    }
}

/// One entry of the page-link control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageLinkToken {
    Page(usize),
    Ellipsis,
}

impl fmt::Display for PageLinkToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageLinkToken::Page(n) => write!(f, "{n}"),
            PageLinkToken::Ellipsis => f.write_str("…"),
        }
    }
}

/// Windowed page-link sequence.
///
/// When `total <= max_visible` every page is listed. Otherwise the sequence is
/// page 1, an ellipsis if the window starts past page 2, the window
/// `[max(2, current - half), min(total - 1, current + half)]`, an ellipsis if the
/// window ends before `total - 1`, and finally `total`, where `half = max_visible / 2`.
pub fn generate_page_links(current: usize, total: usize, max_visible: usize) -> Vec<PageLinkToken> {
    if total <= max_visible {
        return (1..=total).map(PageLinkToken::Page).collect();
    }

    let half = max_visible / 2;
    let mut links = vec![PageLinkToken::Page(1)];

    if current > half + 2 {
        links.push(PageLinkToken::Ellipsis);
    }

    let window_start = current.saturating_sub(half).max(2);
    let window_end = current.saturating_add(half).min(total - 1);
    links.extend((window_start..=window_end).map(PageLinkToken::Page));

    if current.saturating_add(half + 1) < total {
        links.push(PageLinkToken::Ellipsis);
    }

    if total > 1 {
        links.push(PageLinkToken::Page(total));
    }

    links
}

/// Render a page-link sequence as a single line, bracketing the current page.
pub fn page_bar(links: &[PageLinkToken], current: usize) -> String {
    links
        .iter()
        .map(|token| match token {
            PageLinkToken::Page(n) if *n == current => format!("[{n}]"),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
