//! Windowed pagination for list endpoints.

use serde::Serialize;

pub const DEFAULT_PER_PAGE: usize = 20;

/// Builds the page-link window shown alongside a paginated list: leading
/// edge, a window around the current page, and a trailing edge, with `None`
/// marking gaps.
fn page_window(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    around: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    if total_pages == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(total_pages + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(around));
    let mid_end = (current_page + around + 1).min(total_pages + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(total_pages.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=total_pages).map(Some));

    pages
}

/// A page of results plus enough metadata to render pagination controls.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub pages: Vec<Option<usize>>,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: usize, current_page: usize, per_page: usize) -> Self {
        let page = current_page.max(1);
        let per_page = per_page.max(1);
        let total_pages = total.div_ceil(per_page);
        Self {
            items,
            total,
            page,
            pages: page_window(total_pages, page, 2, 2, 2),
        }
    }
}
