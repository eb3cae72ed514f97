//! Page-number window for pagination controls.

/// Maximum number of consecutive page numbers shown.
pub const MAX_VISIBLE_PAGES: u32 = 5;

/// An entry in a pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page { number: u32, current: bool },
    Ellipsis,
}

/// Compute the controls for `current` out of `total` pages.
///
/// Shows up to [`MAX_VISIBLE_PAGES`] numbers centred on `current`, shifted
/// to stay in range. The first and last pages are always reachable, with an
/// ellipsis when there is a gap. A `current` outside `1..=total` is
/// clamped into range.
pub fn page_window(current: u32, total: u32) -> Vec<PageItem> {
    if total == 0 {
        return Vec::new();
    }

    let current = current.clamp(1, total);
    let mut start = current.saturating_sub(MAX_VISIBLE_PAGES / 2).max(1);
    let end = start.saturating_add(MAX_VISIBLE_PAGES - 1).min(total);
    if end.saturating_sub(start) + 1 < MAX_VISIBLE_PAGES {
        start = end.saturating_sub(MAX_VISIBLE_PAGES - 1).max(1);
    }

    let page = |number| PageItem::Page {
        number,
        current: number == current,
    };

    let mut items = Vec::new();
    if start > 1 {
        items.push(page(1));
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
    }
    items.extend((start..=end).map(page));
    if end < total {
        if end + 1 < total {
            items.push(PageItem::Ellipsis);
        }
        items.push(page(total));
    }
    items
}
