//! Fixed-size pagination over a chat's ordered watchlist.
//!
//! Interactive controls address items by absolute position in the full list,
//! paired with the entry's catalog id. Resolution always runs against a
//! freshly loaded snapshot; any drift between render and click resolves to
//! "no longer exists", never to whichever entry shifted into the slot.

use std::ops::Range;

use watchvault_models::WatchlistEntry;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Opaque token embedded in an item's interactive control at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemRef {
    /// Absolute zero-based position in the full list at render time.
    pub position: usize,
    /// Catalog id of the entry that was at that position.
    pub tmdb_id: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Index of the last page; 0 for an empty list.
    pub fn last_page(&self, total: usize) -> usize {
        if total == 0 {
            0
        } else {
            (total - 1) / self.page_size
        }
    }

    /// Clamp any requested page (page-turn arithmetic can go negative) into
    /// `[0, last_page]`.
    pub fn clamp_page(&self, page: i64, total: usize) -> usize {
        let last = self.last_page(total) as i64;
        page.clamp(0, last) as usize
    }

    /// Half-open index range of the entries visible on `page`.
    pub fn page_bounds(&self, total: usize, page: usize) -> Range<usize> {
        let start = (page * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        start..end
    }
}

/// Resolve a control token against a fresh snapshot of the list.
///
/// `None` when the position fell out of range or the entry at that position
/// is no longer the one the control was issued for.
pub fn resolve<'a>(items: &'a [WatchlistEntry], item: ItemRef) -> Option<&'a WatchlistEntry> {
    items
        .get(item.position)
        .filter(|entry| entry.tmdb_id == item.tmdb_id)
}
