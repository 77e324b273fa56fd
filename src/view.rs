//! Pagination over window snapshots.
//!
//! Pages are computed fresh from a snapshot on every read rather than
//! maintained incrementally, trading a small recomputation cost for
//! correctness under concurrent window mutation.

use crate::types::Message;
use serde::{Deserialize, Serialize};

/// One page of a window snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Page {
    /// Messages on this page, oldest first. A UI wanting newest-first
    /// reverses at presentation time.
    pub items: Vec<Message>,

    /// The requested 1-based page index.
    pub page_index: usize,

    /// Total pages available: ceil(len / page_size), 0 for an empty window.
    pub total_pages: usize,
}

impl Page {
    /// An empty page with no pages available.
    pub fn empty(page_index: usize) -> Self {
        Self {
            items: Vec::new(),
            page_index,
            total_pages: 0,
        }
    }
}

/// Slice `snapshot` into the requested page.
///
/// `page_index` is 1-based. An index beyond `total_pages` (or 0) yields an
/// empty page with the correct `total_pages`, not an error. A `page_size`
/// of 0 yields an empty page.
pub fn page(snapshot: Vec<Message>, page_size: usize, page_index: usize) -> Page {
    if page_size == 0 {
        return Page::empty(page_index);
    }

    let total_pages = snapshot.len().div_ceil(page_size);
    if page_index == 0 || page_index > total_pages {
        return Page {
            items: Vec::new(),
            page_index,
            total_pages,
        };
    }

    let start = (page_index - 1) * page_size;
    let end = (start + page_size).min(snapshot.len());
    Page {
        items: snapshot[start..end].to_vec(),
        page_index,
        total_pages,
    }
}
