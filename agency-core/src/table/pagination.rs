use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::error::TableError;

/// The visible window into a filtered list: zero-based page index and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationModel {
    pub page: usize,
    pub page_size: usize,
}

impl PaginationModel {
    pub fn new(page: usize, page_size: usize) -> Result<Self, TableError> {
        if page_size == 0 {
            return Err(TableError::InvalidPageSize);
        }
        Ok(Self { page, page_size })
    }

    pub fn first(page_size: usize) -> Result<Self, TableError> {
        Self::new(0, page_size)
    }

    /// Index range of this page within a list of `len` items, clamped so a
    /// page past the end is empty rather than out of bounds.
    pub fn window(&self, len: usize) -> Range<usize> {
        let start = self.page.saturating_mul(self.page_size).min(len);
        let end = start.saturating_add(self.page_size).min(len);
        start..end
    }

    pub fn with_page(self, page: usize) -> Self {
        Self { page, ..self }
    }
}

impl Default for PaginationModel {
    fn default() -> Self {
        Self { page: 0, page_size: 10 }
    }
}

pub fn paginate<'a, T>(items: &'a [T], model: &PaginationModel) -> &'a [T] {
    &items[model.window(items.len())]
}

pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_lengths_follow_the_window_formula() {
        let items: Vec<u32> = (0..23).collect();
        for page_size in 1..=25 {
            for page in 0..30 {
                let model = PaginationModel::new(page, page_size).unwrap();
                let expected = page_size.min(23usize.saturating_sub(page * page_size));
                assert_eq!(paginate(&items, &model).len(), expected, "page {page} size {page_size}");
            }
        }
    }

    #[test]
    fn pages_reassemble_the_list_exactly_once() {
        let items: Vec<u32> = (0..23).collect();
        for page_size in 1..=25 {
            let pages = page_count(items.len(), page_size);
            let joined: Vec<u32> = (0..pages)
                .flat_map(|page| {
                    let model = PaginationModel::new(page, page_size).unwrap();
                    paginate(&items, &model).to_vec()
                })
                .collect();
            assert_eq!(joined, items);
        }
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert_eq!(PaginationModel::new(0, 0), Err(TableError::InvalidPageSize));
        assert_eq!(page_count(10, 0), 0);
    }

    #[test]
    fn huge_page_index_does_not_overflow() {
        let items = [1, 2, 3];
        let model = PaginationModel::new(usize::MAX, 10).unwrap();
        assert!(paginate(&items, &model).is_empty());
    }
}
