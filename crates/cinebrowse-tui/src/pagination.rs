//! Client-side pagination over an already-fetched result list.

/// Number of items shown per page.
pub const PAGE_SIZE: usize = 10;

/// One page window over a full result list.
#[derive(Debug)]
pub struct ResultPage<'a, T> {
    /// Items visible on this page.
    pub items: &'a [T],
    /// 1-based page number the window was cut for.
    pub page_number: usize,
    /// Page size used for the cut.
    pub page_size: usize,
    /// `ceil(total / page_size)`.
    pub total_pages: usize,
}

impl<T> ResultPage<'_, T> {
    /// Whether the page switcher should be drawn (more than one page).
    #[must_use]
    pub const fn shows_switcher(&self) -> bool {
        self.total_pages > 1
    }
}

/// Cuts page `page_number` (1-based) out of `items`.
///
/// The page number is not clamped: a page past the end yields an empty
/// window, as does page 0.
#[must_use]
pub fn slice<T>(items: &[T], page_size: usize, page_number: usize) -> ResultPage<'_, T> {
    if page_size == 0 || page_number == 0 {
        return ResultPage {
            items: &[],
            page_number,
            page_size,
            total_pages: total_pages(items.len(), page_size),
        };
    }

    let start = page_number.saturating_sub(1).saturating_mul(page_size);
    let end = start.saturating_add(page_size).min(items.len());
    let visible = items.get(start..end).unwrap_or(&[]);

    ResultPage {
        items: visible,
        page_number,
        page_size,
        total_pages: total_pages(items.len(), page_size),
    }
}

/// Number of pages needed for `len` items.
#[must_use]
pub const fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_total_pages_matches_ceiling() {
        // Arrange & Act & Assert
        assert_eq!(total_pages(0, PAGE_SIZE), 0);
        assert_eq!(total_pages(1, PAGE_SIZE), 1);
        assert_eq!(total_pages(10, PAGE_SIZE), 1);
        assert_eq!(total_pages(11, PAGE_SIZE), 2);
        assert_eq!(total_pages(20, PAGE_SIZE), 2);
        assert_eq!(total_pages(21, PAGE_SIZE), 3);
    }

    #[test]
    fn test_pages_reconstruct_original_list() {
        for len in 1..=45_usize {
            // Arrange
            let items: Vec<usize> = (0..len).collect();
            let pages = total_pages(len, PAGE_SIZE);

            // Act
            let rebuilt: Vec<usize> = (1..=pages)
                .flat_map(|p| slice(&items, PAGE_SIZE, p).items.iter().copied())
                .collect();

            // Assert
            assert_eq!(pages, len.div_ceil(10), "len={len}");
            assert_eq!(rebuilt, items, "len={len}");
        }
    }

    #[test]
    fn test_no_switcher_for_ten_or_fewer() {
        for len in 0..=10_usize {
            // Arrange
            let items: Vec<usize> = (0..len).collect();

            // Act
            let page = slice(&items, PAGE_SIZE, 1);

            // Assert
            assert!(!page.shows_switcher(), "len={len}");
        }
    }

    #[test]
    fn test_switcher_for_eleven() {
        // Arrange
        let items: Vec<usize> = (0..11).collect();

        // Act
        let page = slice(&items, PAGE_SIZE, 2);

        // Assert
        assert!(page.shows_switcher());
        assert_eq!(page.items, &[10]);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        // Arrange
        let items: Vec<usize> = (0..15).collect();

        // Act
        let past_end = slice(&items, PAGE_SIZE, 5);
        let zero = slice(&items, PAGE_SIZE, 0);

        // Assert
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.page_number, 5);
        assert!(zero.items.is_empty());
        assert_eq!(zero.total_pages, 2);
    }

    #[test]
    fn test_zero_page_size_yields_nothing() {
        // Arrange
        let items = [1, 2, 3];

        // Act
        let page = slice(&items, 0, 1);

        // Assert
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
    }
}
