pub const PAGE_SIZE: usize = 20;

/// Number of pages needed for `len` items; zero when there is nothing to show.
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Returns the 1-indexed page as a sub-slice. Out-of-range pages are empty.
pub fn slice<T>(seq: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= seq.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(seq.len());
    &seq[start..end]
}

/// Validates a requested page against the current sequence length.
pub fn checked_page(page: usize, len: usize, page_size: usize) -> Option<usize> {
    let pages = page_count(len, page_size);
    (1..=pages).contains(&page).then_some(page)
}
