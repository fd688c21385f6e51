/// Movies per page on the home listing.
pub const HOME_PAGE_SIZE: u64 = 9;
/// Movies per page on the management listing (edit/delete).
pub const ADMIN_PAGE_SIZE: u64 = 5;
/// Page size the backend assumes when none is given.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Number of pages needed for `total` items, `limit` per page.
pub fn page_count(total: u64, limit: u64) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}

/// Offset of the first item on `page` (1-based). Page 0 is treated as page 1.
pub fn offset(page: u64, limit: u64) -> u64 {
    page.max(1).saturating_sub(1).saturating_mul(limit)
}

/// Keeps `page` within `1..=page_count`; with no pages at all the result is 1.
pub fn clamp_page(page: u64, total: u64, limit: u64) -> u64 {
    page.clamp(1, page_count(total, limit).max(1))
}

/// The pager is only worth showing when there is more than one page.
pub fn is_visible(total: u64, limit: u64) -> bool {
    page_count(total, limit) > 1
}

/// "6 to 10 of 23 items"
pub fn range_label(page: u64, limit: u64, total: u64) -> String {
    let first = offset(page, limit);
    let last = first.saturating_add(limit).min(total);
    if total == 0 {
        return "0 of 0 items".to_string();
    }
    format!("{} to {} of {} items", first + 1, last, total)
}
