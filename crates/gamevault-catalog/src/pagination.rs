/// Number of pages needed to show `count` results, `page_size` at a time.
pub fn total_pages(count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size as u64).min(u32::MAX as u64) as u32
}

/// One slot in a pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(u32),
    Gap,
}

impl std::fmt::Display for PageMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageMarker::Page(n) => write!(f, "{n}"),
            PageMarker::Gap => write!(f, "…"),
        }
    }
}

/// Pager layout: first page, the neighbours of `current`, last page, with
/// gaps where pages are skipped.
pub fn page_window(current: u32, total: u32) -> Vec<PageMarker> {
    let current = current as i64;
    let total = total as i64;
    let mut markers = vec![PageMarker::Page(1)];

    if current > 3 {
        markers.push(PageMarker::Gap);
    }
    for page in (current - 1).max(2)..=(current + 1).min(total - 1) {
        markers.push(PageMarker::Page(page as u32));
    }
    if current < total - 2 {
        markers.push(PageMarker::Gap);
    }
    if total > 1 {
        markers.push(PageMarker::Page(total as u32));
    }
    markers
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageMarker::{Gap, Page};

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(3, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(881_234, 20), 44_062);
    }

    #[test]
    fn test_window_small() {
        assert_eq!(page_window(1, 0), vec![Page(1)]);
        assert_eq!(page_window(1, 1), vec![Page(1)]);
        assert_eq!(page_window(1, 3), vec![Page(1), Page(2), Page(3)]);
    }

    #[test]
    fn test_window_large() {
        assert_eq!(page_window(1, 50), vec![Page(1), Page(2), Gap, Page(50)]);
        assert_eq!(
            page_window(10, 50),
            vec![Page(1), Gap, Page(9), Page(10), Page(11), Gap, Page(50)]
        );
        assert_eq!(page_window(50, 50), vec![Page(1), Gap, Page(49), Page(50)]);
        assert_eq!(page_window(3, 50), vec![Page(1), Page(2), Page(3), Page(4), Gap, Page(50)]);
    }
}
