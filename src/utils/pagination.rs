use serde::{Deserialize, Serialize};

#[derive(Deserialize, Default)]
pub struct PaginationParams {
    pub page: Option<String>,
}

impl PaginationParams {
    pub fn page_number(&self) -> usize {
        parse_page_number(self.page.as_deref())
    }
}

/// Absent, non-numeric and non-positive values all mean the first page.
pub fn parse_page_number(page: Option<&str>) -> usize {
    page.and_then(|page| page.trim().parse::<usize>().ok())
        .filter(|&number| number > 0)
        .unwrap_or(1)
}

/// A bounded slice of an ordered collection plus pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub object_list: Vec<T>,
    pub number: usize,
    pub num_pages: usize,
    pub count: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

/// LIMIT/OFFSET window of a page, for listings paginated by the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: usize,
    pub limit: usize,
    pub offset: usize,
}

impl PageWindow {
    pub fn new(page_size: usize, page_number: usize) -> Self {
        let limit = page_size.max(1);
        let number = page_number.max(1);
        Self {
            number,
            limit,
            offset: (number - 1).saturating_mul(limit),
        }
    }
}

impl<T> Page<T> {
    /// Wraps rows already fetched for `window` together with the total row count.
    pub fn from_window(object_list: Vec<T>, count: usize, window: PageWindow) -> Self {
        let num_pages = count.div_ceil(window.limit);
        Self {
            object_list,
            number: window.number,
            num_pages,
            count,
            has_previous: window.number > 1,
            has_next: window.number < num_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            object_list: self.object_list.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
            has_previous: self.has_previous,
            has_next: self.has_next,
        }
    }
}

/// Slices an in-memory ordered sequence. Out of range pages are empty.
pub fn paginate<T>(items: Vec<T>, page_size: usize, page_number: Option<&str>) -> Page<T> {
    let window = PageWindow::new(page_size, parse_page_number(page_number));
    let count = items.len();
    let object_list = items
        .into_iter()
        .skip(window.offset)
        .take(window.limit)
        .collect();

    Page::from_window(object_list, count, window)
}
