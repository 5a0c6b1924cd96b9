use std::num::IntErrorKind;

pub const POSTS_PER_PAGE: i64 = 10;

#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    count: i64,
    per_page: i64,
}

impl Paginator {
    pub fn new(count: i64, per_page: i64) -> Self {
        Self { count, per_page }
    }

    /// An empty listing still has one (empty) page.
    pub fn num_pages(&self) -> i64 {
        if self.count <= 0 {
            1
        } else {
            (self.count + self.per_page - 1) / self.per_page
        }
    }

    /// Resolves the raw `page` query value: anything that is not an integer
    /// gives the first page, any integer out of range (even one too large
    /// for `i64`) gives the last one.
    pub fn page_number(&self, raw: Option<&str>) -> i64 {
        let Some(raw) = raw else {
            return 1;
        };
        match raw.trim().parse::<i64>() {
            Ok(number) if (1..=self.num_pages()).contains(&number) => number,
            Ok(_) => self.num_pages(),
            Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                self.num_pages()
            }
            Err(_) => 1,
        }
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    pub fn offset(&self, number: i64) -> i64 {
        (number - 1) * self.per_page
    }

    pub fn page<T>(&self, number: i64, items: Vec<T>) -> Page<T> {
        Page {
            items,
            number,
            num_pages: self.num_pages(),
            count: self.count,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: i64,
    pub num_pages: i64,
    pub count: i64,
}

impl<T> Page<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirteen_posts_make_two_pages() {
        let paginator = Paginator::new(13, POSTS_PER_PAGE);
        assert_eq!(paginator.num_pages(), 2);
        assert_eq!(paginator.offset(1), 0);
        assert_eq!(paginator.offset(2), 10);

        let items: Vec<i64> = (0..13).collect();
        let second = paginator.page(2, items[paginator.offset(2) as usize..].to_vec());
        assert_eq!(second.len(), 3);
        assert!(second.has_previous());
        assert!(!second.has_next());
    }

    #[test]
    fn invalid_page_values_fall_back() {
        let paginator = Paginator::new(13, POSTS_PER_PAGE);
        assert_eq!(paginator.page_number(None), 1);
        assert_eq!(paginator.page_number(Some("abc")), 1);
        assert_eq!(paginator.page_number(Some("2")), 2);
        assert_eq!(paginator.page_number(Some("99")), 2);
        assert_eq!(paginator.page_number(Some("0")), 2);
        assert_eq!(paginator.page_number(Some("-3")), 2);
        assert_eq!(paginator.page_number(Some("99999999999999999999")), 2);
        assert_eq!(paginator.page_number(Some("-99999999999999999999")), 2);
    }

    #[test]
    fn empty_listing_has_a_single_page() {
        let paginator = Paginator::new(0, POSTS_PER_PAGE);
        assert_eq!(paginator.num_pages(), 1);
        assert_eq!(paginator.page_number(Some("5")), 1);
        let page = paginator.page::<i64>(1, vec![]);
        assert!(page.is_empty());
        assert!(!page.has_next());
    }
}
