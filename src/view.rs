//! Render model for the news page.
//!
//! Each request builds one `ViewState` from its query and the upstream
//! outcome. Filter and paging transitions happen in the browser: the filter
//! form never sends `page`, so any search or section change starts again at
//! page 1, and the pagination links below are only rendered when in range.

use url::form_urlencoded;

use crate::news::{Article, NewsPage, NewsQuery};

#[derive(Debug, Clone)]
pub struct ViewState {
    articles: Vec<Article>,
    page: u32,
    total_pages: u32,
    search_term: String,
    category: String,
    failed: bool,
}

impl ViewState {
    /// A view showing `page` for the filters in `query`.
    pub fn loaded(query: &NewsQuery, page: NewsPage) -> Self {
        let total_pages = page.total_pages.max(1);
        Self {
            articles: page.articles,
            page: page.current_page.clamp(1, total_pages),
            total_pages,
            search_term: query.search_term.clone(),
            category: query.category.clone(),
            failed: false,
        }
    }

    /// A view for a fetch that failed. No page is known, so paging is off.
    pub fn failed(query: &NewsQuery) -> Self {
        Self {
            articles: Vec::new(),
            page: 1,
            total_pages: 1,
            search_term: query.search_term.clone(),
            category: query.category.clone(),
            failed: true,
        }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn has_failed(&self) -> bool {
        self.failed
    }

    /// Empty results after a successful fetch. Failures are shown separately.
    pub fn is_empty(&self) -> bool {
        !self.failed && self.articles.is_empty()
    }

    pub fn can_go_previous(&self) -> bool {
        !self.failed && self.page > 1
    }

    pub fn can_go_next(&self) -> bool {
        !self.failed && self.page < self.total_pages
    }

    pub fn previous_href(&self) -> String {
        self.results_href(self.page.saturating_sub(1).max(1))
    }

    pub fn next_href(&self) -> String {
        self.results_href(self.page.saturating_add(1).min(self.total_pages))
    }

    /// `/results` link for `page` with the current filters.
    pub fn results_href(&self, page: u32) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("page", &page.to_string());
        if !self.search_term.is_empty() {
            serializer.append_pair("q", &self.search_term);
        }
        if !self.category.is_empty() {
            serializer.append_pair("category", &self.category);
        }
        format!("/results?{}", serializer.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: &str) -> Article {
        Article {
            id: id.to_string(),
            title: format!("Title {id}"),
            description: String::new(),
            date: "1/1/2024".to_string(),
            image: None,
            url: format!("https://example.com/{id}"),
            category: "World news".to_string(),
        }
    }

    fn page(ids: &[&str], current_page: u32, total_pages: u32) -> NewsPage {
        NewsPage {
            articles: ids.iter().map(|id| article(id)).collect(),
            current_page,
            total_pages,
        }
    }

    fn query(page: u32, q: &str, category: &str) -> NewsQuery {
        NewsQuery {
            page,
            search_term: q.to_string(),
            category: category.to_string(),
        }
    }

    mod loaded_tests {
        use super::*;

        #[test]
        fn test_loaded_state() {
            let view = ViewState::loaded(&query(1, "rust", "technology"), page(&["a", "b"], 1, 5));

            assert_eq!(view.articles().len(), 2);
            assert_eq!(view.page(), 1);
            assert_eq!(view.total_pages(), 5);
            assert_eq!(view.search_term(), "rust");
            assert_eq!(view.category(), "technology");
            assert!(!view.has_failed());
            assert!(!view.is_empty());
        }

        #[test]
        fn test_zero_total_pages_is_clamped() {
            let view = ViewState::loaded(&NewsQuery::default(), page(&[], 1, 0));

            assert_eq!(view.total_pages(), 1);
            assert_eq!(view.page(), 1);
            assert!(view.is_empty());
            assert!(!view.can_go_next());
        }

        #[test]
        fn test_page_is_clamped_into_range() {
            let view = ViewState::loaded(&query(9, "", ""), page(&["a"], 9, 4));
            assert_eq!(view.page(), 4);
        }
    }

    mod failed_tests {
        use super::*;

        #[test]
        fn test_failed_state_disables_paging() {
            let view = ViewState::failed(&query(3, "rust", ""));

            assert!(view.has_failed());
            assert!(!view.is_empty());
            assert_eq!(view.page(), 1);
            assert!(!view.can_go_next());
            assert!(!view.can_go_previous());
            assert_eq!(view.search_term(), "rust");
        }
    }

    mod pagination_tests {
        use super::*;

        #[test]
        fn test_next_disabled_on_last_page() {
            let view = ViewState::loaded(&query(3, "", ""), page(&["a"], 3, 3));
            assert!(!view.can_go_next());
            assert!(view.can_go_previous());
        }

        #[test]
        fn test_previous_disabled_on_first_page() {
            let view = ViewState::loaded(&NewsQuery::default(), page(&["a"], 1, 3));
            assert!(!view.can_go_previous());
            assert!(view.can_go_next());
        }

        #[test]
        fn test_hrefs() {
            let view = ViewState::loaded(
                &query(2, "climate & energy", "science"),
                page(&["a"], 2, 3),
            );

            assert_eq!(
                view.next_href(),
                "/results?page=3&q=climate+%26+energy&category=science"
            );
            assert_eq!(
                view.previous_href(),
                "/results?page=1&q=climate+%26+energy&category=science"
            );
        }

        #[test]
        fn test_href_without_filters() {
            let view = ViewState::loaded(&NewsQuery::default(), page(&["a"], 1, 2));
            assert_eq!(view.next_href(), "/results?page=2");
        }
    }
}
