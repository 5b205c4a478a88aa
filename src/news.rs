//! Query and article types shared by the proxy endpoint and the view.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Raw query string of `/api/news`, `/` and `/results`.
#[derive(Debug, Default, Deserialize)]
pub struct NewsParams {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// A normalized search: page is always >= 1, empty strings mean "no filter".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    pub page: u32,
    pub search_term: String,
    pub category: String,
}

impl Default for NewsQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search_term: String::new(),
            category: String::new(),
        }
    }
}

impl From<NewsParams> for NewsQuery {
    fn from(params: NewsParams) -> Self {
        Self {
            page: parse_page(params.page.as_deref()),
            search_term: params.q.unwrap_or_default(),
            category: params.category.unwrap_or_default(),
        }
    }
}

fn parse_page(raw: Option<&str>) -> u32 {
    let Some(raw) = raw.map(str::trim).filter(|p| !p.is_empty()) else {
        return 1;
    };
    match raw.parse::<u32>() {
        Ok(page) if page > 0 => page,
        _ => {
            warn!("Ignoring invalid page {:?}, using 1", raw);
            1
        }
    }
}

/// Article as sent to the browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Display date, e.g. `3/5/2024`
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub url: String,
    pub category: String,
}

/// Body of a successful `/api/news` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsPage {
    pub articles: Vec<Article>,
    pub current_page: u32,
    pub total_pages: u32,
}

/// Sections offered by the category selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    World,
    Politics,
    Business,
    Technology,
    Science,
    Sport,
    Media,
    Culture,
    LifeAndStyle,
    Education,
    Music,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::World,
        Category::Politics,
        Category::Business,
        Category::Technology,
        Category::Science,
        Category::Sport,
        Category::Media,
        Category::Culture,
        Category::LifeAndStyle,
        Category::Education,
        Category::Music,
    ];

    /// Upstream section id.
    pub fn value(&self) -> &'static str {
        match self {
            Category::World => "world",
            Category::Politics => "politics",
            Category::Business => "business",
            Category::Technology => "technology",
            Category::Science => "science",
            Category::Sport => "sport",
            Category::Media => "media",
            Category::Culture => "culture",
            Category::LifeAndStyle => "lifeandstyle",
            Category::Education => "education",
            Category::Music => "music",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::World => "World",
            Category::Politics => "Politics",
            Category::Business => "Business",
            Category::Technology => "Technology",
            Category::Science => "Science",
            Category::Sport => "Sport",
            Category::Media => "Media",
            Category::Culture => "Culture",
            Category::LifeAndStyle => "Life and style",
            Category::Education => "Education",
            Category::Music => "Music",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(qs: &str) -> NewsQuery {
        let params: NewsParams = serde_urlencoded::from_str(qs).unwrap();
        NewsQuery::from(params)
    }

    mod news_query_tests {
        use super::*;

        #[test]
        fn test_defaults_when_empty() {
            assert_eq!(query(""), NewsQuery::default());
        }

        #[test]
        fn test_all_params() {
            let q = query("q=election&category=politics&page=2");
            assert_eq!(q.page, 2);
            assert_eq!(q.search_term, "election");
            assert_eq!(q.category, "politics");
        }

        #[test]
        fn test_search_term_is_decoded() {
            let q = query("q=climate+change%26energy");
            assert_eq!(q.search_term, "climate change&energy");
        }

        #[test]
        fn test_empty_values_mean_no_filter() {
            let q = query("q=&category=&page=");
            assert_eq!(q, NewsQuery::default());
        }

        #[test]
        fn test_invalid_page_falls_back_to_one() {
            assert_eq!(query("page=abc").page, 1);
            assert_eq!(query("page=0").page, 1);
            assert_eq!(query("page=-3").page, 1);
        }

        #[test]
        fn test_page_whitespace_is_trimmed() {
            assert_eq!(query("page=+7+").page, 7);
        }
    }

    mod serialization_tests {
        use super::*;

        fn article(image: Option<&str>) -> Article {
            Article {
                id: "world/2024/mar/05/story".to_string(),
                title: "Title".to_string(),
                description: "Desc".to_string(),
                date: "3/5/2024".to_string(),
                image: image.map(str::to_string),
                url: "https://www.theguardian.com/world/2024/mar/05/story".to_string(),
                category: "World news".to_string(),
            }
        }

        #[test]
        fn test_page_uses_camel_case() {
            let page = NewsPage {
                articles: vec![],
                current_page: 2,
                total_pages: 10,
            };
            let json = serde_json::to_value(&page).unwrap();
            assert_eq!(json["currentPage"], 2);
            assert_eq!(json["totalPages"], 10);
            assert!(json["articles"].as_array().unwrap().is_empty());
        }

        #[test]
        fn test_absent_image_is_omitted() {
            let json = serde_json::to_value(article(None)).unwrap();
            assert!(json.get("image").is_none());
        }

        #[test]
        fn test_present_image_is_kept() {
            let json = serde_json::to_value(article(Some("https://img/1.jpg"))).unwrap();
            assert_eq!(json["image"], "https://img/1.jpg");
        }
    }

    mod category_tests {
        use super::*;

        #[test]
        fn test_values_are_unique() {
            for (i, a) in Category::ALL.iter().enumerate() {
                for b in &Category::ALL[i + 1..] {
                    assert_ne!(a.value(), b.value());
                }
            }
        }
    }
}
