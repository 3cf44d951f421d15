use std::collections::HashSet;
use std::ops::Deref;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ITUNES_BASE_URL: &str = "https://itunes.apple.com/us/genre/";

lazy_static! {
    // `technology` and `tv_and_film` point at each other's listing pages, kept
    // as found in the upstream table until someone confirms the fix.
    static ref ITUNES_CATEGORIES: CategoryTable = CategoryTable::from(vec![
        ("arts", "podcasts-arts/id1301"),
        ("business", "podcasts-business/id1321"),
        ("comedy", "podcasts-comedy/id1303"),
        ("education", "podcasts-education/id1304"),
        ("fiction", "podcasts-fiction/id1483"),
        ("government", "podcasts-government/id1511"),
        ("health_and_fitness", "podcasts-health-fitness/id1512"),
        ("history", "podcasts-history/id1487"),
        ("kids_and_family", "podcasts-kids-family/id1305"),
        ("leisure", "podcasts-leisure/id1502"),
        ("music", "podcasts-music/id1310"),
        ("news", "podcasts-news/id1489"),
        ("religion_and_spirituality", "podcasts-religion-spirituality/id1314"),
        ("science", "podcasts-science/id1533"),
        ("society_and_culture", "podcasts-society-culture/id1324"),
        ("sports", "podcasts-sports/id1545"),
        ("technology", "podcasts-tv-film/id1309"),
        ("tv_and_film", "podcasts-technology/id1318"),
        ("true_crime", "podcasts-true-crime/id1488"),
    ]);
}

/// A named catalog section and the path suffix of its listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub slug: String,
}

impl Category {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
        }
    }

    /// The listing page URL, `base` and slug joined as-is.
    pub fn url(&self, base: &str) -> String {
        format!("{base}{}", self.slug)
    }

    pub fn file_name(&self) -> String {
        format!("{}.csv", self.name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Duplicate category name: {0}")]
    DuplicateCategory(String),
    #[error("Invalid category name {0:?}, expected lowercase snake case")]
    InvalidCategoryName(String),
}

/// Ordered category records, iterated in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTable(Vec<Category>);

impl CategoryTable {
    pub fn new(categories: Vec<Category>) -> Self {
        Self(categories)
    }

    /// The 19 podcast genres of the iTunes catalog.
    pub fn itunes() -> Self {
        ITUNES_CATEGORIES.clone()
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.0.iter().find(|c| c.name == name)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for category in &self.0 {
            if !is_snake_case(&category.name) {
                return Err(ConfigError::InvalidCategoryName(category.name.clone()));
            }
            if !seen.insert(category.name.as_str()) {
                return Err(ConfigError::DuplicateCategory(category.name.clone()));
            }
        }
        Ok(())
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::itunes()
    }
}

impl Deref for CategoryTable {
    type Target = [Category];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a CategoryTable {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<N: Into<String>, S: Into<String>> From<Vec<(N, S)>> for CategoryTable {
    fn from(entries: Vec<(N, S)>) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(name, slug)| Category::new(name, slug))
                .collect(),
        )
    }
}

fn is_snake_case(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('_')
        && !name.ends_with('_')
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
