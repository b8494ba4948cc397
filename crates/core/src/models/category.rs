use serde::{Deserialize, Serialize};

/// Name of the undeletable category that orphaned transactions fall back to.
pub const FALLBACK_CATEGORY_NAME: &str = "Uncategorized";

/// Icon assigned to categories that don't carry one.
pub const DEFAULT_CATEGORY_ICON: &str = "label";

/// A named, iconified label for classifying transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier (generated, or slugified from the name)
    pub id: String,

    /// Display name; transactions reference categories by this value
    pub name: String,

    /// Symbolic icon name
    pub icon: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
        }
    }

    /// Build a category whose id is the slug of its name.
    pub fn from_name(name: impl Into<String>, icon: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: slugify(&name),
            name,
            icon: icon.into(),
        }
    }

    /// The built-in `"Uncategorized"` record.
    pub fn fallback() -> Self {
        Self::from_name(FALLBACK_CATEGORY_NAME, DEFAULT_CATEGORY_ICON)
    }

    pub fn is_fallback(&self) -> bool {
        self.name == FALLBACK_CATEGORY_NAME
    }
}

/// The category set used when nothing has been persisted yet.
pub fn default_categories() -> Vec<Category> {
    [
        ("Salary", "attach_money"),
        ("Bonus", "redeem"),
        ("Investments", "trending_up"),
        ("Rent", "home"),
        ("Groceries", "shopping_bag"),
        ("Bills", "receipt_long"),
        ("Transport", "commute"),
        ("Dining", "restaurant"),
        ("Health", "favorite"),
        ("Leisure", "sports_esports"),
        ("Other", DEFAULT_CATEGORY_ICON),
        (FALLBACK_CATEGORY_NAME, DEFAULT_CATEGORY_ICON),
    ]
    .into_iter()
    .map(|(name, icon)| Category::from_name(name, icon))
    .collect()
}

/// Lowercase `name` and collapse every run of non-alphanumerics into a
/// single `-`, with no leading or trailing separator.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_separator = true;
        }
    }
    slug
}

/// One entry of the persisted categories array.
///
/// Older data stored bare names; current data stores records. Both shapes
/// exist only at the deserialization boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredCategory {
    Legacy(String),
    Record(CategoryRecord),
}

/// A structured category entry as found on disk, possibly incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl From<Category> for StoredCategory {
    fn from(c: Category) -> Self {
        StoredCategory::Record(CategoryRecord {
            id: Some(c.id),
            name: c.name,
            icon: Some(c.icon),
        })
    }
}

/// Payload for `upsert_category`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryInput {
    pub id: Option<String>,
    pub name: String,
    pub icon: Option<String>,
}

impl CategoryInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            icon: None,
        }
    }

    /// Target an existing category, or choose the id of a new one.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases() {
        assert_eq!(slugify("Food"), "food");
    }

    #[test]
    fn slugify_collapses_separator_runs() {
        assert_eq!(slugify("Eating  &  Drinking"), "eating-drinking");
    }

    #[test]
    fn slugify_trims_edges() {
        assert_eq!(slugify("  -Rent!- "), "rent");
    }

    #[test]
    fn slugify_of_symbols_is_empty() {
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn defaults_contain_exactly_one_fallback() {
        let defaults = default_categories();
        assert_eq!(defaults.iter().filter(|c| c.is_fallback()).count(), 1);
        assert!(defaults.iter().any(|c| c.id == "uncategorized"));
    }
}
