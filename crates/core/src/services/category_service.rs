use std::collections::HashSet;

use tracing::debug;

use crate::ids::IdGenerator;
use crate::models::category::{
    slugify, Category, CategoryInput, StoredCategory, DEFAULT_CATEGORY_ICON,
    FALLBACK_CATEGORY_NAME,
};
use crate::models::transaction::Transaction;
use crate::services::transaction_service::TransactionService;
use crate::services::wallet_service::non_blank;

/// Result of migrating a persisted categories array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedCategories {
    pub categories: Vec<Category>,
    /// Whether anything was migrated, backfilled or synthesized, i.e. the
    /// stored form is out of date.
    pub changed: bool,
}

/// What `delete` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryRemoval {
    /// No category has that id.
    Missing,
    /// The target is the fallback category, which can't be deleted.
    Protected,
    /// The category was removed and `reassigned` transactions now carry the
    /// fallback name.
    Removed { name: String, reassigned: usize },
}

/// Category CRUD, legacy migration, and the fallback-category invariant.
pub struct CategoryService {
    transaction_service: TransactionService,
}

impl CategoryService {
    pub fn new() -> Self {
        Self {
            transaction_service: TransactionService::new(),
        }
    }

    /// Turn a mix of legacy bare names and (possibly incomplete) records into
    /// full categories, then make sure the fallback category exists.
    ///
    /// - bare string `s` → `{ id: slugify(s), name: s, icon: "label" }`
    /// - record without id → positional id `category-<index>`
    /// - record without icon → `"label"`
    ///
    /// An id already taken by an earlier entry gets `-<index>` appended
    /// (plus `-<n>` if that is taken too).
    pub fn normalize(&self, stored: Vec<StoredCategory>) -> NormalizedCategories {
        let mut changed = false;
        let mut seen: HashSet<String> = HashSet::new();
        let mut categories = Vec::with_capacity(stored.len() + 1);

        for (idx, entry) in stored.into_iter().enumerate() {
            let mut category = match entry {
                StoredCategory::Legacy(name) => {
                    changed = true;
                    let slug = slugify(&name);
                    let id = if slug.is_empty() { positional_id(idx) } else { slug };
                    debug!(%name, %id, "migrated legacy category");
                    Category::new(id, name, DEFAULT_CATEGORY_ICON)
                }
                StoredCategory::Record(record) => {
                    let id = non_blank(record.id).unwrap_or_else(|| {
                        changed = true;
                        positional_id(idx)
                    });
                    let icon = non_blank(record.icon).unwrap_or_else(|| {
                        changed = true;
                        DEFAULT_CATEGORY_ICON.to_string()
                    });
                    Category::new(id, record.name, icon)
                }
            };

            if seen.contains(&category.id) {
                category.id =
                    free_id(&format!("{}-{idx}", category.id), |id| seen.contains(id));
                changed = true;
            }
            seen.insert(category.id.clone());
            categories.push(category);
        }

        if self.ensure_fallback(&mut categories) {
            changed = true;
        }

        NormalizedCategories {
            categories,
            changed,
        }
    }

    /// Append the fallback category if no category carries its name.
    /// Returns `true` when it had to be synthesized.
    ///
    /// If `"uncategorized"` is already used as an id, the fallback gets the
    /// first free `category-<len>[-<n>]` id instead.
    pub fn ensure_fallback(&self, categories: &mut Vec<Category>) -> bool {
        if categories.iter().any(Category::is_fallback) {
            return false;
        }
        let mut fallback = Category::fallback();
        let taken = |id: &str| categories.iter().any(|c| c.id == id);
        if taken(&fallback.id) {
            fallback.id = free_id(&positional_id(categories.len()), taken);
        }
        debug!(id = %fallback.id, "synthesized fallback category");
        categories.push(fallback);
        true
    }

    /// Update the category named by `input.id`, or insert a new one at the
    /// front under the caller's id (or a generated one).
    ///
    /// On update, an absent icon keeps the current icon. On insert it
    /// defaults to `"label"`.
    pub fn upsert(
        &self,
        categories: &mut Vec<Category>,
        input: CategoryInput,
        ids: &dyn IdGenerator,
    ) -> String {
        let requested_id = non_blank(input.id);
        let icon = non_blank(input.icon);

        if let Some(id) = requested_id.as_deref() {
            if let Some(existing) = categories.iter_mut().find(|c| c.id == id) {
                existing.name = input.name;
                if let Some(icon) = icon {
                    existing.icon = icon;
                }
                return existing.id.clone();
            }
        }

        let category = Category {
            id: requested_id.unwrap_or_else(|| ids.next_id()),
            name: input.name,
            icon: icon.unwrap_or_else(|| DEFAULT_CATEGORY_ICON.to_string()),
        };
        let id = category.id.clone();
        categories.insert(0, category);
        id
    }

    /// Delete a category and move its transactions to the fallback category.
    ///
    /// The fallback must already exist (see [`Self::ensure_fallback`]);
    /// deleting it is refused.
    pub fn delete(
        &self,
        categories: &mut Vec<Category>,
        transactions: &mut [Transaction],
        category_id: &str,
    ) -> CategoryRemoval {
        let Some(idx) = categories.iter().position(|c| c.id == category_id) else {
            return CategoryRemoval::Missing;
        };
        if categories[idx].is_fallback() {
            return CategoryRemoval::Protected;
        }

        let removed = categories.remove(idx);
        let reassigned = self.transaction_service.reassign_category(
            transactions,
            &removed.name,
            FALLBACK_CATEGORY_NAME,
        );
        CategoryRemoval::Removed {
            name: removed.name,
            reassigned,
        }
    }

    /// Icon of the category called `name`, or `"label"` if there is none.
    pub fn icon_for<'a>(&self, categories: &'a [Category], name: &str) -> &'a str {
        categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.icon.as_str())
            .unwrap_or(DEFAULT_CATEGORY_ICON)
    }
}

impl Default for CategoryService {
    fn default() -> Self {
        Self::new()
    }
}

fn positional_id(idx: usize) -> String {
    format!("category-{idx}")
}

/// `base`, or `base-<n>` for the smallest `n` that isn't taken.
fn free_id(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    (1..)
        .map(|n| format!("{base}-{n}"))
        .find(|id| !taken(id))
        .unwrap_or_else(|| base.to_string())
}
