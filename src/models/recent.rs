use super::product::ProductSnapshot;

/// Maximum number of recently viewed products kept
pub const RECENT_LIMIT: usize = 4;

/// Recently viewed products, most recent first, unique by name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecentlyViewed {
    entries: Vec<ProductSnapshot>,
}

impl RecentlyViewed {
    pub fn new() -> Self {
        RecentlyViewed {
            entries: Vec::new(),
        }
    }

    /// Build from persisted entries, enforcing uniqueness and the length bound
    pub fn from_entries(entries: Vec<ProductSnapshot>) -> Self {
        let mut recent = RecentlyViewed::new();
        for entry in entries {
            if recent.entries.len() == RECENT_LIMIT {
                break;
            }
            if !recent.entries.iter().any(|e| e.name == entry.name) {
                recent.entries.push(entry);
            }
        }
        recent
    }

    /// Move `product` to the front, dropping the oldest entry past the limit
    pub fn record(&mut self, product: &ProductSnapshot) {
        self.entries.retain(|e| e.name != product.name);
        self.entries.insert(0, product.clone());
        self.entries.truncate(RECENT_LIMIT);
    }

    /// Entries most recent first, optionally hiding the product being shown
    pub fn list(&self, excluding: Option<&str>) -> Vec<&ProductSnapshot> {
        self.entries
            .iter()
            .filter(|e| excluding != Some(e.name.as_str()))
            .collect()
    }

    pub fn entries(&self) -> &[ProductSnapshot] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
