use super::product::ProductSnapshot;

/// Saved products, unique by name, in the order they were added
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wishlist {
    items: Vec<ProductSnapshot>,
}

impl Wishlist {
    pub fn new() -> Self {
        Wishlist { items: Vec::new() }
    }

    /// Build from persisted entries, dropping repeated names
    pub fn from_items(items: Vec<ProductSnapshot>) -> Self {
        let mut wishlist = Wishlist::new();
        for item in items {
            if !wishlist.exists(&item.name) {
                wishlist.items.push(item);
            }
        }
        wishlist
    }

    /// Add `product` if absent, remove it if present.
    /// Returns true when the product is wishlisted afterwards.
    pub fn toggle(&mut self, product: &ProductSnapshot) -> bool {
        if let Some(pos) = self.items.iter().position(|i| i.name == product.name) {
            self.items.remove(pos);
            log::debug!("Removed '{}' from wishlist", product.name);
            false
        } else {
            self.items.push(product.clone());
            log::debug!("Added '{}' to wishlist", product.name);
            true
        }
    }

    pub fn exists(&self, name: &str) -> bool {
        self.items.iter().any(|i| i.name == name)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[ProductSnapshot] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
