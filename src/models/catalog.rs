use super::product::{Category, Price, Product};

const IMAGE_UNISEX: &str =
    "https://images.unsplash.com/photo-1541643600914-78b084683601?q=80&w=800&auto=format&fit=crop";
const IMAGE_MEN: &str =
    "https://images.unsplash.com/photo-1595425970377-c9703cf48b6d?q=80&w=800&auto=format&fit=crop";
const IMAGE_WOMEN: &str =
    "https://images.unsplash.com/photo-1592945403244-b3fbafd7f539?q=80&w=800&auto=format&fit=crop";

/// Number of suggestions shown beside a product
pub const RELATED_LIMIT: usize = 3;

/// Read-only, ordered list of purchasable products
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// The main collection shipped with the storefront
    pub fn reference() -> Self {
        let entries: [(&str, u64, Category, &str); 12] = [
            ("Velvet Santal", 145, Category::Unisex, IMAGE_UNISEX),
            ("Ocean Mist", 130, Category::Men, IMAGE_MEN),
            ("Midnight Oud", 195, Category::Men, IMAGE_MEN),
            ("Amber Whisper", 175, Category::Women, IMAGE_WOMEN),
            ("Citrus Grove", 120, Category::Unisex, IMAGE_UNISEX),
            ("Leather & Smoke", 220, Category::Men, IMAGE_MEN),
            ("Vanilla Dreams", 150, Category::Women, IMAGE_WOMEN),
            ("Spiced Cardamom", 160, Category::Unisex, IMAGE_UNISEX),
            ("Jasmine Breeze", 140, Category::Women, IMAGE_WOMEN),
            ("Royal Patchouli", 190, Category::Men, IMAGE_MEN),
            ("Cedarwood Intense", 180, Category::Men, IMAGE_MEN),
            ("Lavender Fields", 135, Category::Women, IMAGE_WOMEN),
        ];

        Catalog::new(
            entries
                .into_iter()
                .map(|(name, dollars, category, image)| {
                    Product::new(name, Price::from_cents(dollars * 100), category, image)
                })
                .collect(),
        )
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Exact name lookup
    pub fn find(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    /// Case-insensitive name lookup, for names typed on the command line
    pub fn find_ignore_case(&self, name: &str) -> Option<&Product> {
        let wanted = name.trim().to_lowercase();
        self.products
            .iter()
            .find(|p| p.name.to_lowercase() == wanted)
    }

    /// Recommendations shown on the product detail page: the head of the catalog
    pub fn featured(&self) -> &[Product] {
        &self.products[..self.products.len().min(RELATED_LIMIT)]
    }

    /// Products to suggest next to `name`.
    ///
    /// Same-category products come first. When there are fewer than
    /// [`RELATED_LIMIT`] of them (or `name` is not in the catalog), the rest
    /// of the catalog fills the gap in catalog order. `name` itself is never
    /// suggested.
    pub fn related(&self, name: &str) -> Vec<&Product> {
        let mut related: Vec<&Product> = match self.find(name) {
            Some(current) => self
                .products
                .iter()
                .filter(|p| p.category == current.category && p.name != name)
                .collect(),
            None => Vec::new(),
        };

        if related.len() < RELATED_LIMIT {
            let fill: Vec<&Product> = self
                .products
                .iter()
                .filter(|p| p.name != name && !related.iter().any(|r| r.name == p.name))
                .collect();
            related.extend(fill);
        }

        related.truncate(RELATED_LIMIT);
        related
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::reference()
    }
}
