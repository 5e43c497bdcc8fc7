use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::catalog::Catalog;
use super::product::{Category, Product};
use crate::error::ShopError;

/// Products shown per catalog page
pub const PAGE_SIZE: usize = 12;

/// Ordering applied after filtering
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// Catalog order
    #[default]
    None,
    PriceAsc,
    PriceDesc,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::None => "none",
            SortMode::PriceAsc => "price-asc",
            SortMode::PriceDesc => "price-desc",
        }
    }

    /// Next mode in the sort selector, wrapping around
    pub fn cycle(self) -> Self {
        match self {
            SortMode::None => SortMode::PriceAsc,
            SortMode::PriceAsc => SortMode::PriceDesc,
            SortMode::PriceDesc => SortMode::None,
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(SortMode::None),
            "price-asc" => Ok(SortMode::PriceAsc),
            "price-desc" => Ok(SortMode::PriceDesc),
            _ => Err(ShopError::UnknownSortMode(s.to_string())),
        }
    }
}

/// Result of one derivation: the visible slice plus pagination data
#[derive(Debug, Clone, PartialEq)]
pub struct ViewPage {
    /// Products on the current page, in display order
    pub products: Vec<Product>,
    /// Current page (1-based) after any out-of-range reset
    pub page: usize,
    /// `ceil(matched / PAGE_SIZE)`; zero when nothing matched
    pub total_pages: usize,
    /// Number of products that passed the filter
    pub matched: usize,
}

impl ViewPage {
    /// Page buttons to draw. No controls are shown for a single page.
    pub fn page_numbers(&self) -> Vec<usize> {
        if self.total_pages <= 1 {
            Vec::new()
        } else {
            (1..=self.total_pages).collect()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Search, category filter, sort and page state for the catalog grid.
///
/// Every change to the query, categories or sort mode sends the shopper back
/// to page 1. [`CatalogView::derive`] also resets a stale page that is past
/// the end of the filtered results, so a narrowing filter never leaves an
/// empty grid behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView {
    search_query: String,
    selected_categories: BTreeSet<Category>,
    sort_mode: SortMode,
    page: usize,
}

impl CatalogView {
    pub fn new() -> Self {
        CatalogView {
            search_query: String::new(),
            selected_categories: BTreeSet::new(),
            sort_mode: SortMode::None,
            page: 1,
        }
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn selected_categories(&self) -> &BTreeSet<Category> {
        &self.selected_categories
    }

    pub fn is_category_selected(&self, category: Category) -> bool {
        self.selected_categories.contains(&category)
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.search_query = query.to_string();
        self.page = 1;
    }

    /// Empty the query (closing the search overlay)
    pub fn clear_search(&mut self) {
        self.set_search_query("");
    }

    /// Check or uncheck one category box
    pub fn toggle_category(&mut self, category: Category) {
        if !self.selected_categories.remove(&category) {
            self.selected_categories.insert(category);
        }
        self.page = 1;
    }

    pub fn set_categories<I: IntoIterator<Item = Category>>(&mut self, categories: I) {
        self.selected_categories = categories.into_iter().collect();
        self.page = 1;
    }

    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort_mode = mode;
        self.page = 1;
    }

    /// Jump to a page. Zero is treated as page 1; pages past the end are
    /// reset on the next derivation.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    fn matches(&self, product: &Product, query: &str) -> bool {
        let matches_search = product.name.to_lowercase().contains(query);
        let matches_category = self.selected_categories.is_empty()
            || self.selected_categories.contains(&product.category);
        matches_search && matches_category
    }

    /// Filter, sort and paginate `catalog`.
    pub fn derive(&mut self, catalog: &Catalog) -> ViewPage {
        let query = self.search_query.to_lowercase();

        // 1. Filter
        let mut filtered: Vec<&Product> = catalog
            .products()
            .iter()
            .filter(|p| self.matches(p, &query))
            .collect();

        // 2. Sort (stable, so equal prices keep catalog order)
        match self.sort_mode {
            SortMode::None => {}
            SortMode::PriceAsc => filtered.sort_by(|a, b| a.price.cmp(&b.price)),
            SortMode::PriceDesc => filtered.sort_by(|a, b| b.price.cmp(&a.price)),
        }

        // 3. Paginate
        let matched = filtered.len();
        let total_pages = matched.div_ceil(PAGE_SIZE);
        if self.page > total_pages {
            self.page = 1;
        }

        let start = (self.page - 1) * PAGE_SIZE;
        let products = filtered
            .into_iter()
            .skip(start)
            .take(PAGE_SIZE)
            .cloned()
            .collect();

        ViewPage {
            products,
            page: self.page,
            total_pages,
            matched,
        }
    }
}

impl Default for CatalogView {
    fn default() -> Self {
        CatalogView::new()
    }
}
