use std::fmt;
use std::str::FromStr;

use super::cart::LineItem;
use super::catalog::Catalog;
use super::product::{Price, Product, ProductSnapshot};
use crate::error::ShopError;

/// Bottle size offered in the quick view
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Size {
    #[default]
    Ml50,
    Ml100,
}

impl Size {
    pub const ALL: [Size; 2] = [Size::Ml50, Size::Ml100];

    pub fn label(&self) -> &'static str {
        match self {
            Size::Ml50 => "50ml",
            Size::Ml100 => "100ml",
        }
    }

    /// Price multiplier relative to the listed (50ml) price
    pub fn multiplier(&self) -> f64 {
        match self {
            Size::Ml50 => 1.0,
            Size::Ml100 => 1.5,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Size {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "50ml" | "50" => Ok(Size::Ml50),
            "100ml" | "100" => Ok(Size::Ml100),
            _ => Err(ShopError::UnknownSize(s.to_string())),
        }
    }
}

/// Quick-view modal state for one product
#[derive(Debug, Clone, PartialEq)]
pub struct QuickView {
    product: ProductSnapshot,
    size: Size,
}

impl QuickView {
    /// Open on `product` with the default 50ml size selected
    pub fn open(product: ProductSnapshot) -> Self {
        QuickView {
            product,
            size: Size::default(),
        }
    }

    pub fn product(&self) -> &ProductSnapshot {
        &self.product
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn select_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Listed price adjusted for the selected size
    pub fn price(&self) -> Price {
        self.product.price.scale(self.size.multiplier())
    }

    /// Switch to a related product. Size goes back to 50ml so the
    /// displayed price always matches the selected bottle.
    pub fn retarget(&mut self, product: &Product) {
        self.product = product.snapshot();
        self.size = Size::default();
    }

    /// Products suggested underneath the modal
    pub fn related<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        catalog.related(&self.product.name)
    }

    /// Cart entry for the current product and size, titled `"<name> (<size>)"`
    pub fn line_item(&self) -> LineItem {
        LineItem::new(
            format!("{} ({})", self.product.name, self.size),
            self.price(),
            self.product.image.clone(),
        )
    }
}
