use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use super::product::Price;
use crate::error::ShopError;

/// One unit of purchase intent in the cart.
///
/// Line items have no uniqueness constraint: adding the same product twice
/// yields two entries. `id` is assigned by the cart on insertion and stays
/// stable while other entries come and go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Stable identifier; zero until the cart assigns one
    #[serde(default)]
    pub id: u64,
    pub title: String,
    pub price: Price,
    pub image_src: String,
}

impl LineItem {
    pub fn new(title: impl Into<String>, price: Price, image_src: impl Into<String>) -> Self {
        LineItem {
            id: 0,
            title: title.into(),
            price,
            image_src: image_src.into(),
        }
    }
}

/// Ordered shopping cart
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
    next_id: u64,
}

impl Cart {
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Build from persisted line items.
    ///
    /// Items stored before ids existed (or with clashing ids) get fresh ones;
    /// valid ids are kept so references held by a renderer stay good. When
    /// the stored ids leave no room to number new items, every item is
    /// renumbered from 1.
    pub fn from_items(mut items: Vec<LineItem>) -> Self {
        let mut cart = Cart::new();
        let max_id = items.iter().map(|i| i.id).max().unwrap_or(0);
        let headroom = items.len() as u64 + 1;
        if max_id.checked_add(headroom).is_some() {
            cart.next_id = max_id + 1;
        } else {
            log::warn!("Cart: stored line ids are exhausted, renumbering {} items", items.len());
            for item in &mut items {
                item.id = 0;
            }
        }

        for mut item in items {
            if item.id == 0 || cart.items.iter().any(|existing| existing.id == item.id) {
                item.id = cart.allocate_id();
            }
            cart.items.push(item);
        }
        cart
    }

    fn allocate_id(&mut self) -> u64 {
        if self.next_id == u64::MAX {
            self.renumber();
        }
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Give every line item a fresh id counting from 1
    fn renumber(&mut self) {
        log::warn!("Cart: line ids exhausted, renumbering {} items", self.items.len());
        for (item, id) in self.items.iter_mut().zip(1..) {
            item.id = id;
        }
        self.next_id = self.items.len() as u64 + 1;
    }

    /// Append a line item and return its id
    pub fn add_item(&mut self, mut item: LineItem) -> u64 {
        item.id = self.allocate_id();
        log::debug!("Cart: added '{}' ({}) as line {}", item.title, item.price, item.id);
        let id = item.id;
        self.items.push(item);
        id
    }

    /// Remove the line item at `index`. Out-of-range indexes are ignored.
    pub fn remove_item(&mut self, index: usize) -> Option<LineItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            log::debug!(
                "Cart: ignoring removal at index {} (cart has {} items)",
                index,
                self.items.len()
            );
            None
        }
    }

    /// Remove the line item with the given id. Unknown ids are ignored.
    pub fn remove(&mut self, id: u64) -> Option<LineItem> {
        let pos = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(pos))
    }

    /// Sum of all line item prices, computed on every call
    pub fn total(&self) -> Price {
        self.items.iter().map(|i| i.price).sum()
    }

    /// Remove every line item whose id is in `ids`, returning them in cart order
    pub fn remove_lines(&mut self, ids: &[u64]) -> Vec<LineItem> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|item| ids.contains(&item.id));
        self.items = kept;
        removed
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Validate the cart for checkout and start the simulated processing delay
    pub fn begin_checkout(
        &self,
        now: Instant,
        delay: Duration,
    ) -> Result<PendingCheckout, ShopError> {
        if self.is_empty() {
            return Err(ShopError::EmptyCart);
        }
        Ok(PendingCheckout {
            due: now + delay,
            items: self.items.len(),
            total: self.total(),
            line_ids: self.items.iter().map(|i| i.id).collect(),
        })
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

/// A checkout waiting for its simulated payment delay to elapse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCheckout {
    due: Instant,
    /// Line items in the cart when checkout started
    pub items: usize,
    /// Cart total when checkout started
    pub total: Price,
    /// Ids of the line items being paid for
    line_ids: Vec<u64>,
}

impl PendingCheckout {
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }

    /// Time left before the checkout completes
    pub fn remaining(&self, now: Instant) -> Duration {
        self.due.saturating_duration_since(now)
    }

    pub fn line_ids(&self) -> &[u64] {
        &self.line_ids
    }
}
