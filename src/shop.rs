//! The storefront context: one owned value holding the catalog, the view
//! state and every persisted collection.
//!
//! Every mutation writes the affected collection back to the store in full
//! and then emits a [`ShopEvent`] so renderers know what to refresh.

use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use crate::error::ShopError;
use crate::models::{
    Cart, Catalog, CatalogView, LineItem, PendingCheckout, Price, ProductQuery, ProductSnapshot,
    RecentlyViewed, ViewPage, Wishlist,
};
use crate::storage::{
    CART_KEY, GeneralConfig, KeyValueStore, RECENT_KEY, WISHLIST_KEY, load_collection,
    save_collection,
};

/// Change notifications for renderers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopEvent {
    WishlistChanged,
    /// A line item was added; the cart display should open
    CartItemAdded { id: u64 },
    CartChanged,
    RecentChanged,
    CheckoutCompleted,
}

pub struct Shop {
    catalog: Catalog,
    view: CatalogView,
    wishlist: Wishlist,
    cart: Cart,
    recent: RecentlyViewed,
    store: Box<dyn KeyValueStore>,
    checkout_delay: Duration,
    pending_checkout: Option<PendingCheckout>,
    events: Option<Sender<ShopEvent>>,
}

impl Shop {
    /// Load the wishlist, cart and recently viewed list from `store`
    pub fn open(
        catalog: Catalog,
        mut store: Box<dyn KeyValueStore>,
        config: &GeneralConfig,
    ) -> Self {
        let wishlist = Wishlist::from_items(load_collection(store.as_mut(), WISHLIST_KEY));
        let cart = Cart::from_items(load_collection(store.as_mut(), CART_KEY));
        let recent = RecentlyViewed::from_entries(load_collection(store.as_mut(), RECENT_KEY));

        log::info!(
            "Shop opened: {} products, {} wishlisted, {} in cart, {} recently viewed",
            catalog.len(),
            wishlist.len(),
            cart.len(),
            recent.len()
        );

        Shop {
            catalog,
            view: CatalogView::new(),
            wishlist,
            cart,
            recent,
            store,
            checkout_delay: config.checkout_delay(),
            pending_checkout: None,
            events: None,
        }
    }

    /// Send change notifications to `tx`
    pub fn with_events(mut self, tx: Sender<ShopEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    fn notify(&self, event: ShopEvent) {
        if let Some(tx) = &self.events
            && tx.send(event).is_err()
        {
            log::debug!("Shop event receiver dropped");
        }
    }

    // Persistence failures are logged; the in-memory change stands.

    fn persist_wishlist(&mut self) {
        if let Err(e) = save_collection(self.store.as_mut(), WISHLIST_KEY, self.wishlist.items()) {
            log::error!("Failed to save wishlist: {:#}", e);
        }
    }

    fn persist_cart(&mut self) {
        if let Err(e) = save_collection(self.store.as_mut(), CART_KEY, self.cart.items()) {
            log::error!("Failed to save cart: {:#}", e);
        }
    }

    fn persist_recent(&mut self) {
        if let Err(e) = save_collection(self.store.as_mut(), RECENT_KEY, self.recent.entries()) {
            log::error!("Failed to save recently viewed: {:#}", e);
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut CatalogView {
        &mut self.view
    }

    /// Current catalog page for the view state
    pub fn visible_products(&mut self) -> ViewPage {
        self.view.derive(&self.catalog)
    }

    // --- Wishlist ---

    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    pub fn is_wishlisted(&self, name: &str) -> bool {
        self.wishlist.exists(name)
    }

    /// Add or remove `product`. Returns true when it is wishlisted afterwards.
    pub fn toggle_wishlist(&mut self, product: &ProductSnapshot) -> bool {
        let listed = self.wishlist.toggle(product);
        self.persist_wishlist();
        self.notify(ShopEvent::WishlistChanged);
        listed
    }

    /// Empty the wishlist and delete its stored key
    pub fn clear_wishlist(&mut self) {
        self.wishlist.clear();
        if let Err(e) = self.store.remove(WISHLIST_KEY) {
            log::error!("Failed to remove stored wishlist: {:#}", e);
        }
        log::info!("Wishlist cleared");
        self.notify(ShopEvent::WishlistChanged);
    }

    // --- Cart ---

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Append a line item; returns its id
    pub fn add_to_cart(&mut self, item: LineItem) -> u64 {
        let id = self.cart.add_item(item);
        self.persist_cart();
        self.notify(ShopEvent::CartItemAdded { id });
        id
    }

    /// Remove by position. Out-of-range positions change nothing.
    pub fn remove_cart_item(&mut self, index: usize) -> Option<LineItem> {
        let removed = self.cart.remove_item(index)?;
        self.persist_cart();
        self.notify(ShopEvent::CartChanged);
        Some(removed)
    }

    /// Remove by line item id. Unknown ids change nothing.
    pub fn remove_cart_line(&mut self, id: u64) -> Option<LineItem> {
        let removed = self.cart.remove(id)?;
        self.persist_cart();
        self.notify(ShopEvent::CartChanged);
        Some(removed)
    }

    pub fn pending_checkout(&self) -> Option<&PendingCheckout> {
        self.pending_checkout.as_ref()
    }

    /// Start checkout. The line items in the cart now are removed once the
    /// processing delay has passed, via [`Shop::poll_checkout`] or
    /// [`Shop::complete_checkout`]. Items added in the meantime stay.
    pub fn checkout(&mut self, now: Instant) -> Result<PendingCheckout, ShopError> {
        if self.pending_checkout.is_some() {
            return Err(ShopError::CheckoutInFlight);
        }
        let pending = self.cart.begin_checkout(now, self.checkout_delay)?;
        log::info!(
            "Processing checkout of {} items ({})",
            pending.items,
            pending.total
        );
        self.pending_checkout = Some(pending.clone());
        Ok(pending)
    }

    /// Complete a pending checkout whose delay has elapsed.
    /// Returns true when the checkout completed.
    pub fn poll_checkout(&mut self, now: Instant) -> bool {
        let due = self
            .pending_checkout
            .as_ref()
            .is_some_and(|pending| pending.is_due(now));
        due && self.complete_checkout()
    }

    /// Remove the line items paid for by the pending checkout right away
    pub fn complete_checkout(&mut self) -> bool {
        let Some(pending) = self.pending_checkout.take() else {
            return false;
        };
        let paid = self.cart.remove_lines(pending.line_ids());
        let total: Price = paid.iter().map(|item| item.price).sum();
        self.persist_cart();
        log::info!("Checkout complete: {} items, {}", paid.len(), total);
        if !self.cart.is_empty() {
            log::debug!("{} items added during checkout stay in the cart", self.cart.len());
        }
        self.notify(ShopEvent::CheckoutCompleted);
        true
    }

    // --- Recently viewed ---

    pub fn recent(&self) -> &RecentlyViewed {
        &self.recent
    }

    pub fn record_view(&mut self, product: &ProductSnapshot) {
        self.recent.record(product);
        self.persist_recent();
        self.notify(ShopEvent::RecentChanged);
    }

    pub fn recently_viewed(&self, excluding: Option<&str>) -> Vec<&ProductSnapshot> {
        self.recent.list(excluding)
    }

    /// Show a product detail page from its link parameters.
    ///
    /// The product is recorded as recently viewed only when the link carried
    /// name, price and image.
    pub fn open_product(&mut self, query: &ProductQuery) -> Option<ProductSnapshot> {
        let snapshot = query.snapshot()?;
        self.record_view(&snapshot);
        Some(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, product_url};
    use crate::storage::MemoryStore;
    use std::sync::mpsc;

    fn config() -> GeneralConfig {
        GeneralConfig {
            checkout_delay_ms: 2000,
            ..GeneralConfig::default()
        }
    }

    fn shop_with(store: MemoryStore) -> Shop {
        Shop::open(Catalog::reference(), Box::new(store), &config())
    }

    fn snapshot(shop: &Shop, name: &str) -> ProductSnapshot {
        shop.catalog().find(name).unwrap().snapshot()
    }

    /// Reopen a shop over the same stored values, as after a restart
    fn reopen(shop: &Shop) -> Shop {
        let mut store = MemoryStore::new();
        for key in [WISHLIST_KEY, CART_KEY, RECENT_KEY] {
            if let Some(value) = shop.store.load(key).unwrap() {
                store = store.with_value(key, &value);
            }
        }
        shop_with(store)
    }

    #[test]
    fn test_wishlist_persists_across_reopen() {
        let mut shop = shop_with(MemoryStore::new());
        let velvet = snapshot(&shop, "Velvet Santal");
        assert!(shop.toggle_wishlist(&velvet));

        let reopened = reopen(&shop);
        assert!(reopened.is_wishlisted("Velvet Santal"));
    }

    #[test]
    fn test_clear_wishlist_removes_key() {
        let mut shop = shop_with(MemoryStore::new());
        let velvet = snapshot(&shop, "Velvet Santal");
        let ocean = snapshot(&shop, "Ocean Mist");
        shop.toggle_wishlist(&velvet);
        shop.toggle_wishlist(&ocean);

        shop.clear_wishlist();
        assert!(!shop.is_wishlisted("Velvet Santal"));
        assert!(!shop.is_wishlisted("Ocean Mist"));
        assert_eq!(shop.store.load(WISHLIST_KEY).unwrap(), None);
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut shop = shop_with(MemoryStore::new());
        let velvet = snapshot(&shop, "Velvet Santal");
        shop.toggle_wishlist(&velvet);
        shop.toggle_wishlist(&velvet);
        assert!(shop.wishlist().is_empty());
        assert_eq!(shop.store.load(WISHLIST_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_cart_total_and_removal() {
        let mut shop = shop_with(MemoryStore::new());
        shop.add_to_cart(LineItem::new("Ocean Mist", Price::from_cents(13000), ""));
        shop.add_to_cart(LineItem::new("Citrus Grove", Price::from_cents(12000), ""));
        shop.add_to_cart(LineItem::new("Ocean Mist", Price::from_cents(13000), ""));
        assert_eq!(shop.cart().total(), Price::from_cents(38000));

        let removed = shop.remove_cart_item(1).unwrap();
        assert_eq!(removed.title, "Citrus Grove");
        assert_eq!(shop.cart().len(), 2);
        assert_eq!(shop.cart().total(), Price::from_cents(26000));

        assert!(shop.remove_cart_item(9).is_none());
        assert_eq!(shop.cart().len(), 2);

        let reopened = reopen(&shop);
        assert_eq!(reopened.cart().total(), Price::from_cents(26000));
    }

    #[test]
    fn test_events_emitted() {
        let (tx, rx) = mpsc::channel();
        let mut shop = shop_with(MemoryStore::new()).with_events(tx);

        let velvet = snapshot(&shop, "Velvet Santal");
        shop.toggle_wishlist(&velvet);
        let id = shop.add_to_cart(LineItem::new("Velvet Santal", Price::from_cents(14500), ""));
        shop.remove_cart_line(id);
        // Unknown id: no event
        shop.remove_cart_line(id);
        shop.record_view(&velvet);

        let events: Vec<ShopEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                ShopEvent::WishlistChanged,
                ShopEvent::CartItemAdded { id },
                ShopEvent::CartChanged,
                ShopEvent::RecentChanged,
            ]
        );
    }

    #[test]
    fn test_checkout_empty_cart_rejected() {
        let mut shop = shop_with(MemoryStore::new());
        assert_eq!(shop.checkout(Instant::now()), Err(ShopError::EmptyCart));
        assert!(shop.pending_checkout().is_none());
        assert_eq!(shop.store.load(CART_KEY).unwrap(), None);
    }

    #[test]
    fn test_checkout_clears_cart_after_delay() {
        let mut shop = shop_with(MemoryStore::new());
        shop.add_to_cart(LineItem::new("Ocean Mist", Price::from_cents(13000), ""));

        let start = Instant::now();
        let pending = shop.checkout(start).unwrap();
        assert_eq!(pending.items, 1);
        assert_eq!(shop.checkout(start), Err(ShopError::CheckoutInFlight));

        assert!(!shop.poll_checkout(start + Duration::from_millis(1999)));
        assert_eq!(shop.cart().len(), 1);

        assert!(shop.poll_checkout(start + Duration::from_millis(2000)));
        assert!(shop.cart().is_empty());
        assert_eq!(shop.store.load(CART_KEY).unwrap().as_deref(), Some("[]"));
        assert!(!shop.complete_checkout());
    }

    #[test]
    fn test_items_added_during_checkout_stay() {
        let (tx, rx) = mpsc::channel();
        let mut shop = shop_with(MemoryStore::new()).with_events(tx);
        shop.add_to_cart(LineItem::new("Ocean Mist", Price::from_cents(13000), ""));

        let start = Instant::now();
        shop.checkout(start).unwrap();
        let late = shop.add_to_cart(LineItem::new("Citrus Grove", Price::from_cents(12000), ""));

        assert!(shop.poll_checkout(start + Duration::from_millis(2000)));
        assert_eq!(shop.cart().len(), 1);
        assert_eq!(shop.cart().items()[0].id, late);
        assert_eq!(shop.cart().total(), Price::from_cents(12000));
        assert_eq!(reopen(&shop).cart().len(), 1);
        assert_eq!(rx.try_iter().last(), Some(ShopEvent::CheckoutCompleted));
    }

    #[test]
    fn test_huge_stored_prices_load_without_overflow() {
        let line = r#"{"title":"A","price":1e300,"imageSrc":""}"#;
        let store = MemoryStore::new().with_value(CART_KEY, &format!("[{},{}]", line, line));
        let shop = shop_with(store);
        assert_eq!(shop.cart().items()[0].price, Price::MAX);
        assert_eq!(shop.cart().total().cents(), 2 * Price::MAX.cents());
    }

    #[test]
    fn test_recently_viewed_bounded() {
        let mut shop = shop_with(MemoryStore::new());
        let names = [
            "Velvet Santal",
            "Ocean Mist",
            "Midnight Oud",
            "Amber Whisper",
            "Citrus Grove",
        ];
        for name in names {
            let product = snapshot(&shop, name);
            shop.record_view(&product);
        }

        let listed: Vec<&str> = shop
            .recently_viewed(None)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(
            listed,
            vec!["Citrus Grove", "Amber Whisper", "Midnight Oud", "Ocean Mist"]
        );

        let reopened = reopen(&shop);
        assert_eq!(reopened.recently_viewed(Some("Citrus Grove")).len(), 3);
    }

    #[test]
    fn test_open_product_records_view() {
        let mut shop = shop_with(MemoryStore::new());
        let url = product_url("Ocean Mist", Price::from_cents(13000), "o.jpg");

        let shown = shop.open_product(&ProductQuery::parse(&url)).unwrap();
        assert_eq!(shown.name, "Ocean Mist");
        assert_eq!(shop.recent().len(), 1);

        let incomplete = ProductQuery::parse("name=Ocean+Mist");
        assert!(shop.open_product(&incomplete).is_none());
        assert_eq!(shop.recent().len(), 1);
    }

    #[test]
    fn test_corrupted_store_starts_empty() {
        let store = MemoryStore::new()
            .with_value(WISHLIST_KEY, "not json")
            .with_value(CART_KEY, r#"[{"title":"Ocean Mist","price":130,"imageSrc":""}]"#);
        let shop = shop_with(store);
        assert!(shop.wishlist().is_empty());
        assert_eq!(shop.cart().len(), 1);
        assert_eq!(shop.cart().items()[0].id, 1);
    }

    #[test]
    fn test_snapshots_independent_of_catalog() {
        let mut shop = shop_with(MemoryStore::new());
        let mut velvet = snapshot(&shop, "Velvet Santal");
        shop.toggle_wishlist(&velvet);
        velvet.price = Price::ZERO;
        assert_eq!(shop.wishlist().items()[0].price, Price::from_cents(14500));
    }

    #[test]
    fn test_visible_products_uses_view_state() {
        let mut shop = shop_with(MemoryStore::new());
        shop.view_mut().toggle_category(Category::Women);
        let page = shop.visible_products();
        assert_eq!(page.matched, 4);
        assert!(page.products.iter().all(|p| p.category == Category::Women));
    }
}
