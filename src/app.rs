use ratatui::Frame;
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::Style;
use ratatui::widgets::Block;
use std::sync::mpsc::{self, Receiver};
use std::time::Instant;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::logging::FlashMessage;
use crate::models::{
    Category, ContactField, ContactForm, LineItem, Product, ProductQuery, ProductSnapshot,
    QuickView, Size, ViewPage, product_url,
};
use crate::shop::{Shop, ShopEvent};
use crate::storage::Config;
use crate::ui;
use crate::ui::Theme;

/// Application mode determines which keybindings are active
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Browsing the catalog page
    #[default]
    Normal,
    /// Typing a search query (activated with '/')
    Search,
    /// Quick view modal for one product
    QuickView,
    /// Full product page opened from a product link
    Detail,
    /// Cart panel focused
    Cart,
    /// Wishlist panel focused
    Wishlist,
    /// Confirmation dialog for clearing the wishlist
    Confirm,
    /// Contact form
    Contact,
}

/// Main application state
pub struct App {
    /// Current interaction mode
    pub mode: AppMode,

    /// Storefront state and persistence
    pub shop: Shop,

    /// Application configuration
    pub config: Config,

    theme: Theme,

    /// Change notifications from the shop
    shop_rx: Receiver<ShopEvent>,

    /// Catalog page derived from the current view state
    pub page: ViewPage,

    /// Selected row on the catalog page
    pub selected_index: usize,

    /// Search input with cursor support
    pub search_input: Input,

    /// Open quick view, if any
    pub quick_view: Option<QuickView>,

    /// Selected related product inside the quick view
    pub related_index: usize,

    /// Product page currently shown, as parsed from its link
    pub detail: Option<ProductQuery>,

    /// Whether the cart panel replaces the product preview
    pub cart_open: bool,

    pub cart_index: usize,
    pub wishlist_index: usize,

    pub contact: ContactForm,
    pub contact_field: ContactField,

    /// Editor for the focused contact field
    pub contact_input: Input,

    /// Startup error message (shown in modal, dismissible with any key)
    pub startup_error: Option<String>,

    /// Flag to request application exit
    pub should_quit: bool,

    /// Flash messages displayed under the side panel
    pub flash_messages: Vec<FlashMessage>,

    /// Receiver for flash messages from logger
    flash_rx: Option<Receiver<FlashMessage>>,
}

impl App {
    pub fn new(shop: Shop, config: Config, flash_rx: Option<Receiver<FlashMessage>>) -> Self {
        let (shop_tx, shop_rx) = mpsc::channel();
        let mut shop = shop.with_events(shop_tx);
        let page = shop.visible_products();

        App {
            mode: AppMode::default(),
            shop,
            config,
            theme: Theme::default(),
            shop_rx,
            page,
            selected_index: 0,
            search_input: Input::default(),
            quick_view: None,
            related_index: 0,
            detail: None,
            cart_open: false,
            cart_index: 0,
            wishlist_index: 0,
            contact: ContactForm::new(),
            contact_field: ContactField::Name,
            contact_input: Input::default(),
            startup_error: None,
            should_quit: false,
            flash_messages: Vec::new(),
            flash_rx,
        }
    }

    /// Advance timers and drain channels. Called once per render loop iteration.
    pub fn tick(&mut self, now: Instant) {
        self.shop.poll_checkout(now);

        if let Some(message) = self.contact.poll(now) {
            log::info!("{}", message);
            if self.mode == AppMode::Contact {
                self.load_contact_input();
            }
        }

        self.poll_shop_events();
        self.poll_flash_messages();
        self.prune_flash_messages(now);
    }

    fn poll_shop_events(&mut self) {
        while let Ok(event) = self.shop_rx.try_recv() {
            log::debug!("Shop event: {:?}", event);
            match event {
                ShopEvent::CartItemAdded { .. } => {
                    self.cart_open = true;
                    self.cart_index = self.shop.cart().len().saturating_sub(1);
                }
                ShopEvent::CartChanged | ShopEvent::CheckoutCompleted => {
                    self.cart_index = clamp_index(self.cart_index, self.shop.cart().len());
                }
                ShopEvent::WishlistChanged => {
                    self.wishlist_index =
                        clamp_index(self.wishlist_index, self.shop.wishlist().len());
                }
                ShopEvent::RecentChanged => {}
            }
        }
    }

    /// Poll flash message receiver and add to queue
    pub fn poll_flash_messages(&mut self) {
        if let Some(rx) = &self.flash_rx {
            while let Ok(msg) = rx.try_recv() {
                self.flash_messages.push(msg);
            }
        }
    }

    /// Remove flash messages older than the configured duration
    pub fn prune_flash_messages(&mut self, now: Instant) {
        let duration = self.config.general.flash_duration();
        self.flash_messages
            .retain(|msg| now.saturating_duration_since(msg.timestamp) < duration);
    }

    /// Re-derive the catalog page after the view state changed
    fn refresh_page(&mut self) {
        self.page = self.shop.visible_products();
        self.selected_index = clamp_index(self.selected_index, self.page.products.len());
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.page.products.get(self.selected_index)
    }

    fn selected_wishlist_item(&self) -> Option<&ProductSnapshot> {
        self.shop.wishlist().items().get(self.wishlist_index)
    }

    // --- Catalog browsing ---

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.page.products.len() {
            self.selected_index += 1;
        }
    }

    fn apply_search(&mut self) {
        self.shop
            .view_mut()
            .set_search_query(self.search_input.value());
        self.selected_index = 0;
        self.refresh_page();
    }

    /// Clear search query, returning to the full catalog
    pub fn clear_search(&mut self) {
        self.search_input.reset();
        self.shop.view_mut().clear_search();
        self.selected_index = 0;
        self.refresh_page();
    }

    pub fn toggle_category(&mut self, category: Category) {
        self.shop.view_mut().toggle_category(category);
        self.selected_index = 0;
        self.refresh_page();
    }

    pub fn clear_categories(&mut self) {
        self.shop.view_mut().set_categories(Vec::new());
        self.selected_index = 0;
        self.refresh_page();
    }

    pub fn cycle_sort(&mut self) {
        let next = self.shop.view().sort_mode().cycle();
        self.shop.view_mut().set_sort_mode(next);
        self.selected_index = 0;
        self.refresh_page();
    }

    pub fn next_page(&mut self) {
        if self.page.page < self.page.total_pages {
            self.shop.view_mut().set_page(self.page.page + 1);
            self.selected_index = 0;
            self.refresh_page();
        }
    }

    pub fn prev_page(&mut self) {
        if self.page.page > 1 {
            self.shop.view_mut().set_page(self.page.page - 1);
            self.selected_index = 0;
            self.refresh_page();
        }
    }

    // --- Wishlist and cart ---

    fn toggle_wishlist_for(&mut self, product: &ProductSnapshot) {
        if self.shop.toggle_wishlist(product) {
            log::info!("Added {} to your wishlist", product.name);
        } else {
            log::info!("Removed {} from your wishlist", product.name);
        }
    }

    pub fn toggle_wishlist_selected(&mut self) {
        if let Some(product) = self.selected_product().map(Product::snapshot) {
            self.toggle_wishlist_for(&product);
        }
    }

    pub fn add_selected_to_cart(&mut self) {
        if let Some(product) = self.selected_product() {
            let item = LineItem::new(product.name.clone(), product.price, product.image.clone());
            self.shop.add_to_cart(item);
        }
    }

    fn remove_selected_cart_line(&mut self) {
        let Some(id) = self.shop.cart().items().get(self.cart_index).map(|item| item.id) else {
            return;
        };
        if let Some(removed) = self.shop.remove_cart_line(id) {
            log::debug!("Removed {} from cart", removed.title);
        }
    }

    pub fn checkout(&mut self, now: Instant) {
        match self.shop.checkout(now) {
            Ok(pending) => log::info!(
                "Processing order of {} items ({})...",
                pending.items,
                pending.total
            ),
            Err(e) => log::warn!("{}", e),
        }
    }

    // --- Quick view and product page ---

    pub fn open_quick_view(&mut self, product: ProductSnapshot) {
        self.quick_view = Some(QuickView::open(product));
        self.related_index = 0;
        self.mode = AppMode::QuickView;
    }

    pub fn close_quick_view(&mut self) {
        self.quick_view = None;
        self.mode = AppMode::Normal;
    }

    fn select_quick_view_size(&mut self, size: Size) {
        if let Some(quick_view) = self.quick_view.as_mut() {
            quick_view.select_size(size);
        }
    }

    fn add_quick_view_to_cart(&mut self) {
        let Some(item) = self.quick_view.as_ref().map(QuickView::line_item) else {
            return;
        };
        self.shop.add_to_cart(item);
        self.close_quick_view();
    }

    fn related_count(&self) -> usize {
        self.quick_view
            .as_ref()
            .map(|qv| qv.related(self.shop.catalog()).len())
            .unwrap_or(0)
    }

    /// Re-target the quick view at the selected related product
    fn open_related(&mut self) {
        let Some(quick_view) = self.quick_view.as_mut() else {
            return;
        };
        let related = quick_view.related(self.shop.catalog());
        if let Some(product) = related.get(self.related_index) {
            quick_view.retarget(product);
            self.related_index = 0;
        }
    }

    /// Navigate to the product page through its link, as a browser would
    pub fn open_detail(&mut self, product: &ProductSnapshot) {
        let url = product_url(&product.name, product.price, &product.image);
        log::debug!("Opening {}", url);
        let query = ProductQuery::parse(&url);
        self.shop.open_product(&query);
        self.detail = Some(query);
        self.quick_view = None;
        self.mode = AppMode::Detail;
    }

    fn add_detail_to_cart(&mut self) {
        let Some(item) = self.detail.as_ref().map(ProductQuery::line_item) else {
            return;
        };
        self.shop.add_to_cart(item);
        self.detail = None;
        self.mode = AppMode::Normal;
    }

    // --- Contact form ---

    pub fn open_contact(&mut self) {
        self.contact_field = ContactField::Name;
        self.load_contact_input();
        self.mode = AppMode::Contact;
    }

    fn load_contact_input(&mut self) {
        self.contact_input = Input::new(self.contact.field(self.contact_field).to_string());
    }

    fn store_contact_input(&mut self) {
        if !self.contact.is_sending() {
            self.contact
                .set_field(self.contact_field, self.contact_input.value());
        }
    }

    fn next_contact_field(&mut self) {
        self.store_contact_input();
        self.contact_field = self.contact_field.next();
        self.load_contact_input();
    }

    fn submit_contact(&mut self, now: Instant) {
        self.store_contact_input();
        match self.contact.submit(now, self.config.general.contact_delay()) {
            Ok(_) => log::info!("Sending..."),
            Err(e) => log::warn!("{}", e),
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Handle keyboard event based on current mode
    pub fn handle_key(&mut self, key: KeyEvent) {
        // If there's a startup error modal, any key dismisses it
        if self.startup_error.is_some() {
            self.startup_error = None;
            return;
        }

        match self.mode {
            AppMode::Normal => self.handle_normal_key(key),
            AppMode::Search => self.handle_search_key(key),
            AppMode::QuickView => self.handle_quick_view_key(key),
            AppMode::Detail => self.handle_detail_key(key),
            AppMode::Cart => self.handle_cart_key(key),
            AppMode::Wishlist => self.handle_wishlist_key(key),
            AppMode::Confirm => self.handle_confirm_key(key),
            AppMode::Contact => self.handle_contact_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),
            KeyCode::Char('[') | KeyCode::PageUp => self.prev_page(),
            KeyCode::Char(']') | KeyCode::PageDown => self.next_page(),
            KeyCode::Char('/') => self.mode = AppMode::Search,
            KeyCode::Char('s') => self.cycle_sort(),
            KeyCode::Char('m') => self.toggle_category(Category::Men),
            KeyCode::Char('f') => self.toggle_category(Category::Women),
            KeyCode::Char('u') => self.toggle_category(Category::Unisex),
            KeyCode::Char('0') => self.clear_categories(),
            KeyCode::Enter => {
                if let Some(product) = self.selected_product().map(Product::snapshot) {
                    self.open_quick_view(product);
                }
            }
            KeyCode::Char('o') => {
                if let Some(product) = self.selected_product().map(Product::snapshot) {
                    self.open_detail(&product);
                }
            }
            KeyCode::Char('a') => self.add_selected_to_cart(),
            KeyCode::Char('w') => self.toggle_wishlist_selected(),
            KeyCode::Char('W') => {
                self.cart_open = false;
                self.wishlist_index = 0;
                self.mode = AppMode::Wishlist;
            }
            KeyCode::Char('b') => {
                self.cart_open = true;
                self.mode = AppMode::Cart;
            }
            KeyCode::Char('C') => self.open_contact(),
            KeyCode::Char('x') => self.flash_messages.clear(),
            KeyCode::Char('q') => self.quit(),
            KeyCode::Esc => {
                // Esc backs out one level: cart panel, search, categories, then quit
                if self.cart_open {
                    self.cart_open = false;
                } else if !self.shop.view().search_query().is_empty() {
                    self.clear_search();
                } else if !self.shop.view().selected_categories().is_empty() {
                    self.clear_categories();
                } else {
                    self.quit();
                }
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Esc => self.mode = AppMode::Normal,
            KeyCode::Enter => {
                self.mode = AppMode::Normal;
                if let Some(product) = self.selected_product().map(Product::snapshot) {
                    self.open_quick_view(product);
                }
            }
            _ => {
                // Characters, backspace and cursor movement go to tui-input
                let event = Event::Key(key);
                if self.search_input.handle_event(&event).is_some() {
                    self.apply_search();
                }
            }
        }
    }

    fn handle_quick_view_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('1') => self.select_quick_view_size(Size::Ml50),
            KeyCode::Char('2') => self.select_quick_view_size(Size::Ml100),
            KeyCode::Char('a') | KeyCode::Char('b') => self.add_quick_view_to_cart(),
            KeyCode::Char('w') => {
                if let Some(product) = self.quick_view.as_ref().map(|qv| qv.product().clone()) {
                    self.toggle_wishlist_for(&product);
                }
            }
            KeyCode::Char('j') | KeyCode::Down => {
                if self.related_index + 1 < self.related_count() {
                    self.related_index += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.related_index = self.related_index.saturating_sub(1);
            }
            KeyCode::Enter => self.open_related(),
            KeyCode::Char('o') => {
                if let Some(product) = self.quick_view.as_ref().map(|qv| qv.product().clone()) {
                    self.open_detail(&product);
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => self.close_quick_view(),
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('a') => self.add_detail_to_cart(),
            KeyCode::Char('w') => {
                if let Some(product) = self.detail.as_ref().and_then(ProductQuery::snapshot) {
                    self.toggle_wishlist_for(&product);
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                self.detail = None;
                self.mode = AppMode::Normal;
            }
            _ => {}
        }
    }

    fn handle_cart_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.cart_index + 1 < self.shop.cart().len() {
                    self.cart_index += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.cart_index = self.cart_index.saturating_sub(1);
            }
            KeyCode::Char('d') | KeyCode::Delete => self.remove_selected_cart_line(),
            KeyCode::Char('C') | KeyCode::Enter => self.checkout(Instant::now()),
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('q') => {
                self.cart_open = false;
                self.mode = AppMode::Normal;
            }
            _ => {}
        }
    }

    fn handle_wishlist_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.wishlist_index + 1 < self.shop.wishlist().len() {
                    self.wishlist_index += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.wishlist_index = self.wishlist_index.saturating_sub(1);
            }
            KeyCode::Enter => {
                if let Some(product) = self.selected_wishlist_item().cloned() {
                    self.open_quick_view(product);
                }
            }
            KeyCode::Char('a') => {
                if let Some(product) = self.selected_wishlist_item() {
                    let item =
                        LineItem::new(product.name.clone(), product.price, product.image.clone());
                    self.shop.add_to_cart(item);
                }
            }
            KeyCode::Char('d') | KeyCode::Char('w') => {
                if let Some(product) = self.selected_wishlist_item().cloned() {
                    self.toggle_wishlist_for(&product);
                }
            }
            KeyCode::Char('D') => {
                if !self.shop.wishlist().is_empty() {
                    self.mode = AppMode::Confirm;
                }
            }
            KeyCode::Esc | KeyCode::Char('W') | KeyCode::Char('q') => self.mode = AppMode::Normal,
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.shop.clear_wishlist();
                self.mode = AppMode::Wishlist;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.mode = AppMode::Wishlist;
            }
            _ => {}
        }
    }

    fn handle_contact_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.store_contact_input();
                self.mode = AppMode::Normal;
            }
            KeyCode::Tab => self.next_contact_field(),
            KeyCode::Enter => self.submit_contact(Instant::now()),
            _ => {
                if !self.contact.is_sending() {
                    self.contact_input.handle_event(&Event::Key(key));
                }
            }
        }
    }

    /// Render the TUI
    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();

        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.default_bg)),
            area,
        );

        // Layout: [product_list, divider, side_panel, keyboard_hints]
        let chunks = ui::create_main_layout(area);
        let side_chunks = ui::split_flash_area(chunks[2], self.flash_messages.len());

        ui::render_product_list(
            frame,
            chunks[0],
            ui::product_list::ProductListRenderContext {
                page: &self.page,
                selected: self.selected_index,
                mode: self.mode,
                search_input: &self.search_input,
                view: self.shop.view(),
                wishlist: self.shop.wishlist(),
                theme: &self.theme,
            },
        );

        ui::render_divider(frame, chunks[1], &self.theme);

        if self.cart_open || self.mode == AppMode::Cart {
            ui::render_cart_panel(
                frame,
                side_chunks[0],
                self.shop.cart(),
                self.shop.pending_checkout(),
                self.cart_index,
                self.mode == AppMode::Cart,
                &self.theme,
            );
        } else if matches!(self.mode, AppMode::Wishlist | AppMode::Confirm) {
            ui::render_wishlist_panel(
                frame,
                side_chunks[0],
                self.shop.wishlist().items(),
                self.wishlist_index,
                &self.theme,
            );
        } else {
            let selected = self.selected_product();
            let wishlisted = selected.is_some_and(|p| self.shop.is_wishlisted(&p.name));
            let recent = self
                .shop
                .recently_viewed(selected.map(|p| p.name.as_str()));
            ui::render_preview(
                frame,
                side_chunks[0],
                selected,
                wishlisted,
                &recent,
                &self.theme,
            );
        }

        ui::render_flash_messages(frame, side_chunks[1], &self.flash_messages, &self.theme);

        ui::render_keyboard_hints(frame, chunks[3], self.mode, &self.theme);

        match self.mode {
            AppMode::QuickView => {
                if let Some(quick_view) = &self.quick_view {
                    let related = quick_view.related(self.shop.catalog());
                    let wishlisted = self.shop.is_wishlisted(&quick_view.product().name);
                    ui::render_quick_view(
                        frame,
                        area,
                        quick_view,
                        &related,
                        self.related_index,
                        wishlisted,
                        &self.theme,
                    );
                }
            }
            AppMode::Detail => {
                if let Some(query) = &self.detail {
                    let name = query.name.as_deref();
                    let wishlisted = name.is_some_and(|n| self.shop.is_wishlisted(n));
                    let recent = self.shop.recently_viewed(name);
                    ui::render_detail(
                        frame,
                        area,
                        query,
                        self.shop.catalog().featured(),
                        &recent,
                        wishlisted,
                        &self.theme,
                    );
                }
            }
            AppMode::Contact => {
                ui::render_contact_form(
                    frame,
                    area,
                    &self.contact,
                    self.contact_field,
                    &self.contact_input,
                    &self.theme,
                );
            }
            AppMode::Confirm => ui::render_confirm_overlay(frame, area, &self.theme),
            _ => {}
        }

        // Startup error modal takes precedence over other overlays
        if let Some(ref error_msg) = self.startup_error {
            ui::render_error_modal(frame, area, error_msg, &self.theme);
        }
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Catalog, Price};
    use crate::storage::{GeneralConfig, MemoryStore};
    use std::time::Duration;

    fn app() -> App {
        let config = Config::default();
        let shop = Shop::open(
            Catalog::reference(),
            Box::new(MemoryStore::new()),
            &config.general,
        );
        App::new(shop, config, None)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_initial_page_shows_catalog() {
        let app = app();
        assert_eq!(app.page.matched, 12);
        assert_eq!(app.selected_product().unwrap().name, "Velvet Santal");
    }

    #[test]
    fn test_search_filters_page() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, AppMode::Search);
        type_text(&mut app, "oud");
        assert_eq!(app.page.matched, 1);
        assert_eq!(app.selected_product().unwrap().name, "Midnight Oud");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.shop.view().search_query(), "oud");

        // Esc in normal mode clears the query before quitting
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.page.matched, 12);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_category_and_sort_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.page.matched, 4);

        press(&mut app, KeyCode::Char('s'));
        let prices: Vec<Price> = app.page.products.iter().map(|p| p.price).collect();
        let mut sorted = prices.clone();
        sorted.sort();
        assert_eq!(prices, sorted);

        press(&mut app, KeyCode::Char('0'));
        assert_eq!(app.page.matched, 12);
    }

    #[test]
    fn test_add_to_cart_opens_cart_panel() {
        let mut app = app();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('a'));
        assert!(!app.cart_open);

        app.tick(Instant::now());
        assert!(app.cart_open);
        assert_eq!(app.shop.cart().items()[0].title, "Ocean Mist");
    }

    #[test]
    fn test_quick_view_adds_sized_item() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::QuickView);

        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.quick_view.is_none());

        let item = &app.shop.cart().items()[0];
        assert_eq!(item.title, "Velvet Santal (100ml)");
        assert_eq!(item.price, Price::from_cents(21750));
    }

    #[test]
    fn test_quick_view_retargets_related() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Enter);

        let quick_view = app.quick_view.as_ref().unwrap();
        assert_ne!(quick_view.product().name, "Velvet Santal");
        assert_eq!(quick_view.size(), Size::Ml50);
    }

    #[test]
    fn test_detail_records_recently_viewed() {
        let mut app = app();
        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.mode, AppMode::Detail);
        assert_eq!(app.shop.recent().len(), 1);
        assert_eq!(
            app.detail.as_ref().unwrap().name.as_deref(),
            Some("Velvet Santal")
        );

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.shop.cart().items()[0].price, Price::from_cents(14500));
    }

    #[test]
    fn test_cart_remove_and_checkout() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('a'));
        app.tick(Instant::now());

        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.mode, AppMode::Cart);
        app.cart_index = 0;
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.shop.cart().len(), 1);
        assert_eq!(app.shop.cart().items()[0].title, "Ocean Mist");

        let start = Instant::now();
        app.checkout(start);
        assert!(app.shop.pending_checkout().is_some());

        app.tick(start + GeneralConfig::default().checkout_delay() + Duration::from_millis(1));
        assert!(app.shop.cart().is_empty());
        assert_eq!(app.cart_index, 0);
    }

    #[test]
    fn test_empty_cart_checkout_leaves_state() {
        let mut app = app();
        app.checkout(Instant::now());
        assert!(app.shop.pending_checkout().is_none());
    }

    #[test]
    fn test_clear_wishlist_needs_confirmation() {
        let mut app = app();
        press(&mut app, KeyCode::Char('w'));
        assert!(app.shop.is_wishlisted("Velvet Santal"));

        press(&mut app, KeyCode::Char('W'));
        press(&mut app, KeyCode::Char('D'));
        assert_eq!(app.mode, AppMode::Confirm);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.shop.wishlist().len(), 1);

        press(&mut app, KeyCode::Char('D'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.shop.wishlist().is_empty());
        assert_eq!(app.mode, AppMode::Wishlist);
    }

    #[test]
    fn test_contact_form_flow() {
        let mut app = app();
        press(&mut app, KeyCode::Char('C'));
        assert_eq!(app.mode, AppMode::Contact);

        type_text(&mut app, "Ada");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "ada@example.com");
        press(&mut app, KeyCode::Enter);
        // Message still empty
        assert!(!app.contact.is_sending());

        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Do you ship abroad?");
        press(&mut app, KeyCode::Enter);
        assert!(app.contact.is_sending());
        assert_eq!(app.contact.name, "Ada");

        app.tick(Instant::now() + GeneralConfig::default().contact_delay());
        assert!(!app.contact.is_sending());
        assert!(app.contact.name.is_empty());
        assert_eq!(app.contact_input.value(), "");
    }

    #[test]
    fn test_startup_error_dismissed_by_any_key() {
        let mut app = app();
        app.startup_error = Some("bad config".to_string());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.startup_error.is_none());
        assert!(!app.should_quit);
    }
}
