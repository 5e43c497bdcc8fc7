pub mod cart;
pub mod catalog;
pub mod contact;
pub mod link;
pub mod product;
pub mod quick_view;
pub mod recent;
pub mod view;
pub mod wishlist;

pub use cart::{Cart, LineItem, PendingCheckout};
pub use catalog::{Catalog, RELATED_LIMIT};
pub use contact::{ContactField, ContactForm, SENT_MESSAGE};
pub use link::{ProductQuery, product_url};
pub use product::{Category, Price, Product, ProductSnapshot};
pub use quick_view::{QuickView, Size};
pub use recent::{RECENT_LIMIT, RecentlyViewed};
pub use view::{CatalogView, PAGE_SIZE, SortMode, ViewPage};
pub use wishlist::Wishlist;
