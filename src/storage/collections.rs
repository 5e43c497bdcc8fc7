use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::store::KeyValueStore;

/// Storage key for the wishlist
pub const WISHLIST_KEY: &str = "scent_wishlist";
/// Storage key for the cart
pub const CART_KEY: &str = "scent_cart";
/// Storage key for the recently viewed list
pub const RECENT_KEY: &str = "scent_recent";

/// Load the JSON list stored under `key`.
///
/// A missing key, an unreadable value or a value that does not decode all
/// yield an empty list; a bad value is also handed to
/// [`KeyValueStore::quarantine`]. Loading never fails.
pub fn load_collection<T: DeserializeOwned>(store: &mut dyn KeyValueStore, key: &str) -> Vec<T> {
    let raw = match store.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            log::debug!("No stored value for '{}', starting empty", key);
            return Vec::new();
        }
        Err(e) => {
            log::warn!("Could not read '{}', starting empty: {:#}", key, e);
            return Vec::new();
        }
    };

    // `null` decodes as an empty list
    match serde_json::from_str::<Option<Vec<T>>>(&raw) {
        Ok(items) => {
            let items = items.unwrap_or_default();
            log::info!("Loaded {} entries from '{}'", items.len(), key);
            items
        }
        Err(e) => {
            log::warn!("Stored value for '{}' is corrupted, starting empty: {}", key, e);
            if let Err(backup_err) = store.quarantine(key) {
                log::error!("Failed to set aside corrupted '{}': {:#}", key, backup_err);
            }
            Vec::new()
        }
    }
}

/// Overwrite `key` with the whole list encoded as JSON
pub fn save_collection<T: Serialize>(
    store: &mut dyn KeyValueStore,
    key: &str,
    items: &[T],
) -> Result<()> {
    let json = serde_json::to_string(items)
        .with_context(|| format!("Failed to serialize '{}'", key))?;
    store.save(key, &json)?;
    log::debug!("Saved {} entries to '{}'", items.len(), key);
    Ok(())
}
