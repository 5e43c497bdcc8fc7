use thiserror::Error;

/// User-facing storefront errors.
///
/// These are validation failures the shopper can act on. Storage and
/// terminal plumbing errors travel as `anyhow::Error` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShopError {
    #[error("Your cart is empty.")]
    EmptyCart,

    #[error("Checkout is already processing.")]
    CheckoutInFlight,

    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    #[error("Unknown category '{0}': expected men, women or unisex")]
    UnknownCategory(String),

    #[error("Unknown sort mode '{0}': expected none, price-asc or price-desc")]
    UnknownSortMode(String),

    #[error("Unknown size '{0}': expected 50ml or 100ml")]
    UnknownSize(String),

    #[error("Please fill in the {0} field.")]
    MissingField(&'static str),

    #[error("A message is already being sent.")]
    SubmissionInFlight,
}
