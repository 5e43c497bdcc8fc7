use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use crate::error::ShopError;

/// Fragrance family a product is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Men,
    Women,
    Unisex,
}

impl Category {
    /// All categories in filter-checkbox order
    pub const ALL: [Category; 3] = [Category::Men, Category::Women, Category::Unisex];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Men => "men",
            Category::Women => "women",
            Category::Unisex => "unisex",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "men" => Ok(Category::Men),
            "women" => Ok(Category::Women),
            "unisex" => Ok(Category::Unisex),
            _ => Err(ShopError::UnknownCategory(s.to_string())),
        }
    }
}

/// Non-negative amount of money, held in whole cents.
///
/// Stored values and query strings carry prices as decimal numbers
/// (`145.0`, `"145.00"`), so serde and [`Price::parse_decimal`] convert at
/// the boundary and everything inside the crate sums exact integers.
/// Single amounts are capped at [`Price::MAX`] and sums saturate, so no
/// stored value can overflow a total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    /// Largest representable amount ($1,000,000,000.00)
    pub const MAX: Price = Price(100_000_000_000);

    pub const fn from_cents(cents: u64) -> Self {
        if cents > Price::MAX.0 {
            Price::MAX
        } else {
            Price(cents)
        }
    }

    pub fn cents(self) -> u64 {
        self.0
    }

    /// Convert a decimal amount. Negative, NaN and infinite values become
    /// zero; anything above [`Price::MAX`] is clamped to it.
    pub fn from_decimal(value: f64) -> Self {
        if !value.is_finite() || value <= 0.0 {
            return Price::ZERO;
        }
        Price::from_cents_f64((value * 100.0).round())
    }

    fn from_cents_f64(cents: f64) -> Self {
        if cents >= Price::MAX.0 as f64 {
            Price::MAX
        } else {
            Price(cents as u64)
        }
    }

    pub fn as_decimal(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parse the decimal number at the start of untrusted text.
    ///
    /// Leading whitespace is skipped and parsing stops at the first character
    /// that cannot continue the number, so `"12abc"` is 12 and `"1e3"` is
    /// 1000. Text without a leading number, and negative amounts, are zero.
    pub fn parse_decimal(text: &str) -> Self {
        let text = text.trim_start();
        let bytes = text.as_bytes();
        let digits_from = |mut i: usize| {
            while bytes.get(i).is_some_and(u8::is_ascii_digit) {
                i += 1;
            }
            i
        };

        let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
        let int_end = digits_from(end);
        let mut mantissa_digits = int_end - end;
        end = int_end;
        if bytes.get(end) == Some(&b'.') {
            let frac_end = digits_from(end + 1);
            mantissa_digits += frac_end - (end + 1);
            end = frac_end;
        }
        if mantissa_digits == 0 {
            return Price::ZERO;
        }

        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
            let exp_start = end + 1 + sign;
            let exp_end = digits_from(exp_start);
            if exp_end > exp_start {
                end = exp_end;
            }
        }

        text[..end]
            .parse::<f64>()
            .map(Price::from_decimal)
            .unwrap_or(Price::ZERO)
    }

    /// Multiply by a factor, rounding to the nearest cent
    pub fn scale(self, factor: f64) -> Self {
        let scaled = self.0 as f64 * factor;
        if !scaled.is_finite() || scaled <= 0.0 {
            return Price::ZERO;
        }
        Price::from_cents_f64(scaled.round())
    }

    /// Two-decimal representation without currency symbol (`"145.00"`)
    pub fn to_fixed(self) -> String {
        format!("{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("${}", self.to_fixed()))
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Price> for Price {
    fn sum<I: Iterator<Item = &'a Price>>(iter: I) -> Price {
        iter.copied().sum()
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Ok(Price::from_decimal(value))
    }
}

/// A catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Display name, unique within the catalog
    pub name: String,
    pub price: Price,
    pub category: Category,
    /// Image URL
    pub image: String,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        price: Price,
        category: Category,
        image: impl Into<String>,
    ) -> Self {
        Product {
            name: name.into(),
            price,
            category,
            image: image.into(),
        }
    }

    /// Owned copy for storing in the wishlist or recently-viewed list
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot::from(self)
    }
}

/// Copy of a product's display fields taken at the moment it was saved.
///
/// Wishlist and recently-viewed entries hold these rather than catalog
/// references so that later catalog edits never rewrite stored entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub name: String,
    pub price: Price,
    pub image: String,
}

impl ProductSnapshot {
    pub fn new(name: impl Into<String>, price: Price, image: impl Into<String>) -> Self {
        ProductSnapshot {
            name: name.into(),
            price,
            image: image.into(),
        }
    }
}

impl From<&Product> for ProductSnapshot {
    fn from(product: &Product) -> Self {
        ProductSnapshot {
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display() {
        assert_eq!(Price::from_cents(14500).to_string(), "$145.00");
        assert_eq!(Price::from_cents(5).to_string(), "$0.05");
        assert_eq!(Price::from_cents(21750).to_fixed(), "217.50");
    }

    #[test]
    fn test_price_parse_decimal() {
        assert_eq!(Price::parse_decimal("145.00"), Price::from_cents(14500));
        assert_eq!(Price::parse_decimal(" 130"), Price::from_cents(13000));
        assert_eq!(Price::parse_decimal(".5"), Price::from_cents(50));
        assert_eq!(Price::parse_decimal("5."), Price::from_cents(500));
        assert_eq!(Price::parse_decimal("abc"), Price::ZERO);
        assert_eq!(Price::parse_decimal(""), Price::ZERO);
        assert_eq!(Price::parse_decimal("."), Price::ZERO);
        assert_eq!(Price::parse_decimal("$145.00"), Price::ZERO);
    }

    #[test]
    fn test_price_parse_decimal_stops_at_first_non_number() {
        assert_eq!(Price::parse_decimal("1e3"), Price::from_cents(100_000));
        assert_eq!(Price::parse_decimal("2.5E-1"), Price::from_cents(25));
        assert_eq!(Price::parse_decimal("7e"), Price::from_cents(700));
        assert_eq!(Price::parse_decimal("12abc34"), Price::from_cents(1200));
        assert_eq!(Price::parse_decimal("1.25.9"), Price::from_cents(125));
    }

    #[test]
    fn test_price_parse_decimal_negative_is_zero() {
        assert_eq!(Price::parse_decimal("-4"), Price::ZERO);
        assert_eq!(Price::parse_decimal("-0.01"), Price::ZERO);
        assert_eq!(Price::parse_decimal("+4"), Price::from_cents(400));
    }

    #[test]
    fn test_price_from_decimal_rejects_negative() {
        assert_eq!(Price::from_decimal(-3.0), Price::ZERO);
        assert_eq!(Price::from_decimal(f64::NAN), Price::ZERO);
        assert_eq!(Price::from_decimal(0.1 + 0.2), Price::from_cents(30));
    }

    #[test]
    fn test_price_clamped_to_max() {
        assert_eq!(Price::from_decimal(1e300), Price::MAX);
        assert_eq!(Price::from_cents(u64::MAX), Price::MAX);
        assert_eq!(Price::MAX.scale(1.5), Price::MAX);
        assert_eq!(Price::MAX.to_string(), "$1000000000.00");

        let total: Price = [Price::MAX, Price::MAX].iter().sum();
        assert_eq!(total.cents(), 2 * Price::MAX.cents());
        assert_eq!(Price(u64::MAX) + Price::MAX, Price(u64::MAX));
    }

    #[test]
    fn test_price_scale_rounds_to_cents() {
        assert_eq!(Price::from_cents(14500).scale(1.5), Price::from_cents(21750));
        assert_eq!(Price::from_cents(1).scale(1.5), Price::from_cents(2));
    }

    #[test]
    fn test_price_json_is_decimal() {
        let json = serde_json::to_string(&Price::from_cents(14550)).unwrap();
        assert_eq!(json, "145.5");

        let price: Price = serde_json::from_str("120").unwrap();
        assert_eq!(price, Price::from_cents(12000));
    }

    #[test]
    fn test_price_sum() {
        let prices = [Price::from_cents(100), Price::from_cents(250)];
        let total: Price = prices.iter().sum();
        assert_eq!(total, Price::from_cents(350));
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Men".parse::<Category>(), Ok(Category::Men));
        assert_eq!(" unisex ".parse::<Category>(), Ok(Category::Unisex));
        assert!("kids".parse::<Category>().is_err());
    }

    #[test]
    fn test_snapshot_is_independent_copy() {
        let mut product =
            Product::new("Ocean Mist", Price::from_cents(13000), Category::Men, "a.jpg");
        let snapshot = product.snapshot();
        product.price = Price::from_cents(1);
        assert_eq!(snapshot.price, Price::from_cents(13000));
        assert_eq!(snapshot.name, "Ocean Mist");
    }
}
