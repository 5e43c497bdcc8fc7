use url::form_urlencoded;

use super::cart::LineItem;
use super::product::{Price, ProductSnapshot};

/// Page the product detail view lives on
pub const PRODUCT_PAGE: &str = "product.html";

const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Link to the detail page for a product:
/// `product.html?name=<name>&price=<2dp>&img=<image>`
pub fn product_url(name: &str, price: Price, image: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("name", name)
        .append_pair("price", &price.to_fixed())
        .append_pair("img", image)
        .finish();
    format!("{}?{}", PRODUCT_PAGE, query)
}

/// Detail-page parameters decoded from a link. All fields are untrusted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub name: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
}

impl ProductQuery {
    /// Parse either a bare query string (`name=..&price=..`), one with a
    /// leading `?`, or a whole `product.html?...` link. Empty values count
    /// as missing.
    pub fn parse(input: &str) -> Self {
        let query = match input.split_once('?') {
            Some((_, query)) => query,
            None => input,
        };

        let mut parsed = ProductQuery::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "name" => parsed.name = Some(value.into_owned()),
                "price" => parsed.price = Some(value.into_owned()),
                "img" => parsed.image = Some(value.into_owned()),
                _ => {}
            }
        }
        parsed
    }

    /// Decimal price, zero when missing, unparsable or negative
    pub fn price(&self) -> Price {
        self.price
            .as_deref()
            .map(Price::parse_decimal)
            .unwrap_or(Price::ZERO)
    }

    /// The viewed product, when the link carried all three fields
    pub fn snapshot(&self) -> Option<ProductSnapshot> {
        match (&self.name, &self.price, &self.image) {
            (Some(name), Some(_), Some(image)) => {
                Some(ProductSnapshot::new(name.clone(), self.price(), image.clone()))
            }
            _ => None,
        }
    }

    /// Cart entry for the detail page's add button, with placeholders for
    /// anything the link left out
    pub fn line_item(&self) -> LineItem {
        LineItem::new(
            self.name.as_deref().unwrap_or(UNKNOWN_PRODUCT),
            self.price(),
            self.image.as_deref().unwrap_or(""),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_url_round_trip() {
        let url = product_url(
            "Leather & Smoke",
            Price::from_cents(22000),
            "https://img.example/a.jpg?w=800&fit=crop",
        );
        assert!(url.starts_with("product.html?name=Leather+%26+Smoke&price=220.00&img="));

        let query = ProductQuery::parse(&url);
        assert_eq!(query.name.as_deref(), Some("Leather & Smoke"));
        assert_eq!(query.price(), Price::from_cents(22000));
        assert_eq!(
            query.image.as_deref(),
            Some("https://img.example/a.jpg?w=800&fit=crop")
        );
    }

    #[test]
    fn test_parse_percent_encoded_spaces() {
        let query = ProductQuery::parse("?name=Ocean%20Mist&price=130.00&img=x.jpg");
        assert_eq!(query.name.as_deref(), Some("Ocean Mist"));
        let snapshot = query.snapshot().unwrap();
        assert_eq!(snapshot.price, Price::from_cents(13000));
    }

    #[test]
    fn test_bad_price_defaults_to_zero() {
        let query = ProductQuery::parse("name=Ocean+Mist&price=abc&img=x.jpg");
        assert_eq!(query.price(), Price::ZERO);
        assert_eq!(query.snapshot().unwrap().price, Price::ZERO);
    }

    #[test]
    fn test_price_reads_leading_decimal() {
        let price = |raw: &str| ProductQuery::parse(&format!("price={}", raw)).price();
        assert_eq!(price("1e3"), Price::from_cents(100_000));
        assert_eq!(price("12abc34"), Price::from_cents(1200));
        assert_eq!(price("-4"), Price::ZERO);
        assert_eq!(price("%24145.00"), Price::ZERO);
        assert_eq!(price("99.5"), Price::from_cents(9950));
    }

    #[test]
    fn test_incomplete_query_has_no_snapshot() {
        let query = ProductQuery::parse("name=Ocean+Mist&img=");
        assert!(query.snapshot().is_none());
        assert!(query.image.is_none());

        let item = query.line_item();
        assert_eq!(item.title, "Ocean Mist");
        assert_eq!(item.price, Price::ZERO);
        assert_eq!(item.image_src, "");
    }

    #[test]
    fn test_empty_query_line_item_placeholders() {
        let item = ProductQuery::parse("").line_item();
        assert_eq!(item.title, "Unknown Product");
    }
}
