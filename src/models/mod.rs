use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::price::parse_price;

/// A single listing object as returned in `articleList`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawListing(pub Map<String, Value>);

impl RawListing {
    /// Read a field as display text. Missing and null fields read as empty.
    pub fn field(&self, key: &str) -> String {
        match self.0.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Listing with its price converted to won and stamped with the run date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedListing {
    pub article_no: String,
    pub article_name: String,
    pub real_estate_type: String,
    pub trade_type: String,
    pub price_text: String,
    pub price: i64,
    pub exclusive_area: String,
    pub supply_area: String,
    pub direction: String,
    pub floor_info: String,
    pub run_date: NaiveDate,
}

impl NormalizedListing {
    pub fn from_raw(raw: &RawListing, run_date: NaiveDate) -> Self {
        let price_text = raw.field("dealOrWarrantPrc");
        let price = parse_price(&price_text);

        Self {
            article_no: raw.field("articleNo"),
            article_name: raw.field("articleName"),
            real_estate_type: raw.field("realEstateTypeName"),
            trade_type: raw.field("tradeTypeName"),
            price_text,
            price,
            exclusive_area: raw.field("area1"),
            supply_area: raw.field("area2"),
            direction: raw.field("direction"),
            floor_info: raw.field("floorInfo"),
            run_date,
        }
    }
}

/// Everything collected during one run, in page order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlResult {
    pub listings: Vec<NormalizedListing>,
    pub pages_requested: u32,
    pub pages_succeeded: u32,
    pub pages_failed: u32,
}

impl CrawlResult {
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// True when at least one page of the range came back usable,
    /// even if it held no listings.
    pub fn any_page_succeeded(&self) -> bool {
        self.pages_succeeded > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawListing {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn field_stringifies_scalars() {
        let listing = raw(json!({
            "articleNo": "2412345678",
            "area1": 84,
            "area2": 112.5,
            "sameAddrHasYn": true,
            "direction": null
        }));

        assert_eq!(listing.field("articleNo"), "2412345678");
        assert_eq!(listing.field("area1"), "84");
        assert_eq!(listing.field("area2"), "112.5");
        assert_eq!(listing.field("sameAddrHasYn"), "true");
        assert_eq!(listing.field("direction"), "");
        assert_eq!(listing.field("floorInfo"), "");
    }

    #[test]
    fn normalizes_price_and_stamps_date() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 15).unwrap();
        let listing = raw(json!({
            "articleNo": "1",
            "articleName": "센텀팰리스 101동",
            "realEstateTypeName": "아파트",
            "tradeTypeName": "전세",
            "dealOrWarrantPrc": "5억 8,000",
            "area1": 84,
            "area2": 112,
            "direction": "남향",
            "floorInfo": "12/25"
        }));

        let normalized = NormalizedListing::from_raw(&listing, date);

        assert_eq!(normalized.price, 580_000_000);
        assert_eq!(normalized.price_text, "5억 8,000");
        assert_eq!(normalized.exclusive_area, "84");
        assert_eq!(normalized.floor_info, "12/25");
        assert_eq!(normalized.run_date, date);
    }

    #[test]
    fn missing_price_is_zero() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 15).unwrap();
        let normalized = NormalizedListing::from_raw(&raw(json!({"articleNo": "9"})), date);

        assert_eq!(normalized.price, 0);
        assert_eq!(normalized.price_text, "");
    }
}
