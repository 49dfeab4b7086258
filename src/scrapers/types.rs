use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Trade type filter accepted by the listings API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeType {
    /// 매매
    Sale,
    /// 전세
    Lease,
    /// 월세
    MonthlyRent,
}

impl TradeType {
    pub fn code(&self) -> &'static str {
        match self {
            TradeType::Sale => "A1",
            TradeType::Lease => "B1",
            TradeType::MonthlyRent => "B2",
        }
    }

    /// Label used in snapshot file names
    pub fn label(&self) -> &'static str {
        match self {
            TradeType::Sale => "매매",
            TradeType::Lease => "전세",
            TradeType::MonthlyRent => "월세",
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TradeType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A1" | "매매" => Ok(TradeType::Sale),
            "B1" | "전세" => Ok(TradeType::Lease),
            "B2" | "월세" => Ok(TradeType::MonthlyRent),
            other => Err(ConfigError::TradeType(other.to_string())),
        }
    }
}

/// Query parameters shared by every page of a crawl
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    /// Complex number, also part of the endpoint path
    pub complex_no: String,
    /// Real-estate type filter, colon separated
    pub real_estate_type: String,
    pub trade_type: TradeType,
    pub price_type: String,
    pub order: String,
    /// Send the broad price/area filters along with the core parameters
    pub full_filters: bool,
    pub price_min: u64,
    pub price_max: u64,
    pub rent_price_min: u64,
    pub rent_price_max: u64,
    pub area_min: u64,
    pub area_max: u64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            complex_no: "107024".to_string(),
            real_estate_type: "APT:PRE:ABYG:JGC".to_string(),
            trade_type: TradeType::Lease,
            price_type: "RETAIL".to_string(),
            order: "rank".to_string(),
            full_filters: false,
            price_min: 0,
            price_max: 900_000_000,
            rent_price_min: 0,
            rent_price_max: 900_000_000,
            area_min: 0,
            area_max: 900_000_000,
        }
    }
}

impl SearchParams {
    pub fn page(&self, page: u32) -> PageRequest<'_> {
        PageRequest { params: self, page }
    }
}

/// One page of a search. Pages differ only in their number.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest<'a> {
    pub params: &'a SearchParams,
    pub page: u32,
}

impl PageRequest<'_> {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let p = self.params;
        let mut pairs = vec![
            ("realEstateType", p.real_estate_type.clone()),
            ("tradeType", p.trade_type.code().to_string()),
        ];

        if p.full_filters {
            pairs.extend([
                ("tag", "::::::::".to_string()),
                ("rentPriceMin", p.rent_price_min.to_string()),
                ("rentPriceMax", p.rent_price_max.to_string()),
                ("priceMin", p.price_min.to_string()),
                ("priceMax", p.price_max.to_string()),
                ("areaMin", p.area_min.to_string()),
                ("areaMax", p.area_max.to_string()),
                ("oldBuildYears", String::new()),
                ("recentlyBuildYears", String::new()),
                ("minHouseHoldCount", String::new()),
                ("maxHouseHoldCount", String::new()),
                ("showArticle", "false".to_string()),
                ("sameAddressGroup", "false".to_string()),
                ("minMaintenanceCost", String::new()),
                ("maxMaintenanceCost", String::new()),
                ("directions", String::new()),
                ("buildingNos", String::new()),
                ("areaNos", String::new()),
                ("type", "list".to_string()),
            ]);
        }

        pairs.extend([
            ("priceType", p.price_type.clone()),
            ("page", self.page.to_string()),
            ("complexNo", p.complex_no.clone()),
            ("order", p.order.clone()),
        ]);

        pairs
    }
}
