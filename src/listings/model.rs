use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    House,
    Condo,
    Townhouse,
    Land,
    MultiFamily,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Active,
    Pending,
    Sold,
}

/// A property listing as served by the listing API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub title: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    /// Whole dollars.
    pub price: u64,
    pub beds: u32,
    pub baths: f32,
    pub sqft: u32,
    pub property_type: PropertyType,
    pub status: ListingStatus,
    /// `YYYY-MM-DD`; sorts lexically.
    pub listed_at: String,
    pub agent_id: String,
    pub description: String,
    pub features: Vec<String>,
}

/// A listing agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub brokerage: String,
    pub cities: Vec<String>,
    /// Active listings represented by this agent, derived from the catalog.
    pub listing_ids: Vec<String>,
}

/// One page of results plus the unpaged match count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub items: Vec<T>,
}

/// Unpaged result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List<T> {
    pub total: usize,
    pub items: Vec<T>,
}
