//! Filters for the listing endpoints.

use serde::Deserialize;
use thiserror::Error;

use super::model::{Agent, ListingStatus, Property, PropertyType};

#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    #[error("minPrice ({min}) is greater than maxPrice ({max})")]
    PriceRange { min: u64, max: u64 },

    #[error("{field} must be a finite, non-negative number")]
    OutOfRange { field: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertySort {
    PriceAsc,
    PriceDesc,
    Newest,
}

/// Query string accepted by `GET /properties`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyQuery {
    pub city: Option<String>,
    pub state: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    /// Minimum bedrooms.
    pub beds: Option<u32>,
    /// Minimum bathrooms.
    pub baths: Option<f32>,
    pub property_type: Option<PropertyType>,
    pub status: Option<ListingStatus>,
    pub agent_id: Option<String>,
    /// Free-text search over title, address, city and description.
    pub q: Option<String>,
    pub sort: Option<PropertySort>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl PropertyQuery {
    pub fn validate(&self) -> Result<(), QueryError> {
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(QueryError::PriceRange { min, max });
            }
        }
        if self.baths.is_some_and(|baths| !baths.is_finite() || baths < 0.0) {
            return Err(QueryError::OutOfRange { field: "baths" });
        }
        Ok(())
    }

    pub fn matches(&self, property: &Property) -> bool {
        if let Some(city) = &self.city {
            if !property.city.eq_ignore_ascii_case(city.trim()) {
                return false;
            }
        }
        if let Some(state) = &self.state {
            if !property.state.eq_ignore_ascii_case(state.trim()) {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| property.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| property.price > max) {
            return false;
        }
        if self.beds.is_some_and(|beds| property.beds < beds) {
            return false;
        }
        if self.baths.is_some_and(|baths| property.baths < baths) {
            return false;
        }
        if self.property_type.is_some_and(|kind| property.property_type != kind) {
            return false;
        }
        if self.status.is_some_and(|status| property.status != status) {
            return false;
        }
        if let Some(agent_id) = &self.agent_id {
            if &property.agent_id != agent_id {
                return false;
            }
        }
        if let Some(q) = self.search_term() {
            let haystacks = [
                &property.title,
                &property.address,
                &property.city,
                &property.description,
            ];
            if !haystacks.iter().any(|h| h.to_lowercase().contains(&q)) {
                return false;
            }
        }
        true
    }

    /// Order `properties` in place. Without a sort key the catalog order is kept.
    pub fn sort(&self, properties: &mut [Property]) {
        match self.sort {
            Some(PropertySort::PriceAsc) => properties.sort_by_key(|p| p.price),
            Some(PropertySort::PriceDesc) => properties.sort_by(|a, b| b.price.cmp(&a.price)),
            Some(PropertySort::Newest) => {
                properties.sort_by(|a, b| b.listed_at.cmp(&a.listed_at))
            }
            None => {}
        }
    }

    fn search_term(&self) -> Option<String> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }
}

/// Query string accepted by `GET /agents`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentQuery {
    /// Case-insensitive substring of name or brokerage.
    pub q: Option<String>,
    /// Agents serving this city.
    pub city: Option<String>,
}

impl AgentQuery {
    pub fn matches(&self, agent: &Agent) -> bool {
        if let Some(q) = self.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let q = q.to_lowercase();
            if !agent.name.to_lowercase().contains(&q)
                && !agent.brokerage.to_lowercase().contains(&q)
            {
                return false;
            }
        }
        if let Some(city) = &self.city {
            if !agent.cities.iter().any(|c| c.eq_ignore_ascii_case(city.trim())) {
                return false;
            }
        }
        true
    }
}
