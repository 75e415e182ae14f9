//! Mock listing data.
//!
//! An in-memory catalog of properties and agents with the filtering the
//! listing API exposes. Not a persistence layer: the data is fixed.

mod fixtures;
mod model;
mod query;

pub use model::{Agent, List, ListingStatus, Page, Property, PropertyType};
pub use query::{AgentQuery, PropertyQuery, PropertySort, QueryError};

/// Paging bounds applied to property searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
        }
    }
}

impl Paging {
    /// Requested limit clamped to `1..=max_limit`.
    pub fn limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit.max(1))
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    properties: Vec<Property>,
    agents: Vec<Agent>,
}

impl Catalog {
    pub fn new(properties: Vec<Property>, agents: Vec<Agent>) -> Self {
        Self { properties, agents }
    }

    /// The built-in demo catalog.
    pub fn fixture() -> Self {
        let properties = fixtures::properties();
        let agents = fixtures::agents(&properties);
        Self::new(properties, agents)
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn property(&self, id: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == id)
    }

    pub fn agent(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Filter, sort and page the properties.
    pub fn search_properties(
        &self,
        query: &PropertyQuery,
        paging: Paging,
    ) -> Result<Page<Property>, QueryError> {
        query.validate()?;

        let mut matches: Vec<Property> = self
            .properties
            .iter()
            .filter(|p| query.matches(p))
            .cloned()
            .collect();
        query.sort(&mut matches);

        let total = matches.len();
        let limit = paging.limit(query.limit);
        let offset = query.offset.unwrap_or(0);
        let items = matches.into_iter().skip(offset).take(limit).collect();

        Ok(Page {
            total,
            limit,
            offset,
            items,
        })
    }

    pub fn search_agents(&self, query: &AgentQuery) -> List<Agent> {
        let items: Vec<Agent> = self
            .agents
            .iter()
            .filter(|a| query.matches(a))
            .cloned()
            .collect();
        List {
            total: items.len(),
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(page: &Page<Property>) -> Vec<&str> {
        page.items.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_fixture_shape() {
        let catalog = Catalog::fixture();
        assert_eq!(catalog.properties().len(), 12);
        assert_eq!(catalog.agents().len(), 4);
        for property in catalog.properties() {
            assert!(catalog.agent(&property.agent_id).is_some(), "{}", property.id);
        }
    }

    #[test]
    fn test_agent_listing_ids_are_active_only() {
        let catalog = Catalog::fixture();
        let agent = catalog.agent("agent-01").unwrap();
        assert_eq!(agent.listing_ids, vec!["prop-1001", "prop-1002"]);
    }

    #[test]
    fn test_no_filters_returns_everything() {
        let catalog = Catalog::fixture();
        let page = catalog
            .search_properties(&PropertyQuery::default(), Paging::default())
            .unwrap();
        assert_eq!(page.total, 12);
        assert_eq!(page.items.len(), 12);
        assert_eq!(page.limit, 20);
    }

    #[test]
    fn test_city_filter_case_insensitive() {
        let catalog = Catalog::fixture();
        let query = PropertyQuery {
            city: Some("austin".to_string()),
            ..Default::default()
        };
        let page = catalog.search_properties(&query, Paging::default()).unwrap();
        assert_eq!(ids(&page), vec!["prop-1001", "prop-1002", "prop-1003"]);
    }

    #[test]
    fn test_price_beds_baths() {
        let catalog = Catalog::fixture();
        let query = PropertyQuery {
            min_price: Some(700_000),
            max_price: Some(1_000_000),
            beds: Some(4),
            baths: Some(2.0),
            ..Default::default()
        };
        let page = catalog.search_properties(&query, Paging::default()).unwrap();
        assert_eq!(ids(&page), vec!["prop-2003", "prop-4001"]);
    }

    #[test]
    fn test_type_and_status() {
        let catalog = Catalog::fixture();
        let query = PropertyQuery {
            property_type: Some(PropertyType::Condo),
            status: Some(ListingStatus::Sold),
            ..Default::default()
        };
        let page = catalog.search_properties(&query, Paging::default()).unwrap();
        assert_eq!(ids(&page), vec!["prop-2002", "prop-4002"]);
    }

    #[test]
    fn test_free_text() {
        let catalog = Catalog::fixture();
        let query = PropertyQuery {
            q: Some("  ROOFTOP ".to_string()),
            ..Default::default()
        };
        let page = catalog.search_properties(&query, Paging::default()).unwrap();
        assert_eq!(ids(&page), vec!["prop-1003", "prop-3003"]);
    }

    #[test]
    fn test_sort_and_paging() {
        let catalog = Catalog::fixture();
        let query = PropertyQuery {
            sort: Some(PropertySort::PriceDesc),
            limit: Some(2),
            offset: Some(1),
            ..Default::default()
        };
        let page = catalog.search_properties(&query, Paging::default()).unwrap();
        assert_eq!(page.total, 12);
        assert_eq!(ids(&page), vec!["prop-3001", "prop-3003"]);

        let newest = PropertyQuery {
            sort: Some(PropertySort::Newest),
            limit: Some(1),
            ..Default::default()
        };
        let page = catalog.search_properties(&newest, Paging::default()).unwrap();
        assert_eq!(ids(&page), vec!["prop-1002"]);
    }

    #[test]
    fn test_limit_clamped() {
        let paging = Paging {
            default_limit: 5,
            max_limit: 10,
        };
        assert_eq!(paging.limit(None), 5);
        assert_eq!(paging.limit(Some(0)), 1);
        assert_eq!(paging.limit(Some(500)), 10);
    }

    #[test]
    fn test_offset_past_end() {
        let catalog = Catalog::fixture();
        let query = PropertyQuery {
            offset: Some(50),
            ..Default::default()
        };
        let page = catalog.search_properties(&query, Paging::default()).unwrap();
        assert_eq!(page.total, 12);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_inverted_price_range_rejected() {
        let catalog = Catalog::fixture();
        let query = PropertyQuery {
            min_price: Some(10),
            max_price: Some(5),
            ..Default::default()
        };
        assert_eq!(
            catalog.search_properties(&query, Paging::default()),
            Err(QueryError::PriceRange { min: 10, max: 5 })
        );
    }

    #[test]
    fn test_non_finite_baths_rejected() {
        let catalog = Catalog::fixture();
        for baths in [f32::NAN, f32::INFINITY, -0.5] {
            let query = PropertyQuery {
                baths: Some(baths),
                ..Default::default()
            };
            assert_eq!(
                catalog.search_properties(&query, Paging::default()),
                Err(QueryError::OutOfRange { field: "baths" }),
                "{}",
                baths
            );
        }
    }

    #[test]
    fn test_agent_search() {
        let catalog = Catalog::fixture();

        let by_city = catalog.search_agents(&AgentQuery {
            q: None,
            city: Some("portland".to_string()),
        });
        assert_eq!(by_city.total, 2);

        let by_name = catalog.search_agents(&AgentQuery {
            q: Some("front range".to_string()),
            city: None,
        });
        assert_eq!(by_name.items[0].id, "agent-03");
    }
}
