//! Canned catalog served by the mock listing API.

use super::model::{Agent, ListingStatus, Property, PropertyType};

struct PropertyRow {
    id: &'static str,
    title: &'static str,
    address: &'static str,
    city: &'static str,
    state: &'static str,
    zip: &'static str,
    price: u64,
    beds: u32,
    baths: f32,
    sqft: u32,
    kind: PropertyType,
    status: ListingStatus,
    listed_at: &'static str,
    agent_id: &'static str,
    description: &'static str,
    features: &'static [&'static str],
}

struct AgentRow {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    brokerage: &'static str,
    cities: &'static [&'static str],
}

const PROPERTIES: &[PropertyRow] = &[
    PropertyRow {
        id: "prop-1001",
        title: "Craftsman Bungalow in Bouldin Creek",
        address: "1204 S 3rd St",
        city: "Austin",
        state: "TX",
        zip: "78704",
        price: 825_000,
        beds: 3,
        baths: 2.0,
        sqft: 1_740,
        kind: PropertyType::House,
        status: ListingStatus::Active,
        listed_at: "2024-03-02",
        agent_id: "agent-01",
        description: "Restored 1930s bungalow with a deep front porch and detached studio.",
        features: &["porch", "studio", "hardwood floors"],
    },
    PropertyRow {
        id: "prop-1002",
        title: "Downtown High-Rise Condo",
        address: "300 Bowie St #2105",
        city: "Austin",
        state: "TX",
        zip: "78703",
        price: 615_000,
        beds: 2,
        baths: 2.0,
        sqft: 1_150,
        kind: PropertyType::Condo,
        status: ListingStatus::Active,
        listed_at: "2024-04-18",
        agent_id: "agent-01",
        description: "Corner unit on the 21st floor with lake views and a concierge building.",
        features: &["pool", "gym", "concierge", "balcony"],
    },
    PropertyRow {
        id: "prop-1003",
        title: "Mueller Townhome Near the Park",
        address: "4510 Berkman Dr",
        city: "Austin",
        state: "TX",
        zip: "78723",
        price: 549_900,
        beds: 3,
        baths: 2.5,
        sqft: 1_820,
        kind: PropertyType::Townhouse,
        status: ListingStatus::Pending,
        listed_at: "2024-02-11",
        agent_id: "agent-02",
        description: "Three-story townhome steps from Lake Park with a rooftop deck.",
        features: &["rooftop deck", "garage"],
    },
    PropertyRow {
        id: "prop-1004",
        title: "Hill Country Acreage",
        address: "17800 Hamilton Pool Rd",
        city: "Dripping Springs",
        state: "TX",
        zip: "78620",
        price: 390_000,
        beds: 0,
        baths: 0.0,
        sqft: 0,
        kind: PropertyType::Land,
        status: ListingStatus::Active,
        listed_at: "2024-01-09",
        agent_id: "agent-02",
        description: "Eight wooded acres with seasonal creek frontage, ready to build.",
        features: &["acreage", "creek"],
    },
    PropertyRow {
        id: "prop-2001",
        title: "Victorian in Capitol Hill",
        address: "1120 Pennsylvania St",
        city: "Denver",
        state: "CO",
        zip: "80203",
        price: 1_275_000,
        beds: 5,
        baths: 3.5,
        sqft: 3_600,
        kind: PropertyType::House,
        status: ListingStatus::Active,
        listed_at: "2024-04-01",
        agent_id: "agent-03",
        description: "Painted-lady Victorian with original woodwork and a carriage house.",
        features: &["carriage house", "fireplace", "garden"],
    },
    PropertyRow {
        id: "prop-2002",
        title: "LoHi Loft",
        address: "2500 Walnut St #402",
        city: "Denver",
        state: "CO",
        zip: "80205",
        price: 489_000,
        beds: 1,
        baths: 1.0,
        sqft: 920,
        kind: PropertyType::Condo,
        status: ListingStatus::Sold,
        listed_at: "2023-11-20",
        agent_id: "agent-03",
        description: "Exposed-brick loft with skyline views, close to Highland Bridge.",
        features: &["exposed brick", "parking"],
    },
    PropertyRow {
        id: "prop-2003",
        title: "Park Hill Duplex",
        address: "2233 Dexter St",
        city: "Denver",
        state: "CO",
        zip: "80207",
        price: 899_000,
        beds: 4,
        baths: 2.0,
        sqft: 2_400,
        kind: PropertyType::MultiFamily,
        status: ListingStatus::Active,
        listed_at: "2024-03-27",
        agent_id: "agent-03",
        description: "Side-by-side duplex, both units leased, separate meters.",
        features: &["income property", "separate meters"],
    },
    PropertyRow {
        id: "prop-3001",
        title: "Ballard Modern Farmhouse",
        address: "6415 24th Ave NW",
        city: "Seattle",
        state: "WA",
        zip: "98107",
        price: 1_150_000,
        beds: 4,
        baths: 3.0,
        sqft: 2_650,
        kind: PropertyType::House,
        status: ListingStatus::Active,
        listed_at: "2024-04-12",
        agent_id: "agent-04",
        description: "New construction with an ADU over the garage and a south-facing yard.",
        features: &["adu", "garage", "solar"],
    },
    PropertyRow {
        id: "prop-3002",
        title: "Capitol Hill Studio",
        address: "1530 Bellevue Ave #310",
        city: "Seattle",
        state: "WA",
        zip: "98122",
        price: 365_000,
        beds: 0,
        baths: 1.0,
        sqft: 480,
        kind: PropertyType::Condo,
        status: ListingStatus::Active,
        listed_at: "2024-03-15",
        agent_id: "agent-04",
        description: "Efficient studio in a brick classic, walkable to light rail.",
        features: &["laundry in building"],
    },
    PropertyRow {
        id: "prop-3003",
        title: "Fremont Townhouse",
        address: "3618 Palatine Ave N",
        city: "Seattle",
        state: "WA",
        zip: "98103",
        price: 949_000,
        beds: 3,
        baths: 2.5,
        sqft: 1_690,
        kind: PropertyType::Townhouse,
        status: ListingStatus::Pending,
        listed_at: "2024-02-29",
        agent_id: "agent-04",
        description: "Rooftop deck with Space Needle views and a one-car garage.",
        features: &["rooftop deck", "garage", "ev charger"],
    },
    PropertyRow {
        id: "prop-4001",
        title: "Alberta Arts Foursquare",
        address: "1725 NE Going St",
        city: "Portland",
        state: "OR",
        zip: "97211",
        price: 715_000,
        beds: 4,
        baths: 2.0,
        sqft: 2_280,
        kind: PropertyType::House,
        status: ListingStatus::Active,
        listed_at: "2024-04-05",
        agent_id: "agent-02",
        description: "Classic Portland foursquare with a finished basement and mature garden.",
        features: &["basement", "garden", "fireplace"],
    },
    PropertyRow {
        id: "prop-4002",
        title: "Pearl District Condo",
        address: "1001 NW Lovejoy St #612",
        city: "Portland",
        state: "OR",
        zip: "97209",
        price: 529_000,
        beds: 2,
        baths: 2.0,
        sqft: 1_080,
        kind: PropertyType::Condo,
        status: ListingStatus::Sold,
        listed_at: "2023-12-04",
        agent_id: "agent-01",
        description: "Bright two-bedroom near Jamison Square with secure parking.",
        features: &["parking", "gym", "balcony"],
    },
];

const AGENTS: &[AgentRow] = &[
    AgentRow {
        id: "agent-01",
        name: "Maya Delgado",
        email: "maya.delgado@example.com",
        phone: "512-555-0141",
        brokerage: "Lone Star Realty",
        cities: &["Austin", "Portland"],
    },
    AgentRow {
        id: "agent-02",
        name: "Jordan Whitaker",
        email: "jordan.whitaker@example.com",
        phone: "512-555-0177",
        brokerage: "Hill Country Homes",
        cities: &["Austin", "Dripping Springs", "Portland"],
    },
    AgentRow {
        id: "agent-03",
        name: "Priya Raman",
        email: "priya.raman@example.com",
        phone: "303-555-0123",
        brokerage: "Front Range Properties",
        cities: &["Denver"],
    },
    AgentRow {
        id: "agent-04",
        name: "Sam Okafor",
        email: "sam.okafor@example.com",
        phone: "206-555-0190",
        brokerage: "Sound & Summit Realty",
        cities: &["Seattle"],
    },
];

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub(super) fn properties() -> Vec<Property> {
    PROPERTIES
        .iter()
        .map(|row| Property {
            id: row.id.to_string(),
            title: row.title.to_string(),
            address: row.address.to_string(),
            city: row.city.to_string(),
            state: row.state.to_string(),
            zip: row.zip.to_string(),
            price: row.price,
            beds: row.beds,
            baths: row.baths,
            sqft: row.sqft,
            property_type: row.kind,
            status: row.status,
            listed_at: row.listed_at.to_string(),
            agent_id: row.agent_id.to_string(),
            description: row.description.to_string(),
            features: strings(row.features),
        })
        .collect()
}

/// Agents with `listing_ids` filled from the active listings in `properties`.
pub(super) fn agents(properties: &[Property]) -> Vec<Agent> {
    AGENTS
        .iter()
        .map(|row| Agent {
            id: row.id.to_string(),
            name: row.name.to_string(),
            email: row.email.to_string(),
            phone: row.phone.to_string(),
            brokerage: row.brokerage.to_string(),
            cities: strings(row.cities),
            listing_ids: properties
                .iter()
                .filter(|p| p.agent_id == row.id && p.status == ListingStatus::Active)
                .map(|p| p.id.clone())
                .collect(),
        })
        .collect()
}
