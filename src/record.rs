//! Record shapes shared by the catalog and the external retriever.
//!
//! `Record` is the local, display-ready entity. `ExternalRecord` mirrors the
//! PascalCase objects a tool server sends back; it is decoded leniently and
//! converted into a `Record` once a usable name is known.

use serde::{Deserialize, Serialize};

/// One monkey entry as shown to the user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub species: String,
    pub location: String,
    pub population: u32,
    pub description: String,
    pub image_url: String,
    /// Map position, only known for server records that report both parts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Record {
    /// Case-insensitive identity check against `name`.
    pub fn is_named(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }
}

/// Wire-level record as produced by a tool server.
///
/// Every field is optional on the wire. Type mismatches (for example a
/// negative `Population`) fail deserialization of the whole item, which the
/// retriever treats as "skip this item".
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ExternalRecord {
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Location", default)]
    pub location: Option<String>,
    #[serde(rename = "Details", default)]
    pub details: Option<String>,
    #[serde(rename = "Population", default)]
    pub population: Option<u32>,
    #[serde(rename = "Image", default)]
    pub image: Option<String>,
    #[serde(rename = "Latitude", default)]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude", default)]
    pub longitude: Option<f64>,
}

impl ExternalRecord {
    /// The trimmed name, or `None` when the record cannot be identified.
    pub fn usable_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Convert into the local shape. Returns `None` without a usable name.
    pub fn into_record(self) -> Option<Record> {
        let name = self.usable_name()?.to_string();
        Some(Record {
            species: species_for_name(&name).to_string(),
            name,
            location: self.location.unwrap_or_default(),
            population: self.population.unwrap_or_default(),
            description: self.details.unwrap_or_default(),
            image_url: self.image.unwrap_or_default(),
            coordinates: match (self.latitude, self.longitude) {
                (Some(latitude), Some(longitude)) => Some(Coordinates {
                    latitude,
                    longitude,
                }),
                _ => None,
            },
        })
    }
}

// Servers do not report species; these are the genera we can infer from a
// bare common name. Anything else keeps its own name as a placeholder.
const SPECIES_BY_NAME: &[(&str, &str)] = &[
    ("baboon", "Papio"),
    ("capuchin", "Cebus"),
    ("macaque", "Macaca"),
    ("mandrill", "Mandrillus sphinx"),
    ("tamarin", "Saguinus"),
];

/// Derive a species from a common name, falling back to the name itself.
pub fn species_for_name(name: &str) -> &str {
    SPECIES_BY_NAME
        .iter()
        .find(|(common, _)| names_match(common, name))
        .map(|(_, species)| *species)
        .unwrap_or(name)
}

/// Case-insensitive, allocation-free name comparison.
pub fn names_match(left: &str, right: &str) -> bool {
    left.chars()
        .flat_map(char::to_lowercase)
        .eq(right.chars().flat_map(char::to_lowercase))
}
