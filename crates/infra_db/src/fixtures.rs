//! JSON fixture loading
//!
//! The fixture backend reads its tables from a directory:
//!
//! | file | required |
//! | --- | --- |
//! | `users.json` | yes |
//! | `properties.json` | yes |
//! | `reservations.json` | no |
//! | `property_reviews.json` | no |
//!
//! Each file holds either a JSON array of records or an object mapping ids
//! to records. Records carry their own `id`; map keys are ignored.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use domain_booking::{Property, PropertyReview, Reservation, User};

pub const USERS_FILE: &str = "users.json";
pub const PROPERTIES_FILE: &str = "properties.json";
pub const RESERVATIONS_FILE: &str = "reservations.json";
pub const REVIEWS_FILE: &str = "property_reviews.json";

/// Errors raised while loading fixtures
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse fixture {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate {entity} id {id} in fixtures")]
    DuplicateId {
        entity: &'static str,
        id: i32,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Records<T> {
    List(Vec<T>),
    Keyed(BTreeMap<String, T>),
}

impl<T> Records<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Records::List(records) => records,
            Records::Keyed(records) => records.into_values().collect(),
        }
    }
}

/// The four tables backing the fixture adapter
#[derive(Debug, Clone, Default)]
pub struct FixtureSet {
    pub users: Vec<User>,
    pub properties: Vec<Property>,
    pub reservations: Vec<Reservation>,
    pub reviews: Vec<PropertyReview>,
}

impl FixtureSet {
    /// Decodes users and properties from JSON text
    pub fn from_json(users: &str, properties: &str) -> Result<Self, FixtureError> {
        let set = Self {
            users: decode(USERS_FILE, users)?,
            properties: decode(PROPERTIES_FILE, properties)?,
            ..Default::default()
        };
        set.check_unique_ids()?;
        Ok(set)
    }

    /// Adds reservations decoded from JSON text
    pub fn with_reservations_json(mut self, reservations: &str) -> Result<Self, FixtureError> {
        self.reservations = decode(RESERVATIONS_FILE, reservations)?;
        self.check_unique_ids()?;
        Ok(self)
    }

    /// Adds reviews decoded from JSON text
    pub fn with_reviews_json(mut self, reviews: &str) -> Result<Self, FixtureError> {
        self.reviews = decode(REVIEWS_FILE, reviews)?;
        Ok(self)
    }

    /// Loads every fixture file found in `dir`
    ///
    /// # Errors
    ///
    /// Fails if a required file is missing or any file is malformed.
    pub async fn load_dir(dir: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let dir = dir.as_ref();
        info!(dir = %dir.display(), "Loading booking fixtures");

        let set = Self {
            users: read_records(dir, USERS_FILE, true).await?,
            properties: read_records(dir, PROPERTIES_FILE, true).await?,
            reservations: read_records(dir, RESERVATIONS_FILE, false).await?,
            reviews: read_records(dir, REVIEWS_FILE, false).await?,
        };
        set.check_unique_ids()?;

        info!(
            users = set.users.len(),
            properties = set.properties.len(),
            reservations = set.reservations.len(),
            reviews = set.reviews.len(),
            "Fixtures loaded"
        );
        Ok(set)
    }

    fn check_unique_ids(&self) -> Result<(), FixtureError> {
        unique("user", self.users.iter().map(|u| u.id.value()))?;
        unique("property", self.properties.iter().map(|p| p.id.value()))?;
        unique("reservation", self.reservations.iter().map(|r| r.id.value()))
    }
}

fn unique(entity: &'static str, ids: impl Iterator<Item = i32>) -> Result<(), FixtureError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(FixtureError::DuplicateId { entity, id });
        }
    }
    Ok(())
}

fn decode<T: DeserializeOwned>(name: &str, json: &str) -> Result<Vec<T>, FixtureError> {
    serde_json::from_str::<Records<T>>(json)
        .map(Records::into_vec)
        .map_err(|source| FixtureError::Parse {
            name: name.to_string(),
            source,
        })
}

async fn read_records<T: DeserializeOwned>(
    dir: &Path,
    name: &str,
    required: bool,
) -> Result<Vec<T>, FixtureError> {
    let path = dir.join(name);
    match tokio::fs::read_to_string(&path).await {
        Ok(json) => decode(name, &json),
        Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "Optional fixture absent");
            Ok(Vec::new())
        }
        Err(source) => Err(FixtureError::Io { path, source }),
    }
}
