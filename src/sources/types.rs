use crate::models::{City, Review};
use serde::{Deserialize, Serialize};

/// A frozen copy of the dataset, as stored in snapshot files
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub cities: Vec<City>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}
