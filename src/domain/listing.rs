use serde::{Deserialize, Serialize};

/// One search result from a listing page. Field order is the serialized key
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub title: String,
    pub location: String,
    pub address: String,
    pub link: String,
}
