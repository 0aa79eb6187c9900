//! Workshop type definitions

use serde::Serialize;

use super::Coordinate;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workshop {
    /// Workshop location name
    pub name: String,
    pub position: Coordinate,
    pub pincode: Option<String>,
}
