//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Section, Station};
use crate::store::LineDetails;

/// Request to create a station.
#[derive(Debug, Deserialize)]
pub struct CreateStationRequest {
    pub name: String,
}

/// A station in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationResponse {
    pub id: u64,
    pub name: String,
}

impl From<Station> for StationResponse {
    fn from(station: Station) -> Self {
        Self {
            id: station.id.0,
            name: station.name,
        }
    }
}

/// Request to create a line with its first section.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLineRequest {
    pub name: String,
    pub color: String,
    pub up_station_id: u64,
    pub down_station_id: u64,
    /// Checked for positivity by the handler.
    pub distance: i64,
}

/// Request to rename or recolor a line.
#[derive(Debug, Deserialize)]
pub struct UpdateLineRequest {
    pub name: String,
    pub color: String,
}

/// A line with its stations in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineResponse {
    pub id: u64,
    pub name: String,
    pub color: String,
    /// Stations from one terminus to the other.
    pub stations: Vec<StationResponse>,
    /// Total length of the line.
    pub distance: u64,
}

impl From<LineDetails> for LineResponse {
    fn from(line: LineDetails) -> Self {
        Self {
            id: line.id.0,
            name: line.name,
            color: line.color,
            stations: line.stations.into_iter().map(Into::into).collect(),
            distance: line.distance,
        }
    }
}

/// Request to add a section to a line.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRequest {
    pub up_station_id: u64,
    pub down_station_id: u64,
    /// Checked for positivity by the handler.
    pub distance: i64,
}

/// Query string for removing a station from a line.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveStationQuery {
    pub station_id: u64,
}

/// A section in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionResponse {
    pub up_station_id: u64,
    pub down_station_id: u64,
    pub distance: u32,
}

impl From<Section> for SectionResponse {
    fn from(section: Section) -> Self {
        Self {
            up_station_id: section.up().0,
            down_station_id: section.down().0,
            distance: section.distance().get(),
        }
    }
}

/// Error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
