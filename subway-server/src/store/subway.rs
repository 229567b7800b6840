//! The station and line registry.

use std::collections::BTreeMap;

use tokio::sync::RwLock;
use tracing::{debug, info};

use super::error::StoreError;
use super::snapshot::{Snapshot, SnapshotFile, SnapshotLine};
use crate::domain::{Distance, Line, LineId, Section, Station, StationId};
use crate::sections::Sections;

/// A line with its stations resolved and in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDetails {
    pub id: LineId,
    pub name: String,
    pub color: String,
    /// Stations from head to tail.
    pub stations: Vec<Station>,
    /// Sum of all section lengths.
    pub distance: u64,
}

#[derive(Debug, Clone, Default)]
struct Registry {
    stations: BTreeMap<StationId, Station>,
    lines: BTreeMap<LineId, Line>,
    next_station_id: u64,
    next_line_id: u64,
}

/// Thread-safe registry of stations and lines.
///
/// Every change takes the write lock for its whole duration, so changes to
/// a line's sections are applied one at a time. A change is made on a copy
/// of the registry; the copy replaces the live registry only after it has
/// been written to the snapshot (when one is configured). The file write
/// runs on the blocking thread pool.
pub struct SubwayStore {
    inner: RwLock<Registry>,
    snapshot: Option<SnapshotFile>,
}

impl SubwayStore {
    /// Create an empty store that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            inner: RwLock::new(Registry::first_ids()),
            snapshot: None,
        }
    }

    /// Open a store backed by a snapshot file.
    ///
    /// A missing file starts an empty store. A file that fails to parse, or
    /// whose lines do not form valid section chains, is an error.
    pub fn open(snapshot: SnapshotFile) -> Result<Self, StoreError> {
        let registry = match snapshot.load()? {
            Some(saved) => Registry::restore(saved)?,
            None => Registry::first_ids(),
        };

        info!(
            path = %snapshot.path().display(),
            stations = registry.stations.len(),
            lines = registry.lines.len(),
            "opened subway store"
        );

        Ok(Self {
            inner: RwLock::new(registry),
            snapshot: Some(snapshot),
        })
    }

    /// Apply `change` to a copy of the registry and commit it on success.
    async fn write<T>(
        &self,
        change: impl FnOnce(&mut Registry) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.inner.write().await;
        let mut next = guard.clone();
        let result = change(&mut next)?;

        if let Some(file) = &self.snapshot {
            // The guard stays held, so snapshot writes still happen one at a time.
            let file = file.clone();
            let snapshot = next.to_snapshot();
            tokio::task::spawn_blocking(move || file.save(&snapshot))
                .await
                .map_err(|e| StoreError::Snapshot {
                    message: format!("snapshot task failed: {}", e),
                })??;
        }

        *guard = next;
        Ok(result)
    }

    // ------------------------------------------------------------------------
    // Stations
    // ------------------------------------------------------------------------

    pub async fn create_station(&self, name: &str) -> Result<Station, StoreError> {
        let name = normalize_name(name, "station")?;
        let station = self
            .write(|reg| {
                if reg.stations.values().any(|s| s.name == name) {
                    return Err(StoreError::DuplicateStationName(name));
                }
                let id = StationId(reg.next_station_id);
                reg.next_station_id += 1;
                let station = Station::new(id, name);
                reg.stations.insert(id, station.clone());
                Ok(station)
            })
            .await?;

        info!(id = %station.id, name = %station.name, "created station");
        Ok(station)
    }

    pub async fn list_stations(&self) -> Vec<Station> {
        let guard = self.inner.read().await;
        guard.stations.values().cloned().collect()
    }

    /// Delete a station that no line uses.
    pub async fn delete_station(&self, id: StationId) -> Result<(), StoreError> {
        self.write(|reg| {
            if !reg.stations.contains_key(&id) {
                return Err(StoreError::StationNotFound(id));
            }
            if let Some(line) = reg
                .lines
                .values()
                .find(|l| l.sections.contains_station(id))
            {
                return Err(StoreError::StationInUse {
                    station: id,
                    line: line.id,
                });
            }
            reg.stations.remove(&id);
            Ok(())
        })
        .await?;

        info!(%id, "deleted station");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Lines
    // ------------------------------------------------------------------------

    /// Create a line with a single initial section.
    pub async fn create_line(
        &self,
        name: &str,
        color: &str,
        up: StationId,
        down: StationId,
        distance: Distance,
    ) -> Result<LineDetails, StoreError> {
        let name = normalize_name(name, "line")?;
        let details = self
            .write(|reg| {
                if reg.lines.values().any(|l| l.name == name) {
                    return Err(StoreError::DuplicateLineName(name));
                }
                reg.station(up)?;
                reg.station(down)?;

                let id = LineId(reg.next_line_id);
                let section = Section::new(id, up, down, distance)?;
                reg.next_line_id += 1;
                reg.lines.insert(
                    id,
                    Line::new(id, name, color, Sections::with_initial(section)),
                );
                reg.details(id)
            })
            .await?;

        info!(id = %details.id, name = %details.name, "created line");
        Ok(details)
    }

    pub async fn list_lines(&self) -> Result<Vec<LineDetails>, StoreError> {
        let guard = self.inner.read().await;
        guard.lines.keys().map(|id| guard.details(*id)).collect()
    }

    pub async fn get_line(&self, id: LineId) -> Result<LineDetails, StoreError> {
        let guard = self.inner.read().await;
        guard.details(id)
    }

    /// Change a line's name and color.
    pub async fn update_line(
        &self,
        id: LineId,
        name: &str,
        color: &str,
    ) -> Result<LineDetails, StoreError> {
        let name = normalize_name(name, "line")?;
        self.write(|reg| {
            if reg.lines.values().any(|l| l.name == name && l.id != id) {
                return Err(StoreError::DuplicateLineName(name));
            }
            reg.line_mut(id)?.rename(name, color);
            reg.details(id)
        })
        .await
    }

    pub async fn delete_line(&self, id: LineId) -> Result<(), StoreError> {
        self.write(|reg| {
            reg.lines.remove(&id).ok_or(StoreError::LineNotFound(id))?;
            Ok(())
        })
        .await?;

        info!(%id, "deleted line");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Sections
    // ------------------------------------------------------------------------

    /// Add a section to a line.
    pub async fn add_section(
        &self,
        line: LineId,
        up: StationId,
        down: StationId,
        distance: Distance,
    ) -> Result<LineDetails, StoreError> {
        self.write(|reg| {
            reg.station(up)?;
            reg.station(down)?;
            let section = Section::new(line, up, down, distance)?;
            let location = reg.line_mut(line)?.sections.add(section)?;
            debug!(%line, %up, %down, ?location, "section stored");
            reg.details(line)
        })
        .await
    }

    /// Remove a station from a line, merging its sections if it is interior.
    pub async fn remove_station(&self, line: LineId, station: StationId) -> Result<(), StoreError> {
        self.write(|reg| {
            let removal = reg.line_mut(line)?.sections.remove(station)?;
            debug!(%line, %station, ?removal, "station removed from line");
            Ok(())
        })
        .await
    }

    /// Stations of a line, head to tail.
    pub async fn line_stations(&self, line: LineId) -> Result<Vec<Station>, StoreError> {
        let guard = self.inner.read().await;
        Ok(guard.details(line)?.stations)
    }

    /// Sections of a line, in no particular order.
    pub async fn line_sections(&self, line: LineId) -> Result<Vec<Section>, StoreError> {
        let guard = self.inner.read().await;
        let line = guard.lines.get(&line).ok_or(StoreError::LineNotFound(line))?;
        Ok(line.sections.sections().to_vec())
    }
}

impl Registry {
    /// Empty registry. Ids start at 1.
    fn first_ids() -> Self {
        Self {
            next_station_id: 1,
            next_line_id: 1,
            ..Self::default()
        }
    }

    fn restore(saved: Snapshot) -> Result<Self, StoreError> {
        let mut reg = Self::first_ids();

        for station in saved.stations {
            if reg.stations.contains_key(&station.id) {
                return Err(snapshot_error(format!("duplicate station id {}", station.id)));
            }
            if reg.stations.values().any(|s| s.name == station.name) {
                return Err(snapshot_error(format!("duplicate station name {}", station.name)));
            }
            reg.next_station_id = reg.next_station_id.max(station.id.0 + 1);
            reg.stations.insert(station.id, station);
        }

        for saved_line in saved.lines {
            let id = saved_line.id;
            if reg.lines.contains_key(&id) {
                return Err(snapshot_error(format!("duplicate line id {}", id)));
            }
            if reg.lines.values().any(|l| l.name == saved_line.name) {
                return Err(snapshot_error(format!("duplicate line name {}", saved_line.name)));
            }
            for section in &saved_line.sections {
                if section.line() != id {
                    return Err(snapshot_error(format!(
                        "line {} holds a section of line {}",
                        id,
                        section.line()
                    )));
                }
                reg.station(section.up())?;
                reg.station(section.down())?;
            }
            if saved_line.sections.is_empty() {
                return Err(snapshot_error(format!("line {} has no sections", id)));
            }

            let sections = Sections::from_sections(saved_line.sections)?;
            reg.next_line_id = reg.next_line_id.max(id.0 + 1);
            reg.lines
                .insert(id, Line::new(id, saved_line.name, saved_line.color, sections));
        }

        reg.next_station_id = reg.next_station_id.max(saved.next_station_id);
        reg.next_line_id = reg.next_line_id.max(saved.next_line_id);
        Ok(reg)
    }

    fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            next_station_id: self.next_station_id,
            next_line_id: self.next_line_id,
            stations: self.stations.values().cloned().collect(),
            lines: self
                .lines
                .values()
                .map(|line| SnapshotLine {
                    id: line.id,
                    name: line.name.clone(),
                    color: line.color.clone(),
                    sections: line.sections.sections().to_vec(),
                })
                .collect(),
        }
    }

    fn station(&self, id: StationId) -> Result<&Station, StoreError> {
        self.stations.get(&id).ok_or(StoreError::StationNotFound(id))
    }

    fn line_mut(&mut self, id: LineId) -> Result<&mut Line, StoreError> {
        self.lines.get_mut(&id).ok_or(StoreError::LineNotFound(id))
    }

    fn details(&self, id: LineId) -> Result<LineDetails, StoreError> {
        let line = self.lines.get(&id).ok_or(StoreError::LineNotFound(id))?;
        let stations = line
            .sections
            .stations()
            .into_iter()
            .map(|s| self.station(s).cloned())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(LineDetails {
            id,
            name: line.name.clone(),
            color: line.color.clone(),
            stations,
            distance: line.sections.total_distance(),
        })
    }
}

fn snapshot_error(message: String) -> StoreError {
    StoreError::Snapshot { message }
}

fn normalize_name(name: &str, kind: &'static str) -> Result<String, StoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StoreError::EmptyName(kind));
    }
    Ok(trimmed.to_string())
}
