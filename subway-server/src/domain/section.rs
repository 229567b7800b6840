//! Section type: one directed edge of a line.

use serde::{Deserialize, Serialize};

use super::{Distance, LineId, SectionError, StationId};

/// A directed edge between two adjacent stations of a line.
///
/// Sections are values. Splitting or merging never edits a section in place;
/// the chain builds new sections and drops the old ones.
///
/// # Invariants
///
/// - `up != down`
/// - `distance > 0` (guaranteed by [`Distance`])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSection")]
pub struct Section {
    line: LineId,
    up: StationId,
    down: StationId,
    distance: Distance,
}

/// Unvalidated wire shape, so deserialisation goes through [`Section::new`].
#[derive(Deserialize)]
struct RawSection {
    line: LineId,
    up: StationId,
    down: StationId,
    distance: Distance,
}

impl TryFrom<RawSection> for Section {
    type Error = SectionError;

    fn try_from(raw: RawSection) -> Result<Self, Self::Error> {
        Section::new(raw.line, raw.up, raw.down, raw.distance)
    }
}

impl Section {
    /// Construct a section, rejecting a loop back onto the same station.
    ///
    /// # Examples
    ///
    /// ```
    /// use subway_server::domain::{Distance, LineId, Section, StationId};
    ///
    /// let d = Distance::new(10).unwrap();
    /// let s = Section::new(LineId(1), StationId(1), StationId(2), d).unwrap();
    /// assert!(s.has_station(StationId(2)));
    ///
    /// assert!(Section::new(LineId(1), StationId(1), StationId(1), d).is_err());
    /// ```
    pub fn new(
        line: LineId,
        up: StationId,
        down: StationId,
        distance: Distance,
    ) -> Result<Self, SectionError> {
        if up == down {
            return Err(SectionError::SameStations(up));
        }
        Ok(Self {
            line,
            up,
            down,
            distance,
        })
    }

    pub fn line(&self) -> LineId {
        self.line
    }

    pub fn up(&self) -> StationId {
        self.up
    }

    pub fn down(&self) -> StationId {
        self.down
    }

    pub fn distance(&self) -> Distance {
        self.distance
    }

    pub fn has_station(&self, station: StationId) -> bool {
        self.up == station || self.down == station
    }

    pub fn is_up_station(&self, station: StationId) -> bool {
        self.up == station
    }

    pub fn is_down_station(&self, station: StationId) -> bool {
        self.down == station
    }

    /// `candidate` ends where this section starts: it goes in front.
    pub fn outside_overlap_on_up(&self, candidate: &Section) -> bool {
        self.up == candidate.down
    }

    /// `candidate` starts where this section ends: it goes behind.
    pub fn outside_overlap_on_down(&self, candidate: &Section) -> bool {
        self.down == candidate.up
    }

    /// `candidate` starts where this section starts: it splits this one.
    pub fn inside_overlap_on_up(&self, candidate: &Section) -> bool {
        self.up == candidate.up
    }

    /// `candidate` ends where this section ends: it splits this one.
    pub fn inside_overlap_on_down(&self, candidate: &Section) -> bool {
        self.down == candidate.down
    }
}
