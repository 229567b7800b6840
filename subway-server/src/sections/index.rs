//! Station lookup tables over a section slice, and chain traversal.

use std::collections::HashMap;

use crate::domain::{Section, SectionError, StationId};

/// Maps each station to the section leaving it and the section entering it.
///
/// Values are positions in the slice the index was built from, so the index
/// must be rebuilt whenever that slice changes.
#[derive(Debug, Clone, Default)]
pub(crate) struct ChainIndex {
    /// Station -> section with that station as `up`.
    outgoing: HashMap<StationId, usize>,
    /// Station -> section with that station as `down`.
    incoming: HashMap<StationId, usize>,
}

impl ChainIndex {
    /// Index a slice already known to be a single simple path.
    pub fn build(sections: &[Section]) -> Self {
        let mut index = Self::default();
        for (idx, section) in sections.iter().enumerate() {
            index.outgoing.insert(section.up(), idx);
            index.incoming.insert(section.down(), idx);
        }
        index
    }

    /// Index an untrusted slice, checking that it forms one simple path.
    pub fn build_checked(sections: &[Section]) -> Result<Self, SectionError> {
        let mut index = Self::default();
        for (idx, section) in sections.iter().enumerate() {
            if index.outgoing.insert(section.up(), idx).is_some() {
                return Err(SectionError::BrokenChain("station has two outgoing sections"));
            }
            if index.incoming.insert(section.down(), idx).is_some() {
                return Err(SectionError::BrokenChain("station has two incoming sections"));
            }
        }

        if sections.is_empty() {
            return Ok(index);
        }

        let mut heads = index
            .outgoing
            .keys()
            .filter(|station| !index.incoming.contains_key(*station));
        let Some(&head) = heads.next() else {
            return Err(SectionError::BrokenChain("no head station (cycle)"));
        };
        if heads.next().is_some() {
            return Err(SectionError::BrokenChain("more than one head station"));
        }

        // Every station on this walk has at most one incoming section and the
        // head has none, so the walk cannot revisit a station.
        let mut visited = 0;
        let mut station = head;
        while let Some(&idx) = index.outgoing.get(&station) {
            visited += 1;
            station = sections[idx].down();
        }
        if visited != sections.len() {
            return Err(SectionError::BrokenChain("sections are disconnected"));
        }

        Ok(index)
    }

    pub fn outgoing(&self, station: StationId) -> Option<usize> {
        self.outgoing.get(&station).copied()
    }

    pub fn incoming(&self, station: StationId) -> Option<usize> {
        self.incoming.get(&station).copied()
    }

    pub fn contains(&self, station: StationId) -> bool {
        self.outgoing.contains_key(&station) || self.incoming.contains_key(&station)
    }

    /// Find the first station by walking back from any section.
    pub fn head(&self, sections: &[Section]) -> Option<StationId> {
        let mut station = sections.first()?.up();
        while let Some(idx) = self.incoming(station) {
            station = sections[idx].up();
        }
        Some(station)
    }

    /// Stations from head to tail. Empty for an empty slice.
    pub fn ordered_stations(&self, sections: &[Section]) -> Vec<StationId> {
        let Some(mut station) = self.head(sections) else {
            return Vec::new();
        };

        let mut stations = Vec::with_capacity(sections.len() + 1);
        stations.push(station);
        while let Some(idx) = self.outgoing(station) {
            station = sections[idx].down();
            stations.push(station);
        }
        stations
    }
}
