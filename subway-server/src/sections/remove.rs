//! Removing a station from the chain.

use tracing::debug;

use super::Sections;
use crate::domain::{Section, SectionError, StationId};

/// What a removal did to the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The head station and its section were dropped.
    Head,
    /// The tail station and its section were dropped.
    Tail,
    /// The two sections around an interior station were merged into this one.
    Merged(Section),
}

impl Sections {
    /// Remove a station from the line.
    ///
    /// Removing the head or tail drops the section that touches it. Removing
    /// an interior station replaces its two sections with one whose length
    /// is their sum.
    ///
    /// # Errors
    ///
    /// - [`SectionError::MinimumChainLength`] if the line has one section
    ///   (no station may be removed from it, end or not)
    /// - [`SectionError::StationNotInChain`] if the station is not on the line
    /// - [`SectionError::DistanceOverflow`] if the merged length would not fit
    pub fn remove(&mut self, station: StationId) -> Result<Removal, SectionError> {
        if self.sections.len() <= 1 {
            return Err(SectionError::MinimumChainLength);
        }

        let front = self.index.incoming(station);
        let back = self.index.outgoing(station);

        let removal = match (front, back) {
            (None, None) => return Err(SectionError::StationNotInChain(station)),
            (None, Some(back)) => {
                self.sections.remove(back);
                Removal::Head
            }
            (Some(front), None) => {
                self.sections.remove(front);
                Removal::Tail
            }
            (Some(front), Some(back)) => {
                let (f, b) = (self.sections[front], self.sections[back]);
                let length = f.distance().checked_add(b.distance()).ok_or(
                    SectionError::DistanceOverflow {
                        front: f.distance(),
                        back: b.distance(),
                    },
                )?;
                let merged = Section::new(f.line(), f.up(), b.down(), length)?;

                // Remove the higher position first so the lower one stays valid.
                let (first, second) = if front > back { (front, back) } else { (back, front) };
                self.sections.remove(first);
                self.sections.remove(second);
                self.sections.push(merged);
                Removal::Merged(merged)
            }
        };

        self.reindex();
        debug!(
            %station,
            ?removal,
            sections = self.sections.len(),
            "removed station"
        );
        Ok(removal)
    }
}
