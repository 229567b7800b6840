//! The section chain of a single line.
//!
//! A [`Sections`] value owns an unordered collection of sections that
//! together form one simple path of stations. Insertions may prepend,
//! append, or split an existing section; removals may drop an end section
//! or merge the two sections around an interior station. The ordered
//! station list is reconstructed on demand.

mod classify;
mod index;
mod remove;


use tracing::debug;

use crate::domain::{Distance, Section, SectionError, StationId};

use index::ChainIndex;

pub use classify::{InsertLocation, classify};
pub use remove::Removal;

/// The sections of one line.
///
/// # Invariants
///
/// After every public operation:
/// - the sections form exactly one simple path (each station is the `up` of
///   at most one section and the `down` of at most one section)
/// - a chain that has had a section never drops back to zero sections
///
/// Failed operations leave the chain untouched.
#[derive(Debug, Clone, Default)]
pub struct Sections {
    sections: Vec<Section>,
    index: ChainIndex,
}

impl Sections {
    /// Create an empty chain. The first [`add`](Self::add) is always accepted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a chain holding a single section.
    pub fn with_initial(section: Section) -> Self {
        let sections = vec![section];
        let index = ChainIndex::build(&sections);
        Self { sections, index }
    }

    /// Rebuild a chain from stored sections, in any order.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::BrokenChain`] if the sections branch, loop,
    /// or fall apart into more than one path.
    pub fn from_sections(sections: impl IntoIterator<Item = Section>) -> Result<Self, SectionError> {
        let sections: Vec<Section> = sections.into_iter().collect();
        let index = ChainIndex::build_checked(&sections)?;
        Ok(Self { sections, index })
    }

    /// The sections in storage order, which carries no meaning.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Stations from head to tail.
    pub fn stations(&self) -> Vec<StationId> {
        self.index.ordered_stations(&self.sections)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn contains_station(&self, station: StationId) -> bool {
        self.index.contains(station)
    }

    /// Sum of all section lengths.
    pub fn total_distance(&self) -> u64 {
        self.sections
            .iter()
            .map(|s| u64::from(s.distance().get()))
            .sum()
    }

    /// Add a section to the chain.
    ///
    /// On an empty chain the candidate becomes the only section. Otherwise
    /// exactly one of its stations must already be on the line; the
    /// candidate is then prepended, appended, or used to split the section
    /// it overlaps. Returns where the section went; the very first section
    /// of an empty chain is reported as [`InsertLocation::Append`].
    ///
    /// # Errors
    ///
    /// - [`SectionError::NoAttachmentPoint`] if neither station is on the line
    /// - [`SectionError::BothEndpointsAlreadyPresent`] if both are
    /// - [`SectionError::InvalidSplitLength`] if a split would leave a
    ///   section of zero or negative length
    /// - [`SectionError::NoInsertionPoint`] if classification found nothing,
    ///   which means the chain itself is inconsistent
    pub fn add(&mut self, candidate: Section) -> Result<InsertLocation, SectionError> {
        if self.sections.is_empty() {
            debug!(
                line = %candidate.line(),
                up = %candidate.up(),
                down = %candidate.down(),
                "first section"
            );
            self.sections.push(candidate);
            self.reindex();
            return Ok(InsertLocation::Append);
        }

        self.validate_addable(&candidate)?;

        let location = classify(&self.sections, &candidate);
        match location {
            InsertLocation::Prepend | InsertLocation::Append => {
                self.sections.push(candidate);
            }
            InsertLocation::SplitHead(idx) => {
                let existing = self.sections[idx];
                let rest = split_remainder(&existing, &candidate)?;
                let fore = Section::new(
                    existing.line(),
                    existing.up(),
                    candidate.down(),
                    candidate.distance(),
                )?;
                let rear = Section::new(existing.line(), candidate.down(), existing.down(), rest)?;
                self.sections[idx] = fore;
                self.sections.insert(idx + 1, rear);
            }
            InsertLocation::SplitTail(idx) => {
                let existing = self.sections[idx];
                let rest = split_remainder(&existing, &candidate)?;
                let fore = Section::new(existing.line(), existing.up(), candidate.up(), rest)?;
                let rear = Section::new(
                    existing.line(),
                    candidate.up(),
                    existing.down(),
                    candidate.distance(),
                )?;
                self.sections[idx] = fore;
                self.sections.insert(idx + 1, rear);
            }
            InsertLocation::Invalid => {
                return Err(SectionError::NoInsertionPoint {
                    up: candidate.up(),
                    down: candidate.down(),
                });
            }
        }

        self.reindex();
        debug!(
            line = %candidate.line(),
            up = %candidate.up(),
            down = %candidate.down(),
            ?location,
            sections = self.sections.len(),
            "added section"
        );
        Ok(location)
    }

    fn validate_addable(&self, candidate: &Section) -> Result<(), SectionError> {
        let has_up = self.contains_station(candidate.up());
        let has_down = self.contains_station(candidate.down());

        if !has_up && !has_down {
            return Err(SectionError::NoAttachmentPoint {
                up: candidate.up(),
                down: candidate.down(),
            });
        }
        if has_up && has_down {
            return Err(SectionError::BothEndpointsAlreadyPresent {
                up: candidate.up(),
                down: candidate.down(),
            });
        }
        Ok(())
    }

    fn reindex(&mut self) {
        self.index = ChainIndex::build(&self.sections);
    }
}

/// Length left over once `candidate` is carved out of `existing`.
fn split_remainder(existing: &Section, candidate: &Section) -> Result<Distance, SectionError> {
    existing
        .distance()
        .checked_sub(candidate.distance())
        .ok_or(SectionError::InvalidSplitLength {
            existing: existing.distance(),
            requested: candidate.distance(),
        })
}
