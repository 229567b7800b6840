//! Where a new section goes relative to the existing chain.

use crate::domain::Section;

/// How a candidate section relates to the chain.
///
/// The split variants carry the position of the section being split in the
/// slice that was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertLocation {
    /// Candidate ends at the head station and becomes the new first section.
    Prepend,
    /// Candidate starts at the tail station and becomes the new last section.
    Append,
    /// Candidate starts where an existing section starts and splits it.
    SplitHead(usize),
    /// Candidate ends where an existing section ends and splits it.
    SplitTail(usize),
    /// Candidate touches no section at all.
    Invalid,
}

/// Classify `candidate` against `sections`.
///
/// Splits are checked before the outside overlaps. A station in the middle
/// of the chain is both the `down` of one section and the `up` of the next,
/// so a candidate starting there also "touches" the earlier section from
/// outside; appending it would branch the line. Checking splits first keeps
/// the result independent of slice order.
pub fn classify(sections: &[Section], candidate: &Section) -> InsertLocation {
    if let Some(idx) = sections
        .iter()
        .position(|s| s.inside_overlap_on_up(candidate))
    {
        return InsertLocation::SplitHead(idx);
    }

    if let Some(idx) = sections
        .iter()
        .position(|s| s.inside_overlap_on_down(candidate))
    {
        return InsertLocation::SplitTail(idx);
    }

    if sections.iter().any(|s| s.outside_overlap_on_up(candidate)) {
        return InsertLocation::Prepend;
    }

    if sections.iter().any(|s| s.outside_overlap_on_down(candidate)) {
        return InsertLocation::Append;
    }

    InsertLocation::Invalid
}
