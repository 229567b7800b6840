//! Section length type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when constructing a non-positive distance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid distance {value}: must be greater than zero")]
pub struct InvalidDistance {
    value: i64,
}

/// A strictly positive section length.
///
/// Any `Distance` value is non-zero by construction, which is what lets the
/// section chain promise that every section has a positive length.
///
/// # Examples
///
/// ```
/// use subway_server::domain::Distance;
///
/// let d = Distance::new(10).unwrap();
/// assert_eq!(d.get(), 10);
///
/// // Zero is rejected
/// assert!(Distance::new(0).is_err());
///
/// // Subtraction that would leave nothing is rejected
/// assert!(d.checked_sub(d).is_none());
///
/// // So is addition past the largest representable length
/// assert!(Distance::new(u32::MAX).unwrap().checked_add(d).is_none());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Distance(u32);

impl Distance {
    /// Create a distance, rejecting zero.
    pub fn new(value: u32) -> Result<Self, InvalidDistance> {
        if value == 0 {
            return Err(InvalidDistance { value: 0 });
        }
        Ok(Distance(value))
    }

    /// Returns the length as a plain integer.
    pub fn get(&self) -> u32 {
        self.0
    }

    /// Subtract `other`, returning `None` unless the result is still positive.
    pub fn checked_sub(self, other: Distance) -> Option<Distance> {
        self.0
            .checked_sub(other.0)
            .filter(|&rest| rest > 0)
            .map(Distance)
    }

    /// Add `other`, returning `None` if the sum does not fit.
    pub fn checked_add(self, other: Distance) -> Option<Distance> {
        self.0.checked_add(other.0).map(Distance)
    }
}

impl TryFrom<i64> for Distance {
    type Error = InvalidDistance;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u32::try_from(value) {
            Ok(v) if v > 0 => Ok(Distance(v)),
            _ => Err(InvalidDistance { value }),
        }
    }
}

impl From<Distance> for u32 {
    fn from(d: Distance) -> u32 {
        d.0
    }
}

impl fmt::Debug for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Distance({})", self.0)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
