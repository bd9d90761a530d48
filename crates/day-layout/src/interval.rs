//! Validated minute ranges on the day track.
//!
//! An [`Interval`] is a `[start, end]` range of whole minutes inside the fixed
//! twelve-hour day window `DAY_START..=DAY_END`. Bounds are validated on
//! construction and on every mutation: a rejected update leaves the interval
//! untouched.
//!
//! Overlap tests are **closed**: two intervals that merely touch
//! (`0..100` and `100..200`) count as intersecting. Pocket formation and
//! column assignment both rely on this.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::record::EventRecord;
use crate::slot::Slot;

/// First minute of the day window.
pub const DAY_START: i64 = 0;

/// Last minute of the day window (twelve hours after [`DAY_START`]).
pub const DAY_END: i64 = 720;

/// A validated event time range, in minutes from the start of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "EventRecord")]
pub struct Interval {
    start: i64,
    end: i64,
}

impl Interval {
    /// Create an interval from whole-minute bounds.
    ///
    /// The start bound is checked first, then the end bound against it.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::OutOfRangeStart`] if `start < 0`
    /// - [`LayoutError::OutOfRangeEnd`] if `end > 720`
    /// - [`LayoutError::OrderingViolation`] if `start >= end`
    ///
    /// # Examples
    ///
    /// ```
    /// use day_layout::Interval;
    ///
    /// let meeting = Interval::new(540, 600).unwrap();
    /// assert_eq!(meeting.duration(), 60);
    /// assert!(Interval::new(600, 540).is_err());
    /// ```
    pub fn new(start: i64, end: i64) -> Result<Self> {
        if start < DAY_START {
            return Err(LayoutError::OutOfRangeStart(start));
        }
        Self::check_end(start, end)?;
        Ok(Self { start, end })
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    /// Move the start bound, validated against the current end.
    ///
    /// # Errors
    ///
    /// [`LayoutError::OutOfRangeStart`] or [`LayoutError::OrderingViolation`];
    /// the interval is unchanged on error.
    pub fn set_start(&mut self, start: i64) -> Result<()> {
        if start < DAY_START {
            return Err(LayoutError::OutOfRangeStart(start));
        }
        if start >= self.end {
            return Err(LayoutError::OrderingViolation {
                start,
                end: self.end,
            });
        }
        self.start = start;
        Ok(())
    }

    /// Move the end bound, validated against the current start.
    ///
    /// # Errors
    ///
    /// [`LayoutError::OutOfRangeEnd`] or [`LayoutError::OrderingViolation`];
    /// the interval is unchanged on error.
    pub fn set_end(&mut self, end: i64) -> Result<()> {
        Self::check_end(self.start, end)?;
        self.end = end;
        Ok(())
    }

    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    /// Closed-endpoint overlap test. Touching intervals intersect.
    pub fn intersects_with(&self, other: &Interval) -> bool {
        !(self.start > other.end || self.end < other.start)
    }

    pub fn not_intersects_with(&self, other: &Interval) -> bool {
        !self.intersects_with(other)
    }

    /// Every present interval in `slots` that does not intersect `self`,
    /// in slot order. Absent slots are skipped.
    pub fn not_intersects_with_any<'a>(&self, slots: &[Slot<'a>]) -> Vec<&'a Interval> {
        slots
            .iter()
            .filter_map(Slot::interval)
            .filter(|other| self.not_intersects_with(other))
            .collect()
    }

    /// Grow `self` to the smallest range covering both `self` and `other`.
    ///
    /// The union of two valid intervals is always valid, so this cannot fail.
    pub fn extend_to_cover(&mut self, other: &Interval) {
        if other.start < self.start {
            self.start = other.start;
        }
        if other.end > self.end {
            self.end = other.end;
        }
    }

    fn check_end(start: i64, end: i64) -> Result<()> {
        if end > DAY_END {
            return Err(LayoutError::OutOfRangeEnd(end));
        }
        if end <= start {
            return Err(LayoutError::OrderingViolation { start, end });
        }
        Ok(())
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl TryFrom<EventRecord> for Interval {
    type Error = LayoutError;

    fn try_from(record: EventRecord) -> Result<Self> {
        record.to_interval()
    }
}
