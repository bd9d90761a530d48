//! Column slots: a placed interval or an alignment hole.

use std::ptr;

use crate::interval::Interval;

/// One position in a display column.
///
/// Column 1 of a pocket stays index-aligned with column 0; positions with no
/// partner interval hold [`Slot::Absent`] and render nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot<'a> {
    Present(&'a Interval),
    Absent,
}

impl<'a> Slot<'a> {
    pub fn interval(&self) -> Option<&'a Interval> {
        match self {
            Slot::Present(interval) => Some(*interval),
            Slot::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Slot::Absent)
    }

    /// Whether this slot holds exactly `interval` (by identity, not value).
    pub fn holds(&self, interval: &Interval) -> bool {
        matches!(self, Slot::Present(held) if ptr::eq(*held, interval))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holds_is_identity() {
        let a = Interval::new(0, 10).unwrap();
        let twin = Interval::new(0, 10).unwrap();
        let slot = Slot::Present(&a);
        assert!(slot.holds(&a));
        assert!(!slot.holds(&twin));
        assert!(!Slot::Absent.holds(&a));
    }

    #[test]
    fn test_interval_accessor() {
        let a = Interval::new(5, 15).unwrap();
        assert_eq!(Slot::Present(&a).interval(), Some(&a));
        assert_eq!(Slot::Absent.interval(), None);
        assert!(Slot::Absent.is_absent());
    }
}
