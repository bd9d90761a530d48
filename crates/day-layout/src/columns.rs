//! Column assignment within one overlap pocket.
//!
//! [`fix_pocket`] splits a pocket into at most two display columns with a
//! greedy pairing rule: take the first remaining interval for column 0, then
//! pull the first later interval that does not touch it into column 1. When
//! nothing pairs, column 1 gets an [`Slot::Absent`] hole so the two columns
//! stay index-aligned.
//!
//! # Two-column ceiling
//!
//! The procedure never produces more than two columns. When three or more
//! intervals overlap at one instant, some of them share a column with an
//! interval they genuinely overlap and will be drawn on top of each other.
//! This is a known limit of the layout, not general interval-graph coloring,
//! and callers depend on the exact output.

use std::collections::VecDeque;

use tracing::trace;

use crate::interval::Interval;
use crate::slot::Slot;

/// The display columns produced for one pocket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnGroup<'a> {
    columns: Vec<Vec<Slot<'a>>>,
}

impl<'a> ColumnGroup<'a> {
    fn single(column: Vec<Slot<'a>>) -> Self {
        Self {
            columns: vec![column],
        }
    }

    pub fn columns(&self) -> &[Vec<Slot<'a>>] {
        &self.columns
    }

    /// Shared by every interval in the group: 1 or 2.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Present intervals with their column index, in column order then
    /// position order. Holes are skipped.
    pub fn placed(&self) -> impl Iterator<Item = (usize, &'a Interval)> + '_ {
        self.columns.iter().enumerate().flat_map(|(index, column)| {
            column
                .iter()
                .filter_map(Slot::interval)
                .map(move |interval| (index, interval))
        })
    }
}

/// Split one pocket into display columns.
///
/// A one-member pocket is a single column. Otherwise the greedy pairing
/// described in the module docs runs until the pocket is exhausted; if no
/// pairing ever happened, every member overlaps every other and the result
/// collapses to one column.
///
/// # Examples
///
/// ```
/// use day_layout::{fix_pocket, Interval};
///
/// let a = Interval::new(0, 100).unwrap();
/// let b = Interval::new(50, 150).unwrap();
/// let c = Interval::new(120, 200).unwrap();
///
/// // `a` pairs with `c`, the first later interval it does not touch.
/// let group = fix_pocket(vec![&a, &b, &c]);
/// assert_eq!(group.column_count(), 2);
/// let placed: Vec<_> = group.placed().collect();
/// assert_eq!(placed, vec![(0, &a), (0, &b), (1, &c)]);
/// ```
pub fn fix_pocket<'a>(pocket: Vec<&'a Interval>) -> ColumnGroup<'a> {
    if pocket.len() == 1 {
        return ColumnGroup::single(pocket.into_iter().map(Slot::Present).collect());
    }

    let mut working: VecDeque<Slot<'a>> = pocket.into_iter().map(Slot::Present).collect();
    let mut primary = Vec::with_capacity(working.len());
    let mut partners = Vec::with_capacity(working.len());
    let mut paired = false;

    while let Some(slot) = working.pop_front() {
        let Some(current) = slot.interval() else {
            continue;
        };
        primary.push(Slot::Present(current));

        let partner = current
            .not_intersects_with_any(working.make_contiguous())
            .first()
            .copied();

        match partner {
            Some(partner) => {
                // Leave a hole so later positions keep their index.
                if let Some(hole) = working.iter_mut().find(|slot| slot.holds(partner)) {
                    *hole = Slot::Absent;
                }
                trace!(%current, %partner, "paired");
                partners.push(Slot::Present(partner));
                paired = true;
            }
            None => partners.push(Slot::Absent),
        }
    }

    if paired {
        ColumnGroup {
            columns: vec![primary, partners],
        }
    } else {
        ColumnGroup::single(primary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: i64, end: i64) -> Interval {
        Interval::new(start, end).unwrap()
    }

    #[test]
    fn test_single_member() {
        let a = iv(30, 150);
        let group = fix_pocket(vec![&a]);
        assert_eq!(group.column_count(), 1);
        assert_eq!(group.columns(), &[vec![Slot::Present(&a)]]);
    }

    #[test]
    fn test_chain_splits_into_two_columns() {
        let a = iv(540, 600);
        let b = iv(560, 620);
        let c = iv(610, 670);
        let group = fix_pocket(vec![&a, &b, &c]);

        assert_eq!(group.column_count(), 2);
        assert_eq!(
            group.columns(),
            &[
                vec![Slot::Present(&a), Slot::Present(&b)],
                vec![Slot::Present(&c), Slot::Absent],
            ]
        );
    }

    #[test]
    fn test_mutual_overlap_collapses() {
        let a = iv(0, 100);
        let b = iv(20, 120);
        let c = iv(40, 140);
        let group = fix_pocket(vec![&a, &b, &c]);

        assert_eq!(group.column_count(), 1);
        assert_eq!(
            group.columns(),
            &[vec![Slot::Present(&a), Slot::Present(&b), Slot::Present(&c)]]
        );
    }

    #[test]
    fn test_partner_is_first_match_and_leaves_hole() {
        let a = iv(0, 100);
        let b = iv(50, 150);
        let c = iv(200, 300);
        let d = iv(250, 350);
        let group = fix_pocket(vec![&a, &b, &c, &d]);

        // a takes c (first non-touching), b then takes d; the holes are skipped.
        assert_eq!(
            group.columns(),
            &[
                vec![Slot::Present(&a), Slot::Present(&b)],
                vec![Slot::Present(&c), Slot::Present(&d)],
            ]
        );
    }

    #[test]
    fn test_unpaired_tail_gets_absent_slot() {
        let a = iv(0, 10);
        let b = iv(20, 30);
        let c = iv(40, 50);
        let group = fix_pocket(vec![&a, &b, &c]);

        assert_eq!(
            group.columns(),
            &[
                vec![Slot::Present(&a), Slot::Present(&c)],
                vec![Slot::Present(&b), Slot::Absent],
            ]
        );
    }

    #[test]
    fn test_touching_intervals_never_pair() {
        let a = iv(0, 100);
        let b = iv(100, 200);
        let group = fix_pocket(vec![&a, &b]);
        assert_eq!(group.column_count(), 1);
    }

    #[test]
    fn test_equal_values_keep_identity() {
        let a = iv(0, 10);
        let b = iv(50, 60);
        let twin = iv(50, 60);
        let group = fix_pocket(vec![&a, &b, &twin]);

        // a pairs with b; twin must survive as its own entry.
        let placed: Vec<_> = group.placed().collect();
        assert_eq!(placed.len(), 3);
        assert!(placed.iter().any(|(_, i)| std::ptr::eq(*i, &twin)));
        assert!(placed.iter().any(|(_, i)| std::ptr::eq(*i, &b)));
    }

    #[test]
    fn test_placed_skips_holes() {
        let a = iv(540, 600);
        let b = iv(560, 620);
        let c = iv(610, 670);
        let group = fix_pocket(vec![&a, &b, &c]);
        let placed: Vec<_> = group.placed().collect();
        assert_eq!(placed, vec![(0, &a), (0, &b), (1, &c)]);
    }
}
