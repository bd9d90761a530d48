//! Overlap pockets: grouping intervals that are chained together by overlap.
//!
//! Intervals are consumed in arrival order, not sorted. A pocket keeps a
//! running bounding range; each new interval either touches that range (and
//! grows it) or closes the pocket and starts a new one. Because membership is
//! decided against the bounding range, two intervals that never overlap each
//! other still share a pocket when a third interval bridges them, and
//! reordering the input can change the result.

use tracing::debug;

use crate::columns::{fix_pocket, ColumnGroup};
use crate::interval::Interval;

/// Group `intervals` into pockets and split each pocket into columns.
///
/// Returns one [`ColumnGroup`] per pocket, in the order the pockets closed.
///
/// # Examples
///
/// ```
/// use day_layout::{group_pockets, Interval};
///
/// let events = [
///     Interval::new(30, 150).unwrap(),
///     Interval::new(540, 600).unwrap(),
///     Interval::new(560, 620).unwrap(),
/// ];
/// let groups = group_pockets(&events);
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].column_count(), 1);
/// ```
pub fn group_pockets(intervals: &[Interval]) -> Vec<ColumnGroup<'_>> {
    let Some((first, rest)) = intervals.split_first() else {
        return Vec::new();
    };

    let mut groups = Vec::new();
    let mut pocket = vec![first];
    let mut range = *first;

    for interval in rest {
        if interval.not_intersects_with(&range) {
            close_pocket(std::mem::take(&mut pocket), &range, &mut groups);
            range = *interval;
        } else {
            range.extend_to_cover(interval);
        }
        pocket.push(interval);
    }

    if !pocket.is_empty() {
        close_pocket(pocket, &range, &mut groups);
    }

    groups
}

fn close_pocket<'a>(
    pocket: Vec<&'a Interval>,
    range: &Interval,
    groups: &mut Vec<ColumnGroup<'a>>,
) {
    let members = pocket.len();
    let group = fix_pocket(pocket);
    debug!(%range, members, columns = group.column_count(), "pocket closed");
    groups.push(group);
}
