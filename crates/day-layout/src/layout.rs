//! Layout pass orchestration.
//!
//! Records → [`Interval`]s → pockets → columns → [`RenderInstruction`]s.
//! The pass is pure and synchronous. Drawing is delegated to a
//! [`RenderSink`], which also owns clearing whatever a previous pass drew.

use serde::Serialize;
use tracing::debug;

use crate::columns::ColumnGroup;
use crate::error::Result;
use crate::interval::Interval;
use crate::pocket::group_pockets;
use crate::record::EventRecord;

/// Where and how wide to draw one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderInstruction {
    #[serde(flatten)]
    pub interval: Interval,
    /// Columns in the event's pocket (1 or 2).
    pub column_count: usize,
    /// The event's column within its pocket.
    pub column_index: usize,
}

/// Receives render instructions from a layout pass.
pub trait RenderSink {
    /// Drop everything rendered so far.
    fn clear(&mut self);

    fn render(&mut self, instruction: RenderInstruction);
}

impl RenderSink for Vec<RenderInstruction> {
    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn render(&mut self, instruction: RenderInstruction) {
        self.push(instruction);
    }
}

/// Lay out already-validated intervals.
///
/// Instructions come out in pocket order, then column order, then position
/// within the column. Alignment holes produce nothing.
///
/// # Examples
///
/// ```
/// use day_layout::{lay_out, Interval};
///
/// let events = [Interval::new(30, 150).unwrap()];
/// let out = lay_out(&events);
/// assert_eq!(out.len(), 1);
/// assert_eq!((out[0].column_count, out[0].column_index), (1, 0));
/// ```
pub fn lay_out(intervals: &[Interval]) -> Vec<RenderInstruction> {
    let groups = group_pockets(intervals);
    let out: Vec<_> = instructions(&groups).collect();
    debug!(
        events = intervals.len(),
        pockets = groups.len(),
        instructions = out.len(),
        "layout pass complete"
    );
    out
}

/// Parse every record, then lay them out.
///
/// # Errors
///
/// The first record that fails to parse aborts the whole pass; no partial
/// layout is returned.
pub fn lay_out_records(records: &[EventRecord]) -> Result<Vec<RenderInstruction>> {
    let intervals = parse_records(records)?;
    Ok(lay_out(&intervals))
}

fn parse_records(records: &[EventRecord]) -> Result<Vec<Interval>> {
    records.iter().map(EventRecord::to_interval).collect()
}

fn instructions<'a>(
    groups: &'a [ColumnGroup<'a>],
) -> impl Iterator<Item = RenderInstruction> + 'a {
    groups.iter().flat_map(|group| {
        let column_count = group.column_count();
        group
            .placed()
            .map(move |(column_index, interval)| RenderInstruction {
                interval: *interval,
                column_count,
                column_index,
            })
    })
}

/// A day track: owns its events and the sink they are drawn into.
#[derive(Debug, Default)]
pub struct LayoutEngine<S> {
    sink: S,
    events: Vec<Interval>,
}

impl<S: RenderSink> LayoutEngine<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            events: Vec::new(),
        }
    }

    /// Forget the current events and clear the sink.
    pub fn clear(&mut self) {
        self.events.clear();
        self.sink.clear();
    }

    /// Replace the track's events and render them.
    ///
    /// The track is cleared first. If any record is invalid the track stays
    /// empty and nothing is rendered.
    ///
    /// Returns the number of instructions sent to the sink.
    ///
    /// # Errors
    ///
    /// The parse error of the first invalid record.
    pub fn set_data(&mut self, records: &[EventRecord]) -> Result<usize> {
        self.clear();
        self.events = parse_records(records)?;
        Ok(self.render_events())
    }

    /// Replace the track's events with validated intervals and render them.
    pub fn set_intervals(&mut self, intervals: Vec<Interval>) -> usize {
        self.clear();
        self.events = intervals;
        self.render_events()
    }

    pub fn events(&self) -> &[Interval] {
        &self.events
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn render_events(&mut self) -> usize {
        let mut rendered = 0;
        for instruction in lay_out(&self.events) {
            self.sink.render(instruction);
            rendered += 1;
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;
    use proptest::prelude::*;

    fn iv(start: i64, end: i64) -> Interval {
        Interval::new(start, end).unwrap()
    }

    fn triple(i: &RenderInstruction) -> (i64, i64, usize, usize) {
        (
            i.interval.start(),
            i.interval.end(),
            i.column_count,
            i.column_index,
        )
    }

    fn triples(records: &[EventRecord]) -> Vec<(i64, i64, usize, usize)> {
        lay_out_records(records).unwrap().iter().map(triple).collect()
    }

    // ── scenarios ───────────────────────────────────────────────────────

    #[test]
    fn test_single_event() {
        assert_eq!(triples(&[EventRecord::new(30, 150)]), vec![(30, 150, 1, 0)]);
    }

    #[test]
    fn test_chain_of_three() {
        let records = [
            EventRecord::new(540, 600),
            EventRecord::new(560, 620),
            EventRecord::new(610, 670),
        ];
        // 540-600 takes column 0 and pairs with 610-670 (the first later event
        // it does not touch). 560-620 finds no partner and also lands in
        // column 0, on top of 540-600.
        assert_eq!(
            triples(&records),
            vec![(540, 600, 2, 0), (560, 620, 2, 0), (610, 670, 2, 1)]
        );
    }

    #[test]
    fn test_three_mutually_overlapping() {
        let records = [
            EventRecord::new(0, 100),
            EventRecord::new(20, 120),
            EventRecord::new(40, 140),
        ];
        // Nothing pairs, so the pocket collapses to one shared column and
        // all three are drawn over each other.
        assert_eq!(
            triples(&records),
            vec![(0, 100, 1, 0), (20, 120, 1, 0), (40, 140, 1, 0)]
        );
    }

    #[test]
    fn test_four_events_one_overlapping_trio() {
        let records = [
            EventRecord::new(0, 100),
            EventRecord::new(20, 120),
            EventRecord::new(40, 140),
            EventRecord::new(130, 200),
        ];
        // 0-100 pairs with 130-200; 20-120 and 40-140 share column 0 with it
        // even though all three overlap at minute 50.
        assert_eq!(
            triples(&records),
            vec![
                (0, 100, 2, 0),
                (20, 120, 2, 0),
                (40, 140, 2, 0),
                (130, 200, 2, 1),
            ]
        );
    }

    #[test]
    fn test_default_day() {
        let records = [
            EventRecord::new(30, 150),
            EventRecord::new(540, 600),
            EventRecord::new(560, 620),
            EventRecord::new(610, 670),
        ];
        assert_eq!(
            triples(&records),
            vec![
                (30, 150, 1, 0),
                (540, 600, 2, 0),
                (560, 620, 2, 0),
                (610, 670, 2, 1),
            ]
        );
    }

    #[test]
    fn test_empty() {
        assert!(lay_out(&[]).is_empty());
    }

    #[test]
    fn test_invalid_record_aborts_batch() {
        let records = [EventRecord::new(30, 150), EventRecord::new(-5, 100)];
        assert_eq!(
            lay_out_records(&records),
            Err(LayoutError::OutOfRangeStart(-5))
        );
    }

    #[test]
    fn test_instruction_serializes_flat() {
        let instruction = RenderInstruction {
            interval: iv(30, 150),
            column_count: 1,
            column_index: 0,
        };
        assert_eq!(
            serde_json::to_string(&instruction).unwrap(),
            r#"{"start":30,"end":150,"column_count":1,"column_index":0}"#
        );
    }

    // ── engine ──────────────────────────────────────────────────────────

    #[test]
    fn test_engine_renders_into_sink() {
        let mut engine = LayoutEngine::new(Vec::<RenderInstruction>::new());
        let rendered = engine
            .set_data(&[EventRecord::new(30, 150), EventRecord::new(100, 200)])
            .unwrap();
        assert_eq!(rendered, 2);
        assert_eq!(engine.events().len(), 2);
        assert_eq!(engine.sink().len(), 2);
    }

    #[test]
    fn test_engine_bad_batch_renders_nothing() {
        let mut engine = LayoutEngine::new(Vec::<RenderInstruction>::new());
        engine.set_data(&[EventRecord::new(30, 150)]).unwrap();

        let err = engine
            .set_data(&[EventRecord::new(0, 50), EventRecord::new(-5, 100)])
            .unwrap_err();
        assert_eq!(err, LayoutError::OutOfRangeStart(-5));
        assert!(engine.sink().is_empty());
        assert!(engine.events().is_empty());
    }

    #[test]
    fn test_engine_rerun_is_idempotent() {
        let records = [
            EventRecord::new(30, 150),
            EventRecord::new(540, 600),
            EventRecord::new(560, 620),
            EventRecord::new(610, 670),
        ];
        let mut engine = LayoutEngine::new(Vec::<RenderInstruction>::new());
        engine.set_data(&records).unwrap();
        let first = engine.sink().clone();
        engine.set_data(&records).unwrap();
        assert_eq!(engine.sink(), &first);
    }

    #[test]
    fn test_engines_do_not_share_events() {
        let mut a = LayoutEngine::new(Vec::<RenderInstruction>::new());
        let b = LayoutEngine::new(Vec::<RenderInstruction>::new());
        a.set_intervals(vec![iv(0, 10)]);
        assert_eq!(a.events().len(), 1);
        assert!(b.events().is_empty());
    }

    // ── properties ──────────────────────────────────────────────────────

    fn arb_interval() -> impl Strategy<Value = Interval> {
        (0i64..720)
            .prop_flat_map(|start| (Just(start), start + 1..=720))
            .prop_map(|(start, end)| Interval::new(start, end).unwrap())
    }

    proptest! {
        #[test]
        fn prop_every_event_placed_once(events in prop::collection::vec(arb_interval(), 0..40)) {
            let groups = group_pockets(&events);
            let mut seen = vec![0usize; events.len()];
            for group in &groups {
                for (_, placed) in group.placed() {
                    let index = events
                        .iter()
                        .position(|e| std::ptr::eq(e, placed))
                        .expect("placed interval comes from the input");
                    seen[index] += 1;
                }
            }
            prop_assert!(seen.iter().all(|&n| n == 1));
            prop_assert_eq!(lay_out(&events).len(), events.len());
        }

        #[test]
        fn prop_column_bounds(events in prop::collection::vec(arb_interval(), 0..40)) {
            for instruction in lay_out(&events) {
                prop_assert!(instruction.column_count == 1 || instruction.column_count == 2);
                prop_assert!(instruction.column_index < instruction.column_count);
            }
        }

        #[test]
        fn prop_mutual_overlap_single_column(
            anchor in 1i64..719,
            spans in prop::collection::vec((1i64..=360, 1i64..=360), 1..10),
        ) {
            // Every interval contains `anchor`, so all pairs overlap.
            let events: Vec<_> = spans
                .iter()
                .map(|&(before, after)| {
                    Interval::new((anchor - before).max(0), (anchor + after).min(720)).unwrap()
                })
                .collect();
            for instruction in lay_out(&events) {
                prop_assert_eq!(instruction.column_count, 1);
                prop_assert_eq!(instruction.column_index, 0);
            }
        }

        #[test]
        fn prop_layout_deterministic(events in prop::collection::vec(arb_interval(), 0..40)) {
            prop_assert_eq!(lay_out(&events), lay_out(&events));
        }
    }
}
