//! Lane assignment for overlapping timeline markers.
//!
//! Greedy first-fit over markers sorted by start time. Markers in a lane never
//! overlap; identical input always yields identical lanes.

use crate::state::Marker;

/// Anything occupying a time range on the timeline.
pub trait TimeSpan {
    fn start(&self) -> f64;
    fn end(&self) -> f64;

    /// Ranges that only touch at an endpoint do not overlap.
    fn overlaps_span(&self, other: &impl TimeSpan) -> bool
    where
        Self: Sized,
    {
        !(self.end() <= other.start() || other.end() <= self.start())
    }
}

impl TimeSpan for Marker {
    fn start(&self) -> f64 {
        self.start
    }

    fn end(&self) -> f64 {
        self.end
    }
}

impl TimeSpan for (f64, f64) {
    fn start(&self) -> f64 {
        self.0
    }

    fn end(&self) -> f64 {
        self.1
    }
}

/// Partition `items` into lanes of pairwise non-overlapping spans.
///
/// Returns indices into `items`. Lanes are ordered by creation; each lane is
/// ordered by start time.
pub fn assign_lanes<T: TimeSpan>(items: &[T]) -> Vec<Vec<usize>> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    // Stable: ties keep input order.
    order.sort_by(|&a, &b| items[a].start().total_cmp(&items[b].start()));

    let mut lanes: Vec<Vec<usize>> = Vec::new();
    for index in order {
        let item = &items[index];
        let slot = lanes.iter().position(|lane| {
            lane.iter()
                .all(|&placed| !items[placed].overlaps_span(item))
        });
        match slot {
            Some(lane) => lanes[lane].push(index),
            None => lanes.push(vec![index]),
        }
    }
    lanes
}

/// Largest number of spans overlapping at a single instant.
///
/// A zero-length span occupies its instant, matching `overlaps_span`.
pub fn max_concurrency<T: TimeSpan>(items: &[T]) -> usize {
    // Event order at the same instant: ends of real spans, then starts, then
    // ends of zero-length spans. Touching spans never count together.
    const END: u8 = 0;
    const START: u8 = 1;
    const POINT_END: u8 = 2;

    let mut events: Vec<(f64, u8)> = Vec::with_capacity(items.len() * 2);
    for item in items {
        let start = item.start();
        let end = item.end().max(start);
        events.push((start, START));
        events.push((end, if end > start { END } else { POINT_END }));
    }
    events.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut current = 0usize;
    let mut best = 0usize;
    for (_, kind) in events {
        if kind == START {
            current += 1;
            best = best.max(current);
        } else {
            current = current.saturating_sub(1);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FeedbackCategory;

    fn spans(ranges: &[(f64, f64)]) -> Vec<Marker> {
        ranges
            .iter()
            .enumerate()
            .map(|(i, (start, end))| {
                Marker::new(FeedbackCategory::Clarity, *start, *end, format!("m{}", i))
            })
            .collect()
    }

    fn assert_lanes_valid(markers: &[Marker], lanes: &[Vec<usize>]) {
        let mut seen = vec![false; markers.len()];
        for lane in lanes {
            for (i, &a) in lane.iter().enumerate() {
                assert!(!seen[a], "marker {} placed twice", a);
                seen[a] = true;
                for &b in &lane[i + 1..] {
                    assert!(
                        !markers[a].overlaps(&markers[b]),
                        "markers {} and {} share a lane but overlap",
                        a,
                        b
                    );
                }
            }
        }
        assert!(seen.iter().all(|placed| *placed), "every marker gets a lane");
    }

    #[test]
    fn test_three_markers_two_lanes() {
        let markers = spans(&[(0.0, 5.0), (2.0, 8.0), (6.0, 10.0)]);
        let lanes = assign_lanes(&markers);
        assert_eq!(lanes, vec![vec![0, 2], vec![1]]);
    }

    #[test]
    fn test_unsorted_input_sorted_by_start() {
        let markers = spans(&[(6.0, 10.0), (0.0, 5.0), (2.0, 8.0)]);
        let lanes = assign_lanes(&markers);
        assert_eq!(lanes, vec![vec![1, 0], vec![2]]);
    }

    #[test]
    fn test_touching_markers_share_lane() {
        let markers = spans(&[(0.0, 5.0), (5.0, 10.0), (10.0, 12.0)]);
        assert_eq!(assign_lanes(&markers), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let markers = spans(&[(1.0, 4.0), (1.0, 2.0), (1.0, 3.0)]);
        assert_eq!(assign_lanes(&markers), vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn test_empty_input() {
        let markers: Vec<Marker> = Vec::new();
        assert!(assign_lanes(&markers).is_empty());
        assert_eq!(max_concurrency(&markers), 0);
    }

    #[test]
    fn test_lane_count_bounded_by_concurrency() {
        let cases: Vec<Vec<(f64, f64)>> = vec![
            vec![(0.0, 5.0), (2.0, 8.0), (6.0, 10.0)],
            vec![(0.0, 10.0), (1.0, 2.0), (3.0, 4.0), (1.5, 3.5), (9.0, 12.0)],
            vec![(0.0, 1.0), (0.5, 1.5), (1.0, 2.0), (1.2, 1.3), (1.25, 3.0)],
            vec![(12.5, 13.0), (40.0, 44.0), (0.0, 10.0), (41.0, 41.5), (43.0, 50.0)],
            vec![(3.0, 3.0), (3.0, 3.0), (5.0, 6.0)],
            vec![(2.0, 5.0), (3.0, 3.0)],
            vec![(0.0, 4.0), (1.0, 1.0), (1.0, 3.0), (5.0, 5.0)],
        ];
        for ranges in cases {
            let markers = spans(&ranges);
            let lanes = assign_lanes(&markers);
            assert_lanes_valid(&markers, &lanes);
            assert!(
                lanes.len() <= max_concurrency(&markers),
                "{:?} used {} lanes for concurrency {}",
                ranges,
                lanes.len(),
                max_concurrency(&markers)
            );
        }
    }

    #[test]
    fn test_layout_is_deterministic() {
        let markers = spans(&[(4.0, 9.0), (0.0, 5.0), (4.0, 6.0), (2.0, 3.0), (7.0, 8.0)]);
        let lanes = assign_lanes(&markers);
        assert_eq!(lanes, assign_lanes(&markers));
        // Earliest start opens the first lane.
        assert_eq!(lanes[0][0], 1);
    }

    #[test]
    fn test_point_marker_counts_inside_span() {
        let ranges = [(2.0, 5.0), (3.0, 3.0)];
        assert_eq!(assign_lanes(&ranges), vec![vec![0], vec![1]]);
        assert_eq!(max_concurrency(&ranges), 2);
        // A point on a boundary only touches.
        assert_eq!(max_concurrency(&[(0.0, 5.0), (5.0, 5.0)]), 1);
        assert_eq!(max_concurrency(&[(4.0, 4.0)]), 1);
    }

    #[test]
    fn test_tuple_spans() {
        let ranges = [(0.0, 2.0), (1.0, 3.0)];
        assert_eq!(assign_lanes(&ranges), vec![vec![0], vec![1]]);
        assert_eq!(max_concurrency(&ranges), 2);
    }
}
