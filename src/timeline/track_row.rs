use dioxus::prelude::*;

use crate::constants::{BG_BASE, BORDER_SUBTLE, TIMELINE_LANE_HEIGHT};
use crate::state::{FeedbackSelection, Marker};

use super::marker_element::MarkerElement;

/// One lane of non-overlapping markers.
#[component]
pub fn TrackRow(
    lane: usize,
    markers: Vec<Marker>,
    duration: f64,
    min_width_percent: f64,
    selection: FeedbackSelection,
    on_marker_select: EventHandler<Marker>,
) -> Element {
    let pinned = selection.is_manual();

    rsx! {
        div {
            style: "
                position: relative;
                height: {TIMELINE_LANE_HEIGHT}px;
                border-bottom: 1px solid {BORDER_SUBTLE};
                background-color: {BG_BASE};
            ",
            for marker in markers.iter() {
                {
                    let is_selected = selection.is_selected(marker);
                    rsx! {
                        MarkerElement {
                            key: "{marker.category}-{marker.start}-{marker.end}",
                            marker: marker.clone(),
                            duration: duration,
                            min_width_percent: min_width_percent,
                            is_selected: is_selected,
                            is_pinned: is_selected && pinned,
                            on_select: move |m| on_marker_select.call(m),
                        }
                    }
                }
            }
        }
    }
}
