use dioxus::prelude::*;

use crate::constants::{BG_DEEPEST, TEXT_PRIMARY};
use crate::core::marker_geometry::{display_width, position};
use crate::state::Marker;
use crate::utils::format_range;

/// A feedback marker block, positioned by percentage of the timeline.
#[component]
pub fn MarkerElement(
    marker: Marker,
    duration: f64,
    min_width_percent: f64,
    is_selected: bool,
    is_pinned: bool,
    on_select: EventHandler<Marker>,
) -> Element {
    let left = position(marker.start, duration);
    // Keep the block inside the track when the minimum width pushes it past the end.
    let width = display_width(marker.start, marker.end, duration, min_width_percent).min(100.0 - left).max(0.0);
    let color = marker.category.color();
    let opacity = if is_selected { 1.0 } else { marker.severity.intensity() };
    let outline = if is_pinned {
        format!("0 0 0 2px {}", TEXT_PRIMARY)
    } else if is_selected {
        format!("0 0 0 1px {}", TEXT_PRIMARY)
    } else {
        format!("0 0 0 1px {}", BG_DEEPEST)
    };
    let tooltip = format!(
        "{} · {} · {}",
        marker.category.label(),
        format_range(marker.start, marker.end),
        marker.label
    );
    let z_index = if is_selected { 3 } else { 1 };

    rsx! {
        div {
            title: "{tooltip}",
            style: "
                position: absolute;
                left: {left}%;
                width: {width}%;
                top: 3px;
                bottom: 3px;
                min-width: 3px;
                border-radius: 3px;
                background-color: {color};
                opacity: {opacity};
                box-shadow: {outline};
                cursor: pointer;
                z-index: {z_index};
                transition: opacity 0.12s ease, box-shadow 0.12s ease;
            ",
            onmousedown: move |e| {
                // Keep the track underneath from starting a scrub.
                e.stop_propagation();
            },
            onclick: {
                let marker = marker.clone();
                move |e: MouseEvent| {
                    e.stop_propagation();
                    on_select.call(marker.clone());
                }
            },
        }
    }
}
