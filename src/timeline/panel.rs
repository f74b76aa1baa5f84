use std::time::Duration;

use dioxus::prelude::*;

use crate::constants::{
    ACCENT_PLAYHEAD, BG_ELEVATED, BG_SURFACE, BORDER_DEFAULT, TEXT_DIM, TEXT_MUTED,
    TIMELINE_LANE_HEIGHT, TIMELINE_MIN_LANES, TIMELINE_RULER_HEIGHT, TIMELINE_TRACK_ID,
    TIMELINE_VIEWPORT_SCRIPT,
};
use crate::core::marker_geometry::position;
use crate::core::track_layout::{assign_lanes, max_concurrency};
use crate::state::{FeedbackSelection, Marker};
use crate::utils::format_timestamp;

use super::ruler::TimeRuler;
use super::track_row::TrackRow;
use super::TrackBounds;

/// Feedback timeline: ruler, marker lanes and playhead.
///
/// Everything is positioned in percent of `duration`, so the track always
/// fits its container. Pressing on the track seeks and starts a scrub; moving
/// keeps seeking until the button is released. `duration` is 0 until the
/// video has reported it.
#[component]
pub fn FeedbackTimeline(
    markers: Vec<Marker>,
    duration: f64,
    current_time: f64,
    selection: FeedbackSelection,
    min_width_percent: f64,
    is_seeking: bool,
    on_seek_fraction: EventHandler<f64>,
    on_scrub_start: EventHandler<()>,
    on_scrub_end: EventHandler<()>,
    on_marker_select: EventHandler<Marker>,
) -> Element {
    let mut viewport_eval = use_signal(|| None::<document::Eval>);
    let mut track_bounds = use_signal(|| None::<TrackBounds>);

    use_effect(move || {
        if viewport_eval.peek().is_some() {
            return;
        }
        let eval = document::eval(TIMELINE_VIEWPORT_SCRIPT);
        viewport_eval.set(Some(eval));
    });

    use_future(move || async move {
        loop {
            let Some(eval) = viewport_eval() else {
                tokio::time::sleep(Duration::from_millis(100)).await;
                continue;
            };
            let mut eval = eval;
            loop {
                match eval.recv::<TrackBounds>().await {
                    Ok(bounds) => {
                        if track_bounds() != Some(bounds) {
                            track_bounds.set(Some(bounds));
                        }
                    }
                    Err(err) => {
                        log::debug!("Timeline viewport bridge closed: {:?}", err);
                        break;
                    }
                }
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    });

    let lanes = assign_lanes(&markers);
    let lane_count = lanes.len().max(TIMELINE_MIN_LANES);
    let lane_markers: Vec<Vec<Marker>> = (0..lane_count)
        .map(|lane| {
            lanes
                .get(lane)
                .map(|members| members.iter().map(|&i| markers[i].clone()).collect())
                .unwrap_or_default()
        })
        .collect();

    let has_duration = duration > 0.0;
    let playhead = position(current_time, duration);
    let track_height = TIMELINE_LANE_HEIGHT * lane_count as f64;
    let track_cursor = if has_duration { "pointer" } else { "default" };
    let peak_overlap = max_concurrency(&markers);
    let summary = match markers.len() {
        0 => "No feedback in the selected categories".to_string(),
        1 => "1 marker".to_string(),
        count if peak_overlap > 1 => format!("{} markers, up to {} at once", count, peak_overlap),
        count => format!("{} markers", count),
    };
    let time_label = format!("{} / {}", format_timestamp(current_time), format_timestamp(duration));

    let seek_from_pointer = move |client_x: f64| {
        if let Some(bounds) = track_bounds() {
            on_seek_fraction.call(bounds.fraction_at(client_x));
        }
    };

    rsx! {
        div {
            style: "
                display: flex; flex-direction: column;
                background-color: {BG_ELEVATED};
                border-top: 1px solid {BORDER_DEFAULT};
                flex-shrink: 0;
            ",
            onmousemove: move |e| {
                if is_seeking {
                    e.prevent_default();
                    seek_from_pointer(e.client_coordinates().x);
                }
            },
            onmouseup: move |_| {
                if is_seeking {
                    on_scrub_end.call(());
                }
            },
            onmouseleave: move |_| {
                if is_seeking {
                    on_scrub_end.call(());
                }
            },

            // Header
            div {
                style: "
                    display: flex; align-items: center; justify-content: space-between;
                    height: 30px; padding: 0 14px;
                    background-color: {BG_SURFACE}; border-bottom: 1px solid {BORDER_DEFAULT};
                ",
                div {
                    style: "display: flex; align-items: center; gap: 12px;",
                    span { style: "font-size: 11px; font-weight: 500; color: {TEXT_MUTED}; text-transform: uppercase; letter-spacing: 0.5px;", "Feedback Timeline" }
                    span { style: "font-size: 10px; color: {TEXT_DIM};", "{summary}" }
                }
                span {
                    style: "font-family: 'SF Mono', Consolas, monospace; font-size: 11px; color: {TEXT_DIM};",
                    "{time_label}"
                }
            }

            div {
                style: "padding: 0 14px 10px 14px;",
                div {
                    id: "{TIMELINE_TRACK_ID}",
                    style: "
                        position: relative;
                        cursor: {track_cursor};
                        user-select: none;
                    ",
                    onmousedown: move |e| {
                        if !has_duration {
                            return;
                        }
                        e.prevent_default();
                        seek_from_pointer(e.client_coordinates().x);
                        on_scrub_start.call(());
                    },

                    TimeRuler { duration: duration }

                    div {
                        style: "display: flex; flex-direction: column; height: {track_height}px;",
                        for (lane, members) in lane_markers.into_iter().enumerate() {
                            TrackRow {
                                key: "{lane}",
                                lane: lane,
                                markers: members,
                                duration: duration,
                                min_width_percent: min_width_percent,
                                selection: selection.clone(),
                                on_marker_select: move |m| on_marker_select.call(m),
                            }
                        }
                    }

                    if has_duration {
                        // Playhead line over ruler and lanes
                        div {
                            style: "
                                position: absolute;
                                left: {playhead}%;
                                top: 0;
                                width: 2px;
                                height: 100%;
                                margin-left: -1px;
                                background-color: {ACCENT_PLAYHEAD};
                                pointer-events: none;
                                z-index: 10;
                            ",
                        }
                        div {
                            style: "
                                position: absolute;
                                left: calc({playhead}% - 6px);
                                top: 0;
                                width: 0;
                                height: 0;
                                border-left: 6px solid transparent;
                                border-right: 6px solid transparent;
                                border-top: 8px solid {ACCENT_PLAYHEAD};
                                pointer-events: none;
                                z-index: 11;
                            ",
                        }
                    } else {
                        div {
                            style: "
                                position: absolute;
                                left: 0; right: 0; top: {TIMELINE_RULER_HEIGHT}px; bottom: 0;
                                display: flex; align-items: center; justify-content: center;
                                font-size: 11px; color: {TEXT_DIM};
                                pointer-events: none;
                            ",
                            "Loading video…"
                        }
                    }
                }
            }
        }
    }
}
