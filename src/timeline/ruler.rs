use dioxus::prelude::*;
use crate::constants::{BORDER_STRONG, TEXT_DIM, TIMELINE_RULER_HEIGHT};
use crate::core::marker_geometry::position;
use crate::utils::format_timestamp;

/// Pick a tick spacing that yields roughly eight labels.
pub(crate) fn tick_spacing(duration: f64) -> f64 {
    let nice_ticks = [1.0, 2.0, 5.0, 10.0, 15.0, 30.0, 60.0, 120.0, 300.0, 600.0];
    let target = duration / 8.0;
    nice_ticks
        .iter()
        .copied()
        .find(|tick| *tick >= target)
        .unwrap_or(600.0)
}

/// Time ruler with tick marks and labels
/// All elements here use pointer-events: none so clicks pass through to parent
#[component]
pub(crate) fn TimeRuler(duration: f64) -> Element {
    if duration <= 0.0 {
        return rsx! {
            div { style: "height: {TIMELINE_RULER_HEIGHT}px;" }
        };
    }
    let spacing = tick_spacing(duration);
    let num_ticks = (duration / spacing).floor() as i32 + 1;

    rsx! {
        div {
            style: "position: relative; height: {TIMELINE_RULER_HEIGHT}px; pointer-events: none;",
            for i in 0..num_ticks {
                {
                    let t = i as f64 * spacing;
                    let left = position(t, duration);
                    let label = format_timestamp(t);
                    // Right-align labels that would overflow the track.
                    let transform = if left > 94.0 { "translateX(-100%)" } else { "none" };
                    let label_offset = if left > 94.0 { -4.0 } else { 4.0 };
                    rsx! {
                        div {
                            key: "tick-{i}",
                            div {
                                style: "
                                    position: absolute;
                                    left: {left}%;
                                    bottom: 0;
                                    width: 1px;
                                    height: 8px;
                                    background-color: {BORDER_STRONG};
                                ",
                            }
                            div {
                                style: "
                                    position: absolute;
                                    left: calc({left}% + {label_offset}px);
                                    top: 3px;
                                    font-size: 9px;
                                    color: {TEXT_DIM};
                                    font-family: 'SF Mono', Consolas, monospace;
                                    user-select: none;
                                    transform: {transform};
                                ",
                                "{label}"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_spacing() {
        assert_eq!(tick_spacing(8.0), 1.0);
        assert_eq!(tick_spacing(100.0), 15.0);
        assert_eq!(tick_spacing(180.0), 30.0);
        assert_eq!(tick_spacing(36_000.0), 600.0);
    }
}
