use dioxus::prelude::*;

use crate::constants::*;
use crate::state::{FeedbackSelection, Severity};
use crate::utils::{format_range, resolve_media_url};

/// Details for the marker currently shown, whether followed from playback or pinned.
#[component]
pub fn FeedbackPanel(
    selection: FeedbackSelection,
    media_base_url: String,
    on_replay: EventHandler<MouseEvent>,
    on_release: EventHandler<MouseEvent>,
) -> Element {
    let Some(marker) = selection.marker().cloned() else {
        return rsx! {
            div {
                style: "font-size: 12px; color: {TEXT_DIM}; line-height: 1.5;",
                "Play the video or click a marker on the timeline to see feedback here."
            }
        };
    };
    let pinned = selection.is_manual();
    let color = marker.category.color();
    let range = format_range(marker.start, marker.end);
    let severity = marker.severity.value();
    let max_severity = Severity::MAX;
    let demo_src = marker
        .demo_video_url()
        .map(|url| resolve_media_url(&media_base_url, url));

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 10px;",
            div {
                style: "display: flex; align-items: center; gap: 8px;",
                span {
                    style: "
                        padding: 2px 8px; border-radius: 999px;
                        background-color: {color}; color: {BG_DEEPEST};
                        font-size: 10px; font-weight: 600; text-transform: uppercase; letter-spacing: 0.4px;
                    ",
                    "{marker.category.label()}"
                }
                span {
                    style: "font-family: 'SF Mono', Consolas, monospace; font-size: 11px; color: {TEXT_MUTED};",
                    "{range}"
                }
                div { style: "flex: 1;" }
                if pinned {
                    span { style: "font-size: 10px; color: {TEXT_SECONDARY};", "Pinned" }
                }
            }
            span { style: "font-size: 14px; font-weight: 600; color: {TEXT_PRIMARY};", "{marker.label}" }
            div {
                style: "display: flex; align-items: center; gap: 4px;",
                title: "Severity {severity} of {max_severity}",
                for level in Severity::MIN..=Severity::MAX {
                    {
                        let fill = if level <= severity { color } else { BG_HOVER };
                        rsx! {
                            span {
                                key: "{level}",
                                style: "width: 14px; height: 4px; border-radius: 2px; background-color: {fill};",
                            }
                        }
                    }
                }
            }
            if !marker.feedback.is_empty() {
                p {
                    style: "margin: 0; font-size: 12px; color: {TEXT_SECONDARY}; line-height: 1.5; white-space: pre-wrap; user-select: text;",
                    "{marker.feedback}"
                }
            }
            if let Some(src) = demo_src {
                div {
                    style: "display: flex; flex-direction: column; gap: 4px;",
                    span { style: "font-size: 10px; color: {TEXT_DIM}; text-transform: uppercase; letter-spacing: 0.6px;", "Demonstration" }
                    video {
                        key: "{src}",
                        src: "{src}",
                        controls: true,
                        preload: "metadata",
                        style: "width: 100%; border-radius: 4px; background-color: {BG_DEEPEST};",
                    }
                }
            }
            div {
                style: "display: flex; gap: 6px;",
                button {
                    class: "collapse-btn",
                    style: "
                        padding: 4px 10px; border-radius: 4px; border: 1px solid {BORDER_DEFAULT};
                        background-color: {BG_HOVER}; color: {TEXT_PRIMARY}; font-size: 11px; cursor: pointer;
                    ",
                    onclick: move |e| on_replay.call(e),
                    "Replay moment"
                }
                if pinned {
                    button {
                        class: "collapse-btn",
                        title: "Esc",
                        style: "
                            padding: 4px 10px; border-radius: 4px; border: none;
                            background: transparent; color: {TEXT_MUTED}; font-size: 11px; cursor: pointer;
                        ",
                        onclick: move |e| on_release.call(e),
                        "Follow playback"
                    }
                }
            }
        }
    }
}
