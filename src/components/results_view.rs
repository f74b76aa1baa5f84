use std::time::Instant;

use dioxus::prelude::*;

use crate::constants::*;
use crate::hotkeys::{handle_hotkey, HotkeyAction, HotkeyContext, HotkeyResult};
use crate::state::{
    AnalysisResult, CategoryFilter, FeedbackSelection, JobHandle, Marker, MediaCommand,
    MediaEvent, PlaybackController,
};
use crate::timeline::FeedbackTimeline;
use crate::utils::{format_range, format_timestamp, resolve_media_url};
use crate::AppServices;

use super::category_filter::CategoryFilterBar;
use super::feedback_panel::FeedbackPanel;
use super::questions_panel::QuestionsPanel;
use super::score_card::ScoreCard;
use super::side_panel::{PanelSection, SidePanel};
use super::status_bar::StatusBar;
use super::transcript_panel::TranscriptPanel;
use super::video_player::{use_media_bridge, VideoPlayer};

/// Review screen: video, feedback timeline and the analysis side panel.
#[component]
pub fn ResultsView(
    job: JobHandle,
    result: AnalysisResult,
    on_discarded: EventHandler<()>,
) -> Element {
    let services = use_context::<AppServices>();
    let tuning = services.config.selection_tuning();
    let min_width_percent = services.config.timeline.min_marker_width_percent;
    let base_url = services.config.api.base_url.clone();

    let mut playback = use_signal(PlaybackController::new);
    let mut selection = use_signal(FeedbackSelection::default);
    let mut filter = use_signal(CategoryFilter::default);
    let mut panel_collapsed = use_signal(|| false);
    let mut discard_armed = use_signal(|| false);
    let mut discarding = use_signal(|| false);
    let mut notice = use_signal(|| None::<String>);

    let filtered_source = result.clone();
    let visible_markers = use_memo(move || filtered_source.markers_in(&filter()));

    let on_media_event = use_callback(move |event: MediaEvent| {
        let time = match &event {
            MediaEvent::Time { current_time } => Some(*current_time),
            _ => None,
        };
        playback.write().apply(event);
        if let Some(time) = time {
            let mut next = selection.peek().clone();
            if next.on_time_update(time, &visible_markers.peek(), tuning) {
                selection.set(next);
            }
        }
    });
    let bridge = use_media_bridge(on_media_event);

    // Hidden categories cannot stay selected.
    use_effect(move || {
        let visible = visible_markers();
        let current = selection.peek().marker().cloned();
        if let Some(marker) = current {
            if !visible.iter().any(|m| m.same_marker(&marker)) {
                let time = playback.peek().current_time;
                let mut next = FeedbackSelection::None;
                next.on_time_update(time, &visible, tuning);
                selection.set(next);
            }
        }
    });

    let mut select_marker = move |marker: Marker| {
        // Pin first so the time update caused by the seek sees the manual selection.
        let target = selection.write().on_marker_clicked(marker.clone(), Instant::now(), tuning);
        log::debug!("Pinned {} marker at {}, seeking to {:.2}s", marker.category, marker.start, target);
        bridge.send_opt(playback.write().seek_to_marker(&marker, tuning.lookback));
    };

    let mut release_selection = move || {
        let time = playback.peek().current_time;
        let mut next = selection.peek().clone();
        next.clear();
        next.on_time_update(time, &visible_markers.peek(), tuning);
        selection.set(next);
    };

    let mut toggle_play = move || {
        bridge.send_opt(playback.write().toggle_play());
    };

    let mut step = move |delta: f64| {
        bridge.send_opt(playback.write().step(delta));
    };

    let on_keydown = move |e: KeyboardEvent| {
        let modifiers = e.modifiers();
        let context = HotkeyContext {
            review_active: true,
            input_focused: false,
        };
        match handle_hotkey(
            &e.key(),
            modifiers.shift(),
            modifiers.ctrl(),
            modifiers.alt(),
            modifiers.meta(),
            &context,
        ) {
            HotkeyResult::Action(action) => {
                e.prevent_default();
                match action {
                    HotkeyAction::PlayPause => toggle_play(),
                    HotkeyAction::SeekBackward => step(-KEYBOARD_SEEK_SECONDS),
                    HotkeyAction::SeekForward => step(KEYBOARD_SEEK_SECONDS),
                    HotkeyAction::ClearSelection => release_selection(),
                }
            }
            HotkeyResult::NoMatch | HotkeyResult::Suppressed => {}
        }
    };

    let discard_job_id = job.id.clone();
    let discard = move |_: MouseEvent| {
        if discarding() {
            return;
        }
        if !discard_armed() {
            discard_armed.set(true);
            return;
        }
        discarding.set(true);
        let api = services.api.clone();
        let job_id = discard_job_id.clone();
        spawn(async move {
            match api.delete_job(&job_id).await {
                Ok(()) => {
                    log::info!("Discarded job {}", job_id);
                    bridge.send(MediaCommand::Pause);
                    on_discarded.call(());
                }
                Err(err) => {
                    log::warn!("Could not discard job {}: {}", job_id, err);
                    discarding.set(false);
                    discard_armed.set(false);
                    notice.set(Some(format!("Discard failed: {}", err)));
                }
            }
        });
    };

    let snapshot = playback();
    let current_selection = selection();
    let markers = visible_markers();
    let timeline_duration = snapshot.duration.or(result.reported_duration()).unwrap_or(0.0);
    let video_src = resolve_media_url(&base_url, &result.video_url);
    let counts = result.category_counts();
    let marker_count = result.markers.len();
    let transcript = result.transcript_text().map(str::to_string);
    let discard_label = if discarding() {
        "Discarding…"
    } else if discard_armed() {
        "Click again to discard"
    } else {
        "Discard Analysis"
    };
    let feedback_aside = current_selection.is_manual().then(|| "Pinned".to_string());
    let discard_color = if discard_armed() { ACCENT_ERROR } else { TEXT_MUTED };

    let status = match (&current_selection, notice()) {
        (_, Some(message)) => message,
        (FeedbackSelection::Manual { marker, .. }, None) => format!(
            "Pinned: {} {} (Esc to follow playback)",
            marker.category.label(),
            format_range(marker.start, marker.end)
        ),
        (FeedbackSelection::Auto(marker), None) => {
            format!("{}: {}", marker.category.label(), marker.label)
        }
        (FeedbackSelection::None, None) => format!("{} feedback markers", marker_count),
    };
    let status_detail = format!(
        "{} / {}",
        format_timestamp(snapshot.current_time),
        format_timestamp(timeline_duration)
    );

    rsx! {
        div {
            style: "flex: 1; display: flex; flex-direction: column; min-height: 0; outline: none;",
            tabindex: "0",
            autofocus: true,
            onkeydown: on_keydown,

            div {
                style: "flex: 1; display: flex; min-height: 0;",

                div {
                    style: "flex: 1; display: flex; flex-direction: column; min-width: 0;",
                    VideoPlayer {
                        src: video_src,
                        playback: snapshot.clone(),
                        on_toggle_play: move |_| toggle_play(),
                        on_step: move |delta| step(delta),
                        on_restart: move |_| bridge.send_opt(playback.write().seek_to_time(0.0)),
                    }
                    FeedbackTimeline {
                        markers: markers,
                        duration: timeline_duration,
                        current_time: snapshot.current_time,
                        selection: current_selection.clone(),
                        min_width_percent: min_width_percent,
                        is_seeking: snapshot.is_seeking,
                        on_seek_fraction: move |fraction| {
                            bridge.send_opt(playback.write().seek_to_fraction(fraction));
                        },
                        on_scrub_start: move |_| playback.write().begin_scrub(),
                        on_scrub_end: move |_| playback.write().end_scrub(),
                        on_marker_select: select_marker,
                    }
                }

                SidePanel {
                    title: "Analysis",
                    width: SIDE_PANEL_WIDTH,
                    collapsed: panel_collapsed(),
                    on_toggle: move |_| panel_collapsed.toggle(),

                    PanelSection {
                        title: "Feedback",
                        aside: feedback_aside,
                        FeedbackPanel {
                            selection: current_selection.clone(),
                            media_base_url: base_url.clone(),
                            on_replay: move |_| {
                                let pinned = selection.peek().marker().cloned();
                                if let Some(marker) = pinned {
                                    select_marker(marker);
                                }
                            },
                            on_release: move |_| release_selection(),
                        }
                    }
                    PanelSection {
                        title: "Categories",
                        aside: Some(format!("{} total", marker_count)),
                        CategoryFilterBar {
                            filter: filter(),
                            counts: counts,
                            on_change: move |next| filter.set(next),
                        }
                    }
                    PanelSection {
                        title: "Scores",
                        ScoreCard { scores: result.scores }
                    }
                    PanelSection {
                        title: "Practice Questions",
                        QuestionsPanel { job_id: job.id.clone() }
                    }
                    PanelSection {
                        title: "Transcript",
                        TranscriptPanel { transcript: transcript }
                    }
                    div {
                        style: "padding: 12px 14px;",
                        button {
                            class: "collapse-btn",
                            disabled: discarding(),
                            style: "
                                padding: 6px 12px; border-radius: 4px; border: 1px solid {BORDER_DEFAULT};
                                background: transparent; color: {discard_color}; font-size: 11px; cursor: pointer;
                            ",
                            onclick: discard,
                            onmouseleave: move |_| {
                                if !discarding() {
                                    discard_armed.set(false);
                                }
                            },
                            "{discard_label}"
                        }
                    }
                }
            }

            StatusBar { status: status, detail: Some(status_detail) }
        }
    }
}
