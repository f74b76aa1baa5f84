use std::time::Duration;

use dioxus::prelude::*;

use crate::constants::*;
use crate::state::{MediaCommand, MediaEvent, PlaybackController};
use crate::timeline::PlaybackBtn;
use crate::utils::format_timestamp;

/// Sends `MediaCommand`s to the script attached to the review `<video>`.
#[derive(Clone, Copy)]
pub struct MediaBridge {
    eval: Signal<Option<document::Eval>>,
}

impl MediaBridge {
    pub fn send(&self, command: MediaCommand) {
        let Some(eval) = self.eval.peek().clone() else {
            log::debug!("Media bridge not attached, dropping {:?}", command);
            return;
        };
        if let Err(err) = eval.send(command) {
            log::warn!("Media command {:?} not delivered: {:?}", command, err);
        }
    }

    /// Send `command` if there is one. Convenience for controller results.
    pub fn send_opt(&self, command: Option<MediaCommand>) {
        if let Some(command) = command {
            self.send(command);
        }
    }
}

/// Attach the media bridge script and deliver every element event to `on_event`.
///
/// The script's frame loop only runs while the video plays. Unmounting sends
/// `Detach`, which cancels the loop and removes the element listeners.
pub fn use_media_bridge(on_event: Callback<MediaEvent>) -> MediaBridge {
    let mut eval = use_signal(|| None::<document::Eval>);

    use_effect(move || {
        if eval.peek().is_some() {
            return;
        }
        eval.set(Some(document::eval(MEDIA_BRIDGE_SCRIPT)));
    });

    use_future(move || async move {
        loop {
            let Some(handle) = eval() else {
                tokio::time::sleep(Duration::from_millis(50)).await;
                continue;
            };
            let mut handle = handle;
            loop {
                match handle.recv::<serde_json::Value>().await {
                    Ok(raw) => match serde_json::from_value::<MediaEvent>(raw) {
                        Ok(event) => on_event.call(event),
                        Err(err) => log::warn!("Ignoring malformed media event: {}", err),
                    },
                    Err(err) => {
                        log::debug!("Media bridge closed: {:?}", err);
                        return;
                    }
                }
            }
        }
    });

    use_drop(move || {
        if let Ok(current) = eval.try_peek() {
            if let Some(handle) = current.as_ref() {
                let _ = handle.send(MediaCommand::Detach);
            }
        }
    });

    MediaBridge { eval }
}

#[component]
pub fn VideoPlayer(
    src: String,
    playback: PlaybackController,
    on_toggle_play: EventHandler<()>,
    on_step: EventHandler<f64>,
    on_restart: EventHandler<()>,
) -> Element {
    let play_icon = if playback.is_playing { "⏸" } else { "▶" };
    let play_title = if playback.is_playing { "Pause (Space)" } else { "Play (Space)" };
    let has_duration = playback.duration.is_some();
    let has_error = playback.has_error();
    let time_label = format!(
        "{} / {}",
        format_timestamp(playback.current_time),
        format_timestamp(playback.duration_or_zero())
    );

    rsx! {
        div {
            style: "flex: 1; display: flex; flex-direction: column; min-height: 0; background-color: {BG_DEEPEST};",
            div {
                style: "flex: 1; min-height: 0; position: relative; display: flex; align-items: center; justify-content: center;",
                video {
                    id: "{VIDEO_ELEMENT_ID}",
                    src: "{src}",
                    preload: "metadata",
                    style: "max-width: 100%; max-height: 100%; outline: none;",
                    onclick: move |_| on_toggle_play.call(()),
                }
                if let Some(message) = playback.error.clone() {
                    div {
                        style: "
                            position: absolute; inset: 0;
                            display: flex; flex-direction: column; align-items: center; justify-content: center; gap: 6px;
                            background-color: rgba(9, 9, 11, 0.85);
                        ",
                        span { style: "font-size: 13px; font-weight: 600; color: {ACCENT_ERROR};", "Video unavailable" }
                        span { style: "font-size: 12px; color: {TEXT_SECONDARY};", "{message}" }
                    }
                }
            }
            div {
                style: "
                    display: flex; align-items: center; justify-content: center; gap: 4px;
                    height: 40px; flex-shrink: 0;
                    background-color: {BG_SURFACE}; border-top: 1px solid {BORDER_DEFAULT};
                    position: relative;
                ",
                if let Some(notice) = playback.notice.clone() {
                    span {
                        style: "
                            position: absolute; left: 14px; max-width: 30%;
                            overflow: hidden; text-overflow: ellipsis; white-space: nowrap;
                            font-size: 11px; color: {ACCENT_CONTENT};
                        ",
                        title: "{notice}",
                        "Playback refused: {notice}"
                    }
                }
                PlaybackBtn {
                    icon: "⏮",
                    title: "Restart",
                    disabled: !has_duration || has_error,
                    on_click: move |_| on_restart.call(()),
                }
                PlaybackBtn {
                    icon: "↺",
                    title: "Back 5s (←)",
                    disabled: !has_duration || has_error,
                    on_click: move |_| on_step.call(-KEYBOARD_SEEK_SECONDS),
                }
                PlaybackBtn {
                    icon: play_icon,
                    title: play_title,
                    primary: true,
                    disabled: has_error,
                    on_click: move |_| on_toggle_play.call(()),
                }
                PlaybackBtn {
                    icon: "↻",
                    title: "Forward 5s (→)",
                    disabled: !has_duration || has_error,
                    on_click: move |_| on_step.call(KEYBOARD_SEEK_SECONDS),
                }
                span {
                    style: "
                        position: absolute; right: 14px;
                        font-family: 'SF Mono', Consolas, monospace; font-size: 11px; color: {TEXT_DIM};
                    ",
                    "{time_label}"
                }
            }
        }
    }
}
