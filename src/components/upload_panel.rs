use std::path::PathBuf;

use dioxus::prelude::*;

use crate::api::{UploadRequest, MAX_VIDEO_BYTES, SUPPORTING_EXTENSIONS, VIDEO_EXTENSIONS};
use crate::constants::*;
use crate::state::JobHandle;
use crate::utils::{display_file_name, format_bytes};
use crate::AppServices;

/// Upload form: video, optional supporting document, optional title.
#[component]
pub fn UploadPanel(on_submitted: EventHandler<JobHandle>) -> Element {
    let services = use_context::<AppServices>();
    let mut video = use_signal(|| None::<PathBuf>);
    let mut supporting_file = use_signal(|| None::<PathBuf>);
    let mut title = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut uploading = use_signal(|| false);

    let video_label = video()
        .map(|path| {
            let size = std::fs::metadata(&path).map(|meta| meta.len()).ok();
            match size {
                Some(bytes) => format!("{} ({})", display_file_name(&path), format_bytes(bytes)),
                None => display_file_name(&path),
            }
        })
        .unwrap_or_else(|| "No video selected".to_string());
    let supporting_label = supporting_file()
        .map(|path| display_file_name(&path))
        .unwrap_or_else(|| "None".to_string());
    let limit_label = format_bytes(MAX_VIDEO_BYTES);
    let supporting_kinds = SUPPORTING_EXTENSIONS
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(", ");
    let can_submit = video().is_some() && !uploading();
    let submit_bg = if can_submit { ACCENT_PRIMARY } else { BG_HOVER };
    let submit_cursor = if can_submit { "pointer" } else { "default" };

    let submit = move |_: MouseEvent| {
        if uploading() {
            return;
        }
        let request = UploadRequest {
            video: video(),
            supporting_file: supporting_file(),
            title: Some(title()),
        };
        if let Err(err) = request.validate() {
            error.set(Some(err.to_string()));
            return;
        }
        error.set(None);
        uploading.set(true);
        let api = services.api.clone();
        spawn(async move {
            match api.upload(&request).await {
                Ok(job_id) => {
                    log::info!("Upload accepted as job {}", job_id);
                    uploading.set(false);
                    on_submitted.call(JobHandle::new(job_id, request.trimmed_title()));
                }
                Err(err) => {
                    log::warn!("Upload failed: {}", err);
                    uploading.set(false);
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    rsx! {
        div {
            style: "flex: 1; display: flex; align-items: center; justify-content: center; overflow-y: auto;",
            div {
                style: "
                    width: 520px; padding: 28px;
                    background-color: {BG_ELEVATED}; border: 1px solid {BORDER_DEFAULT}; border-radius: 10px;
                    display: flex; flex-direction: column; gap: 18px;
                ",
                div {
                    style: "display: flex; flex-direction: column; gap: 4px;",
                    span { style: "font-size: 18px; font-weight: 600; color: {TEXT_PRIMARY};", "Analyze a presentation" }
                    span {
                        style: "font-size: 12px; color: {TEXT_MUTED};",
                        "Upload a recording to get timestamped feedback on gestures, inflection, clarity, and content."
                    }
                }

                FileRow {
                    label: "Video",
                    hint: format!(".mp4, up to {}", limit_label),
                    value: video_label,
                    button_label: "Choose Video",
                    disabled: uploading(),
                    on_pick: move |_| {
                        if let Some(path) = rfd::FileDialog::new()
                            .set_title("Choose presentation video")
                            .add_filter("Video", VIDEO_EXTENSIONS)
                            .pick_file()
                        {
                            error.set(None);
                            video.set(Some(path));
                        }
                    },
                    clearable: false,
                    on_clear: move |_| video.set(None),
                }

                FileRow {
                    label: "Supporting file",
                    hint: format!("Optional: {}", supporting_kinds),
                    value: supporting_label,
                    button_label: "Choose File",
                    disabled: uploading(),
                    on_pick: move |_| {
                        if let Some(path) = rfd::FileDialog::new()
                            .set_title("Choose supporting document")
                            .add_filter("Documents", SUPPORTING_EXTENSIONS)
                            .pick_file()
                        {
                            error.set(None);
                            supporting_file.set(Some(path));
                        }
                    },
                    clearable: supporting_file().is_some(),
                    on_clear: move |_| supporting_file.set(None),
                }

                div {
                    style: "display: flex; flex-direction: column; gap: 6px;",
                    span { style: "font-size: 11px; color: {TEXT_MUTED}; text-transform: uppercase; letter-spacing: 0.5px;", "Title" }
                    input {
                        r#type: "text",
                        placeholder: "Untitled Presentation",
                        value: "{title}",
                        disabled: uploading(),
                        style: "
                            width: 100%; box-sizing: border-box;
                            padding: 8px 10px; font-size: 13px;
                            background-color: {BG_SURFACE}; color: {TEXT_PRIMARY};
                            border: 1px solid {BORDER_DEFAULT}; border-radius: 4px;
                            outline: none;
                            user-select: text;
                        ",
                        oninput: move |e| title.set(e.value()),
                    }
                }

                if let Some(message) = error() {
                    div {
                        style: "
                            padding: 8px 10px; border-radius: 4px;
                            border: 1px solid {ACCENT_ERROR}; color: {ACCENT_ERROR};
                            font-size: 12px;
                        ",
                        "{message}"
                    }
                }

                button {
                    class: "collapse-btn",
                    disabled: !can_submit,
                    style: "
                        height: 36px; border: none; border-radius: 6px;
                        background-color: {submit_bg}; color: {TEXT_PRIMARY};
                        font-size: 13px; font-weight: 600; cursor: {submit_cursor};
                    ",
                    onclick: submit,
                    if uploading() { "Uploading…" } else { "Upload & Analyze" }
                }
            }
        }
    }
}

#[component]
fn FileRow(
    label: &'static str,
    hint: String,
    value: String,
    button_label: &'static str,
    disabled: bool,
    on_pick: EventHandler<MouseEvent>,
    clearable: bool,
    on_clear: EventHandler<MouseEvent>,
) -> Element {
    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 6px;",
            div {
                style: "display: flex; align-items: baseline; justify-content: space-between;",
                span { style: "font-size: 11px; color: {TEXT_MUTED}; text-transform: uppercase; letter-spacing: 0.5px;", "{label}" }
                span { style: "font-size: 10px; color: {TEXT_DIM};", "{hint}" }
            }
            div {
                style: "display: flex; align-items: center; gap: 8px;",
                div {
                    style: "
                        flex: 1; min-width: 0; padding: 8px 10px;
                        background-color: {BG_SURFACE}; border: 1px solid {BORDER_DEFAULT}; border-radius: 4px;
                        font-size: 12px; color: {TEXT_SECONDARY};
                        white-space: nowrap; overflow: hidden; text-overflow: ellipsis;
                    ",
                    "{value}"
                }
                if clearable {
                    button {
                        class: "collapse-btn",
                        disabled: disabled,
                        style: "
                            width: 28px; height: 32px; border: 1px solid {BORDER_DEFAULT}; border-radius: 4px;
                            background: transparent; color: {TEXT_MUTED}; font-size: 12px; cursor: pointer;
                        ",
                        onclick: move |e| on_clear.call(e),
                        "×"
                    }
                }
                button {
                    class: "collapse-btn",
                    disabled: disabled,
                    style: "
                        padding: 0 12px; height: 32px; border: 1px solid {BORDER_DEFAULT}; border-radius: 4px;
                        background-color: {BG_HOVER}; color: {TEXT_PRIMARY}; font-size: 12px; cursor: pointer;
                    ",
                    onclick: move |e| on_pick.call(e),
                    "{button_label}"
                }
            }
        }
    }
}
