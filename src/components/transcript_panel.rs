use dioxus::prelude::*;
use crate::constants::*;

#[component]
pub fn TranscriptPanel(transcript: Option<String>) -> Element {
    match transcript {
        Some(text) => rsx! {
            p {
                style: "margin: 0; max-height: 240px; overflow-y: auto; font-size: 12px; color: {TEXT_SECONDARY}; line-height: 1.6; white-space: pre-wrap; user-select: text;",
                "{text}"
            }
        },
        None => rsx! {
            span { style: "font-size: 12px; color: {TEXT_DIM};", "No transcript available." }
        },
    }
}
