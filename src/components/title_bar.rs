use dioxus::prelude::*;
use crate::constants::*;

#[component]
pub fn TitleBar(
    // Title of the presentation under review, if any.
    job_title: Option<String>,
    show_new_analysis: bool,
    on_new_analysis: EventHandler<MouseEvent>,
    backend_url: String,
) -> Element {
    rsx! {
        div {
            style: "
                display: flex; align-items: center; justify-content: space-between;
                height: 40px; padding: 0 16px;
                background-color: {BG_SURFACE}; border-bottom: 1px solid {BORDER_DEFAULT};
                user-select: none;
            ",
            div {
                style: "display: flex; align-items: center; gap: 20px; min-width: 220px;",
                span { style: "font-size: 13px; font-weight: 600; color: {TEXT_SECONDARY};", "PresentAI Coach" }
                if show_new_analysis {
                    button {
                        class: "collapse-btn",
                        style: "
                            background: transparent; border: none; color: {TEXT_PRIMARY};
                            font-size: 12px; cursor: pointer; padding: 4px 8px; border-radius: 4px;
                        ",
                        onclick: move |e| on_new_analysis.call(e),
                        "New Analysis"
                    }
                }
            }
            if let Some(title) = job_title {
                span { style: "font-size: 13px; color: {TEXT_MUTED};", "{title}" }
            }
            div {
                style: "display: flex; align-items: center; justify-content: flex-end; gap: 6px; min-width: 220px;",
                span {
                    style: "font-size: 10px; color: {TEXT_DIM}; text-transform: uppercase; letter-spacing: 0.6px;",
                    "Backend"
                }
                span {
                    style: "font-family: 'SF Mono', Consolas, monospace; font-size: 11px; color: {TEXT_MUTED};",
                    "{backend_url}"
                }
            }
        }
    }
}
