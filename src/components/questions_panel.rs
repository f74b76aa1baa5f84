use dioxus::prelude::*;

use crate::constants::*;
use crate::core::job_poller::PollSchedule;
use crate::core::question_poller::fetch_questions;
use crate::AppServices;

#[derive(Debug, Clone, PartialEq)]
enum QuestionsState {
    Idle,
    Generating,
    Ready(Vec<String>),
    Failed(String),
}

/// Practice questions generated from the analysis, on request.
#[component]
pub fn QuestionsPanel(job_id: String) -> Element {
    let services = use_context::<AppServices>();
    let mut state = use_signal(|| QuestionsState::Idle);

    let request = move |_: MouseEvent| {
        if matches!(*state.peek(), QuestionsState::Generating) {
            return;
        }
        state.set(QuestionsState::Generating);
        let api = services.api.clone();
        let schedule = PollSchedule::for_questions(&services.config.polling);
        let job_id = job_id.clone();
        // Scoped to this component: unmounting cancels the wait.
        spawn(async move {
            match fetch_questions(&*api, &job_id, schedule).await {
                Ok(questions) => {
                    log::info!("Received {} practice questions for job {}", questions.len(), job_id);
                    state.set(QuestionsState::Ready(questions));
                }
                Err(err) => {
                    log::warn!("Practice questions for job {} failed: {}", job_id, err);
                    state.set(QuestionsState::Failed(err.to_string()));
                }
            }
        });
    };

    let button_style = format!(
        "padding: 6px 12px; border-radius: 4px; border: 1px solid {BORDER_DEFAULT}; background-color: {BG_HOVER}; color: {TEXT_PRIMARY}; font-size: 11px; cursor: pointer; align-self: flex-start;"
    );

    match state() {
        QuestionsState::Idle => rsx! {
            div {
                style: "display: flex; flex-direction: column; gap: 8px;",
                span {
                    style: "font-size: 12px; color: {TEXT_DIM}; line-height: 1.5;",
                    "Generate audience-style questions to rehearse with."
                }
                button {
                    class: "collapse-btn",
                    style: "{button_style}",
                    onclick: request,
                    "Generate Questions"
                }
            }
        },
        QuestionsState::Generating => rsx! {
            div {
                style: "display: flex; flex-direction: column; gap: 8px;",
                span { style: "font-size: 12px; color: {TEXT_SECONDARY};", "Generating questions…" }
                div {
                    style: "position: relative; height: 4px; border-radius: 2px; overflow: hidden; background-color: {BG_SURFACE};",
                    div { class: "indeterminate-bar" }
                }
            }
        },
        QuestionsState::Ready(questions) if questions.is_empty() => rsx! {
            span { style: "font-size: 12px; color: {TEXT_DIM};", "No questions were generated for this talk." }
        },
        QuestionsState::Ready(questions) => rsx! {
            ol {
                style: "margin: 0; padding-left: 18px; display: flex; flex-direction: column; gap: 8px;",
                for (index, question) in questions.iter().enumerate() {
                    li {
                        key: "{index}",
                        style: "font-size: 12px; color: {TEXT_SECONDARY}; line-height: 1.5; user-select: text;",
                        "{question}"
                    }
                }
            }
        },
        QuestionsState::Failed(message) => rsx! {
            div {
                style: "display: flex; flex-direction: column; gap: 8px;",
                span { style: "font-size: 12px; color: {ACCENT_ERROR}; line-height: 1.5;", "{message}" }
                button {
                    class: "collapse-btn",
                    style: "{button_style}",
                    onclick: request,
                    "Try Again"
                }
            }
        },
    }
}
