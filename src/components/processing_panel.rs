use std::time::Duration;

use dioxus::prelude::*;

use crate::constants::*;
use crate::core::job_poller::{wait_for_result, PollSchedule};
use crate::error::CoachError;
use crate::state::{AnalysisResult, JobHandle, JobStatus, JobStatusReport};
use crate::AppServices;

/// Waits for the analysis of `job`, showing backend progress.
///
/// Polling lives in this component's future, so leaving the view stops it.
#[component]
pub fn ProcessingPanel(
    job: JobHandle,
    on_completed: EventHandler<(String, AnalysisResult)>,
    on_start_over: EventHandler<MouseEvent>,
) -> Element {
    let services = use_context::<AppServices>();
    let mut report = use_signal(|| JobStatusReport::new(JobStatus::Queued));
    let mut failure = use_signal(|| None::<CoachError>);
    let mut now = use_signal(chrono::Local::now);

    let poll_job = job.clone();
    use_future(move || {
        let api = services.api.clone();
        let schedule = PollSchedule::for_jobs(&services.config.polling);
        let job = poll_job.clone();
        async move {
            log::info!("Waiting for analysis of job {}", job.id);
            let outcome = wait_for_result(&*api, &job.id, schedule, |status| {
                report.set(status.clone());
            })
            .await;
            match outcome {
                Ok(result) => {
                    log::info!("Job {} finished with {} markers", job.id, result.markers.len());
                    on_completed.call((job.id.clone(), result));
                }
                Err(err) => {
                    log::warn!("Job {} did not produce a result: {}", job.id, err);
                    failure.set(Some(err));
                }
            }
        }
    });

    // Elapsed-time tick
    use_future(move || async move {
        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;
            if failure.peek().is_some() {
                break;
            }
            now.set(chrono::Local::now());
        }
    });

    let current = report();
    let elapsed = job.elapsed_secs(now());
    let elapsed_label = format!("{}:{:02}", elapsed / 60, elapsed % 60);
    let percent = current.progress_percent();
    let bar_width = percent.map(f64::from).unwrap_or(0.0);
    let status_line = match (&current.message, percent) {
        (Some(message), Some(p)) => format!("{} ({}%)", message, p),
        (Some(message), None) => message.clone(),
        (None, Some(p)) => format!("{} ({}%)", current.status.label(), p),
        (None, None) => current.status.label().to_string(),
    };
    let failure_view = failure().map(|err| {
        let heading = match &err {
            CoachError::Timeout { .. } => "Analysis is taking too long",
            CoachError::JobFailed(_) => "Analysis failed",
            err if err.is_request_failure() => "Lost contact with the backend",
            _ => "Something went wrong",
        };
        (heading, err.to_string())
    });

    rsx! {
        div {
            style: "flex: 1; display: flex; align-items: center; justify-content: center;",
            div {
                style: "
                    width: 520px; padding: 28px;
                    background-color: {BG_ELEVATED}; border: 1px solid {BORDER_DEFAULT}; border-radius: 10px;
                    display: flex; flex-direction: column; gap: 16px;
                ",
                div {
                    style: "display: flex; align-items: baseline; justify-content: space-between;",
                    span { style: "font-size: 16px; font-weight: 600; color: {TEXT_PRIMARY};", "{job.title}" }
                    span {
                        style: "font-family: 'SF Mono', Consolas, monospace; font-size: 11px; color: {TEXT_DIM};",
                        "{elapsed_label}"
                    }
                }

                if let Some((heading, detail)) = failure_view {
                    div {
                        style: "display: flex; flex-direction: column; gap: 6px;",
                        span { style: "font-size: 13px; font-weight: 600; color: {ACCENT_ERROR};", "{heading}" }
                        span { style: "font-size: 12px; color: {TEXT_SECONDARY};", "{detail}" }
                    }
                    button {
                        class: "collapse-btn",
                        style: "
                            height: 34px; border: 1px solid {BORDER_DEFAULT}; border-radius: 6px;
                            background-color: {BG_HOVER}; color: {TEXT_PRIMARY};
                            font-size: 12px; cursor: pointer;
                        ",
                        onclick: move |e| on_start_over.call(e),
                        "Start Over"
                    }
                } else {
                    div {
                        style: "
                            position: relative; height: 6px; border-radius: 3px; overflow: hidden;
                            background-color: {BG_SURFACE};
                        ",
                        if percent.is_some() {
                            div {
                                style: "
                                    position: absolute; left: 0; top: 0; bottom: 0;
                                    width: {bar_width}%;
                                    background-color: {ACCENT_PRIMARY};
                                    transition: width 0.3s ease;
                                ",
                            }
                        } else {
                            div { class: "indeterminate-bar" }
                        }
                    }
                    span { style: "font-size: 12px; color: {TEXT_SECONDARY};", "{status_line}" }
                    span {
                        style: "font-size: 11px; color: {TEXT_DIM};",
                        "Analysis usually takes a minute or two. Job {job.id}"
                    }
                }
            }
        }
    }
}
