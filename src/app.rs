//! Root component and screen flow.

use dioxus::prelude::*;

use crate::components::{ProcessingPanel, ResultsView, StatusBar, TitleBar, UploadPanel};
use crate::constants::*;
use crate::state::{AnalysisResult, JobHandle};
use crate::AppServices;

/// Which screen is showing. Reset always returns to `Upload`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AppView {
    #[default]
    Upload,
    Processing(JobHandle),
    Results {
        job: JobHandle,
        result: AnalysisResult,
    },
}

impl AppView {
    pub fn job(&self) -> Option<&JobHandle> {
        match self {
            AppView::Upload => None,
            AppView::Processing(job) => Some(job),
            AppView::Results { job, .. } => Some(job),
        }
    }

    /// A finished analysis only applies to the job it was polled for.
    pub fn complete(&self, job_id: &str, result: AnalysisResult) -> Option<AppView> {
        match self {
            AppView::Processing(job) if job.id == job_id => Some(AppView::Results {
                job: job.clone(),
                result,
            }),
            _ => None,
        }
    }
}

/// Main application component
#[component]
pub fn App() -> Element {
    let services = use_context::<AppServices>();
    let mut view = use_signal(AppView::default);

    let current = view();
    let job_title = current.job().map(|job| job.title.clone());
    let show_new_analysis = !matches!(current, AppView::Upload);

    rsx! {
        // Global CSS
        style {
            r#"
            *, *::before, *::after {{ box-sizing: border-box; }}
            html, body {{ margin: 0; padding: 0; overflow: hidden; background-color: {BG_BASE}; }}
            body {{ -webkit-font-smoothing: antialiased; }}
            ::-webkit-scrollbar {{ width: 6px; height: 6px; }}
            ::-webkit-scrollbar-track {{ background: transparent; }}
            ::-webkit-scrollbar-thumb {{ background: {BORDER_DEFAULT}; border-radius: 3px; }}
            ::-webkit-scrollbar-thumb:hover {{ background: {BORDER_STRONG}; }}
            .collapse-btn {{ opacity: 0.8; transition: opacity 0.15s ease, background-color 0.15s ease; }}
            .collapse-btn:hover {{ opacity: 1; }}
            .collapse-btn:disabled {{ opacity: 0.4; cursor: default !important; }}
            .collapsed-rail {{ transition: background-color 0.15s ease; }}
            .collapsed-rail:hover {{ background-color: {BG_HOVER} !important; }}
            .indeterminate-bar {{
                position: absolute; top: 0; bottom: 0; width: 30%;
                background-color: {ACCENT_PRIMARY};
                animation: indeterminate 1.4s ease-in-out infinite;
            }}
            @keyframes indeterminate {{
                0% {{ left: -30%; }}
                100% {{ left: 100%; }}
            }}
            "#
        }

        // Main app container
        div {
            class: "app-container",
            style: "
                display: flex; flex-direction: column;
                width: 100vw; height: 100vh;
                background-color: {BG_BASE}; color: {TEXT_PRIMARY};
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif;
                overflow: hidden; position: fixed; top: 0; left: 0;
                user-select: none;
            ",
            // Suppress the browser's default context menu
            oncontextmenu: move |e| e.prevent_default(),

            TitleBar {
                job_title: job_title,
                show_new_analysis: show_new_analysis,
                on_new_analysis: move |_| {
                    log::info!("Returning to upload");
                    view.set(AppView::Upload);
                },
                backend_url: services.config.api.base_url.clone(),
            }

            match current {
                AppView::Upload => rsx! {
                    UploadPanel {
                        on_submitted: move |job: JobHandle| {
                            log::info!("Submitted '{}' as job {}", job.title, job.id);
                            view.set(AppView::Processing(job));
                        },
                    }
                    StatusBar { status: "Ready".to_string() }
                },
                AppView::Processing(job) => rsx! {
                    ProcessingPanel {
                        key: "{job.id}",
                        job: job.clone(),
                        on_completed: move |(job_id, result): (String, AnalysisResult)| {
                            let next = view.peek().complete(&job_id, result);
                            match next {
                                Some(next) => view.set(next),
                                None => log::debug!("Ignoring result for a job no longer on screen"),
                            }
                        },
                        on_start_over: move |_| view.set(AppView::Upload),
                    }
                    StatusBar { status: "Analyzing…".to_string(), detail: Some(format!("Job {}", job.id)) }
                },
                AppView::Results { job, result } => rsx! {
                    ResultsView {
                        key: "{job.id}",
                        job: job,
                        result: result,
                        on_discarded: move |_| view.set(AppView::Upload),
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Scores;

    fn result() -> AnalysisResult {
        AnalysisResult {
            scores: Scores::default(),
            markers: Vec::new(),
            transcript: None,
            video_url: "/api/video/abc".to_string(),
            metadata: None,
        }
    }

    #[test]
    fn test_completion_moves_processing_to_results() {
        let job = JobHandle::new("abc", Some("Quarterly review"));
        let view = AppView::Processing(job.clone());
        let next = view.complete("abc", result());
        assert!(matches!(next, Some(AppView::Results { job: ref j, .. }) if *j == job));
        assert_eq!(next.as_ref().and_then(AppView::job), Some(&job));
    }

    #[test]
    fn test_completion_ignored_outside_processing() {
        assert_eq!(AppView::Upload.complete("abc", result()), None);
    }

    #[test]
    fn test_completion_for_other_job_ignored() {
        let view = AppView::Processing(JobHandle::new("new-job", None));
        assert_eq!(view.complete("old-job", result()), None);
    }

    #[test]
    fn test_upload_has_no_job() {
        assert!(AppView::default().job().is_none());
    }
}
