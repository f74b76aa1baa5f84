//! UI components grouped by screen.

mod category_filter;
mod feedback_panel;
mod processing_panel;
mod questions_panel;
mod results_view;
mod score_card;
mod side_panel;
mod status_bar;
mod title_bar;
mod transcript_panel;
mod upload_panel;
mod video_player;

pub use processing_panel::ProcessingPanel;
pub use results_view::ResultsView;
pub use status_bar::StatusBar;
pub use title_bar::TitleBar;
pub use upload_panel::UploadPanel;
