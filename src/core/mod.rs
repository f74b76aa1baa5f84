pub mod marker_geometry;
pub mod track_layout;
pub mod job_poller;
pub mod question_poller;
