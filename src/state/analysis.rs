//! Analysis result as delivered by `/api/result/{job_id}`.

use serde::{Deserialize, Serialize};

use super::marker::{deserialize_markers, FeedbackCategory, Marker};

/// Maximum score per category; the total is out of four times this.
pub const CATEGORY_SCORE_MAX: u32 = 25;
pub const TOTAL_SCORE_MAX: u32 = CATEGORY_SCORE_MAX * 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub gestures: u32,
    pub inflection: u32,
    pub clarity: u32,
    pub content: u32,
    pub total: u32,
}

impl Scores {
    pub fn for_category(&self, category: FeedbackCategory) -> u32 {
        match category {
            FeedbackCategory::Gestures => self.gestures,
            FeedbackCategory::Inflection => self.inflection,
            FeedbackCategory::Clarity => self.clarity,
            FeedbackCategory::Content => self.content,
        }
    }

    /// Fraction of the category maximum, for score bars. Out-of-range
    /// values from the backend are clamped for display only.
    pub fn category_ratio(&self, category: FeedbackCategory) -> f64 {
        f64::from(self.for_category(category).min(CATEGORY_SCORE_MAX)) / f64::from(CATEGORY_SCORE_MAX)
    }

    pub fn total_ratio(&self) -> f64 {
        f64::from(self.total.min(TOTAL_SCORE_MAX)) / f64::from(TOTAL_SCORE_MAX)
    }
}

/// Extra details the backend stores alongside a result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub video_file: Option<String>,
    #[serde(default)]
    pub supporting_file: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub analyzed_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub scores: Scores,
    #[serde(default, deserialize_with = "deserialize_markers")]
    pub markers: Vec<Marker>,
    #[serde(default)]
    pub transcript: Option<String>,
    pub video_url: String,
    #[serde(default)]
    pub metadata: Option<AnalysisMetadata>,
}

impl AnalysisResult {
    /// Markers whose category passes the filter, in original order.
    pub fn markers_in(&self, filter: &CategoryFilter) -> Vec<Marker> {
        self.markers
            .iter()
            .filter(|marker| filter.is_enabled(marker.category))
            .cloned()
            .collect()
    }

    /// Number of markers per category, indexed like `FeedbackCategory::ALL`.
    pub fn category_counts(&self) -> [usize; 4] {
        let mut counts = [0usize; 4];
        for marker in self.markers.iter() {
            counts[marker.category.index()] += 1;
        }
        counts
    }

    pub fn transcript_text(&self) -> Option<&str> {
        self.transcript
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// Duration reported by the backend, used until the player loads metadata.
    pub fn reported_duration(&self) -> Option<f64> {
        self.metadata
            .as_ref()
            .and_then(|meta| meta.duration)
            .filter(|duration| *duration > 0.0)
    }
}

/// Which categories are visible on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryFilter {
    enabled: [bool; 4],
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self { enabled: [true; 4] }
    }
}

impl CategoryFilter {
    pub fn is_enabled(&self, category: FeedbackCategory) -> bool {
        self.enabled[category.index()]
    }

    pub fn toggle(&mut self, category: FeedbackCategory) {
        let slot = &mut self.enabled[category.index()];
        *slot = !*slot;
    }

    /// Show only `category`, or everything again if it was already solo.
    pub fn solo(&mut self, category: FeedbackCategory) {
        let already_solo = FeedbackCategory::ALL
            .iter()
            .all(|other| self.is_enabled(*other) == (*other == category));
        if already_solo {
            self.enabled = [true; 4];
        } else {
            self.enabled = [false; 4];
            self.enabled[category.index()] = true;
        }
    }

    pub fn all_enabled(&self) -> bool {
        self.enabled.iter().all(|enabled| *enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULT_JSON: &str = r#"{
        "scores": {"gestures": 22, "inflection": 23, "clarity": 21, "content": 24, "total": 90},
        "markers": [
            {"category": "clarity", "start": 12.5, "end": 13.0, "label": "Filler word", "severity": 2, "feedback": "Pause instead."},
            {"category": "gestures", "start": 40.0, "end": 44.0, "label": "Crossed arms", "severity": 3, "feedback": "Open up.", "video_url": "/api/gesture-video/abc/0"},
            {"category": "content", "start": 0.0, "end": 10.0, "label": "Weak introduction", "severity": 2, "feedback": "Start with a hook."}
        ],
        "transcript": "Hello everyone.",
        "video_url": "/api/video/abc",
        "metadata": {"duration": 95.0, "video_file": "input.mp4", "supporting_file": null, "language": "English", "analyzed_by": "Gemini"}
    }"#;

    #[test]
    fn test_result_decodes_backend_shape() {
        let result: AnalysisResult = serde_json::from_str(RESULT_JSON).unwrap();
        assert_eq!(result.scores.total, 90);
        assert_eq!(result.markers.len(), 3);
        assert_eq!(result.transcript_text(), Some("Hello everyone."));
        assert_eq!(result.reported_duration(), Some(95.0));
        assert_eq!(result.category_counts(), [1, 0, 1, 1]);
    }

    #[test]
    fn test_result_without_optional_fields() {
        let json = r#"{"scores": {"gestures": 25, "inflection": 25, "clarity": 25, "content": 25, "total": 100}, "video_url": "http://cdn/v.mp4"}"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert!(result.markers.is_empty());
        assert_eq!(result.transcript_text(), None);
        assert_eq!(result.reported_duration(), None);
    }

    #[test]
    fn test_filter_hides_categories() {
        let result: AnalysisResult = serde_json::from_str(RESULT_JSON).unwrap();
        let mut filter = CategoryFilter::default();
        filter.toggle(FeedbackCategory::Clarity);
        let visible = result.markers_in(&filter);
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|m| m.category != FeedbackCategory::Clarity));
        assert!(!filter.all_enabled());
    }

    #[test]
    fn test_solo_twice_restores_all() {
        let mut filter = CategoryFilter::default();
        filter.solo(FeedbackCategory::Gestures);
        assert!(filter.is_enabled(FeedbackCategory::Gestures));
        assert!(!filter.is_enabled(FeedbackCategory::Content));
        filter.solo(FeedbackCategory::Gestures);
        assert!(filter.all_enabled());
    }

    #[test]
    fn test_score_ratios_clamped() {
        let scores = Scores {
            gestures: 30,
            inflection: 0,
            clarity: 25,
            content: 12,
            total: 67,
        };
        assert_eq!(scores.category_ratio(FeedbackCategory::Gestures), 1.0);
        assert_eq!(scores.category_ratio(FeedbackCategory::Inflection), 0.0);
        assert!((scores.total_ratio() - 0.67).abs() < 1e-9);
    }
}
