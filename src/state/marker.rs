use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{ACCENT_CLARITY, ACCENT_CONTENT, ACCENT_GESTURES, ACCENT_INFLECTION};

/// Feedback category reported by the analysis backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackCategory {
    Gestures,
    Inflection,
    Clarity,
    Content,
}

/// Display metadata for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
    pub key: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub description: &'static str,
}

const CATEGORY_TABLE: [CategoryInfo; 4] = [
    CategoryInfo {
        key: "gestures",
        label: "Gestures",
        color: ACCENT_GESTURES,
        description: "Body language, posture and hand movement",
    },
    CategoryInfo {
        key: "inflection",
        label: "Inflection",
        color: ACCENT_INFLECTION,
        description: "Vocal variety, pitch and emphasis",
    },
    CategoryInfo {
        key: "clarity",
        label: "Clarity",
        color: ACCENT_CLARITY,
        description: "Pace, filler words and pauses",
    },
    CategoryInfo {
        key: "content",
        label: "Content",
        color: ACCENT_CONTENT,
        description: "Structure, argument and use of supporting material",
    },
];

impl FeedbackCategory {
    /// All categories in display order.
    pub const ALL: [FeedbackCategory; 4] = [
        FeedbackCategory::Gestures,
        FeedbackCategory::Inflection,
        FeedbackCategory::Clarity,
        FeedbackCategory::Content,
    ];

    pub fn index(self) -> usize {
        match self {
            FeedbackCategory::Gestures => 0,
            FeedbackCategory::Inflection => 1,
            FeedbackCategory::Clarity => 2,
            FeedbackCategory::Content => 3,
        }
    }

    pub fn info(self) -> &'static CategoryInfo {
        &CATEGORY_TABLE[self.index()]
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    pub fn color(self) -> &'static str {
        self.info().color
    }
}

impl fmt::Display for FeedbackCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().key)
    }
}

/// Unknown category keys are an error; nothing is remapped to a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown feedback category '{}'", self.0)
    }
}

impl FromStr for FeedbackCategory {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key = value.trim().to_ascii_lowercase();
        CATEGORY_TABLE
            .iter()
            .position(|info| info.key == key)
            .map(|index| FeedbackCategory::ALL[index])
            .ok_or_else(|| UnknownCategory(value.to_string()))
    }
}

/// Issue severity, 1 (minor) to 5 (severe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Severity(u8);

impl Severity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Clamp an arbitrary backend value into range.
    pub fn new(raw: i64) -> Self {
        Self(raw.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Visual intensity in `[0.4, 1.0]` for marker opacity.
    pub fn intensity(self) -> f64 {
        0.4 + 0.6 * f64::from(self.0 - Self::MIN) / f64::from(Self::MAX - Self::MIN)
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        Ok(Severity::new(raw.round() as i64))
    }
}

/// One timestamped piece of feedback. Immutable once decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub category: FeedbackCategory,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds, never before `start`.
    pub end: f64,
    pub label: String,
    pub feedback: String,
    pub severity: Severity,
    /// Demonstration clip, only produced for gesture feedback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl Marker {
    pub fn new(category: FeedbackCategory, start: f64, end: f64, label: impl Into<String>) -> Self {
        let start = start.max(0.0);
        Self {
            category,
            start,
            end: end.max(start),
            label: label.into(),
            feedback: String::new(),
            severity: Severity::default(),
            video_url: None,
        }
    }

    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = feedback.into();
        self
    }

    /// Closed-interval containment.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }

    /// Touching intervals (one ends where the other starts) do not overlap.
    pub fn overlaps(&self, other: &Marker) -> bool {
        !(self.end <= other.start || other.end <= self.start)
    }

    /// Structural identity: markers are rebuilt on every render, so compare
    /// by category and time range rather than by reference.
    pub fn same_marker(&self, other: &Marker) -> bool {
        self.category == other.category && self.start == other.start && self.end == other.end
    }

    /// Demonstration clip, only honoured for gesture markers.
    pub fn demo_video_url(&self) -> Option<&str> {
        match self.category {
            FeedbackCategory::Gestures => self.video_url.as_deref().filter(|url| !url.is_empty()),
            _ => None,
        }
    }
}

/// Marker as it appears on the wire, before category and range checks.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireMarker {
    category: String,
    #[serde(default)]
    start: f64,
    #[serde(default)]
    end: Option<f64>,
    #[serde(default)]
    label: String,
    #[serde(default)]
    feedback: String,
    #[serde(default)]
    severity: Severity,
    #[serde(default)]
    video_url: Option<String>,
}

impl TryFrom<WireMarker> for Marker {
    type Error = UnknownCategory;

    fn try_from(wire: WireMarker) -> Result<Self, Self::Error> {
        let category = wire.category.parse::<FeedbackCategory>()?;
        let end = wire.end.unwrap_or(wire.start);
        let mut marker = Marker::new(category, wire.start, end, wire.label).with_feedback(wire.feedback);
        marker.severity = wire.severity;
        marker.video_url = wire.video_url;
        Ok(marker)
    }
}

/// Decode a marker list, dropping (and logging) entries whose category is unknown.
pub(crate) fn deserialize_markers<'de, D>(deserializer: D) -> Result<Vec<Marker>, D::Error>
where
    D: Deserializer<'de>,
{
    let wire = Vec::<WireMarker>::deserialize(deserializer)?;
    let mut markers = Vec::with_capacity(wire.len());
    for entry in wire {
        let label = entry.label.clone();
        match Marker::try_from(entry) {
            Ok(marker) => markers.push(marker),
            Err(err) => log::warn!("Dropping marker '{}': {}", label, err),
        }
    }
    Ok(markers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_rejects_unknown() {
        assert_eq!("Clarity".parse::<FeedbackCategory>(), Ok(FeedbackCategory::Clarity));
        assert_eq!(
            "posture".parse::<FeedbackCategory>(),
            Err(UnknownCategory("posture".to_string()))
        );
    }

    #[test]
    fn test_category_table_matches_enum_order() {
        for category in FeedbackCategory::ALL {
            assert_eq!(category.info().key, category.to_string());
            assert_eq!(category.to_string().parse::<FeedbackCategory>(), Ok(category));
        }
    }

    #[test]
    fn test_severity_clamped() {
        assert_eq!(Severity::new(0).value(), 1);
        assert_eq!(Severity::new(9).value(), 5);
        assert_eq!(Severity::new(3).value(), 3);
        assert!((Severity::new(1).intensity() - 0.4).abs() < 1e-9);
        assert!((Severity::new(5).intensity() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_overlap_excludes_touching_ranges() {
        let a = Marker::new(FeedbackCategory::Clarity, 0.0, 5.0, "a");
        let b = Marker::new(FeedbackCategory::Clarity, 5.0, 8.0, "b");
        let c = Marker::new(FeedbackCategory::Content, 4.0, 6.0, "c");
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
        assert!(a.contains(5.0));
        assert!(b.contains(5.0));
    }

    #[test]
    fn test_same_marker_is_structural() {
        let a = Marker::new(FeedbackCategory::Gestures, 2.0, 4.0, "Crossed arms");
        let relabeled = Marker::new(FeedbackCategory::Gestures, 2.0, 4.0, "Closed posture");
        let other_category = Marker::new(FeedbackCategory::Content, 2.0, 4.0, "Crossed arms");
        assert!(a.same_marker(&relabeled));
        assert!(!a.same_marker(&other_category));
    }

    #[test]
    fn test_wire_marker_normalizes_range() {
        let json = r#"[
            {"category": "clarity", "start": 12.5, "end": 13.0, "label": "Filler word: 'um'", "severity": 2, "feedback": "Take a breath."},
            {"category": "gestures", "start": -1.0, "end": -3.0, "label": "Fidgeting"},
            {"category": "posture", "start": 1.0, "end": 2.0, "label": "Unknown"}
        ]"#;
        let mut de = serde_json::Deserializer::from_str(json);
        let markers = deserialize_markers(&mut de).unwrap();

        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].severity.value(), 2);
        assert_eq!(markers[0].feedback, "Take a breath.");
        assert_eq!(markers[1].start, 0.0);
        assert_eq!(markers[1].end, 0.0);
        assert_eq!(markers[1].severity, Severity::default());
    }

    #[test]
    fn test_demo_video_only_for_gestures() {
        let mut gesture = Marker::new(FeedbackCategory::Gestures, 1.0, 2.0, "Hands in pockets");
        gesture.video_url = Some("/api/gesture-video/abc/0".to_string());
        let mut clarity = Marker::new(FeedbackCategory::Clarity, 1.0, 2.0, "Fast pace");
        clarity.video_url = Some("/api/gesture-video/abc/1".to_string());

        assert_eq!(gesture.demo_video_url(), Some("/api/gesture-video/abc/0"));
        assert_eq!(clarity.demo_video_url(), None);
    }
}
