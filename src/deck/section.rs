//! Section keys and slides generated from a record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::record::PrepRecord;

/// One of the four PREP sections, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKey {
    Point,
    Reason,
    Example,
    Summary,
}

impl SectionKey {
    /// All sections in presentation order.
    pub const ALL: [SectionKey; 4] = [
        SectionKey::Point,
        SectionKey::Reason,
        SectionKey::Example,
        SectionKey::Summary,
    ];

    /// Key as used in JSON documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Point => "point",
            SectionKey::Reason => "reason",
            SectionKey::Example => "example",
            SectionKey::Summary => "summary",
        }
    }

    /// Short display label.
    pub fn title(&self) -> &'static str {
        match self {
            SectionKey::Point => "Point",
            SectionKey::Reason => "Reason",
            SectionKey::Example => "Example",
            SectionKey::Summary => "Summary",
        }
    }

    /// Hint shown under the slide title.
    pub fn subtitle(&self) -> &'static str {
        match self {
            SectionKey::Point => "key message, conclusion first",
            SectionKey::Reason => "why it holds",
            SectionKey::Example => "concrete case or evidence",
            SectionKey::Summary => "restate the point",
        }
    }

    /// Position in presentation order.
    pub fn index(&self) -> usize {
        match self {
            SectionKey::Point => 0,
            SectionKey::Reason => 1,
            SectionKey::Example => 2,
            SectionKey::Summary => 3,
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "point" | "p" => Ok(SectionKey::Point),
            "reason" | "r" => Ok(SectionKey::Reason),
            "example" | "e" => Ok(SectionKey::Example),
            "summary" | "s" => Ok(SectionKey::Summary),
            other => Err(format!(
                "unknown section '{}' (expected point, reason, example or summary)",
                other
            )),
        }
    }
}

/// Where slide content sits on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideLayout {
    /// Content centered in the slide area
    Default,
    /// Content anchored to the top, reference link pinned to the bottom
    Bottom,
}

/// A slide ready for presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub key: SectionKey,
    pub title: &'static str,
    pub content: String,
    /// Display duration in whole seconds
    pub duration: u32,
    pub layout: SlideLayout,
    /// Only set for the example section, and only when non-empty
    pub reference_link: Option<String>,
}

impl Slide {
    /// Build the slides of a record, one per section in order.
    pub fn from_record(record: &PrepRecord) -> Vec<Slide> {
        SectionKey::ALL
            .iter()
            .map(|&key| {
                let is_example = key == SectionKey::Example;
                Slide {
                    key,
                    title: key.title(),
                    content: record.text(key).to_string(),
                    duration: record.durations.get(key),
                    layout: if is_example {
                        SlideLayout::Bottom
                    } else {
                        SlideLayout::Default
                    },
                    reference_link: if is_example && !record.reference_link.trim().is_empty() {
                        Some(record.reference_link.trim().to_string())
                    } else {
                        None
                    },
                }
            })
            .collect()
    }

    /// Whether the slide has nothing to show.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_and_short_names() {
        assert_eq!("point".parse::<SectionKey>().unwrap(), SectionKey::Point);
        assert_eq!("Summary".parse::<SectionKey>().unwrap(), SectionKey::Summary);
        assert_eq!("e".parse::<SectionKey>().unwrap(), SectionKey::Example);
        assert!("conclusion".parse::<SectionKey>().is_err());
    }

    #[test]
    fn index_matches_order() {
        for (i, key) in SectionKey::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
        }
    }

    #[test]
    fn only_example_slide_carries_link() {
        let mut record = PrepRecord::default();
        record.point = "We should ship weekly".to_string();
        record.reference_link = "https://example.com/study".to_string();

        let slides = Slide::from_record(&record);
        assert_eq!(slides.len(), 4);
        assert_eq!(slides[0].content, "We should ship weekly");
        assert_eq!(slides[0].reference_link, None);
        assert_eq!(slides[2].layout, SlideLayout::Bottom);
        assert_eq!(
            slides[2].reference_link.as_deref(),
            Some("https://example.com/study")
        );
    }

    #[test]
    fn empty_link_is_not_attached() {
        let record = PrepRecord::default();
        let slides = Slide::from_record(&record);
        assert!(slides.iter().all(|s| s.reference_link.is_none()));
        assert!(slides.iter().all(Slide::is_blank));
    }
}
