//! Section extraction from unstructured posting text
//!
//! Locates labeled sections (requirements, responsibilities, skills,
//! preferred, education, experience) by heading-pattern search and pulls
//! bullet-like items out of each section's span.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The fixed set of sections a posting can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Requirements,
    Responsibilities,
    Skills,
    Preferred,
    Education,
    Experience,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Requirements,
        SectionKind::Responsibilities,
        SectionKind::Skills,
        SectionKind::Preferred,
        SectionKind::Education,
        SectionKind::Experience,
    ];

    /// Synonym-set heading pattern for this section.
    fn heading_pattern(self) -> &'static str {
        match self {
            SectionKind::Requirements => {
                r"(?i)(requirements?|qualifications?|what (we're|you'll need)|you (have|bring))"
            }
            SectionKind::Responsibilities => {
                r"(?i)(responsibilities|duties|what you'll do|role description|the role)"
            }
            SectionKind::Skills => r"(?i)(skills?|technical skills?|required skills?|must have)",
            SectionKind::Preferred => r"(?i)(preferred|nice to have|bonus|plus|desirable)",
            SectionKind::Education => r"(?i)(education|degree|qualification)",
            SectionKind::Experience => r"(?i)(\d+\+?\s*years?|experience level)",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionKind::Requirements => write!(f, "Requirements"),
            SectionKind::Responsibilities => write!(f, "Responsibilities"),
            SectionKind::Skills => write!(f, "Skills"),
            SectionKind::Preferred => write!(f, "Preferred"),
            SectionKind::Education => write!(f, "Education"),
            SectionKind::Experience => write!(f, "Experience"),
        }
    }
}

/// Maximum items returned per section.
const MAX_ITEMS: usize = 15;

pub struct SectionExtractor {
    patterns: Vec<(SectionKind, Regex)>,
    bullet_re: Regex,
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionExtractor {
    pub fn new() -> Self {
        let patterns = SectionKind::ALL
            .iter()
            .map(|&kind| {
                let re = Regex::new(kind.heading_pattern()).expect("Invalid heading pattern");
                (kind, re)
            })
            .collect();

        // Lines starting with a dash, bullet glyph, asterisk, or "1." marker
        let bullet_re =
            Regex::new(r"(?m)^\s*(?:[-•*]|\d+\.)\s+(.+)$").expect("Invalid bullet pattern");

        Self {
            patterns,
            bullet_re,
        }
    }

    /// Extract up to 15 line items from the named section. Returns an
    /// empty list when the heading is absent; sections are optional.
    pub fn extract(&self, text: &str, kind: SectionKind) -> Vec<String> {
        let heading = self
            .patterns
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, re)| re)
            .and_then(|re| re.find(text));

        let heading = match heading {
            Some(m) => m,
            None => return Vec::new(),
        };

        let remaining = &text[heading.end()..];
        let span = &remaining[..self.span_end(remaining, kind)];

        let mut items: Vec<String> = self
            .bullet_re
            .captures_iter(span)
            .map(|cap| cap[1].trim().to_string())
            .filter(|item| item.chars().count() > 10)
            .collect();

        // No bullets in the span: treat every non-trivial line as an item
        if items.is_empty() {
            items = span
                .lines()
                .map(|line| line.trim())
                .filter(|line| line.chars().count() > 20)
                .map(|line| line.to_string())
                .collect();
        }

        items.truncate(MAX_ITEMS);
        items
    }

    /// The span ends at the earliest match of any *other* section's heading
    /// pattern, or end-of-text if none matches. The minimum is computed
    /// explicitly across all other patterns so the boundary does not depend
    /// on iteration order.
    fn span_end(&self, remaining: &str, kind: SectionKind) -> usize {
        let mut end = remaining.len();
        for (other, re) in &self.patterns {
            if *other == kind {
                continue;
            }
            if let Some(m) = re.find(remaining) {
                if m.start() < end {
                    end = m.start();
                }
            }
        }
        end
    }
}
