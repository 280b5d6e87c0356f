//! Section structure of a synthesized case brief.
//!
//! The brief arrives as free text from the model. Sections are recovered with a
//! single forward scan over lines: a line whose first token (after indentation
//! and markdown `#`, `*` or `_` markers) is a canonical heading followed by a
//! colon closes the section being collected and opens a new one. A heading
//! word with a colon in the middle of a line is content. The scan is linear in
//! the input length and never backtracks.

use std::fmt;

/// Canonical headings, in export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BriefHeading {
    Facts,
    ProceduralHistory,
    Issues,
    Holding,
    Reasoning,
    Conclusion,
}

impl BriefHeading {
    pub const ALL: [BriefHeading; 6] = [
        BriefHeading::Facts,
        BriefHeading::ProceduralHistory,
        BriefHeading::Issues,
        BriefHeading::Holding,
        BriefHeading::Reasoning,
        BriefHeading::Conclusion,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            BriefHeading::Facts => "Facts",
            BriefHeading::ProceduralHistory => "Procedural History",
            BriefHeading::Issues => "Issues",
            BriefHeading::Holding => "Holding",
            BriefHeading::Reasoning => "Reasoning",
            BriefHeading::Conclusion => "Conclusion",
        }
    }

    fn index(&self) -> usize {
        match self {
            BriefHeading::Facts => 0,
            BriefHeading::ProceduralHistory => 1,
            BriefHeading::Issues => 2,
            BriefHeading::Holding => 3,
            BriefHeading::Reasoning => 4,
            BriefHeading::Conclusion => 5,
        }
    }

    /// Tries to match this heading plus its colon at byte offset `at`.
    /// Returns the offset just past the colon.
    fn match_at(&self, text: &str, at: usize) -> Option<usize> {
        let mut pos = at;

        for (i, word) in self.title().split(' ').enumerate() {
            if i > 0 {
                let gap = text[pos..]
                    .find(|c: char| !c.is_whitespace() || c == '\n')
                    .unwrap_or(text.len() - pos);
                if gap == 0 {
                    return None;
                }
                pos += gap;
            }

            let candidate = text.get(pos..pos + word.len())?;
            if !candidate.eq_ignore_ascii_case(word) {
                return None;
            }
            pos += word.len();
        }

        let rest = &text[pos..];
        let after_emphasis = rest.trim_start_matches(is_emphasis);
        let colon_at = pos + (rest.len() - after_emphasis.len());

        after_emphasis.starts_with(':').then_some(colon_at + 1)
    }
}

impl fmt::Display for BriefHeading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Section text keyed by canonical heading. Headings absent from the source
/// read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BriefSections {
    sections: [Option<String>; 6],
}

impl BriefSections {
    pub fn parse(text: &str) -> Self {
        let mut sections = Self::default();
        let mut open: Option<(BriefHeading, usize)> = None;
        let mut line_start = 0;

        while line_start < text.len() {
            let line_end = text[line_start..]
                .find('\n')
                .map_or(text.len(), |i| line_start + i + 1);
            let line = &text[line_start..line_end];
            let marker_len = line.len() - line.trim_start_matches(is_line_marker).len();
            let token_at = line_start + marker_len;

            if let Some((heading, content_start)) = BriefHeading::ALL
                .iter()
                .find_map(|h| h.match_at(text, token_at).map(|end| (*h, end)))
            {
                if let Some((previous, start)) = open.take() {
                    sections.insert(previous, &text[start..line_start]);
                }
                open = Some((heading, content_start));
            }

            line_start = line_end;
        }

        if let Some((heading, start)) = open {
            sections.insert(heading, &text[start..]);
        }

        sections
    }

    pub fn get(&self, heading: BriefHeading) -> &str {
        self.sections[heading.index()].as_deref().unwrap_or("")
    }

    pub fn contains(&self, heading: BriefHeading) -> bool {
        self.sections[heading.index()].is_some()
    }

    /// Headings that never appeared in the parsed text.
    pub fn missing(&self) -> Vec<BriefHeading> {
        BriefHeading::ALL
            .into_iter()
            .filter(|h| !self.contains(*h))
            .collect()
    }

    /// All six headings in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (BriefHeading, &str)> {
        BriefHeading::ALL.into_iter().map(|h| (h, self.get(h)))
    }

    // A repeated heading replaces the earlier occurrence.
    fn insert(&mut self, heading: BriefHeading, raw: &str) {
        let content = raw
            .trim_start_matches(|c: char| c.is_whitespace() || is_emphasis(c))
            .trim_end_matches(|c: char| c.is_whitespace() || is_emphasis(c));
        self.sections[heading.index()] = Some(content.to_string());
    }
}

fn is_emphasis(c: char) -> bool {
    c == '*' || c == '_'
}

fn is_line_marker(c: char) -> bool {
    (c.is_whitespace() && c != '\n') || c == '#' || is_emphasis(c)
}
