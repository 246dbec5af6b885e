//! Language sniffing for target documents.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::i18n::Lang;

/// Heading that marks the English template.
pub const EN_HEADING: &str = "# Memory System Guidelines";
/// Heading that marks the Japanese template.
pub const JA_HEADING: &str = "# メモリシステムガイドライン";

/// Number of leading lines inspected when sniffing the heading.
const SNIFF_LINES: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocLanguage {
    En,
    Ja,
    Unknown,
    Absent,
}

impl DocLanguage {
    pub fn as_lang(self) -> Option<Lang> {
        match self {
            Self::En => Some(Lang::En),
            Self::Ja => Some(Lang::Ja),
            Self::Unknown | Self::Absent => None,
        }
    }

    pub fn display_code(self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Ja => "JA",
            Self::Unknown => "UNKNOWN",
            Self::Absent => "ABSENT",
        }
    }

    /// Whether overwriting a document in this language with `target` is a
    /// language transition. Absent documents never are.
    pub fn differs_from(self, target: Lang) -> bool {
        match self {
            Self::Absent => false,
            other => other.as_lang() != Some(target),
        }
    }
}

impl From<Lang> for DocLanguage {
    fn from(lang: Lang) -> Self {
        match lang {
            Lang::En => Self::En,
            Lang::Ja => Self::Ja,
        }
    }
}

/// Classify document text by the headings in its first lines.
pub fn classify(text: &str) -> DocLanguage {
    let head: Vec<&str> = text.lines().take(SNIFF_LINES).collect();
    classify_lines(&head)
}

fn classify_lines<S: AsRef<str>>(lines: &[S]) -> DocLanguage {
    if lines.iter().any(|l| l.as_ref().contains(EN_HEADING)) {
        DocLanguage::En
    } else if lines.iter().any(|l| l.as_ref().contains(JA_HEADING)) {
        DocLanguage::Ja
    } else {
        DocLanguage::Unknown
    }
}

/// Detect the language of the document at `path`.
///
/// Never fails: a missing file is `Absent`, and any read or decoding error
/// is reported as `Unknown`.
pub fn detect_language(path: &Path) -> DocLanguage {
    if !path.exists() {
        return DocLanguage::Absent;
    }

    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cannot open document for language detection");
            return DocLanguage::Unknown;
        }
    };

    let mut lines = Vec::with_capacity(SNIFF_LINES);
    for line in BufReader::new(file).lines().take(SNIFF_LINES) {
        match line {
            Ok(line) => lines.push(line),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "cannot read document for language detection");
                return DocLanguage::Unknown;
            }
        }
    }

    let detected = classify_lines(&lines);
    debug!(path = %path.display(), ?detected, "detected document language");
    detected
}
