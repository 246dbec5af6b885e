//! Text-level MEMORY_PATH substitution.
//!
//! Two conventions are recognised in target documents:
//!
//! * the bare token [`PLACEHOLDER`], replaced everywhere it occurs;
//! * the labeled field `**MEMORY_PATH**: `<value>``, of which only the first
//!   occurrence is rewritten.
//!
//! Everything here is pure string processing; file handling lives in
//! [`crate::workspace`].

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

/// Bare placeholder token.
pub const PLACEHOLDER: &str = "{MEMORY_PATH}";

/// Sample value shipped in the labeled field of unconfigured templates.
pub const SAMPLE_PATH: &str = "/path/to/your/memory-root";

static RE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*MEMORY_PATH\*\*:[ \t]*`?([^`\n]*)`?").unwrap());
static RE_BACKTICK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`\n]+)`").unwrap());
static RE_LABELED_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:root|ルート|path|パス)\s*[:：]\s*(.+)$").unwrap());
static RE_DRIVE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z]:[\\/]").unwrap());

/// Result of applying both conventions to a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub content: String,
    /// Number of bare placeholders replaced.
    pub placeholders: usize,
    /// Whether a labeled field was found and rewritten.
    pub field: bool,
}

impl Substitution {
    /// True when at least one convention was present in the input.
    pub fn found(&self) -> bool {
        self.placeholders > 0 || self.field
    }
}

/// Replace every bare placeholder, returning the new text and the count.
pub fn replace_placeholder(content: &str, path: &str) -> (String, usize) {
    let count = content.matches(PLACEHOLDER).count();
    if count == 0 {
        return (content.to_string(), 0);
    }
    (content.replace(PLACEHOLDER, path), count)
}

/// Render the labeled field for `path`.
pub fn render_field(path: &str) -> String {
    format!("**MEMORY_PATH**: `{path}`")
}

/// Rewrite the first labeled field to hold `path`.
///
/// Returns `None` when the document has no labeled field.
pub fn replace_labeled_field(content: &str, path: &str) -> Option<String> {
    if !RE_FIELD.is_match(content) {
        return None;
    }
    let field = render_field(path);
    Some(RE_FIELD.replacen(content, 1, NoExpand(&field)).into_owned())
}

/// Current value of the first labeled field, trimmed.
pub fn labeled_field_value(content: &str) -> Option<&str> {
    RE_FIELD
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Apply both conventions.
pub fn substitute(content: &str, path: &str) -> Substitution {
    let (replaced, placeholders) = replace_placeholder(content, path);
    match replace_labeled_field(&replaced, path) {
        Some(content) => Substitution {
            content,
            placeholders,
            field: true,
        },
        None => Substitution {
            content: replaced,
            placeholders,
            field: false,
        },
    }
}

/// Best-effort recovery of an already configured memory path.
///
/// Precedence:
///
/// 1. A labeled field decides on its own: its value is returned when it is a
///    plausible absolute path, otherwise the document counts as unconfigured.
/// 2. A document that still carries the bare placeholder is unconfigured.
/// 3. Otherwise lines mentioning memory together with root/path (English or
///    Japanese) are scanned; the first plausible backtick-quoted token wins,
///    then a bare token after a `Root:` / `Path:` style label.
///
/// Ambiguous input yields `None` rather than a guess.
pub fn extract_configured_path(content: &str) -> Option<String> {
    if RE_FIELD.is_match(content) {
        return labeled_field_value(content)
            .filter(|value| is_plausible_path(value))
            .map(str::to_string);
    }

    if content.contains(PLACEHOLDER) {
        return None;
    }

    content
        .lines()
        .filter(|line| mentions_memory_location(line))
        .find_map(scan_line)
}

fn scan_line(line: &str) -> Option<String> {
    let quoted = RE_BACKTICK
        .captures_iter(line)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .find(|token| is_plausible_path(token));
    if let Some(token) = quoted {
        return Some(token.to_string());
    }

    let caps = RE_LABELED_TOKEN.captures(line)?;
    let token = caps
        .get(1)?
        .as_str()
        .trim()
        .trim_matches(|c: char| c == '"' || c == '`' || c == '\'');
    is_plausible_path(token).then(|| token.to_string())
}

fn mentions_memory_location(line: &str) -> bool {
    let lower = line.to_lowercase();
    let memory = lower.contains("memory") || line.contains("メモリ");
    let location = lower.contains("root")
        || lower.contains("path")
        || line.contains("ルート")
        || line.contains("パス");
    (memory && location) || lower.contains("cursor-memory")
}

fn is_plausible_path(token: &str) -> bool {
    if token.is_empty() || token == SAMPLE_PATH || token.contains(PLACEHOLDER) {
        return false;
    }
    if token.contains(['[', ']', '<', '>', '*', '{', '}']) {
        return false;
    }
    token.starts_with('/')
        || token.starts_with("~/")
        || token == "~"
        || token.starts_with("\\\\")
        || RE_DRIVE.is_match(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{TEMPLATE_EN, TEMPLATE_JA};

    #[test]
    fn replace_placeholder_counts_all_occurrences() {
        let (out, count) = replace_placeholder(TEMPLATE_EN, "/home/u/mem");
        let expected = TEMPLATE_EN.matches(PLACEHOLDER).count();
        assert!(expected > 0);
        assert_eq!(count, expected);
        assert!(!out.contains(PLACEHOLDER));
        assert!(out.contains("/home/u/mem/common/"));
    }

    #[test]
    fn replace_placeholder_without_token_is_identity() {
        let (out, count) = replace_placeholder("nothing here", "/x");
        assert_eq!(out, "nothing here");
        assert_eq!(count, 0);
    }

    #[test]
    fn replace_labeled_field_rewrites_first_only() {
        let doc = "a\n**MEMORY_PATH**: `/old`\nb\n**MEMORY_PATH**: `/second`\n";
        let out = replace_labeled_field(doc, "/new").unwrap();
        assert_eq!(
            out,
            "a\n**MEMORY_PATH**: `/new`\nb\n**MEMORY_PATH**: `/second`\n"
        );
    }

    #[test]
    fn replace_labeled_field_accepts_unquoted_and_empty_values() {
        assert_eq!(
            replace_labeled_field("**MEMORY_PATH**: /old/path\n", "/n").unwrap(),
            "**MEMORY_PATH**: `/n`\n"
        );
        assert_eq!(
            replace_labeled_field("**MEMORY_PATH**:\nnext", "/n").unwrap(),
            "**MEMORY_PATH**: `/n`\nnext"
        );
    }

    #[test]
    fn replace_labeled_field_does_not_expand_dollar_signs() {
        let out = replace_labeled_field("**MEMORY_PATH**: `x`", "/a/$1/${b}").unwrap();
        assert_eq!(out, "**MEMORY_PATH**: `/a/$1/${b}`");
    }

    #[test]
    fn replace_labeled_field_missing() {
        assert!(replace_labeled_field("# no field\n", "/x").is_none());
    }

    #[test]
    fn substitute_is_idempotent() {
        let once = substitute(TEMPLATE_EN, "/home/u/mem");
        let twice = substitute(&once.content, "/home/u/mem");
        assert_eq!(once.content, twice.content);
        assert!(twice.field);
        assert_eq!(twice.placeholders, 0);
    }

    #[test]
    fn substitute_reports_both_conventions() {
        let result = substitute(TEMPLATE_JA, "/home/u/mem");
        assert!(result.found());
        assert!(result.field);
        assert_eq!(result.placeholders, 3);
        assert_eq!(labeled_field_value(&result.content), Some("/home/u/mem"));

        let nothing = substitute("plain text", "/x");
        assert!(!nothing.found());
        assert_eq!(nothing.content, "plain text");
    }

    #[test]
    fn extract_from_labeled_field() {
        let doc = "# Memory System Guidelines\n**MEMORY_PATH**: `/home/u/mem`\n";
        assert_eq!(extract_configured_path(doc), Some("/home/u/mem".to_string()));

        let doc = "**MEMORY_PATH**: `C:\\Users\\u\\mem`\n";
        assert_eq!(
            extract_configured_path(doc),
            Some("C:\\Users\\u\\mem".to_string())
        );
    }

    #[test]
    fn extract_rejects_unconfigured_templates() {
        assert_eq!(extract_configured_path(TEMPLATE_EN), None);
        assert_eq!(extract_configured_path(TEMPLATE_JA), None);
    }

    #[test]
    fn extract_labeled_field_wins_over_prose() {
        let doc = "Project memory path: `/elsewhere/mem/project`\n**MEMORY_PATH**: `/home/u/mem`\n";
        assert_eq!(extract_configured_path(doc), Some("/home/u/mem".to_string()));
    }

    #[test]
    fn extract_labeled_field_placeholder_does_not_fall_back() {
        let doc = "Memory root: `/looks/valid`\n**MEMORY_PATH**: `{MEMORY_PATH}`\n";
        assert_eq!(extract_configured_path(doc), None);
    }

    #[test]
    fn extract_from_prose_backticks() {
        let doc = "# Memory System Guidelines\n\nMemory root: `/Users/me/Drive/AI/memory`\n";
        assert_eq!(
            extract_configured_path(doc),
            Some("/Users/me/Drive/AI/memory".to_string())
        );
    }

    #[test]
    fn extract_from_japanese_prose() {
        let doc = "# メモリシステムガイドライン\n\nメモリのルート: `~/Documents/memory`\n";
        assert_eq!(
            extract_configured_path(doc),
            Some("~/Documents/memory".to_string())
        );
    }

    #[test]
    fn extract_from_bare_labeled_token() {
        let doc = "Memory Root: /srv/memory store\n";
        assert_eq!(
            extract_configured_path(doc),
            Some("/srv/memory store".to_string())
        );
    }

    #[test]
    fn extract_false_negatives_return_none() {
        // Relative paths are not guessed.
        assert_eq!(extract_configured_path("Memory root: `memory/data`\n"), None);
        // Lines without a memory + location mention are ignored.
        assert_eq!(extract_configured_path("Logs: `/var/log/app`\n"), None);
        // Placeholder anywhere means unconfigured.
        assert_eq!(
            extract_configured_path("Memory root: `/x/mem`\nSee `{MEMORY_PATH}/common`\n"),
            None
        );
        // Template-ish tokens are rejected.
        assert_eq!(
            extract_configured_path("Memory path: `/x/[project-name]/`\n"),
            None
        );
        // The sample value is not a configured path.
        assert_eq!(
            extract_configured_path(&format!("Memory root path: `{SAMPLE_PATH}`\n")),
            None
        );
    }

    #[test]
    fn render_field_format() {
        assert_eq!(render_field("/m"), "**MEMORY_PATH**: `/m`");
    }
}
