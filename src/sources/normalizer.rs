use regex::Regex;
use std::sync::LazyLock;

/// Anything that is not a word character, whitespace, or basic punctuation.
static DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s.,;:!?-]").unwrap());

/// Whitespace runs that stay on one line.
static HORIZONTAL_WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\S\n]+").unwrap());

/// Cleans text decoded from a PDF.
///
/// Carriage returns become newlines, characters outside the word /
/// whitespace / `. , ; : ! ? -` allowlist are dropped, whitespace runs inside
/// a line collapse to one space, and consecutive blank lines collapse to a
/// single blank line. Line breaks are kept so section headings stay
/// anchored at line starts. `normalize(normalize(t)) == normalize(t)`.
pub fn normalize(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let text = DISALLOWED_RE.replace_all(&text, "");

    let mut lines: Vec<String> = Vec::new();
    let mut previous_blank = true;

    for line in text.split('\n') {
        let line = HORIZONTAL_WS_RE.replace_all(line, " ");
        let line = line.trim();

        if line.is_empty() {
            if !previous_blank {
                lines.push(String::new());
            }
            previous_blank = true;
        } else {
            lines.push(line.to_string());
            previous_blank = false;
        }
    }

    while lines.last().map(|l| l.is_empty()).unwrap_or(false) {
        lines.pop();
    }

    lines.join("\n")
}
