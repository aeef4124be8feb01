//! Logger import detection and insertion.

use regex::Regex;
use std::sync::LazyLock;

static IMPORT_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^import\s+").unwrap());

/// Whether `content` already imports from `module` (single- or double-quoted).
pub fn has_import(content: &str, module: &str) -> bool {
    content.contains(&format!("from '{}'", module))
        || content.contains(&format!("from \"{}\"", module))
}

/// Index of the line that ends the last import statement, if any.
///
/// A multi-line `import {` ... `} from '...'` statement ends at the first
/// following line that closes the brace.
fn last_import_end(lines: &[&str]) -> Option<usize> {
    let start = lines
        .iter()
        .rposition(|line| IMPORT_LINE.is_match(line.trim()))?;

    let first = lines[start];
    if first.contains('{') && !first.contains('}') {
        if let Some(offset) = lines[start + 1..].iter().position(|l| l.contains('}')) {
            return Some(start + 1 + offset);
        }
    }

    Some(start)
}

/// Insert `import_line` after the last import statement, or at the very top
/// of the file (followed by a blank line) when there is none. The inserted
/// line ends with `\r\n` when the file already uses CRLF.
pub fn insert_import(content: &str, import_line: &str) -> String {
    let eol = if content.contains("\r\n") { "\r\n" } else { "\n" };
    let line = format!("{}{}", import_line, eol.trim_end_matches('\n'));
    let mut lines: Vec<&str> = content.split('\n').collect();

    match last_import_end(&lines) {
        Some(index) => {
            lines.insert(index + 1, &line);
            lines.join("\n")
        }
        None => format!("{}{}{}{}", import_line, eol, eol, content),
    }
}
