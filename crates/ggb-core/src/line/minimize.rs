// crates/ggb-core/src/line/minimize.rs
//
// Turns raw G-code text into the line buffer: comments removed,
// whitespace trimmed, blank lines dropped.

pub const COMMENT_MARKER: char = ';';

/// Everything before the first comment marker.
pub fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT_MARKER) {
        Some(ix) => &line[..ix],
        None => line,
    }
}

/// Minimized form of `text`, one entry per surviving line, input order kept.
pub fn minimize(text: &str) -> Vec<String> {
    text.lines()
        .map(|l| strip_comment(l).trim())
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_comments_and_blanks() {
        let text = "; header\nG28 ; home\n\n   \nG1 X10 Y5\r\n;;\nM104 S200\n";
        assert_eq!(minimize(text), vec!["G28", "G1 X10 Y5", "M104 S200"]);
    }

    #[test]
    fn strip_comment_keeps_prefix() {
        assert_eq!(strip_comment("G1 X1;move"), "G1 X1");
        assert_eq!(strip_comment("G1 X1"), "G1 X1");
        assert_eq!(strip_comment(";"), "");
    }
}
