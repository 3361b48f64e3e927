/// Line terminator convention of a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// `CrLf` if the text contains any `\r\n`, otherwise `Lf`.
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Split on the file's own terminator. `join_lines(split_lines(s)) == s`.
pub fn split_lines(text: &str) -> (Vec<String>, LineEnding) {
    let eol = LineEnding::detect(text);
    let lines = text.split(eol.as_str()).map(str::to_string).collect();
    (lines, eol)
}

pub fn join_lines(lines: &[String], eol: LineEnding) -> String {
    lines.join(eol.as_str())
}

/// Indent every non-empty line of `fragment` and rejoin with `eol`.
pub(crate) fn indent_fragment(fragment: &str, indent: usize, eol: LineEnding) -> String {
    let pad = " ".repeat(indent);
    fragment
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join(eol.as_str())
}
