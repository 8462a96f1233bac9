pub fn normalize_eol(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

/// Split text into lines, each keeping its trailing terminator. The final
/// line may lack one; empty input yields no lines.
pub fn split_keeping_terminators(s: &str) -> Vec<String> {
    s.split_inclusive('\n').map(str::to_string).collect()
}

/// Line content without its terminator.
pub fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Comparison key for locating: terminator and leading whitespace dropped,
/// trailing content kept as-is.
pub fn match_key(line: &str) -> &str {
    strip_terminator(line).trim_start()
}

/// The line with exactly one trailing newline.
pub fn with_terminator(line: &str) -> String {
    let mut t = strip_terminator(line).to_string();
    t.push('\n');
    t
}

/// Shorten a string for error messages; newlines are escaped.
pub fn preview(s: &str) -> String {
    let s = s.replace('\n', "\\n");
    match s.char_indices().nth(160) {
        Some((cut, _)) => format!("{}…", &s[..cut]),
        None => s,
    }
}
