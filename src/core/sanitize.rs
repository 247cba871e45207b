// src/core/sanitize.rs

/// Collapse whitespace runs to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Drop `<...>` markup. Unterminated tags swallow the rest of the string.
pub fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Case-fold for matching.
pub fn fold(s: &str) -> String {
    s.to_lowercase()
}

/// Resolve editorial brackets in a place name into its readings.
///
/// - `(...)` omissions are removed.
/// - A bracketed group opening a word (`Roma (urbs)`) is a comment and is removed.
/// - Brackets inside a word mark optional letters and yield two readings:
///   `Castr(a) Nova` -> `Castr Nova`, `Castra Nova`.
///
/// Always returns at least one reading; readings are whitespace-normalised
/// and deduplicated, the short reading first.
pub fn expand_brackets(s: &str) -> Vec<String> {
    let s = s.replace("(...)", " ");

    // Remove comment groups: '(' at the start or after whitespace.
    let mut kept = String::with_capacity(s.len());
    let mut depth = 0usize;
    let mut prev: Option<char> = None;
    for ch in s.chars() {
        match ch {
            '(' if depth > 0 || prev.is_none_or(char::is_whitespace) => depth += 1,
            ')' if depth > 0 => depth -= 1,
            _ if depth > 0 => {}
            _ => kept.push(ch),
        }
        prev = Some(ch);
    }

    if !kept.contains('(') {
        return vec![normalize_ws(&kept)];
    }

    // In-word optional letters.
    let mut short = String::with_capacity(kept.len());
    let mut long = String::with_capacity(kept.len());
    let mut inside = false;
    for ch in kept.chars() {
        match ch {
            '(' => inside = true,
            ')' => inside = false,
            _ => {
                long.push(ch);
                if !inside { short.push(ch); }
            }
        }
    }

    let short = normalize_ws(&short);
    let long = normalize_ws(&long);
    if short == long || short.is_empty() { vec![long] } else { vec![short, long] }
}

/// Split a gazetteer name cell into clean, distinct names.
///
/// Markup and `?` are dropped, the cell is split on `,` `/` `;`, and each
/// part goes through [`expand_brackets`].
pub fn split_names(cell: &str) -> Vec<String> {
    let cell = strip_tags(cell).replace('?', "");
    let mut out: Vec<String> = Vec::new();
    for part in cell.split([',', '/', ';']) {
        for name in expand_brackets(part) {
            if !name.is_empty() && !out.contains(&name) {
                out.push(name);
            }
        }
    }
    out
}
