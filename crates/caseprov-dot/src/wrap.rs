//! Greedy word wrap for label text.
//!
//! Whitespace is kept (a line may end or start with it), words longer than
//! the width are split, and embedded newlines are hard breaks. The lines of
//! one paragraph concatenate back to that paragraph exactly.

/// Split `text` into lines of at most `width` characters (minimum 1).
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    text.split('\n')
        .flat_map(|paragraph| wrap_paragraph(paragraph, width))
        .collect()
}

/// [`wrap_lines`] joined back with newlines.
pub fn wrap(text: &str, width: usize) -> String {
    wrap_lines(text, width).join("\n")
}

/// Alternating runs of whitespace and non-whitespace.
fn chunks(paragraph: &str) -> Vec<Vec<char>> {
    let mut out: Vec<Vec<char>> = Vec::new();
    let mut current: Vec<char> = Vec::new();
    let mut in_space = false;
    for c in paragraph.chars() {
        let space = c.is_whitespace();
        if !current.is_empty() && space != in_space {
            out.push(std::mem::take(&mut current));
        }
        in_space = space;
        current.push(c);
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn wrap_paragraph(paragraph: &str, width: usize) -> Vec<String> {
    let mut pending = chunks(paragraph);
    pending.reverse();
    if pending.is_empty() {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    while !pending.is_empty() {
        let mut line: Vec<char> = Vec::new();
        while let Some(chunk) = pending.last() {
            if line.len() + chunk.len() > width {
                break;
            }
            line.extend(chunk);
            pending.pop();
        }
        if let Some(chunk) = pending.last_mut() {
            let room = width - line.len();
            if chunk.len() > width && room > 0 {
                let rest = chunk.split_off(room);
                line.append(chunk);
                *chunk = rest;
            }
        }
        if !line.is_empty() {
            lines.push(line.into_iter().collect());
        }
    }
    lines
}
