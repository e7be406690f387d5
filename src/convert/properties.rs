//! Minimal `.properties` reader

/// Parses `key=value` / `key: value` lines.
///
/// `#` and `!` start comments, a trailing backslash continues the value on the
/// next line, and a line without a separator is a key with an empty value.
pub fn parse_properties(content: &str) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    let mut pending = String::new();

    for raw in content.lines() {
        let line = raw.trim_start();
        if pending.is_empty() && (line.is_empty() || line.starts_with('#') || line.starts_with('!'))
        {
            continue;
        }

        if let Some(continued) = line.strip_suffix('\\') {
            pending.push_str(continued);
            continue;
        }
        pending.push_str(line);

        if let Some(entry) = split_entry(&pending) {
            entries.push(entry);
        }
        pending.clear();
    }

    if !pending.is_empty() {
        if let Some(entry) = split_entry(&pending) {
            entries.push(entry);
        }
    }

    entries
}

fn split_entry(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    match line.find(['=', ':']) {
        Some(idx) => {
            let key = line[..idx].trim();
            let value = line[idx + 1..].trim();
            (!key.is_empty()).then(|| (key.to_string(), value.to_string()))
        }
        None => Some((line.to_string(), String::new())),
    }
}
