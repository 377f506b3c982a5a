//! Path selection and filter utilities

use std::path::Path;

/// True if `path`'s extension equals `extension` (no leading dot, case-sensitive).
pub fn has_extension(path: &Path, extension: &str) -> bool {
    let wanted = extension.strip_prefix('.').unwrap_or(extension);
    path.extension().and_then(|e| e.to_str()) == Some(wanted)
}

/// Returns true if a non-directory walk entry is a candidate for decoding.
/// `root` itself qualifies when it is a matching file.
pub fn should_include_in_walk(
    path: &Path,
    root: &Path,
    extension: &str,
    exclude_patterns: &[String],
) -> bool {
    if !has_extension(path, extension) {
        return false;
    }
    if exclude_patterns.is_empty() {
        return true;
    }
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(n) => n,
        None => return true,
    };
    let path_str = path.to_str().unwrap_or("");
    for pattern in exclude_patterns {
        if glob_match(pattern, name) || glob_match(pattern, path_str) {
            return false;
        }
        // A bare directory name excludes everything below it.
        if path
            .strip_prefix(root)
            .map(|rel| {
                rel.parent()
                    .is_some_and(|dir| dir.iter().any(|c| glob_match(pattern, &c.to_string_lossy())))
            })
            .unwrap_or(false)
        {
            return false;
        }
    }
    true
}

/// Simple glob pattern matching (supports * and ?)
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern = pattern.strip_prefix('!').unwrap_or(pattern);

    let mut pattern_chars = pattern.chars().peekable();
    let mut text_chars = text.chars().peekable();

    while let Some(&p) = pattern_chars.peek() {
        match p {
            '*' => {
                pattern_chars.next();
                if pattern_chars.peek().is_none() {
                    return true; // trailing * matches everything
                }
                let rest: String = pattern_chars.clone().collect();
                loop {
                    if glob_match(&rest, &text_chars.clone().collect::<String>()) {
                        return true;
                    }
                    if text_chars.next().is_none() {
                        return false;
                    }
                }
            }
            '?' => {
                pattern_chars.next();
                if text_chars.next().is_none() {
                    return false;
                }
            }
            _ => {
                pattern_chars.next();
                if text_chars.next() != Some(p) {
                    return false;
                }
            }
        }
    }

    text_chars.peek().is_none()
}
