//! Linux-safe filename sanitization.

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Sanitizes a candidate filename for safe use on Linux.
///
/// Replaces `/`, `\`, NUL, whitespace, and control characters with `_`
/// (runs collapse to one), trims leading/trailing dots, spaces, and
/// underscores, and truncates to 255 bytes on a char boundary.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let bad = matches!(c, '\0' | '/' | '\\' | ' ' | '\t') || c.is_control();
        if bad {
            if !out.ends_with('_') {
                out.push('_');
            }
        } else {
            out.push(c);
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    if trimmed.len() <= NAME_MAX {
        return trimmed.to_string();
    }
    let mut take = NAME_MAX;
    while take > 0 && !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    trimmed[..take].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_separators() {
        assert_eq!(sanitize_filename("a/b\\c.png"), "a_b_c.png");
    }

    #[test]
    fn trims_dots_and_spaces() {
        assert_eq!(sanitize_filename("  ..photo.jpg.. "), "photo.jpg");
    }

    #[test]
    fn collapses_replacement_runs() {
        assert_eq!(sanitize_filename("a  \t b.gif"), "a_b.gif");
    }

    #[test]
    fn caps_length_on_char_boundary() {
        let long = "é".repeat(300);
        let s = sanitize_filename(&long);
        assert!(s.len() <= 255);
        assert!(s.chars().all(|c| c == 'é'));
    }
}
