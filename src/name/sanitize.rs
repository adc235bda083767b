//! Character-level cleanup for derived filenames and alt/title text.

/// Cleaned alt/title text is truncated to this many characters.
const TEXT_MAX: usize = 30;

/// Cleaned alt/title text must be longer than this to be usable as a name.
const TEXT_MIN: usize = 3;

/// Replaces every character outside word characters, `-`, `_`, `.` with `_`.
///
/// Word characters are unicode alphanumerics plus underscore, so non-ASCII
/// names survive cleaning.
pub fn clean_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Like [`clean_filename`] but dots are replaced too, since the result
/// becomes a filename stem and must not introduce a fake extension.
pub fn clean_text(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Returns cleaned, truncated alt/title text usable as a filename stem, or
/// `None` when it is too short to be descriptive.
pub fn usable_text(text: &str) -> Option<String> {
    let cleaned = clean_text(text);
    if cleaned.chars().count() > TEXT_MIN {
        Some(cleaned.chars().take(TEXT_MAX).collect())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_filename_keeps_word_chars_dash_dot() {
        assert_eq!(clean_filename("photo-01_final.jpg"), "photo-01_final.jpg");
        assert_eq!(clean_filename("a b/c:d.png"), "a_b_c_d.png");
        assert_eq!(clean_filename("naïve.jpg"), "naïve.jpg");
    }

    #[test]
    fn clean_text_replaces_dots() {
        assert_eq!(clean_text("sunset v2.0"), "sunset_v2_0");
        assert_eq!(clean_text("hello, world!"), "hello__world_");
    }

    #[test]
    fn usable_text_rejects_short_strings() {
        assert_eq!(usable_text(""), None);
        assert_eq!(usable_text("abc"), None);
        assert_eq!(usable_text("abcd").as_deref(), Some("abcd"));
    }

    #[test]
    fn usable_text_truncates_to_thirty_chars() {
        let long = "x".repeat(50);
        assert_eq!(usable_text(&long).unwrap().chars().count(), 30);
    }
}
