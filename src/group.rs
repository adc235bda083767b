//! Grouping of derived filenames by shared textual stem.
//!
//! Groups with more than one member become subdirectories of the output
//! root; singleton groups stay in the root so one-off filenames don't
//! produce directory clutter.

use crate::name::NamedImage;

/// Key used when a filename yields nothing long enough to group on.
const FALLBACK_KEY: &str = "misc";

/// One cluster of images sharing a group key, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageGroup {
    pub key: String,
    pub images: Vec<NamedImage>,
}

/// Computes the group key for one named image.
///
/// Priority: first alphabetic token of the CDN original-name (when one was
/// recovered), else the leading run of letters/underscores of the filename,
/// else its first three characters. Keys shorter than two characters
/// collapse to `misc`.
pub fn group_key(filename: &str, original_name: Option<&str>) -> String {
    let mut key = leading_letter_run(filename)
        .unwrap_or_else(|| filename.chars().take(3).collect());

    if let Some(original) = original_name {
        let first = original
            .split(|c: char| !c.is_ascii_alphabetic())
            .next()
            .unwrap_or("");
        if !first.is_empty() {
            key = first.to_string();
        }
    }

    if key.chars().count() < 2 {
        key = FALLBACK_KEY.to_string();
    }
    key
}

/// Clusters images by group key, preserving the order groups are first seen
/// and the image order within each group.
pub fn group_images(images: Vec<NamedImage>) -> Vec<ImageGroup> {
    let mut groups: Vec<ImageGroup> = Vec::new();

    for image in images {
        let key = group_key(&image.filename, image.original_name.as_deref());
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.images.push(image),
            None => groups.push(ImageGroup {
                key,
                images: vec![image],
            }),
        }
    }

    groups
}

fn leading_letter_run(name: &str) -> Option<String> {
    let run: String = name
        .chars()
        .take_while(|c| c.is_ascii_alphabetic() || *c == '_')
        .collect();
    // Trailing underscores are separators, not part of the stem:
    // `sunset_01.jpg` and `sunset_02.jpg` should both key on `sunset`.
    let run = run.trim_end_matches('_');
    if run.is_empty() {
        None
    } else {
        Some(run.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(filename: &str, original_name: Option<&str>) -> NamedImage {
        NamedImage {
            url: format!("https://site.example/{filename}"),
            filename: filename.to_string(),
            original_name: original_name.map(str::to_string),
        }
    }

    #[test]
    fn leading_letter_run_is_the_default_key() {
        assert_eq!(group_key("sunset_01.jpg", None), "sunset");
        assert_eq!(group_key("sunset_02.jpg", None), "sunset");
        assert_eq!(group_key("beach.jpg", None), "beach");
    }

    #[test]
    fn original_name_first_token_wins() {
        assert_eq!(
            group_key("whatever_14174000.jpg", Some("sunset-beach.jpg")),
            "sunset"
        );
    }

    #[test]
    fn original_name_starting_with_nonalpha_falls_through() {
        // First split token is empty, so the filename-derived key stands.
        assert_eq!(group_key("beach_x.jpg", Some("2024-sunset")), "beach_x");
    }

    #[test]
    fn digit_prefixed_filename_uses_first_three_chars() {
        assert_eq!(group_key("123shot.jpg", None), "123");
    }

    #[test]
    fn short_keys_collapse_to_misc() {
        // Leading run is the single letter "a".
        assert_eq!(group_key("a1234.jpg", None), "misc");
        assert_eq!(group_key("1", None), "misc");
        // Three-character fallback keys are long enough to stand.
        assert_eq!(group_key("1.jpg", None), "1.j");
    }

    #[test]
    fn group_images_clusters_by_key_in_order() {
        let groups = group_images(vec![
            named("sunset_01.jpg", None),
            named("beach.jpg", None),
            named("sunset_02.jpg", None),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "sunset");
        assert_eq!(groups[0].images.len(), 2);
        assert_eq!(groups[0].images[1].filename, "sunset_02.jpg");
        assert_eq!(groups[1].key, "beach");
        assert_eq!(groups[1].images.len(), 1);
    }
}
