//! Per-directory tracking of claimed filenames.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use super::split_extension;

/// Filenames already assigned in each output directory for one run.
///
/// Collisions are resolved deterministically by inserting a numeric suffix
/// before the extension: `name.jpg`, `name_1.jpg`, `name_2.jpg`, ...
/// Flat mode uses a single directory (one global set); grouped mode gets one
/// set per group directory.
#[derive(Debug, Default)]
pub struct UsedNames {
    claimed: HashMap<PathBuf, HashSet<String>>,
}

impl UsedNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a unique variant of `candidate` within `dir` and returns it.
    pub fn claim(&mut self, dir: &Path, candidate: &str) -> String {
        let set = self.claimed.entry(dir.to_path_buf()).or_default();
        if set.insert(candidate.to_string()) {
            return candidate.to_string();
        }

        let (stem, ext) = split_extension(candidate);
        let mut counter = 1u32;
        loop {
            let attempt = format!("{stem}_{counter}{ext}");
            if set.insert(attempt.clone()) {
                return attempt;
            }
            counter += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_claim_is_unchanged() {
        let mut used = UsedNames::new();
        assert_eq!(used.claim(Path::new("out"), "cat.jpg"), "cat.jpg");
    }

    #[test]
    fn collisions_get_incrementing_suffixes() {
        let mut used = UsedNames::new();
        let dir = Path::new("out");
        assert_eq!(used.claim(dir, "cat.jpg"), "cat.jpg");
        assert_eq!(used.claim(dir, "cat.jpg"), "cat_1.jpg");
        assert_eq!(used.claim(dir, "cat.jpg"), "cat_2.jpg");
        assert_eq!(used.claim(dir, "cat.jpg"), "cat_3.jpg");
    }

    #[test]
    fn suffix_skips_names_already_taken() {
        let mut used = UsedNames::new();
        let dir = Path::new("out");
        assert_eq!(used.claim(dir, "cat_1.jpg"), "cat_1.jpg");
        assert_eq!(used.claim(dir, "cat.jpg"), "cat.jpg");
        // `cat_1.jpg` is taken, so the collision jumps to `_2`.
        assert_eq!(used.claim(dir, "cat.jpg"), "cat_2.jpg");
    }

    #[test]
    fn directories_are_independent_scopes() {
        let mut used = UsedNames::new();
        assert_eq!(used.claim(Path::new("out/a"), "cat.jpg"), "cat.jpg");
        assert_eq!(used.claim(Path::new("out/b"), "cat.jpg"), "cat.jpg");
        assert_eq!(used.claim(Path::new("out/a"), "cat.jpg"), "cat_1.jpg");
    }

    #[test]
    fn extensionless_candidate_gets_plain_suffix() {
        let mut used = UsedNames::new();
        let dir = Path::new("out");
        assert_eq!(used.claim(dir, "README"), "README");
        assert_eq!(used.claim(dir, "README"), "README_1");
    }
}
