//! Build identity for logs and the CLI.
//!
//! The git fields come from `build.rs`; a build outside a checkout reports
//! them as "unknown". The model guard logs [`version_string`] next to the
//! model name, so a classification regression can be traced to a build.

pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const GIT_BRANCH: &str = match option_env!("VERGEN_GIT_BRANCH") {
    Some(branch) => branch,
    None => "unknown",
};

/// Full commit SHA; [`version_string`] shortens it.
pub const GIT_SHA: &str = match option_env!("VERGEN_GIT_SHA") {
    Some(sha) => sha,
    None => "unknown",
};

const SHORT_SHA_LEN: usize = 7;

pub fn git_dirty() -> bool {
    option_env!("VERGEN_GIT_DIRTY") == Some("true")
}

/// `0.1.0+main.1a2b3c4`, with `.dirty` appended for an unclean tree.
pub fn version_string() -> String {
    let sha = GIT_SHA.get(..SHORT_SHA_LEN).unwrap_or(GIT_SHA);
    let mut version = format!("{PKG_VERSION}+{GIT_BRANCH}.{sha}");
    if git_dirty() {
        version.push_str(".dirty");
    }
    version
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_metadata_follows_package_version() {
        let version = version_string();
        let (pkg, build) = version.split_once('+').unwrap();
        assert_eq!(pkg, PKG_VERSION);
        assert!(build.starts_with(GIT_BRANCH));
    }

    #[test]
    fn sha_is_shortened() {
        let version = version_string();
        let tail = version.strip_suffix(".dirty").unwrap_or(&version);
        let sha = tail.rsplit('.').next().unwrap();
        assert!(sha.len() <= SHORT_SHA_LEN, "{sha}");
        assert!(GIT_SHA.starts_with(sha));
    }

    #[test]
    fn dirty_suffix_matches_flag() {
        assert_eq!(version_string().ends_with(".dirty"), git_dirty());
    }
}
