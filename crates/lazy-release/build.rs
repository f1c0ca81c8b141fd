use std::process::Command;

use chrono::Utc;

/// Embeds `LAZY_RELEASE_VERSION`: the package version on a tagged release
/// commit, otherwise the version plus commit hash and build time.
fn main() {
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/refs/tags");

    let version = env!("CARGO_PKG_VERSION");
    let version_string = match git(&["rev-parse", "--short", "HEAD"]) {
        Some(hash) if !is_tagged_release(version) => format!(
            "{version}+{hash}.{}",
            Utc::now().format("%Y%m%dT%H%M%SZ")
        ),
        _ => version.to_owned(),
    };

    println!("cargo:rustc-env=LAZY_RELEASE_VERSION={version_string}");
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_owned())
}

fn is_tagged_release(version: &str) -> bool {
    let expected_tag = format!("v{version}");
    git(&["tag", "--points-at", "HEAD"])
        .is_some_and(|tags| tags.lines().any(|line| line.trim() == expected_tag))
}
