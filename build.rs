use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let pkg_version = std::env::var("CARGO_PKG_VERSION").unwrap_or_default();

    // Release builds from a tag report the plain package version; anything
    // else is tagged with the short commit so bug reports can be traced.
    let version = if git(&["describe", "--exact-match", "--tags", "HEAD"]).is_some() {
        pkg_version
    } else {
        match git(&["rev-parse", "--short", "HEAD"]) {
            Some(hash) if !hash.is_empty() => format!("{pkg_version}-dev@{hash}"),
            _ => format!("{pkg_version}-dev"),
        }
    };

    println!("cargo:rustc-env=PDF_GALLERY_VERSION={version}");
}
