use std::process::Command;

fn main() {
    // Embed the git SHA in `--version`
    let sha = Command::new("git")
        .args(["rev-parse", "--short=12", "HEAD"])
        .output()
        .ok()
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=GIT_SHA={}", sha);
    // Paths are relative to this crate; the repository root is two levels up
    println!("cargo:rerun-if-changed=../../.git/HEAD");
}
