use std::path::Path;
use std::process::Command;

const SHA_VAR: &str = "PASSBOOK_BUILD_SHA";

/// Commit of the workspace checkout, when git is available.
fn git_commit(workspace: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(workspace)
        .args(["log", "-1", "--format=%h"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let sha = String::from_utf8(out.stdout).ok()?.trim().to_owned();
    (!sha.is_empty()).then_some(sha)
}

fn main() {
    let manifest = std::env::var_os("CARGO_MANIFEST_DIR").unwrap_or_else(|| ".".into());
    let workspace = Path::new(&manifest).join("..");

    // Packaged builds have no .git; let the packager pass the commit in.
    let sha = std::env::var(SHA_VAR)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| git_commit(&workspace))
        .unwrap_or_else(|| "unknown".to_owned());

    println!("cargo:rerun-if-env-changed={SHA_VAR}");
    println!("cargo:rerun-if-changed={}", workspace.join(".git").join("HEAD").display());
    println!("cargo:rustc-env={SHA_VAR}={sha}");
}
