//! Writes `build_info.rs` into OUT_DIR for `utils::build_info`.

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

const UNKNOWN: &str = "unknown";

/// Short commit hash: `BUILD_COMMIT` wins, then git, then "unknown".
fn commit_hash() -> String {
    if let Ok(commit) = env::var("BUILD_COMMIT") {
        return commit;
    }
    let output = match Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
    {
        Ok(output) if output.status.success() => output,
        _ => return UNKNOWN.to_string(),
    };
    let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if hash.len() == 7 {
        hash
    } else {
        UNKNOWN.to_string()
    }
}

/// UTC build date, overridable for reproducible builds.
fn build_date() -> String {
    env::var("BUILD_DATE").unwrap_or_else(|_| chrono::Utc::now().format("%Y-%m-%d").to_string())
}

fn main() {
    let mut source = String::new();
    for (name, value) in [("BUILD_COMMIT", commit_hash()), ("BUILD_DATE", build_date())] {
        let _ = writeln!(source, "pub const {}: &str = {:?};", name, value);
    }

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").expect("cargo sets OUT_DIR"));
    fs::write(out_dir.join("build_info.rs"), source).expect("write build_info.rs");

    for var in ["BUILD_COMMIT", "BUILD_DATE"] {
        println!("cargo:rerun-if-env-changed={}", var);
    }
    if PathBuf::from(".git/HEAD").exists() {
        println!("cargo:rerun-if-changed=.git/HEAD");
    }
}
