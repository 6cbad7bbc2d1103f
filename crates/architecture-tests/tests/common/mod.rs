//! Shared helpers for architecture tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root: the first ancestor of this crate whose Cargo.toml declares `[workspace]`.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .find(|dir| {
            fs::read_to_string(dir.join("Cargo.toml"))
                .map(|content| content.contains("[workspace]"))
                .unwrap_or(false)
        })
        .expect("workspace root not found")
        .to_path_buf()
}

/// All `.rs` files below `dir`.
pub fn rust_files(dir: &Path) -> Vec<PathBuf> {
    walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .map(|e| e.into_path())
        .collect()
}

/// Dependency names declared in the `[dependencies]` table of a crate manifest.
pub fn runtime_dependencies(crate_name: &str) -> Vec<String> {
    let manifest = workspace_root()
        .join("crates")
        .join(crate_name)
        .join("Cargo.toml");
    let content = fs::read_to_string(&manifest)
        .unwrap_or_else(|_| panic!("Failed to read {}", manifest.display()));

    let mut in_dependencies = false;
    let mut deps = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('[') {
            in_dependencies = trimmed == "[dependencies]";
            continue;
        }
        if !in_dependencies || trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some((name, _)) = trimmed.split_once('=') {
            deps.push(name.trim().to_string());
        }
    }
    deps
}
