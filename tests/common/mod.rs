#![allow(dead_code)]

pub mod command;
pub mod file;

/// Sorted `path:digest` lines of the index file, or an empty string if there is none
pub fn read_index(dir: &std::path::Path) -> String {
    std::fs::read_to_string(dir.join(".sit").join("index")).unwrap_or_default()
}

/// Raw contents of `.sit/HEAD`
pub fn read_head(dir: &std::path::Path) -> String {
    std::fs::read_to_string(dir.join(".sit").join("HEAD"))
        .unwrap_or_else(|e| panic!("Failed to read HEAD: {}", e))
}

/// Tip of a branch, if the branch exists
pub fn read_branch(dir: &std::path::Path, name: &str) -> Option<String> {
    std::fs::read_to_string(dir.join(".sit").join("refs").join("heads").join(name))
        .ok()
        .map(|content| content.trim().to_string())
}
