// Session store: persists the API base URL across runs in a dotfile in the
// user's home directory, so a returning user lands straight in their blog.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const STORE_FILE: &str = ".masterblog_api_url";

fn store_path() -> PathBuf {
    let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.join(STORE_FILE)
}

/// Persist the base URL for future runs.
pub fn save_base_url(url: &str) -> Result<()> {
    write_url(&store_path(), url)
}

/// Load the previously saved base URL, if any. A missing or empty store
/// file is not an error; it just means no session to restore.
pub fn load_base_url() -> Option<String> {
    read_url(&store_path())
}

fn write_url(path: &Path, url: &str) -> Result<()> {
    std::fs::write(path, url.trim()).context("Failed to save API base URL")?;
    Ok(())
}

fn read_url(path: &Path) -> Option<String> {
    let data = std::fs::read_to_string(path).ok()?;
    let url = data.trim().to_string();
    if url.is_empty() {
        None
    } else {
        Some(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("masterblog-store-{}-{}", std::process::id(), name))
    }

    #[test]
    fn saved_url_round_trips() {
        let path = temp_store("round-trip");
        write_url(&path, "http://localhost:5002/api").unwrap();
        assert_eq!(
            read_url(&path),
            Some("http://localhost:5002/api".to_string())
        );
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let path = temp_store("trim");
        write_url(&path, "  http://localhost:5002/api\n").unwrap();
        assert_eq!(
            read_url(&path),
            Some("http://localhost:5002/api".to_string())
        );
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_store_yields_no_url() {
        let path = temp_store("missing");
        assert_eq!(read_url(&path), None);
    }

    #[test]
    fn empty_store_yields_no_url() {
        let path = temp_store("empty");
        std::fs::write(&path, "   \n").unwrap();
        assert_eq!(read_url(&path), None);
        std::fs::remove_file(&path).unwrap();
    }
}
