//! `contributors.json` output.

use crate::models::{ContributorTotal, ContributorsFile};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::path::Path;
use tracing::debug;

/// Serialize the document with tab indentation and a trailing newline.
///
/// Non-ASCII characters are written as-is.
pub fn render_json(file: &ContributorsFile) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    file.serialize(&mut serializer)
        .context("Failed to serialize contributors")?;

    let mut json = String::from_utf8(buf).context("Serialized JSON is not valid UTF-8")?;
    json.push('\n');
    Ok(json)
}

/// Write the contributors file, creating parent directories as needed.
///
/// Any existing file at `path` is replaced.
pub fn write_json(path: &Path, contributors: Vec<ContributorTotal>) -> Result<ContributorsFile> {
    let file = ContributorsFile::now(contributors);
    let json = render_json(&file)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(path, &json)
        .with_context(|| format!("Failed to write contributors to {}", path.display()))?;
    debug!("Wrote {} bytes to {}", json.len(), path.display());

    println!(
        "{}: updated with {} contributors",
        path.display(),
        file.contributors.len()
    );

    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("contributors.json");

        let written = write_json(
            &path,
            vec![
                ContributorTotal::new("alice", 8),
                ContributorTotal::new("bob", 3),
            ],
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: ContributorsFile = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, written);
        assert_eq!(parsed.contributors.len(), 2);
        assert_eq!(parsed.contributors[0].login, "alice");
        assert!(parsed.updated.ends_with('Z'));
    }

    #[test]
    fn test_tab_indent_and_trailing_newline() {
        let file = ContributorsFile {
            updated: "2024-01-01T00:00:00Z".to_string(),
            contributors: vec![ContributorTotal::new("alice", 8)],
        };

        let json = render_json(&file).unwrap();

        let expected = "{\n\t\"updated\": \"2024-01-01T00:00:00Z\",\n\t\"contributors\": [\n\t\t{\n\t\t\t\"login\": \"alice\",\n\t\t\t\"contributions\": 8\n\t\t}\n\t]\n}\n";
        assert_eq!(json, expected);
    }

    #[test]
    fn test_non_ascii_unescaped() {
        let file = ContributorsFile {
            updated: "2024-01-01T00:00:00Z".to_string(),
            contributors: vec![ContributorTotal::new("josé", 1)],
        };

        let json = render_json(&file).unwrap();
        assert!(json.contains("\"josé\""));
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contributors.json");
        std::fs::write(&path, "{\"stale\": true, \"padding\": \"xxxxxxxxxxxxxxxxxxxxxxxx\"}").unwrap();

        write_json(&path, vec![]).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(parsed.get("stale").is_none());
        assert_eq!(parsed["contributors"], serde_json::json!([]));
    }
}
