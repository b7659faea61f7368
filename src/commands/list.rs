use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::manifest::Manifest;

/// Handle the list command
/// Output each source with its pinned rev, then its hooks indented below
pub fn handle<W: Write>(path: &Path, output: &mut W) -> Result<()> {
    let manifest = Manifest::load(path)?;

    for source in &manifest.repos {
        if source.is_sentinel() {
            writeln!(output, "{}", source.repo)?;
        } else {
            writeln!(output, "{} @ {}", source.repo, source.rev)?;
        }

        for hook in &source.hooks {
            match &hook.name {
                Some(name) => writeln!(output, "  {} ({})", hook.id, name)?,
                None => writeln!(output, "  {}", hook.id)?,
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_list_output() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".pre-commit-config.yaml");
        std::fs::write(
            &path,
            r#"
repos:
  - repo: https://github.com/pre-commit/pre-commit-hooks
    rev: v4.5.0
    hooks:
      - id: trailing-whitespace
      - id: end-of-file-fixer
        name: fix eof
  - repo: local
    rev: ""
    hooks:
      - id: make-lint
"#,
        )
        .unwrap();

        let mut output = Vec::new();
        handle(&path, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "https://github.com/pre-commit/pre-commit-hooks @ v4.5.0",
                "  trailing-whitespace",
                "  end-of-file-fixer (fix eof)",
                "local",
                "  make-lint",
            ]
        );
    }
}
