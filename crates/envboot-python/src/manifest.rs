//! Minimal reader for pip requirements files
//!
//! Only used for reporting what a manifest will install; pip itself
//! consumes the file during installation.

/// One requirement line from a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Distribution name without extras or version constraints
    pub name: String,
    /// The line as written, minus comments and surrounding whitespace
    pub spec: String,
}

/// Parse requirement lines, skipping blanks, comments and pip options
/// (`-r`, `-e`, `--index-url`, ...).
pub fn parse_requirements(content: &str) -> Vec<Requirement> {
    content
        .lines()
        .filter_map(|line| {
            let line = match line.find(" #") {
                Some(idx) => &line[..idx],
                None => line,
            }
            .trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
                return None;
            }

            let end = line
                .find(|c: char| matches!(c, '[' | '=' | '<' | '>' | '!' | '~' | ';' | ' ' | '@'))
                .unwrap_or(line.len());
            let name = line[..end].trim();
            if name.is_empty() {
                return None;
            }

            Some(Requirement {
                name: name.to_string(),
                spec: line.to_string(),
            })
        })
        .collect()
}
