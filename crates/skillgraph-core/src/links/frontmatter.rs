//! YAML frontmatter parsing
//!
//! A document may start with a block like:
//!
//! ```text
//! ---
//! id: defi
//! description: Decentralized finance entry point
//! skills: [aave-lending]
//! links:
//!   - x402-payments
//! ---
//! ```
//!
//! Anything malformed is treated as "no frontmatter".

use std::collections::BTreeSet;

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use tracing::debug;

const DELIMITER: &str = "---";

/// Parse the leading frontmatter block into a mapping.
///
/// Returns an empty mapping when the text does not open with a `---` line,
/// the block is never closed, the YAML fails to parse, or the top-level
/// value is not a mapping.
pub fn parse_frontmatter(text: &str) -> Mapping {
    let Some(body) = frontmatter_block(text) else {
        return Mapping::new();
    };

    match serde_yaml::from_str::<Value>(&body) {
        Ok(Value::Mapping(mapping)) => mapping,
        Ok(_) => Mapping::new(),
        Err(e) => {
            debug!(error = %e, "Ignoring malformed frontmatter");
            Mapping::new()
        }
    }
}

fn frontmatter_block(text: &str) -> Option<String> {
    let mut lines = text.lines();
    if lines.next()?.trim_end_matches('\r') != DELIMITER {
        return None;
    }

    let mut body: Vec<&str> = Vec::new();
    for line in lines {
        if line.trim_end_matches('\r') == DELIMITER {
            return Some(body.join("\n"));
        }
        body.push(line);
    }
    None
}

/// Typed view over the recognized frontmatter fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Frontmatter {
    pub id: Option<String>,
    pub description: Option<String>,
    /// Skill identifiers this node leads to
    pub skills: Vec<String>,
    /// Graph node identifiers this node leads to
    pub links: Vec<String>,
}

impl Frontmatter {
    /// Parse directly from document text
    pub fn parse(text: &str) -> Self {
        Self::from_mapping(&parse_frontmatter(text))
    }

    /// Missing, null, or non-list `skills`/`links` become empty lists;
    /// non-string items are dropped.
    pub fn from_mapping(mapping: &Mapping) -> Self {
        Self {
            id: string_field(mapping, "id"),
            description: string_field(mapping, "description"),
            skills: string_list(mapping, "skills"),
            links: string_list(mapping, "links"),
        }
    }

    /// Union of `skills` and `links`
    pub fn references(&self) -> BTreeSet<String> {
        self.skills.iter().chain(&self.links).cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn string_field(mapping: &Mapping, key: &str) -> Option<String> {
    mapping.get(key).and_then(Value::as_str).map(str::to_string)
}

fn string_list(mapping: &Mapping, key: &str) -> Vec<String> {
    match mapping.get(key) {
        Some(Value::Sequence(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
