//! Link extraction
//!
//! Outgoing references come from two places in a document: inline
//! `[[wikilinks]]` anywhere in the text, and the `skills` / `links` lists of
//! its YAML frontmatter.

pub mod frontmatter;
pub mod wikilink;

pub use frontmatter::{Frontmatter, parse_frontmatter};
pub use wikilink::{extract_inline_references, resolve_wikilinks};
