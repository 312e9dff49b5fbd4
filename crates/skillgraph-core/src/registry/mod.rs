//! Registry loading
//!
//! A registry has two entity sources:
//!
//! ```text
//! registry/
//! ├── graph/
//! │   ├── index.md        graph node "index"
//! │   └── defi.md         graph node "defi"
//! └── skills/
//!     └── aave-lending/
//!         └── SKILL.md    skill "aave-lending"
//! ```
//!
//! [`Registry::load`] reads every entity once into a [`DocumentSet`]; all
//! later phases work on that snapshot.

mod document;

pub use document::{Document, DocumentSet, EntityKind, UnreadableFile};

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::RegistryConfig;
use crate::error::{Error, Result};

/// Filesystem view of a skill registry
#[derive(Debug, Clone)]
pub struct Registry {
    config: RegistryConfig,
}

impl Registry {
    pub fn new(config: RegistryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Identifier of the traversal origin
    pub fn root_node(&self) -> &str {
        &self.config.root_node
    }

    pub fn graph_dir(&self) -> PathBuf {
        self.config.graph_path()
    }

    pub fn skills_dir(&self) -> PathBuf {
        self.config.skills_path()
    }

    pub fn node_path(&self, id: &str) -> PathBuf {
        self.graph_dir().join(format!("{}.md", id))
    }

    pub fn skill_descriptor_path(&self, id: &str) -> PathBuf {
        self.skills_dir().join(id).join(&self.config.descriptor)
    }

    /// Stems of the `*.md` files directly under the graph directory.
    ///
    /// An absent directory yields an empty set.
    pub fn list_graph_nodes(&self) -> Result<BTreeSet<String>> {
        let dir = self.graph_dir();
        let mut nodes = BTreeSet::new();

        for path in list_dir(&dir)? {
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => {
                    nodes.insert(stem.to_string());
                }
                None => debug!(path = %path.display(), "Skipping non UTF-8 file name"),
            }
        }

        Ok(nodes)
    }

    /// Immediate subdirectories of the skills directory holding a descriptor.
    ///
    /// An absent directory yields an empty set.
    pub fn list_skills(&self) -> Result<BTreeSet<String>> {
        let dir = self.skills_dir();
        let mut skills = BTreeSet::new();

        for path in list_dir(&dir)? {
            if !path.is_dir() || !path.join(&self.config.descriptor).is_file() {
                continue;
            }
            match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => {
                    skills.insert(name.to_string());
                }
                None => debug!(path = %path.display(), "Skipping non UTF-8 skill folder"),
            }
        }

        Ok(skills)
    }

    /// Read a graph node's raw text
    pub fn read_node(&self, id: &str) -> Result<String> {
        read_text(&self.node_path(id))
    }

    /// Read a skill's descriptor text
    pub fn read_skill(&self, id: &str) -> Result<String> {
        read_text(&self.skill_descriptor_path(id))
    }

    /// Discover and read every entity.
    ///
    /// Files that fail to read are recorded in
    /// [`DocumentSet::unreadable`] instead of aborting the load.
    pub fn load(&self) -> Result<DocumentSet> {
        let graph_nodes = self.list_graph_nodes()?;
        let skills = self.list_skills()?;
        debug!(
            graph_nodes = graph_nodes.len(),
            skills = skills.len(),
            "Discovered registry entities"
        );

        let mut nodes = BTreeMap::new();
        let mut descriptors = BTreeMap::new();
        let mut unreadable = Vec::new();

        let sources = [
            (EntityKind::GraphNode, &graph_nodes),
            (EntityKind::Skill, &skills),
        ];
        for (kind, ids) in sources {
            for id in ids {
                let path = match kind {
                    EntityKind::GraphNode => self.node_path(id),
                    EntityKind::Skill => self.skill_descriptor_path(id),
                };
                match fs::read_to_string(&path) {
                    Ok(text) => {
                        let doc = Document::new(id.clone(), kind, path, text);
                        match kind {
                            EntityKind::GraphNode => nodes.insert(id.clone(), doc),
                            EntityKind::Skill => descriptors.insert(id.clone(), doc),
                        };
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Failed to read registry file");
                        unreadable.push(UnreadableFile {
                            id: id.clone(),
                            kind,
                            path,
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        Ok(DocumentSet {
            graph_nodes,
            skills,
            nodes,
            descriptors,
            unreadable,
        })
    }
}

fn list_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "Directory absent, treating as empty");
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        paths.push(entry.path());
    }
    Ok(paths)
}

fn read_text(path: &Path) -> Result<String> {
    debug!(path = %path.display(), "Reading registry file");
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}
