//! Registry validation
//!
//! Runs the checks in order and collects every finding instead of stopping
//! at the first one:
//!
//! 1. inline links in graph nodes resolve
//! 2. inline links in skill descriptors resolve
//! 3. every skill is reachable from the root node (warnings)
//! 4. every graph node except the root has an incoming link
//!
//! A registry with no graph nodes at all stops before phase 1.

mod issue;

pub use issue::{Issue, IssueKind, Severity};

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::graph::{
    build_link_graph, find_orphan_nodes, find_reachable, find_unreachable_skills,
    validate_references,
};
use crate::registry::{DocumentSet, Registry};

/// The numbered steps of a run, announced as they start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NodeLinks,
    SkillLinks,
    Reachability,
    Orphans,
}

impl Phase {
    pub fn number(&self) -> u8 {
        match self {
            Self::NodeLinks => 1,
            Self::SkillLinks => 2,
            Self::Reachability => 3,
            Self::Orphans => 4,
        }
    }

    /// Progress line, e.g. `3. Checking skill reachability from index...`
    pub fn describe(&self, descriptor: &str, root: &str) -> String {
        let label = match self {
            Self::NodeLinks => "Validating wikilinks in graph nodes...".to_string(),
            Self::SkillLinks => format!("Validating wikilinks in {} files...", descriptor),
            Self::Reachability => format!("Checking skill reachability from {}...", root),
            Self::Orphans => "Checking for orphan graph nodes...".to_string(),
        };
        format!("{}. {}", self.number(), label)
    }
}

/// Outcome of one validation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub graph_nodes: usize,
    pub skills: usize,
    /// Identifiers reachable from the root, the root included
    pub reachable: BTreeSet<String>,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
    /// Set when the run stopped before the numbered phases
    pub aborted: bool,
}

impl ValidationReport {
    fn new(documents: &DocumentSet) -> Self {
        Self {
            graph_nodes: documents.graph_nodes.len(),
            skills: documents.skills.len(),
            reachable: BTreeSet::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
            aborted: false,
        }
    }

    /// Passes iff there are no errors; warnings never fail a run
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn record(&mut self, issue: Issue) {
        match issue.severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
        }
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) {
        for issue in issues {
            self.record(issue);
        }
    }

    pub fn has_kind(&self, kind: IssueKind) -> bool {
        self.errors
            .iter()
            .chain(&self.warnings)
            .any(|issue| issue.kind == kind)
    }
}

/// Validates one registry
pub struct Validator<'a> {
    registry: &'a Registry,
}

impl<'a> Validator<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Run without progress reporting
    pub fn run(&self) -> Result<ValidationReport> {
        self.run_with_progress(|_| {})
    }

    /// Load the registry and validate it, calling `progress` as each
    /// numbered phase starts.
    ///
    /// Returns `Err` only when the registry directories cannot be listed;
    /// everything found in the files is part of the report.
    pub fn run_with_progress(&self, progress: impl FnMut(Phase)) -> Result<ValidationReport> {
        let documents = self.registry.load()?;
        Ok(self.validate(&documents, progress))
    }

    /// Validate an already loaded snapshot
    pub fn validate(
        &self,
        documents: &DocumentSet,
        mut progress: impl FnMut(Phase),
    ) -> ValidationReport {
        let root = self.registry.root_node();
        let mut report = ValidationReport::new(documents);

        if documents.graph_nodes.is_empty() {
            report.record(Issue::new(
                IssueKind::NoGraphNodes,
                format!(
                    "No graph nodes found in {}/",
                    self.registry.graph_dir().display()
                ),
            ));
            report.aborted = true;
            info!("No graph nodes found, skipping validation phases");
            return report;
        }

        if !documents.graph_nodes.contains(root) {
            report.record(Issue::new(
                IssueKind::MissingRoot,
                format!(
                    "Missing {}.md in {}/",
                    root,
                    self.registry.graph_dir().display()
                ),
            ));
        }

        for file in &documents.unreadable {
            report.record(Issue::new(
                IssueKind::UnreadableFile,
                format!("{}: failed to read: {}", file.path.display(), file.reason),
            ));
        }

        let valid = documents.valid_targets();

        progress(Phase::NodeLinks);
        report.extend(validate_references(&valid, documents.nodes.values()));

        progress(Phase::SkillLinks);
        report.extend(validate_references(&valid, documents.descriptors.values()));

        progress(Phase::Reachability);
        let graph = build_link_graph(documents);
        report.reachable = find_reachable(&graph, root);
        for skill in find_unreachable_skills(&documents.skills, &report.reachable) {
            report.record(Issue::new(
                IssueKind::UnreachableSkill,
                format!("Skill '{}' is not reachable from {}.md", skill, root),
            ));
        }

        progress(Phase::Orphans);
        report.extend(find_orphan_nodes(&documents.graph_nodes, &graph, root));

        info!(
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            reachable = report.reachable.len(),
            "Validation finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistryConfig;
    use crate::registry::{Document, EntityKind};

    fn registry() -> Registry {
        Registry::new(RegistryConfig::at("registry"))
    }

    fn docs(nodes: &[(&str, &str)], skills: &[(&str, &str)]) -> DocumentSet {
        let mut set = DocumentSet::default();
        for (id, text) in nodes {
            set.push(Document::new(
                *id,
                EntityKind::GraphNode,
                format!("registry/graph/{}.md", id),
                *text,
            ));
        }
        for (id, text) in skills {
            set.push(Document::new(
                *id,
                EntityKind::Skill,
                format!("registry/skills/{}/SKILL.md", id),
                *text,
            ));
        }
        set
    }

    #[test]
    fn test_no_graph_nodes_aborts() {
        let registry = registry();
        let mut phases = Vec::new();
        let report = Validator::new(&registry).validate(
            &docs(&[], &[("beta", "")]),
            |p| phases.push(p),
        );

        assert!(!report.passed());
        assert!(report.aborted);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, IssueKind::NoGraphNodes);
        assert!(phases.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_phases_run_in_order() {
        let registry = registry();
        let mut phases = Vec::new();
        Validator::new(&registry).validate(&docs(&[("index", "")], &[]), |p| phases.push(p));

        assert_eq!(
            phases,
            vec![
                Phase::NodeLinks,
                Phase::SkillLinks,
                Phase::Reachability,
                Phase::Orphans
            ]
        );
    }

    #[test]
    fn test_missing_root_is_error_and_continues() {
        let registry = registry();
        let report = Validator::new(&registry).validate(
            &docs(&[("alpha", "[[beta]]")], &[("beta", "[[alpha]]")]),
            |_| {},
        );

        assert!(report.has_kind(IssueKind::MissingRoot));
        assert!(report.reachable.is_empty());
        // beta is unreachable because there is no root to start from
        assert_eq!(report.warnings.len(), 1);
        // alpha is linked from beta, so it is not an orphan
        assert!(!report.has_kind(IssueKind::OrphanNode));
    }

    #[test]
    fn test_frontmatter_only_skill_is_reachable() {
        let registry = registry();
        let report = Validator::new(&registry).validate(
            &docs(
                &[("index", "[[alpha]]"), ("alpha", "---\nskills: [beta]\n---\n")],
                &[("beta", "")],
            ),
            |_| {},
        );

        assert!(report.passed());
        assert!(report.warnings.is_empty());
        assert!(report.reachable.contains("beta"));
    }

    #[test]
    fn test_broken_link_in_skill_descriptor() {
        let registry = registry();
        let report = Validator::new(&registry).validate(
            &docs(&[("index", "[[beta]]")], &[("beta", "See [[nowhere]]")]),
            |_| {},
        );

        assert_eq!(report.errors.len(), 1);
        assert_eq!(
            report.errors[0].message,
            "registry/skills/beta/SKILL.md: broken wikilink [[nowhere]]"
        );
    }

    #[test]
    fn test_phase_descriptions() {
        assert_eq!(
            Phase::SkillLinks.describe("SKILL.md", "index"),
            "2. Validating wikilinks in SKILL.md files..."
        );
        assert_eq!(
            Phase::Reachability.describe("SKILL.md", "home"),
            "3. Checking skill reachability from home..."
        );
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let registry = registry();
        let documents = docs(
            &[("index", "[[ghost]]"), ("stray", "")],
            &[("gamma", "")],
        );
        let validator = Validator::new(&registry);

        let first = validator.validate(&documents, |_| {});
        let second = validator.validate(&documents, |_| {});
        assert_eq!(first, second);
        assert_eq!(first.errors.len(), 2);
        assert_eq!(first.warnings.len(), 1);
    }
}
