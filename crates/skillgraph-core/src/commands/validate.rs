//! Registry validation command

use crate::error::Result;
use crate::registry::Registry;
use crate::validation::{Issue, Phase, ValidationReport, Validator};

/// Validate `registry`, passing each progress line to `on_line` as it
/// happens.
pub fn run(registry: &Registry, mut on_line: impl FnMut(String)) -> Result<ValidationReport> {
    let documents = registry.load()?;
    on_line(format_header(
        documents.graph_nodes.len(),
        documents.skills.len(),
    ));

    let descriptor = registry.config().descriptor.as_str();
    let root = registry.root_node();
    let mut first = true;
    let report = Validator::new(registry).validate(&documents, |phase: Phase| {
        let line = phase.describe(descriptor, root);
        if first {
            first = false;
            on_line(format!("\n{}", line));
        } else {
            on_line(line);
        }
    });

    Ok(report)
}

pub fn format_header(graph_nodes: usize, skills: usize) -> String {
    format!("Found {} graph nodes and {} skills", graph_nodes, skills)
}

/// Warning and error listings, or the success summary
pub fn format_summary(report: &ValidationReport, root: &str) -> String {
    let mut output = String::new();

    if !report.aborted {
        output.push('\n');
    }

    if !report.warnings.is_empty() {
        push_issues(&mut output, "warning", &report.warnings);
        output.push('\n');
    }

    if report.aborted {
        // The early exit prints its count without a colon
        output.push_str(&format!("\n{} error(s)\n", report.errors.len()));
        push_issue_lines(&mut output, &report.errors);
        return output;
    }

    if !report.errors.is_empty() {
        push_issues(&mut output, "error", &report.errors);
        return output;
    }

    output.push_str("Graph validation passed!\n");
    output.push_str(&format!("  - {} graph nodes\n", report.graph_nodes));
    output.push_str(&format!("  - {} skills\n", report.skills));
    output.push_str(&format!(
        "  - {} nodes/skills reachable from {}\n",
        report.reachable.len(),
        root
    ));
    output
}

fn push_issues(output: &mut String, noun: &str, issues: &[Issue]) {
    output.push_str(&format!("{} {}(s):\n", issues.len(), noun));
    push_issue_lines(output, issues);
}

fn push_issue_lines(output: &mut String, issues: &[Issue]) {
    for issue in issues {
        output.push_str(&format!("  {}\n", issue));
    }
}
