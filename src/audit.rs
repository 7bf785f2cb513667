//! Audit Module
//!
//! Checks action attributes in template files without a running page. Each
//! expression is parsed the same way the resolver would parse it: call syntax
//! first, then every argument literal. When a set of known callable paths is
//! supplied, targets are checked against it as well. Live text is never evaluated.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::DirectiveConfig;
use crate::dom::{self, Document};
use crate::error::ActionError;
use crate::expr::ActionExpr;

// ═══════════════════════════════════════════════════════════════════════════════
// REPORT TYPES
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionFinding {
    pub file: String,
    pub tag: String,
    pub element_id: Option<String>,
    pub action: String,
    pub code: String,
    pub message: String,
    pub hint: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub files_scanned: usize,
    pub actions_checked: usize,
    pub findings: Vec<ActionFinding>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    fn merge(&mut self, other: AuditReport) {
        self.files_scanned += other.files_scanned;
        self.actions_checked += other.actions_checked;
        self.findings.extend(other.findings);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// AUDIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Audit every action attribute in one markup source.
pub fn audit_markup(
    html: &str,
    file: &str,
    config: &DirectiveConfig,
    known_paths: Option<&BTreeSet<String>>,
) -> AuditReport {
    let document = Document::parse(html);
    let mut report = AuditReport {
        files_scanned: 1,
        ..Default::default()
    };

    for element in dom::elements(&document.root()) {
        let Some(raw) = dom::attribute(&element, &config.action_attribute) else {
            continue;
        };
        let action = raw.trim();
        if action.is_empty() {
            continue;
        }

        report.actions_checked += 1;
        if let Err(e) = check_action(action, config, known_paths) {
            report.findings.push(ActionFinding {
                file: file.to_string(),
                tag: dom::tag_name(&element).unwrap_or_default().to_string(),
                element_id: dom::attribute(&element, "id"),
                action: action.to_string(),
                code: e.code().to_string(),
                message: e.to_string(),
                hint: e.hint().to_string(),
            });
        }
    }

    report
}

fn check_action(
    action: &str,
    config: &DirectiveConfig,
    known_paths: Option<&BTreeSet<String>>,
) -> Result<(), ActionError> {
    let expr = ActionExpr::parse(action, &config.root_namespace)?;

    if let Some(known) = known_paths {
        let path = expr.path.to_string();
        if !known.contains(&path) {
            return Err(ActionError::UnresolvedPath { path });
        }
    }

    expr.arguments()?;
    Ok(())
}

/// Audit all `.html`/`.htm` files below `dir` in parallel.
pub fn audit_directory(
    dir: &Path,
    config: &DirectiveConfig,
    known_paths: Option<&BTreeSet<String>>,
) -> AuditReport {
    let files = find_markup_files(dir);

    let reports: Vec<AuditReport> = files
        .par_iter()
        .filter_map(|path| match fs::read_to_string(path) {
            Ok(source) => Some(audit_markup(
                &source,
                &path.to_string_lossy(),
                config,
                known_paths,
            )),
            Err(e) => {
                log::warn!("[directive] skipping unreadable template {:?}: {}", path, e);
                None
            }
        })
        .collect();

    let mut report = AuditReport::default();
    for r in reports {
        report.merge(r);
    }
    report
}

fn find_markup_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .map(|ext| ext == "html" || ext == "htm")
                    .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}
