use log::debug;
use std::path::Path;

use crate::config::ComponentEntry;
use crate::marker::ComponentMarker;

/// Name of the engine's scene-graph node class.
pub const NODE_BASE: &str = "Node";

/// A component type waiting to be validated and registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateType {
    name: String,
    ancestry: Vec<String>,
    marker: ComponentMarker,
}

impl CandidateType {
    /// `ancestry` lists the base chain, immediate base first.
    pub fn new<N, A, S>(name: N, ancestry: A, marker: ComponentMarker) -> CandidateType
    where
        N: Into<String>,
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CandidateType {
            name: name.into(),
            ancestry: ancestry.into_iter().map(Into::into).collect(),
            marker,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ancestry(&self) -> &[String] {
        &self.ancestry
    }

    pub fn base_type_name(&self) -> Option<&str> {
        self.ancestry
            .first()
            .map(String::as_str)
            .filter(|name| !name.trim().is_empty())
    }

    pub fn is_node(&self) -> bool {
        self.ancestry.iter().any(|base| base == NODE_BASE)
    }

    pub fn marker(&self) -> &ComponentMarker {
        &self.marker
    }
}

/// The set of component types known to this activation, populated from the
/// config's `components` list.
#[derive(Debug, Default, Clone)]
pub struct ComponentCatalog {
    entries: Vec<CandidateType>,
}

impl ComponentCatalog {
    pub fn push(&mut self, candidate: CandidateType) {
        debug!("catalog: {} ({:?})", candidate.name(), candidate.ancestry());
        self.entries.push(candidate);
    }

    /// Adds config-listed components. `ancestry_of` expands a declared base
    /// class name into its full chain, base first.
    pub fn extend_from_manifest<F>(
        &mut self,
        entries: &[ComponentEntry],
        project_root: &Path,
        resource_scheme: &str,
        ancestry_of: F,
    ) where
        F: Fn(&str) -> Vec<String>,
    {
        for entry in entries {
            let source_path =
                absolute_source_path(&entry.script_path, project_root, resource_scheme);
            let marker = ComponentMarker::new(source_path, entry.icon_path.as_deref());
            self.push(CandidateType::new(
                entry.name.as_str(),
                ancestry_of(&entry.base),
                marker,
            ));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateType> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Manifest entries may name their script by resource path; the scanner works
// on absolute paths, so map those back under the project root.
fn absolute_source_path(script_path: &str, project_root: &Path, resource_scheme: &str) -> String {
    match script_path.strip_prefix(resource_scheme) {
        Some(relative) if !resource_scheme.is_empty() => {
            project_root.join(relative).to_string_lossy().into_owned()
        }
        _ => script_path.to_string(),
    }
}
