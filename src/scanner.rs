use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::catalog::CandidateType;
use crate::error::ComponentError;
use crate::host::EditorHost;
use crate::project_root;

/// Outcome of one activation pass.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub registered: Vec<String>,
    pub diagnostics: Vec<ComponentError>,
}

impl ScanReport {
    pub fn skipped(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.skips_component()).count()
    }
}

/// Registers catalog entries with the editor and remembers what it
/// registered so every registration gets exactly one matching removal.
pub struct ComponentScanner<H: EditorHost> {
    project_root: PathBuf,
    resource_scheme: String,
    default_icon: Option<H::Icon>,
    registered: Vec<String>,
}

impl<H: EditorHost> ComponentScanner<H> {
    pub fn new(
        project_root: PathBuf,
        resource_scheme: &str,
        default_icon: Option<H::Icon>,
    ) -> Self {
        ComponentScanner {
            project_root,
            resource_scheme: resource_scheme.to_string(),
            default_icon,
            registered: Vec::new(),
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn registered(&self) -> &[String] {
        &self.registered
    }

    /// Registers every valid candidate. A bad candidate is reported and
    /// skipped, it never stops the rest of the scan.
    pub fn activate<'a, I>(&mut self, host: &mut H, candidates: I) -> ScanReport
    where
        I: IntoIterator<Item = &'a CandidateType>,
    {
        let mut report = ScanReport::default();

        for candidate in candidates {
            match self.register(host, candidate, &mut report.diagnostics) {
                Ok(()) => {
                    info!("registered component {}", candidate.name());
                    report.registered.push(candidate.name().to_string());
                }
                Err(err) => {
                    error!("{}", err);
                    report.diagnostics.push(err);
                }
            }
        }

        info!(
            "component scan done: {} registered, {} skipped",
            report.registered.len(),
            report.skipped()
        );
        report
    }

    /// Removes everything registered so far. Returns the removed names; a
    /// second call finds nothing left to remove.
    pub fn deactivate(&mut self, host: &mut H) -> Vec<String> {
        let names = std::mem::take(&mut self.registered);
        for name in &names {
            debug!("removing component {}", name);
            host.remove_custom_type(name);
        }
        names
    }

    /// Removes a single registered type. Unknown names are ignored.
    pub fn deregister(&mut self, host: &mut H, name: &str) -> bool {
        match self.registered.iter().position(|registered| registered == name) {
            Some(index) => {
                self.registered.remove(index);
                host.remove_custom_type(name);
                true
            }
            None => {
                debug!("deregister: {} is not registered, ignoring", name);
                false
            }
        }
    }

    fn register(
        &mut self,
        host: &mut H,
        candidate: &CandidateType,
        diagnostics: &mut Vec<ComponentError>,
    ) -> Result<(), ComponentError> {
        let component = candidate.name().to_string();

        if self.registered.iter().any(|name| name == &component) {
            return Err(ComponentError::DuplicateComponent { component });
        }

        if !candidate.is_node() {
            return Err(ComponentError::NotANode { component });
        }

        let base_type_name = candidate
            .base_type_name()
            .ok_or_else(|| ComponentError::MissingBaseType {
                component: component.clone(),
            })?;

        let custom_icon = match candidate.marker().icon_path() {
            Some(icon_path) => {
                let icon = host.load_icon(icon_path);
                if icon.is_none() {
                    let err = ComponentError::IconLoadFailed {
                        component: component.clone(),
                        path: icon_path.to_string(),
                    };
                    warn!("{}, using default icon", err);
                    diagnostics.push(err);
                }
                icon
            }
            None => None,
        };
        let icon = custom_icon.as_ref().or(self.default_icon.as_ref());

        let resource_path = self.resource_path(candidate)?;

        let script = host
            .load_script(&resource_path)
            .ok_or_else(|| ComponentError::ScriptLoadFailed {
                component: component.clone(),
                path: resource_path.clone(),
            })?;

        debug!(
            "add_custom_type({}, {}, {})",
            component, base_type_name, resource_path
        );
        host.add_custom_type(&component, base_type_name, &script, icon);
        self.registered.push(component);

        Ok(())
    }

    fn resource_path(&self, candidate: &CandidateType) -> Result<String, ComponentError> {
        let source_path = candidate.marker().source_path();
        if source_path.trim().is_empty() {
            return Err(ComponentError::MissingSourcePath {
                component: candidate.name().to_string(),
            });
        }

        project_root::to_resource_path(source_path, &self.project_root, &self.resource_scheme)
            .ok_or_else(|| ComponentError::PathOutsideProject {
                component: candidate.name().to_string(),
                path: source_path.to_string(),
                project_root: self.project_root.display().to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::{Registration, RecordingHost};
    use crate::marker::ComponentMarker;

    const DEFAULT_ICON: &str = "res://addons/godot-components/component_white.png";

    fn scanner() -> ComponentScanner<RecordingHost> {
        ComponentScanner::new(PathBuf::from("/proj"), "res://", Some(DEFAULT_ICON.to_string()))
    }

    fn node(name: &str, source: &str, icon: Option<&str>) -> CandidateType {
        CandidateType::new(name, ["Node3D", "Node"], ComponentMarker::new(source, icon))
    }

    #[test]
    fn registers_valid_component_with_default_icon() {
        let mut host = RecordingHost::default().with_script("res://samples/Scripts/Foo.cs");
        let mut scanner = scanner();
        let candidates = [node("Foo", "/proj/samples/Scripts/Foo.cs", None)];

        let report = scanner.activate(&mut host, &candidates);

        assert_eq!(report.registered, ["Foo"]);
        assert!(report.diagnostics.is_empty());
        assert_eq!(
            host.added,
            [Registration {
                name: "Foo".to_string(),
                base_type_name: "Node3D".to_string(),
                script: "res://samples/Scripts/Foo.cs".to_string(),
                icon: Some(DEFAULT_ICON.to_string()),
            }]
        );
        assert_eq!(scanner.registered(), ["Foo"]);
    }

    #[test]
    fn custom_icon_is_used_when_it_loads() {
        let mut host = RecordingHost::default()
            .with_script("res://Foo.gd")
            .with_icon("res://icons/foo.svg");
        let mut scanner = scanner();
        let candidates = [node("Foo", "/proj/Foo.gd", Some("res://icons/foo.svg"))];

        let report = scanner.activate(&mut host, &candidates);

        assert!(report.diagnostics.is_empty());
        assert_eq!(host.added[0].icon.as_deref(), Some("res://icons/foo.svg"));
    }

    #[test]
    fn missing_icon_falls_back_to_default() {
        let mut host = RecordingHost::default().with_script("res://Foo.gd");
        let mut scanner = scanner();
        let candidates = [node("Foo", "/proj/Foo.gd", Some("res://icons/missing.svg"))];

        let report = scanner.activate(&mut host, &candidates);

        assert_eq!(report.registered, ["Foo"]);
        assert_eq!(
            report.diagnostics,
            [ComponentError::IconLoadFailed {
                component: "Foo".to_string(),
                path: "res://icons/missing.svg".to_string(),
            }]
        );
        assert_eq!(report.skipped(), 0);
        assert_eq!(host.added[0].icon.as_deref(), Some(DEFAULT_ICON));
    }

    #[test]
    fn missing_default_icon_still_registers() {
        let mut host = RecordingHost::default().with_script("res://Foo.gd");
        let mut scanner: ComponentScanner<RecordingHost> =
            ComponentScanner::new(PathBuf::from("/proj"), "res://", None);
        let candidates = [node("Foo", "/proj/Foo.gd", None)];

        let report = scanner.activate(&mut host, &candidates);

        assert_eq!(report.registered, ["Foo"]);
        assert_eq!(host.added[0].icon, None);
    }

    #[test]
    fn non_node_is_skipped() {
        let mut host = RecordingHost::default().with_script("res://Stats.gd");
        let mut scanner = scanner();
        let candidates = [CandidateType::new(
            "Stats",
            ["Resource", "RefCounted", "Object"],
            ComponentMarker::new("/proj/Stats.gd", None::<&str>),
        )];

        let report = scanner.activate(&mut host, &candidates);

        assert!(report.registered.is_empty());
        assert_eq!(
            report.diagnostics,
            [ComponentError::NotANode {
                component: "Stats".to_string()
            }]
        );
        assert!(host.added.is_empty());
        assert!(scanner.registered().is_empty());
    }

    #[test]
    fn blank_base_name_is_skipped() {
        let mut host = RecordingHost::default().with_script("res://Foo.gd");
        let mut scanner = scanner();
        let candidates = [CandidateType::new(
            "Foo",
            ["", "Node"],
            ComponentMarker::new("/proj/Foo.gd", None::<&str>),
        )];

        let report = scanner.activate(&mut host, &candidates);

        assert!(matches!(
            report.diagnostics.as_slice(),
            [ComponentError::MissingBaseType { .. }]
        ));
        assert!(host.added.is_empty());
    }

    #[test]
    fn path_outside_project_makes_no_registry_call() {
        let mut host = RecordingHost::default().with_script("res://Foo.cs");
        let mut scanner = scanner();
        let candidates = [node("Foo", "/other/Foo.cs", None)];

        let report = scanner.activate(&mut host, &candidates);

        assert_eq!(
            report.diagnostics,
            [ComponentError::PathOutsideProject {
                component: "Foo".to_string(),
                path: "/other/Foo.cs".to_string(),
                project_root: "/proj".to_string(),
            }]
        );
        assert!(host.added.is_empty());
    }

    #[test]
    fn empty_source_path_is_skipped() {
        let mut host = RecordingHost::default();
        let mut scanner = scanner();
        let candidates = [node("Foo", "", None)];

        let report = scanner.activate(&mut host, &candidates);

        assert!(matches!(
            report.diagnostics.as_slice(),
            [ComponentError::MissingSourcePath { .. }]
        ));
    }

    #[test]
    fn unloadable_script_is_skipped() {
        let mut host = RecordingHost::default();
        let mut scanner = scanner();
        let candidates = [node("Foo", "/proj/Foo.gd", None)];

        let report = scanner.activate(&mut host, &candidates);

        assert_eq!(
            report.diagnostics,
            [ComponentError::ScriptLoadFailed {
                component: "Foo".to_string(),
                path: "res://Foo.gd".to_string(),
            }]
        );
        assert!(host.added.is_empty());
    }

    #[test]
    fn bad_candidate_does_not_stop_the_scan() {
        let mut host = RecordingHost::default()
            .with_script("res://A.gd")
            .with_script("res://C.gd");
        let mut scanner = scanner();
        let candidates = [
            node("A", "/proj/A.gd", None),
            node("B", "/elsewhere/B.gd", None),
            node("C", "/proj/C.gd", None),
        ];

        let report = scanner.activate(&mut host, &candidates);

        assert_eq!(report.registered, ["A", "C"]);
        assert_eq!(report.skipped(), 1);
        assert_eq!(host.added_names(), ["A", "C"]);
    }

    #[test]
    fn duplicate_name_registers_once() {
        let mut host = RecordingHost::default().with_script("res://A.gd");
        let mut scanner = scanner();
        let candidates = [node("A", "/proj/A.gd", None), node("A", "/proj/A.gd", None)];

        let report = scanner.activate(&mut host, &candidates);

        assert_eq!(report.registered, ["A"]);
        assert!(matches!(
            report.diagnostics.as_slice(),
            [ComponentError::DuplicateComponent { .. }]
        ));
        assert_eq!(host.added.len(), 1);
    }

    #[test]
    fn deactivate_removes_exactly_what_was_registered() {
        let mut host = RecordingHost::default()
            .with_script("res://A.gd")
            .with_script("res://C.gd");
        let mut scanner = scanner();
        let candidates = [
            node("A", "/proj/A.gd", None),
            node("B", "/proj/B.gd", None),
            node("C", "/proj/C.gd", None),
        ];
        scanner.activate(&mut host, &candidates);

        let removed = scanner.deactivate(&mut host);

        assert_eq!(removed, ["A", "C"]);
        assert_eq!(host.removed, ["A", "C"]);
        assert!(scanner.registered().is_empty());
    }

    #[test]
    fn second_deactivate_is_a_no_op() {
        let mut host = RecordingHost::default().with_script("res://A.gd");
        let mut scanner = scanner();
        scanner.activate(&mut host, &[node("A", "/proj/A.gd", None)]);

        scanner.deactivate(&mut host);
        let removed = scanner.deactivate(&mut host);

        assert!(removed.is_empty());
        assert_eq!(host.removed, ["A"]);
    }

    #[test]
    fn deregister_unknown_name_is_ignored() {
        let mut host = RecordingHost::default().with_script("res://A.gd");
        let mut scanner = scanner();
        scanner.activate(&mut host, &[node("A", "/proj/A.gd", None)]);

        assert!(!scanner.deregister(&mut host, "Nope"));
        assert!(scanner.deregister(&mut host, "A"));
        assert!(!scanner.deregister(&mut host, "A"));
        assert_eq!(host.removed, ["A"]);
    }
}
