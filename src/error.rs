use thiserror::Error;

/// Everything that can go wrong while turning a catalog entry into a
/// registered editor type. Only `IconLoadFailed` and `RootNotFound` leave the
/// component usable, every other variant means the component was skipped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComponentError {
    #[error("component {component} does not inherit from Node")]
    NotANode { component: String },

    #[error("component {component} has no valid base type")]
    MissingBaseType { component: String },

    #[error("component {component} has no script path")]
    MissingSourcePath { component: String },

    #[error("component {component} script {path} is outside project root {project_root}")]
    PathOutsideProject {
        component: String,
        path: String,
        project_root: String,
    },

    #[error("failed to load script for component {component}: {path}")]
    ScriptLoadFailed { component: String, path: String },

    #[error("failed to load icon for component {component}: {path}")]
    IconLoadFailed { component: String, path: String },

    #[error("could not find '{marker_dir}' directory in path: {path}")]
    RootNotFound { path: String, marker_dir: String },

    #[error("component {component} is already registered")]
    DuplicateComponent { component: String },
}

impl ComponentError {
    /// Whether the affected component was left unregistered.
    pub fn skips_component(&self) -> bool {
        !matches!(
            self,
            ComponentError::IconLoadFailed { .. } | ComponentError::RootNotFound { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("error reading config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("error parsing config file: {0}")]
    Parse(#[from] serde_json::Error),
}
