//! Component marker metadata.
//!
//! A marker ties a component type to the script file that implements it and,
//! optionally, to a custom editor icon. Markers are built from the
//! `components` list of the plugin config.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentMarker {
    source_path: String,
    icon_path: Option<String>,
}

impl ComponentMarker {
    pub fn new<S, I>(source_path: S, icon_path: Option<I>) -> ComponentMarker
    where
        S: Into<String>,
        I: Into<String>,
    {
        ComponentMarker {
            source_path: source_path.into(),
            icon_path: icon_path
                .map(Into::into)
                .filter(|path: &String| !path.trim().is_empty()),
        }
    }

    /// Absolute path of the script implementing the component.
    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    pub fn icon_path(&self) -> Option<&str> {
        self.icon_path.as_deref()
    }
}
