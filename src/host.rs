/// The slice of the editor the scanner talks to: resource loading and the
/// custom type registry. The editor plugin implements it over
/// `EditorPlugin`, tests use [`testing::RecordingHost`].
pub trait EditorHost {
    type Script;
    type Icon;

    fn load_script(&mut self, path: &str) -> Option<Self::Script>;

    fn load_icon(&mut self, path: &str) -> Option<Self::Icon>;

    fn add_custom_type(
        &mut self,
        name: &str,
        base_type_name: &str,
        script: &Self::Script,
        icon: Option<&Self::Icon>,
    );

    fn remove_custom_type(&mut self, name: &str);
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashSet;

    use super::EditorHost;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Registration {
        pub name: String,
        pub base_type_name: String,
        pub script: String,
        pub icon: Option<String>,
    }

    /// In-memory host. Resources "exist" when their path was added with
    /// [`RecordingHost::with_script`] or [`RecordingHost::with_icon`].
    #[derive(Default)]
    pub struct RecordingHost {
        scripts: HashSet<String>,
        icons: HashSet<String>,
        pub added: Vec<Registration>,
        pub removed: Vec<String>,
    }

    impl RecordingHost {
        pub fn with_script(mut self, path: &str) -> Self {
            self.scripts.insert(path.to_string());
            self
        }

        pub fn with_icon(mut self, path: &str) -> Self {
            self.icons.insert(path.to_string());
            self
        }

        pub fn added_names(&self) -> Vec<&str> {
            self.added.iter().map(|r| r.name.as_str()).collect()
        }
    }

    impl EditorHost for RecordingHost {
        type Script = String;
        type Icon = String;

        fn load_script(&mut self, path: &str) -> Option<String> {
            self.scripts.get(path).cloned()
        }

        fn load_icon(&mut self, path: &str) -> Option<String> {
            self.icons.get(path).cloned()
        }

        fn add_custom_type(
            &mut self,
            name: &str,
            base_type_name: &str,
            script: &String,
            icon: Option<&String>,
        ) {
            self.added.push(Registration {
                name: name.to_string(),
                base_type_name: base_type_name.to_string(),
                script: script.clone(),
                icon: icon.cloned(),
            });
        }

        fn remove_custom_type(&mut self, name: &str) {
            self.removed.push(name.to_string());
        }
    }
}
