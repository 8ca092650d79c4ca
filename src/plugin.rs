use godot::classes::{ClassDb, EditorPlugin, IEditorPlugin, ProjectSettings, Script, Texture2D};
use godot::prelude::*;
use godot::tools::try_load;
use log::{error, info};
use std::path::{Path, PathBuf};

use crate::catalog::ComponentCatalog;
use crate::config::{PluginConfig, CONFIG_RES_PATH};
use crate::godot_logger;
use crate::host::EditorHost;
use crate::project_root;
use crate::scanner::ComponentScanner;

// Expected layout: <project_root>/addons/godot-components/src/plugin.rs
const PLUGIN_SOURCE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/", file!());

/// Registers catalog components as custom editor types while the plugin is
/// enabled.
#[derive(GodotClass)]
#[class(tool, init, base = EditorPlugin)]
pub struct ComponentToolPlugin {
    scanner: Option<ComponentScanner<GodotEditorHost>>,
    base: Base<EditorPlugin>,
}

#[godot_api]
impl IEditorPlugin for ComponentToolPlugin {
    fn enter_tree(&mut self) {
        let config = PluginConfig::from_config_file(&globalize(CONFIG_RES_PATH));
        godot_logger::set_level(config.level_filter());

        let project_root = project_root::resolve_or_fallback(
            Path::new(PLUGIN_SOURCE_PATH),
            &config.marker_dir_name,
        );
        info!("project root: {:?}", project_root);

        let mut host = GodotEditorHost::new(self.to_gd().upcast());
        let default_icon = host.load_icon(&config.default_icon_path);
        if default_icon.is_none() {
            error!(
                "failed to load default component icon texture at: {}",
                config.default_icon_path
            );
        }

        let mut catalog = ComponentCatalog::default();
        catalog.extend_from_manifest(
            &config.components,
            &project_root,
            &config.resource_scheme,
            class_ancestry,
        );
        info!("{} component(s) in catalog", catalog.len());

        let mut scanner =
            ComponentScanner::new(project_root, &config.resource_scheme, default_icon);
        scanner.activate(&mut host, catalog.iter());
        self.scanner = Some(scanner);
    }

    fn exit_tree(&mut self) {
        if let Some(mut scanner) = self.scanner.take() {
            let mut host = GodotEditorHost::new(self.to_gd().upcast());
            let removed = scanner.deactivate(&mut host);
            info!("removed {} component(s)", removed.len());
        }
    }
}

/// [`EditorHost`] backed by the running editor.
pub struct GodotEditorHost {
    plugin: Gd<EditorPlugin>,
}

impl GodotEditorHost {
    pub fn new(plugin: Gd<EditorPlugin>) -> GodotEditorHost {
        GodotEditorHost { plugin }
    }
}

impl EditorHost for GodotEditorHost {
    type Script = Gd<Script>;
    type Icon = Gd<Texture2D>;

    fn load_script(&mut self, path: &str) -> Option<Gd<Script>> {
        try_load::<Script>(path).ok()
    }

    fn load_icon(&mut self, path: &str) -> Option<Gd<Texture2D>> {
        try_load::<Texture2D>(path).ok()
    }

    fn add_custom_type(
        &mut self,
        name: &str,
        base_type_name: &str,
        script: &Gd<Script>,
        icon: Option<&Gd<Texture2D>>,
    ) {
        match icon {
            Some(icon) => self.plugin.add_custom_type(name, base_type_name, script, icon),
            None => self.plugin.add_custom_type(
                name,
                base_type_name,
                script,
                Gd::<Texture2D>::null_arg(),
            ),
        }
    }

    fn remove_custom_type(&mut self, name: &str) {
        self.plugin.remove_custom_type(name);
    }
}

/// Expands an engine class name into its base chain, the class itself first.
/// Names the engine doesn't know stay a one-element chain.
fn class_ancestry(base: &str) -> Vec<String> {
    let class_db = ClassDb::singleton();
    let mut ancestry = vec![base.to_string()];
    let mut current = StringName::from(base);

    while class_db.class_exists(&current) {
        let parent = class_db.get_parent_class(&current).to_string();
        if parent.is_empty() {
            break;
        }
        ancestry.push(parent.clone());
        current = StringName::from(parent.as_str());
    }

    ancestry
}

fn globalize(res_path: &str) -> PathBuf {
    PathBuf::from(ProjectSettings::singleton().globalize_path(res_path).to_string())
}
