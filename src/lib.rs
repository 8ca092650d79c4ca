use godot::prelude::*;

pub mod catalog;
pub mod config;
pub mod error;
mod godot_logger;
pub mod host;
pub mod marker;
pub mod node_ext;
mod plugin;
pub mod project_root;
pub mod scanner;

struct GodotComponents;

#[gdextension]
unsafe impl ExtensionLibrary for GodotComponents {
    fn on_level_init(level: InitLevel) {
        if level == InitLevel::Scene {
            godot_logger::setup_logging();
        }
    }
}
