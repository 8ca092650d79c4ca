use std::env;
use std::path::Path;
extern crate fs_extra;
use fs_extra::copy_items;
use std::fs;

// Where the addon lives inside a Godot project checkout
const ADDON_DIR: &str = "addons/godot-components";
const EXTENSION_FILE: &str = "godot-components.gdextension";

// Files that should be copied from target into the addon's bin directory
const FILES: &[&str] = &["libgodot_components.so"];

fn main() {
    let out_dir = env::var("CRATE_OUT_DIR").unwrap();
    let profile = env::var("CRATE_PROFILE").unwrap();

    let addon_dir = match env::var("GODOT_PROJECT") {
        Ok(project) => Path::new(&project).join(ADDON_DIR),
        Err(_) => {
            eprintln!("GODOT_PROJECT not provided so installing next to the crate");
            Path::new(".").to_path_buf()
        }
    };

    copy_libraries(&out_dir, &addon_dir);
    create_gdextension(&addon_dir, &profile);
}

fn copy_libraries(out_dir: &str, addon_dir: &Path) {
    println!("copy_libraries");
    let options = fs_extra::dir::CopyOptions {
        overwrite: true,
        ..Default::default()
    };
    let bin_dir = addon_dir.join("bin");
    fs::create_dir_all(&bin_dir).expect("failed to create bin dir");

    let from_paths: Vec<_> = FILES.iter().map(|file| Path::new(out_dir).join(file)).collect();
    copy_items(&from_paths, bin_dir, &options).expect("copy_libraries copy failed");
}

fn create_gdextension(addon_dir: &Path, profile: &str) {
    println!("create_gdextension");
    let template_str =
        fs::read_to_string("gdextension.template").expect("create_gdextension read template error");

    let file_str = template_str
        .replace("%addon_dir%", ADDON_DIR)
        .replace("%library%", FILES[0])
        .replace("%profile%", profile);
    fs::write(addon_dir.join(EXTENSION_FILE), file_str).expect("create_gdextension write error");
}
