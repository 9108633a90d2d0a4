//! Build script to copy config.ini to the output directory.
//! This keeps an editable template next to the executable.

use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=config.ini");

    let out_dir = env::var("OUT_DIR").unwrap_or_default();

    // OUT_DIR is typically target/{debug,release}/build/<pkg>/out
    let out_path = Path::new(&out_dir);
    if let Some(target_profile_dir) = out_path.parent().and_then(|p| p.parent()).and_then(|p| p.parent()) {
        let config_src = Path::new("config.ini");
        let config_dst = target_profile_dir.join("config.ini");

        if config_src.exists() {
            if let Err(e) = fs::copy(config_src, &config_dst) {
                println!("cargo:warning=Failed to copy config.ini to output directory: {}", e);
            }
        }
    }
}
