use std::path::Path;

use quotabar_core::config;

/// Creates `~/.config/quotabar/config.toml` with every option commented.
/// An existing file is left untouched.
pub fn execute() {
    let Some(dir) = config::config_dir() else {
        eprintln!("Error: could not determine home directory.");
        std::process::exit(1);
    };

    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Error: could not create {}: {e}", dir.display());
        std::process::exit(1);
    }

    if !write_if_missing(
        &dir.join("config.toml"),
        &config::template::generate_config(),
    ) {
        std::process::exit(1);
    }

    println!("\nEdit config.toml to pick browsers, Waybar templates and logging.");
}

/// Writes content to a file only if it doesn't already exist. Returns
/// `false` if writing failed.
fn write_if_missing(path: &Path, content: &str) -> bool {
    if path.exists() {
        println!("Already exists: {}", path.display());
        return true;
    }

    match std::fs::write(path, content) {
        Ok(()) => {
            println!("Created {}", path.display());
            true
        }
        Err(e) => {
            eprintln!("Error: could not write {}: {e}", path.display());
            false
        }
    }
}
