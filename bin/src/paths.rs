//! Locating the `.rpe/` configuration directory

use std::path::{Path, PathBuf};

pub struct RpePaths {
    pub rpe_dir: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
}

/// Find the closest `.rpe/` directory at or above `start_dir`, falling back to
/// `<config_dir>/rpe/`.
pub fn discover(start_dir: &Path) -> RpePaths {
    let project = walk_ancestors(start_dir);
    if let Some(dir) = &project {
        tracing::info!("found project .rpe directory: {}", dir.display());
    }

    match project.or_else(system_config_dir) {
        Some(dir) => paths_from_dir(&dir),
        None => {
            tracing::debug!("no .rpe directory found");
            RpePaths {
                rpe_dir: None,
                config_path: None,
            }
        },
    }
}

fn walk_ancestors(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(".rpe"))
        .find(|candidate| candidate.is_dir())
}

fn system_config_dir() -> Option<PathBuf> {
    let dir = dirs::config_dir()?.join("rpe");
    if dir.is_dir() {
        tracing::info!("using system config directory: {}", dir.display());
        Some(dir)
    } else {
        None
    }
}

fn paths_from_dir(dir: &Path) -> RpePaths {
    let config = dir.join("config.toml");
    RpePaths {
        rpe_dir: Some(dir.to_path_buf()),
        config_path: config.is_file().then_some(config),
    }
}
