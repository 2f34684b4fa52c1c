//! Locating an Age of Empires II: Definitive Edition install.
//!
//! The game only ships for Windows; on Linux it runs under Proton from the
//! regular Steam library, so the install layout is the same everywhere and
//! only the library root differs.

use std::path::{Path, PathBuf};

/// File name the game loads a data mod's dat override from.
pub const MOD_DAT_FILE_NAME: &str = "empires2_x2_p1.dat";

/// Environment variable that overrides install detection.
pub const GAME_PATH_ENV: &str = "AOE2DE_PATH";

/// Location of the dat file inside an installation.
const DAT_SUBPATH: [&str; 3] = ["resources", "_common", "dat"];

const INSTALL_DIR: &str = "AoE2DE";

/// Steam library roots relative to the home directory (Linux native,
/// Linux Flatpak, macOS).
const HOME_STEAM_ROOTS: [&str; 3] = [
    ".local/share/Steam",
    ".var/app/com.valvesoftware.Steam/.local/share/Steam",
    "Library/Application Support/Steam",
];

const WINDOWS_STEAM_ROOT: &str = r"C:\Program Files (x86)\Steam";

/// Detects the Age of Empires II: Definitive Edition installation path.
///
/// `AOE2DE_PATH` wins when set. Otherwise the default Steam libraries are
/// searched. A directory only counts as an install if it holds the stock dat.
pub fn detect_game_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(GAME_PATH_ENV).map(PathBuf::from) {
        if is_install(&path) {
            return Some(path);
        }
        log::warn!("{} is set to {:?}, which has no {}", GAME_PATH_ENV, path, MOD_DAT_FILE_NAME);
    }
    find_install(&steam_roots(dirs::home_dir().as_deref()))
}

/// Candidate Steam library roots, most likely first.
fn steam_roots(home: Option<&Path>) -> Vec<PathBuf> {
    let mut roots = vec![PathBuf::from(WINDOWS_STEAM_ROOT)];
    if let Some(home) = home {
        roots.extend(HOME_STEAM_ROOTS.iter().map(|root| home.join(root)));
    }
    roots
}

/// First library under `roots` with an AoE2DE install.
fn find_install(roots: &[PathBuf]) -> Option<PathBuf> {
    roots
        .iter()
        .map(|root| root.join("steamapps").join("common").join(INSTALL_DIR))
        .find(|path| is_install(path))
}

fn is_install(path: &Path) -> bool {
    default_dat_path(path).is_file()
}

/// The stock dat file of an installation.
pub fn default_dat_path(game_path: &Path) -> PathBuf {
    DAT_SUBPATH
        .iter()
        .fold(game_path.to_path_buf(), |p, part| p.join(part))
        .join(MOD_DAT_FILE_NAME)
}
