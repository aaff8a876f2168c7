use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub const SPLASH_FILE: &str = "splash.txt";
pub const GAME_OVER_FILE: &str = "game_over.txt";

#[derive(Debug, Error)]
#[error("could not read asset {}", .path.display())]
pub struct AssetError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

#[derive(Clone, Debug, Default)]
pub struct Assets {
    pub splash: String,
    pub game_over: String,
}

impl Assets {
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, AssetError> {
        let dir = dir.as_ref();
        Ok(Assets {
            splash: load_asset(&dir.join(SPLASH_FILE))?,
            game_over: load_asset(&dir.join(GAME_OVER_FILE))?,
        })
    }
}

fn load_asset(path: &Path) -> Result<String, AssetError> {
    fs::read_to_string(path).map_err(|source| AssetError { path: path.to_path_buf(), source })
}
