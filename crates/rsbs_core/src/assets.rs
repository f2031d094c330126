//! Asset path conventions for the two build targets.
//!
//! The console build reads from the DVD drive (`D:\res\rot.bmp`); the desktop
//! build reads `res/rot.bmp` next to the working directory, or under an
//! explicit root.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::entity::{CircleColor, Layer};

const CONSOLE_RESOURCE_DIR: &str = "D:\\res\\";
const DESKTOP_RESOURCE_DIR: &str = "res";
const IMAGE_EXTENSION: &str = "bmp";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetLayout {
    Console,
    #[default]
    Desktop,
}

pub fn asset_stem(layer: Layer) -> &'static str {
    match layer {
        Layer::Background => "bg",
        Layer::Circle(CircleColor::Red) => "rot",
        Layer::Circle(CircleColor::Blue) => "blau",
        Layer::Circle(CircleColor::Green) => "gruen",
    }
}

impl AssetLayout {
    /// Resolve a layer to its image path. `root` only applies to the desktop
    /// layout; console paths are absolute.
    pub fn path_for(self, layer: Layer, root: Option<&Path>) -> PathBuf {
        let file_name = format!("{}.{}", asset_stem(layer), IMAGE_EXTENSION);
        match self {
            Self::Console => PathBuf::from(format!("{CONSOLE_RESOURCE_DIR}{file_name}")),
            Self::Desktop => root
                .unwrap_or_else(|| Path::new("."))
                .join(DESKTOP_RESOURCE_DIR)
                .join(file_name),
        }
    }

    pub fn all_paths(self, root: Option<&Path>) -> Vec<(Layer, PathBuf)> {
        Layer::ALL
            .iter()
            .map(|&layer| (layer, self.path_for(layer, root)))
            .collect()
    }
}
