//! Built-in style maps and icon tables embedded at compile time.
//!
//! A project can override any of these by dropping a file of the same name
//! under `.kitbag/styles/` or `.kitbag/icons/`; project files win over the
//! embedded defaults.

use crate::error::{KitbagError, Result};
use crate::transform::icons::IconLibrary;
use crate::transform::style::StyleMap;
use include_dir::{include_dir, Dir};
use std::fs;
use std::path::Path;

/// Embedded assets directory.
static ASSETS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// Load the style map for a visual style.
///
/// Resolution order: `.kitbag/styles/<style>.css` in the project, then the
/// embedded defaults.
pub fn load_style_map(project_root: Option<&Path>, style: &str) -> Result<StyleMap> {
    let file_name = format!("{}.css", style);

    if let Some(root) = project_root {
        let local = root.join(".kitbag/styles").join(&file_name);
        if local.is_file() {
            let content = fs::read_to_string(&local)?;
            return StyleMap::parse(&local.to_string_lossy(), &content);
        }
    }

    let embedded_path = format!("styles/{}", file_name);
    let file = ASSETS_DIR
        .get_file(&embedded_path)
        .ok_or_else(|| KitbagError::ConfigNotFound {
            path: embedded_path.clone().into(),
        })?;
    let content = file
        .contents_utf8()
        .ok_or_else(|| KitbagError::ConfigParseError {
            path: embedded_path.clone().into(),
            message: "Invalid UTF-8".to_string(),
        })?;

    StyleMap::parse(&embedded_path, content)
}

/// Load the icon mapping table for an icon library.
///
/// Resolution order: `.kitbag/icons/<library>.json` in the project, then
/// the embedded defaults.
pub fn load_icon_library(project_root: Option<&Path>, library: &str) -> Result<IconLibrary> {
    let file_name = format!("{}.json", library);

    if let Some(root) = project_root {
        let local = root.join(".kitbag/icons").join(&file_name);
        if local.is_file() {
            let content = fs::read_to_string(&local)?;
            return IconLibrary::parse(&local.to_string_lossy(), &content);
        }
    }

    let embedded_path = format!("icons/{}", file_name);
    let file = ASSETS_DIR
        .get_file(&embedded_path)
        .ok_or_else(|| KitbagError::ConfigNotFound {
            path: embedded_path.clone().into(),
        })?;
    let content = file
        .contents_utf8()
        .ok_or_else(|| KitbagError::ConfigParseError {
            path: embedded_path.clone().into(),
            message: "Invalid UTF-8".to_string(),
        })?;

    IconLibrary::parse(&embedded_path, content)
}

/// Names of the embedded visual styles.
pub fn builtin_style_names() -> Vec<&'static str> {
    asset_stems("styles", "css")
}

/// Names of the embedded icon libraries.
pub fn builtin_icon_libraries() -> Vec<&'static str> {
    asset_stems("icons", "json")
}

fn asset_stems(dir: &str, extension: &str) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = ASSETS_DIR
        .get_dir(dir)
        .map(|d| {
            d.files()
                .filter(|f| f.path().extension().map(|e| e == extension).unwrap_or(false))
                .filter_map(|f| f.path().file_stem().and_then(|s| s.to_str()))
                .collect()
        })
        .unwrap_or_default();
    names.sort_unstable();
    names
}
