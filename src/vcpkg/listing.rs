//! Parsing of `vcpkg list` output

use std::collections::BTreeMap;

use serde::Serialize;

/// One `name:triplet version` row of `vcpkg list`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct InstalledVariant {
    pub triplet: String,
    pub version: String,
}

/// Installed variants keyed by package name
pub type InstalledPackages = BTreeMap<String, Vec<InstalledVariant>>;

/// Parse `vcpkg list` output.
///
/// Rows look like `sdl2:x64-windows    2.30.0    Simple DirectMedia Layer...`.
/// Feature rows (`sdl2[vulkan]:x64-windows`) and anything malformed are skipped.
pub fn parse_list_output(output: &str) -> InstalledPackages {
    let mut packages = InstalledPackages::new();

    for line in output.lines() {
        let mut fields = line.split_whitespace();
        let (Some(name_triplet), Some(version)) = (fields.next(), fields.next()) else {
            continue;
        };
        let Some((name, triplet)) = name_triplet.split_once(':') else {
            continue;
        };
        if name.is_empty() || triplet.is_empty() || name.contains('[') {
            continue;
        }

        let variant = InstalledVariant {
            triplet: triplet.to_string(),
            version: version.to_string(),
        };
        let variants = packages.entry(name.to_string()).or_default();
        if !variants.contains(&variant) {
            variants.push(variant);
            variants.sort();
        }
    }

    packages
}
