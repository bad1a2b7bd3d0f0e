//! Configuration: target triplets, vcdeps.toml and resolved settings

pub mod settings;
pub mod triplet;

pub use settings::{Defaults, FileConfig, Overrides, Settings};
pub use triplet::{Arch, Linkage, Triplet};
