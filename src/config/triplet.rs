//! vcpkg target triplets
//!
//! Only the four Windows triplets the engine ships with are accepted:
//! `x86-windows`, `x86-windows-static`, `x64-windows` and `x64-windows-static`.

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Result};
use clap::ValueEnum;
use serde::{Deserialize, Deserializer};

/// Target architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum Arch {
    X86,
    X64,
}

/// Target system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum System {
    Windows,
}

/// Library linkage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum Linkage {
    Dynamic,
    Static,
}

impl Arch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86 => "x86",
            Arch::X64 => "x64",
        }
    }
}

impl System {
    pub fn as_str(&self) -> &'static str {
        match self {
            System::Windows => "windows",
        }
    }
}

impl Linkage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Linkage::Dynamic => "dynamic",
            Linkage::Static => "static",
        }
    }
}

/// An architecture/system/linkage combination understood by vcpkg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triplet {
    pub arch: Arch,
    pub system: System,
    pub linkage: Linkage,
}

impl Triplet {
    /// All known triplets, in build order
    pub const ALL: [Triplet; 4] = [
        Triplet::windows(Arch::X86, Linkage::Dynamic),
        Triplet::windows(Arch::X86, Linkage::Static),
        Triplet::windows(Arch::X64, Linkage::Dynamic),
        Triplet::windows(Arch::X64, Linkage::Static),
    ];

    pub const fn windows(arch: Arch, linkage: Linkage) -> Self {
        Self {
            arch,
            system: System::Windows,
            linkage,
        }
    }

    /// Cartesian product of architectures and linkages, deduplicated, in
    /// the order the arguments were given
    pub fn combinations(archs: &[Arch], linkages: &[Linkage]) -> Vec<Triplet> {
        let mut triplets = Vec::new();
        for &arch in archs {
            for &linkage in linkages {
                let triplet = Triplet::windows(arch, linkage);
                if !triplets.contains(&triplet) {
                    triplets.push(triplet);
                }
            }
        }
        triplets
    }

    fn known_names() -> String {
        Self::ALL
            .iter()
            .map(Triplet::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Triplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.linkage {
            Linkage::Static => write!(
                f,
                "{}-{}-{}",
                self.arch.as_str(),
                self.system.as_str(),
                self.linkage.as_str()
            ),
            Linkage::Dynamic => write!(f, "{}-{}", self.arch.as_str(), self.system.as_str()),
        }
    }
}

impl FromStr for Triplet {
    type Err = anyhow::Error;

    /// Parse `x64-windows`, `x64-windows-static` or `x64-windows-dynamic`
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split('-').collect();
        let (arch, system, linkage) = match parts.as_slice() {
            [arch, system] => (*arch, *system, "dynamic"),
            [arch, system, linkage] => (*arch, *system, *linkage),
            _ => bail!(
                "invalid triplet '{}': expected one of {}",
                s,
                Self::known_names()
            ),
        };

        let arch = match arch {
            "x86" => Arch::X86,
            "x64" => Arch::X64,
            _ => bail!(
                "unsupported triplet '{}': expected one of {}",
                s,
                Self::known_names()
            ),
        };
        if system != "windows" {
            bail!(
                "unsupported triplet '{}': expected one of {}",
                s,
                Self::known_names()
            );
        }
        let linkage = match linkage {
            "dynamic" => Linkage::Dynamic,
            "static" => Linkage::Static,
            _ => bail!(
                "unsupported triplet '{}': expected one of {}",
                s,
                Self::known_names()
            ),
        };

        Ok(Triplet::windows(arch, linkage))
    }
}

impl<'de> Deserialize<'de> for Triplet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
