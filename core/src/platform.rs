//! Host platform identification.
//!
//! The launcher picks its configuration entry by a target key such as
//! `linux-x64`. The tokens are fixed so that one configuration file can be
//! shipped unchanged to every host.

use std::fmt;

use strum_macros::Display;
use strum_macros::EnumIter;
use strum_macros::IntoStaticStr;

use crate::host_arch;

/// Operating system token used in a target key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum Os {
    #[strum(to_string = "win")]
    Win,
    #[strum(to_string = "linux")]
    Linux,
    #[strum(to_string = "freebsd")]
    FreeBsd,
    #[strum(to_string = "osx")]
    Osx,
    #[strum(to_string = "unknown")]
    Unknown,
}

impl Os {
    /// Maps a Rust OS name (the vocabulary of `std::env::consts::OS`) to a
    /// token. Anything unrecognized is [`Os::Unknown`].
    pub fn from_os_name(name: &str) -> Self {
        match name {
            "windows" => Os::Win,
            "linux" => Os::Linux,
            "freebsd" => Os::FreeBsd,
            "macos" => Os::Osx,
            _ => Os::Unknown,
        }
    }

    pub fn current() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// CPU architecture token used in a target key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum Arch {
    #[strum(to_string = "x86")]
    X86,
    #[strum(to_string = "x64")]
    X64,
    #[strum(to_string = "arm")]
    Arm,
    #[strum(to_string = "arm64")]
    Arm64,
    #[strum(to_string = "wasm")]
    Wasm,
    #[strum(to_string = "s390x")]
    S390x,
    #[strum(to_string = "unknown")]
    Unknown,
}

impl Arch {
    /// Maps a Rust architecture name (the vocabulary of
    /// `std::env::consts::ARCH`) to a token.
    pub fn from_arch_name(name: &str) -> Self {
        match name {
            "x86" => Arch::X86,
            "x86_64" => Arch::X64,
            "arm" => Arch::Arm,
            "aarch64" => Arch::Arm64,
            "wasm32" | "wasm64" => Arch::Wasm,
            "s390x" => Arch::S390x,
            _ => Arch::Unknown,
        }
    }

    /// The architecture the launcher binary was compiled for.
    pub fn compiled() -> Self {
        Self::from_arch_name(std::env::consts::ARCH)
    }

    /// The host OS architecture. An x64 launcher running under emulation on
    /// an arm64 host reports `arm64`.
    pub fn current() -> Self {
        host_arch::native_arch().unwrap_or_else(Self::compiled)
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// An `<os>-<arch>` pair identifying a configuration entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target {
    pub os: Os,
    pub arch: Arch,
}

impl Target {
    pub fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    pub fn current() -> Self {
        Self::new(Os::current(), Arch::current())
    }

    /// The lookup key, e.g. `linux-x64`.
    pub fn key(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}
