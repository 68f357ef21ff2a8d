//! Host operating system identification.

use serde::{Deserialize, Serialize};

/// Operating system family of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OsFamily {
    Windows,
    MacOS,
    Linux,
    #[default]
    Unknown,
}

impl OsFamily {
    /// Map a `std::env::consts::OS` value to a family.
    pub fn from_os_name(name: &str) -> Self {
        match name {
            "windows" => Self::Windows,
            "macos" => Self::MacOS,
            "linux" => Self::Linux,
            _ => Self::Unknown,
        }
    }
}

/// Identity of the host as far as ffmpeg resolution cares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostPlatform {
    /// Operating system family.
    pub os: OsFamily,
    /// Whether the operating system (not necessarily this process) is 64-bit.
    pub is_64bit: bool,
    /// Free-form description used in error messages.
    pub description: String,
}

impl HostPlatform {
    pub fn new(os: OsFamily, is_64bit: bool) -> Self {
        let bits = if is_64bit { 64 } else { 32 };
        Self {
            os,
            is_64bit,
            description: format!("{os:?} ({bits}-bit)"),
        }
    }
}

/// Source of host identity.
///
/// Resolution code asks a probe instead of reading ambient OS state so
/// every platform branch can be exercised from a single machine.
pub trait PlatformProbe: Send + Sync {
    fn host(&self) -> HostPlatform;
}

/// A fixed identity is its own probe.
impl PlatformProbe for HostPlatform {
    fn host(&self) -> HostPlatform {
        self.clone()
    }
}

/// Probe reading the running system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl PlatformProbe for SystemProbe {
    fn host(&self) -> HostPlatform {
        HostPlatform {
            os: OsFamily::from_os_name(std::env::consts::OS),
            is_64bit: os_is_64bit(),
            description: format!("{} {}", std::env::consts::OS, std::env::consts::ARCH),
        }
    }
}

/// A 32-bit process under WOW64 still runs on a 64-bit Windows; the
/// bundled build must match the OS.
fn os_is_64bit() -> bool {
    if cfg!(target_pointer_width = "64") {
        return true;
    }
    cfg!(windows) && std::env::var_os("PROCESSOR_ARCHITEW6432").is_some()
}
