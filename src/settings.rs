//! Bootstrap Settings
//!
//! [`BootstrapSettings`] is consumed once at start-up. It names the loader
//! library, the application identity reported to the driver, and the
//! extensions, layers and queue capabilities to request.
//!
//! # Example
//!
//! ```rust,ignore
//! use vkboot::settings::{BootstrapSettings, QueueCapability};
//!
//! let settings = BootstrapSettings {
//!     device_extensions: vec!["VK_KHR_swapchain".into()],
//!     queue_capabilities: vec![QueueCapability::Compute],
//!     ..Default::default()
//! };
//! ```
//!
//! The same fields can be read from JSON; missing fields keep their defaults:
//!
//! ```json
//! { "application_name": "triangle", "wait_for_enter": true }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use ash::vk;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// A `major.minor.patch` version, packed the way `VK_MAKE_VERSION` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// Packed form: `major << 22 | minor << 12 | patch`.
    #[inline]
    #[must_use]
    pub const fn to_vk(self) -> u32 {
        vk::make_api_version(0, self.major, self.minor, self.patch)
    }

    #[must_use]
    pub const fn from_vk(packed: u32) -> Self {
        Self {
            major: vk::api_version_major(packed),
            minor: vk::api_version_minor(packed),
            patch: vk::api_version_patch(packed),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Capability a selected queue family must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueCapability {
    Graphics,
    Compute,
    Transfer,
    SparseBinding,
}

impl QueueCapability {
    #[must_use]
    pub fn flags(self) -> vk::QueueFlags {
        match self {
            Self::Graphics => vk::QueueFlags::GRAPHICS,
            Self::Compute => vk::QueueFlags::COMPUTE,
            Self::Transfer => vk::QueueFlags::TRANSFER,
            Self::SparseBinding => vk::QueueFlags::SPARSE_BINDING,
        }
    }
}

/// Start-up configuration.
///
/// # Fields
///
/// | Field                 | Description                            | Default            |
/// |-----------------------|----------------------------------------|--------------------|
/// | `library_path`        | Loader library to open                 | platform default   |
/// | `application_name`    | `VkApplicationInfo::pApplicationName`  | `"Vulkan Stuff"`   |
/// | `engine_name`         | `VkApplicationInfo::pEngineName`       | `"no engine"`      |
/// | `application_version` | Application version                    | `0.1.0`            |
/// | `engine_version`      | Engine version                         | `0.1.0`            |
/// | `api_version`         | Requested API version                  | `1.0.0`            |
/// | `instance_extensions` | Instance extensions to enable          | empty              |
/// | `layers`              | Instance layers to enable              | empty              |
/// | `device_extensions`   | Device extensions to enable            | empty              |
/// | `queue_capabilities`  | Required queue family capabilities     | `[graphics]`       |
/// | `device_index`        | Force a physical device                | `None` (first fit) |
/// | `wait_for_enter`      | Pause after listing extensions         | `false`            |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapSettings {
    pub library_path: Option<PathBuf>,

    pub application_name: String,
    pub engine_name: String,
    pub application_version: Version,
    pub engine_version: Version,
    pub api_version: Version,

    pub instance_extensions: Vec<String>,
    pub layers: Vec<String>,
    pub device_extensions: Vec<String>,

    pub queue_capabilities: Vec<QueueCapability>,
    pub device_index: Option<usize>,

    pub wait_for_enter: bool,
}

impl Default for BootstrapSettings {
    fn default() -> Self {
        Self {
            library_path: None,
            application_name: "Vulkan Stuff".to_string(),
            engine_name: "no engine".to_string(),
            application_version: Version::new(0, 1, 0),
            engine_version: Version::new(0, 1, 0),
            api_version: Version::new(1, 0, 0),
            instance_extensions: Vec::new(),
            layers: Vec::new(),
            device_extensions: Vec::new(),
            queue_capabilities: vec![QueueCapability::Graphics],
            device_index: None,
            wait_for_enter: false,
        }
    }
}

impl BootstrapSettings {
    /// Combined flag mask the selected queue family must contain.
    #[must_use]
    pub fn queue_flags(&self) -> vk::QueueFlags {
        self.queue_capabilities
            .iter()
            .fold(vk::QueueFlags::empty(), |acc, cap| acc | cap.flags())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reads settings from the file named by the first command-line
    /// argument, falling back to defaults when none is given.
    pub fn from_args() -> Result<Self> {
        match std::env::args_os().nth(1) {
            Some(path) => {
                let path = PathBuf::from(path);
                log::info!("Reading settings from {}", path.display());
                Self::from_json_file(&path)
            }
            None => Ok(Self::default()),
        }
    }
}
