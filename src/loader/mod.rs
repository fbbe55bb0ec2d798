//! Vulkan Function Loader
//!
//! Entry points are resolved in three tiers:
//!
//! - **Exported**: read straight out of the shared library's export table
//!   (only `vkGetInstanceProcAddr`).
//! - **Global / Instance**: resolved through `vkGetInstanceProcAddr`, with a
//!   null instance for global commands and a live instance otherwise.
//! - **Device**: resolved through `vkGetDeviceProcAddr` against a logical
//!   device.
//!
//! Each tier is a plain struct generated from a fixed list of names (see
//! [`tables`]). Entries that belong to an extension are only resolved when
//! that extension was enabled on the owning instance or device.
//!
//! # Example
//!
//! ```rust,ignore
//! use vkboot::loader::VulkanLibrary;
//!
//! let library = VulkanLibrary::open(None)?;
//! let entry = library.entry()?;
//! for ext in entry.enumerate_instance_extensions()? {
//!     println!("{:?}", vkboot::loader::extension_name(&ext));
//! }
//! ```

#[macro_use]
mod macros;

pub mod entry;
pub mod extensions;
pub mod library;
pub mod tables;

use std::ffi::CStr;
use std::fmt;

use ash::vk;

use crate::errors::{BootError, Result};

pub use entry::Entry;
pub use extensions::{ExtensionSet, extension_name};
pub use library::{DEFAULT_LIBRARY_NAME, VulkanLibrary};
pub use tables::{DeviceFunctions, ExportedFunctions, GlobalFunctions, InstanceFunctions};

/// The untyped function pointer every resolver hands back.
pub type VoidFunction = unsafe extern "system" fn();

/// The level at which an entry point is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Exported,
    Global,
    Instance,
    Device,
}

impl Tier {
    /// Tag used in load failures, e.g. `instance | VK_KHR_surface`.
    #[must_use]
    pub fn tag(self, extension: Option<&str>) -> String {
        match extension {
            Some(ext) => format!("{self} | {ext}"),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Exported => "exported",
            Self::Global => "global",
            Self::Instance => "instance",
            Self::Device => "device",
        };
        f.write_str(name)
    }
}

pub(crate) fn load_core<F>(resolve: &mut F, tier: Tier, name: &'static CStr) -> Result<VoidFunction>
where
    F: FnMut(&CStr) -> vk::PFN_vkVoidFunction,
{
    match resolve(name) {
        Some(ptr) => {
            log::debug!("Loaded [{tier}] {}", name.to_string_lossy());
            Ok(ptr)
        }
        None => Err(BootError::MissingFunction {
            tag: tier.tag(None),
            name: name.to_string_lossy().into_owned(),
        }),
    }
}

pub(crate) fn load_extension<F>(
    resolve: &mut F,
    tier: Tier,
    enabled: &ExtensionSet,
    extension: &'static str,
    name: &'static CStr,
) -> Result<Option<VoidFunction>>
where
    F: FnMut(&CStr) -> vk::PFN_vkVoidFunction,
{
    if !enabled.contains(extension) {
        log::warn!("{}", disabled_extension_message(name, extension));
        return Ok(None);
    }

    match resolve(name) {
        Some(ptr) => {
            log::debug!("Loaded [{}] {}", tier.tag(Some(extension)), name.to_string_lossy());
            Ok(Some(ptr))
        }
        None => Err(BootError::MissingFunction {
            tag: tier.tag(Some(extension)),
            name: name.to_string_lossy().into_owned(),
        }),
    }
}

fn disabled_extension_message(name: &CStr, extension: &str) -> String {
    format!(
        "Cannot load function '{}': extension '{extension}' is not enabled",
        name.to_string_lossy()
    )
}

/// Resolver backed by `vkGetInstanceProcAddr`.
///
/// Pass a null `instance` to resolve global commands.
pub fn instance_resolver(
    get_instance_proc_addr: vk::PFN_vkGetInstanceProcAddr,
    instance: vk::Instance,
) -> impl FnMut(&CStr) -> vk::PFN_vkVoidFunction {
    // SAFETY: `name` is NUL-terminated and outlives the call.
    move |name| unsafe { get_instance_proc_addr(instance, name.as_ptr()) }
}

/// Resolver backed by `vkGetDeviceProcAddr`.
pub fn device_resolver(
    get_device_proc_addr: vk::PFN_vkGetDeviceProcAddr,
    device: vk::Device,
) -> impl FnMut(&CStr) -> vk::PFN_vkVoidFunction {
    // SAFETY: `name` is NUL-terminated and outlives the call.
    move |name| unsafe { get_device_proc_addr(device, name.as_ptr()) }
}
