#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_safety_doc)]

//! Vulkan bootstrap: load the loader library, resolve entry points in three
//! tiers, create an instance, pick a physical device and queue family, and
//! create a logical device.

pub mod bootstrap;
pub mod errors;
pub mod loader;
pub mod settings;

pub use bootstrap::{Device, Instance, PhysicalDeviceSelection, select_queue_family};
pub use errors::{BootError, Result};
pub use loader::{
    DeviceFunctions, Entry, ExportedFunctions, ExtensionSet, GlobalFunctions, InstanceFunctions, Tier,
    VulkanLibrary,
};
pub use settings::{BootstrapSettings, QueueCapability, Version};

pub use ash::vk;
