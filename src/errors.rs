//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`BootError`] covers all failure modes including:
//! - Loading the shared library and resolving entry points
//! - Vulkan commands returning anything other than `VK_SUCCESS`
//! - Missing extensions, layers, devices or queue families
//! - Reading the settings file
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for `std::result::Result<T, BootError>`.
//!
//! ```rust,ignore
//! use vkboot::errors::{BootError, Result};
//!
//! fn open() -> Result<()> {
//!     let library = vkboot::VulkanLibrary::open(None)?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use ash::vk;
use thiserror::Error;

/// The main error type for Vulkan bootstrapping.
#[derive(Error, Debug)]
pub enum BootError {
    // ========================================================================
    // Loader Errors
    // ========================================================================
    /// The shared library could not be opened.
    #[error("Failed to load Vulkan library '{}': {source}", .path.display())]
    LibraryLoad {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    /// A mandatory entry point (or one of an enabled extension) resolved to null.
    #[error("Failed to load vulkan function [{tag}]: {name}")]
    MissingFunction {
        /// Tier, optionally followed by `| <extension>`
        tag: String,
        /// Entry point name
        name: String,
    },

    // ========================================================================
    // API Errors
    // ========================================================================
    /// A Vulkan command did not return `VK_SUCCESS`.
    #[error("{call} failed: {result}")]
    Vulkan {
        call: &'static str,
        result: vk::Result,
    },

    /// A requested extension is not offered by the implementation.
    #[error("Extension not present: {0}")]
    ExtensionNotPresent(String),

    /// A requested layer is not offered by the implementation.
    #[error("Layer not present: {0}")]
    LayerNotPresent(String),

    /// The instance reports no physical devices.
    #[error("No Vulkan physical devices found")]
    NoPhysicalDevice,

    /// No physical device exposes a queue family with the requested flags.
    #[error("No physical device has a queue family supporting {0:?}")]
    NoSuitableDevice(vk::QueueFlags),

    /// The configured device index does not exist.
    #[error("Physical device index {index} out of range ({count} available)")]
    DeviceIndexOutOfRange { index: usize, count: usize },

    /// A name contained an interior NUL byte.
    #[error("Invalid name: {0}")]
    InvalidName(#[from] std::ffi::NulError),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Settings file could not be parsed.
    #[error("Settings parse error: {0}")]
    SettingsError(#[from] serde_json::Error),
}

/// Maps a non-success `vk::Result` to [`BootError::Vulkan`].
pub(crate) fn check(result: vk::Result, call: &'static str) -> Result<()> {
    match result {
        vk::Result::SUCCESS => Ok(()),
        result => Err(BootError::Vulkan { call, result }),
    }
}

/// Alias for `Result<T, BootError>`.
pub type Result<T> = std::result::Result<T, BootError>;
