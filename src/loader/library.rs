//! Shared library handle and the exported tier.

use std::ffi::CStr;
use std::path::{Path, PathBuf};

use libloading::Library;

use super::{Entry, ExportedFunctions, ExtensionSet};
use crate::errors::{BootError, Result};

/// Platform name of the Vulkan loader.
#[cfg(windows)]
pub const DEFAULT_LIBRARY_NAME: &str = "vulkan-1.dll";
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub const DEFAULT_LIBRARY_NAME: &str = "libvulkan.1.dylib";
#[cfg(target_os = "android")]
pub const DEFAULT_LIBRARY_NAME: &str = "libvulkan.so";
#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "ios", target_os = "android"))
))]
pub const DEFAULT_LIBRARY_NAME: &str = "libvulkan.so.1";

/// An opened Vulkan loader library.
///
/// Owns the library handle; every function table derived from it borrows
/// the library, so it stays mapped for as long as they are in use.
pub struct VulkanLibrary {
    path: PathBuf,
    exported: ExportedFunctions,
    _library: Library,
}

impl VulkanLibrary {
    /// Opens the library at `path`, or [`DEFAULT_LIBRARY_NAME`] when `None`,
    /// and resolves the exported tier.
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let path = path.map_or_else(|| PathBuf::from(DEFAULT_LIBRARY_NAME), Path::to_path_buf);
        log::info!("Loading Vulkan library: {}", path.display());

        // SAFETY: the Vulkan loader has no initialisation routines with
        // preconditions on the caller.
        let library = unsafe { Library::new(&path) }.map_err(|source| BootError::LibraryLoad {
            path: path.clone(),
            source,
        })?;

        let resolve = |name: &CStr| {
            // SAFETY: the symbol is only read as an untyped function pointer.
            unsafe {
                library
                    .get::<super::VoidFunction>(name.to_bytes_with_nul())
                    .ok()
                    .map(|symbol| *symbol)
            }
        };
        // SAFETY: exported symbols carry the signatures the Vulkan ABI assigns them.
        let exported = unsafe { ExportedFunctions::load_with(resolve, &ExtensionSet::new())? };

        Ok(Self {
            path,
            exported,
            _library: library,
        })
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    #[must_use]
    pub fn exported(&self) -> &ExportedFunctions {
        &self.exported
    }

    /// Resolves the global tier and returns the entry point into the API.
    pub fn entry(&self) -> Result<Entry<'_>> {
        // SAFETY: the pointer was read from this library, which outlives the entry.
        unsafe { Entry::from_get_instance_proc_addr(self.exported.vkGetInstanceProcAddr) }
    }
}

impl std::fmt::Debug for VulkanLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VulkanLibrary")
            .field("path", &self.path)
            .field("exported", &self.exported)
            .finish_non_exhaustive()
    }
}
