//! Entry point into the API: the exported and global tiers.

use std::marker::PhantomData;
use std::ptr;

use ash::vk;

use super::GlobalFunctions;
use crate::bootstrap::enumerate;
use crate::errors::Result;

/// `vkGetInstanceProcAddr` plus the global tier resolved from it.
///
/// The lifetime ties the entry to the [`VulkanLibrary`](super::VulkanLibrary)
/// it was loaded from.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'lib> {
    get_instance_proc_addr: vk::PFN_vkGetInstanceProcAddr,
    global: GlobalFunctions,
    _library: PhantomData<&'lib ()>,
}

impl<'lib> Entry<'lib> {
    /// Builds an entry from a raw `vkGetInstanceProcAddr`.
    ///
    /// # Safety
    ///
    /// `get_instance_proc_addr` must be a conforming `vkGetInstanceProcAddr`
    /// that stays valid for `'lib`.
    pub unsafe fn from_get_instance_proc_addr(
        get_instance_proc_addr: vk::PFN_vkGetInstanceProcAddr,
    ) -> Result<Self> {
        // SAFETY: forwarded from the caller.
        let global = unsafe { GlobalFunctions::load(get_instance_proc_addr)? };
        log::info!("Loaded {} global functions", GlobalFunctions::CORE_FUNCTIONS.len());
        Ok(Self {
            get_instance_proc_addr,
            global,
            _library: PhantomData,
        })
    }

    #[inline]
    #[must_use]
    pub fn get_instance_proc_addr(&self) -> vk::PFN_vkGetInstanceProcAddr {
        self.get_instance_proc_addr
    }

    #[inline]
    #[must_use]
    pub fn global(&self) -> &GlobalFunctions {
        &self.global
    }

    /// Instance extensions offered by the implementation.
    pub fn enumerate_instance_extensions(&self) -> Result<Vec<vk::ExtensionProperties>> {
        let f = self.global.vkEnumerateInstanceExtensionProperties;
        enumerate("vkEnumerateInstanceExtensionProperties", |count, data| {
            // SAFETY: `count` and `data` follow the two-call contract.
            unsafe { f(ptr::null(), count, data) }
        })
    }

    /// Instance layers offered by the implementation.
    pub fn enumerate_instance_layers(&self) -> Result<Vec<vk::LayerProperties>> {
        let f = self.global.vkEnumerateInstanceLayerProperties;
        enumerate("vkEnumerateInstanceLayerProperties", |count, data| {
            // SAFETY: `count` and `data` follow the two-call contract.
            unsafe { f(count, data) }
        })
    }
}
