//! The fixed list of entry points, one table per tier.

use ash::vk;

use super::{ExtensionSet, Tier, device_resolver, instance_resolver};
use crate::errors::Result;

pub const KHR_SURFACE: &str = "VK_KHR_surface";
pub const KHR_SWAPCHAIN: &str = "VK_KHR_swapchain";

dispatch_table! {
    /// Symbols read from the library's export table.
    pub struct ExportedFunctions: Tier::Exported;
    core {
        vkGetInstanceProcAddr,
    }
    extensions {}
}

dispatch_table! {
    /// Commands resolved with a null instance.
    pub struct GlobalFunctions: Tier::Global;
    core {
        vkEnumerateInstanceExtensionProperties,
        vkEnumerateInstanceLayerProperties,
        vkCreateInstance,
    }
    extensions {}
}

dispatch_table! {
    /// Commands resolved against a live `VkInstance`.
    pub struct InstanceFunctions: Tier::Instance;
    core {
        vkDestroyInstance,
        vkEnumeratePhysicalDevices,
        vkGetPhysicalDeviceProperties,
        vkGetPhysicalDeviceFeatures,
        vkGetPhysicalDeviceQueueFamilyProperties,
        vkCreateDevice,
        vkGetDeviceProcAddr,
        vkEnumerateDeviceExtensionProperties,
    }
    extensions {
        vkGetPhysicalDeviceSurfaceSupportKHR => KHR_SURFACE,
        vkGetPhysicalDeviceSurfaceCapabilitiesKHR => KHR_SURFACE,
        vkGetPhysicalDeviceSurfaceFormatsKHR => KHR_SURFACE,
        vkDestroySurfaceKHR => KHR_SURFACE,
    }
}

dispatch_table! {
    /// Commands resolved against a live `VkDevice`.
    pub struct DeviceFunctions: Tier::Device;
    core {
        vkDestroyDevice,
        vkGetDeviceQueue,
        vkDeviceWaitIdle,
    }
    extensions {
        vkCreateSwapchainKHR => KHR_SWAPCHAIN,
        vkDestroySwapchainKHR => KHR_SWAPCHAIN,
        vkGetSwapchainImagesKHR => KHR_SWAPCHAIN,
    }
}

impl GlobalFunctions {
    /// # Safety
    ///
    /// `get_instance_proc_addr` must be a conforming `vkGetInstanceProcAddr`.
    pub unsafe fn load(get_instance_proc_addr: vk::PFN_vkGetInstanceProcAddr) -> Result<Self> {
        let resolve = instance_resolver(get_instance_proc_addr, vk::Instance::null());
        // SAFETY: forwarded from the caller.
        unsafe { Self::load_with(resolve, &ExtensionSet::new()) }
    }
}

impl InstanceFunctions {
    /// # Safety
    ///
    /// `get_instance_proc_addr` must be a conforming `vkGetInstanceProcAddr`
    /// and `instance` a live instance created with `enabled` extensions.
    pub unsafe fn load(
        get_instance_proc_addr: vk::PFN_vkGetInstanceProcAddr,
        instance: vk::Instance,
        enabled: &ExtensionSet,
    ) -> Result<Self> {
        let resolve = instance_resolver(get_instance_proc_addr, instance);
        // SAFETY: forwarded from the caller.
        unsafe { Self::load_with(resolve, enabled) }
    }
}

impl DeviceFunctions {
    /// # Safety
    ///
    /// `get_device_proc_addr` must be a conforming `vkGetDeviceProcAddr`
    /// and `device` a live device created with `enabled` extensions.
    pub unsafe fn load(
        get_device_proc_addr: vk::PFN_vkGetDeviceProcAddr,
        device: vk::Device,
        enabled: &ExtensionSet,
    ) -> Result<Self> {
        let resolve = device_resolver(get_device_proc_addr, device);
        // SAFETY: forwarded from the caller.
        unsafe { Self::load_with(resolve, enabled) }
    }
}
