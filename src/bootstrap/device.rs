//! Logical device creation.

use std::ptr;

use ash::vk;

use super::{Instance, PhysicalDeviceSelection};
use crate::errors::{BootError, Result, check};
use crate::loader::{DeviceFunctions, ExtensionSet};
use crate::settings::BootstrapSettings;

/// An owned `VkDevice` with its device-level function table and the single
/// queue created on the selected family.
///
/// Borrows the [`Instance`] it was created from, so it is always destroyed
/// first.
pub struct Device<'i> {
    instance: &'i Instance<'i>,
    handle: vk::Device,
    functions: DeviceFunctions,
    enabled_extensions: ExtensionSet,
    queue_family_index: u32,
    queue: vk::Queue,
}

impl<'i> Device<'i> {
    pub fn create(
        instance: &'i Instance<'i>,
        selection: &PhysicalDeviceSelection,
        settings: &BootstrapSettings,
    ) -> Result<Self> {
        let enabled_extensions = ExtensionSet::from_names(&settings.device_extensions)?;
        if !enabled_extensions.is_empty() {
            let offered = ExtensionSet::from_properties(&instance.device_extensions(selection.physical_device)?);
            if let Some(missing) = enabled_extensions.first_missing_from(&offered) {
                return Err(BootError::ExtensionNotPresent(missing.to_string_lossy().into_owned()));
            }
        }

        let priorities = [1.0_f32];
        let queue_infos = [vk::DeviceQueueCreateInfo::default()
            .queue_family_index(selection.queue_family_index)
            .queue_priorities(&priorities)];
        let extension_ptrs = enabled_extensions.as_ptrs();
        let create_info = vk::DeviceCreateInfo::default()
            .queue_create_infos(&queue_infos)
            .enabled_extension_names(&extension_ptrs);

        let mut handle = vk::Device::null();
        // SAFETY: `create_info` and everything it points to outlive the call.
        let result = unsafe {
            (instance.functions().vkCreateDevice)(selection.physical_device, &create_info, ptr::null(), &mut handle)
        };
        check(result, "vkCreateDevice")?;
        log::info!(
            "Created logical device on '{}' with {} extensions",
            selection.device_name(),
            enabled_extensions.len()
        );

        // SAFETY: `handle` was just created with `enabled_extensions`.
        let functions = unsafe {
            DeviceFunctions::load(instance.functions().vkGetDeviceProcAddr, handle, &enabled_extensions)
        };
        let functions = match functions {
            Ok(functions) => functions,
            Err(err) => {
                Self::destroy_partial(instance, handle);
                return Err(err);
            }
        };

        let mut queue = vk::Queue::null();
        // SAFETY: one queue was requested on this family.
        unsafe { (functions.vkGetDeviceQueue)(handle, selection.queue_family_index, 0, &mut queue) };

        Ok(Self {
            instance,
            handle,
            functions,
            enabled_extensions,
            queue_family_index: selection.queue_family_index,
            queue,
        })
    }

    fn destroy_partial(instance: &Instance<'_>, handle: vk::Device) {
        // SAFETY: `handle` is a live device.
        let destroy = unsafe { (instance.functions().vkGetDeviceProcAddr)(handle, c"vkDestroyDevice".as_ptr()) };
        if let Some(destroy) = destroy {
            // SAFETY: the loader returned this pointer for vkDestroyDevice.
            unsafe {
                let destroy = std::mem::transmute::<unsafe extern "system" fn(), vk::PFN_vkDestroyDevice>(destroy);
                destroy(handle, ptr::null());
            }
        } else {
            log::error!("Leaking Vulkan device: vkDestroyDevice is unavailable");
        }
    }

    #[inline]
    #[must_use]
    pub fn instance(&self) -> &'i Instance<'i> {
        self.instance
    }

    #[inline]
    #[must_use]
    pub fn handle(&self) -> vk::Device {
        self.handle
    }

    #[inline]
    #[must_use]
    pub fn functions(&self) -> &DeviceFunctions {
        &self.functions
    }

    #[inline]
    #[must_use]
    pub fn enabled_extensions(&self) -> &ExtensionSet {
        &self.enabled_extensions
    }

    #[inline]
    #[must_use]
    pub fn queue_family_index(&self) -> u32 {
        self.queue_family_index
    }

    #[inline]
    #[must_use]
    pub fn queue(&self) -> vk::Queue {
        self.queue
    }

    pub fn wait_idle(&self) -> Result<()> {
        // SAFETY: `handle` is live.
        check(unsafe { (self.functions.vkDeviceWaitIdle)(self.handle) }, "vkDeviceWaitIdle")
    }
}

impl Drop for Device<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.wait_idle() {
            log::warn!("{err}");
        }
        log::info!("Destroying logical device");
        // SAFETY: the device is idle and owns no child objects.
        unsafe { (self.functions.vkDestroyDevice)(self.handle, ptr::null()) };
    }
}

impl std::fmt::Debug for Device<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Device")
            .field("handle", &self.handle)
            .field("queue_family_index", &self.queue_family_index)
            .field("queue", &self.queue)
            .finish_non_exhaustive()
    }
}
