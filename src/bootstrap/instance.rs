//! `VkInstance` ownership and physical device queries.

use std::ffi::CString;
use std::ptr;

use ash::vk;

use super::{enumerate, select_queue_family};
use crate::errors::{BootError, Result, check};
use crate::loader::{Entry, ExtensionSet, InstanceFunctions};
use crate::settings::BootstrapSettings;

/// A physical device together with the queue family chosen on it.
#[derive(Debug, Clone, Copy)]
pub struct PhysicalDeviceSelection {
    pub physical_device: vk::PhysicalDevice,
    pub properties: vk::PhysicalDeviceProperties,
    pub queue_family_index: u32,
}

impl PhysicalDeviceSelection {
    #[must_use]
    pub fn device_name(&self) -> String {
        self.properties
            .device_name_as_c_str()
            .ok()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// An owned `VkInstance` with its instance-level function table.
///
/// Destroyed on drop.
pub struct Instance<'e> {
    entry: &'e Entry<'e>,
    handle: vk::Instance,
    functions: InstanceFunctions,
    enabled_extensions: ExtensionSet,
}

impl<'e> Instance<'e> {
    /// Creates an instance with the extensions and layers named in `settings`.
    ///
    /// `available` is the list returned by
    /// [`Entry::enumerate_instance_extensions`]; every requested extension
    /// must appear in it.
    pub fn create(
        entry: &'e Entry<'e>,
        settings: &BootstrapSettings,
        available: &[vk::ExtensionProperties],
    ) -> Result<Self> {
        let enabled_extensions = ExtensionSet::from_names(&settings.instance_extensions)?;
        if let Some(missing) = enabled_extensions.first_missing_from(&ExtensionSet::from_properties(available)) {
            return Err(BootError::ExtensionNotPresent(missing.to_string_lossy().into_owned()));
        }

        let layers = ExtensionSet::from_names(&settings.layers)?;
        if !layers.is_empty() {
            let mut offered = ExtensionSet::new();
            for layer in entry.enumerate_instance_layers()? {
                if let Ok(name) = layer.layer_name_as_c_str() {
                    offered.insert(name.to_owned());
                }
            }
            if let Some(missing) = layers.first_missing_from(&offered) {
                return Err(BootError::LayerNotPresent(missing.to_string_lossy().into_owned()));
            }
        }

        let application_name = CString::new(settings.application_name.as_str())?;
        let engine_name = CString::new(settings.engine_name.as_str())?;
        let application_info = vk::ApplicationInfo::default()
            .application_name(&application_name)
            .application_version(settings.application_version.to_vk())
            .engine_name(&engine_name)
            .engine_version(settings.engine_version.to_vk())
            .api_version(settings.api_version.to_vk());

        let layer_ptrs = layers.as_ptrs();
        let extension_ptrs = enabled_extensions.as_ptrs();
        let create_info = vk::InstanceCreateInfo::default()
            .application_info(&application_info)
            .enabled_layer_names(&layer_ptrs)
            .enabled_extension_names(&extension_ptrs);

        let mut handle = vk::Instance::null();
        // SAFETY: `create_info` and everything it points to outlive the call.
        let result = unsafe { (entry.global().vkCreateInstance)(&create_info, ptr::null(), &mut handle) };
        check(result, "vkCreateInstance")?;
        log::info!(
            "Created Vulkan instance for '{}' (API {}, {} extensions, {} layers)",
            settings.application_name,
            settings.api_version,
            enabled_extensions.len(),
            layers.len()
        );

        // SAFETY: `handle` was just created with `enabled_extensions`.
        let functions = unsafe {
            InstanceFunctions::load(entry.get_instance_proc_addr(), handle, &enabled_extensions)
        };
        let functions = match functions {
            Ok(functions) => functions,
            Err(err) => {
                // The table is incomplete, but vkDestroyInstance may still resolve.
                Self::destroy_partial(entry, handle);
                return Err(err);
            }
        };

        Ok(Self {
            entry,
            handle,
            functions,
            enabled_extensions,
        })
    }

    fn destroy_partial(entry: &Entry<'_>, handle: vk::Instance) {
        // SAFETY: `handle` is a live instance.
        let destroy = unsafe { (entry.get_instance_proc_addr())(handle, c"vkDestroyInstance".as_ptr()) };
        if let Some(destroy) = destroy {
            // SAFETY: the loader returned this pointer for vkDestroyInstance.
            unsafe {
                let destroy = std::mem::transmute::<unsafe extern "system" fn(), vk::PFN_vkDestroyInstance>(destroy);
                destroy(handle, ptr::null());
            }
        } else {
            log::error!("Leaking Vulkan instance: vkDestroyInstance is unavailable");
        }
    }

    #[inline]
    #[must_use]
    pub fn entry(&self) -> &'e Entry<'e> {
        self.entry
    }

    #[inline]
    #[must_use]
    pub fn handle(&self) -> vk::Instance {
        self.handle
    }

    #[inline]
    #[must_use]
    pub fn functions(&self) -> &InstanceFunctions {
        &self.functions
    }

    #[inline]
    #[must_use]
    pub fn enabled_extensions(&self) -> &ExtensionSet {
        &self.enabled_extensions
    }

    pub fn physical_devices(&self) -> Result<Vec<vk::PhysicalDevice>> {
        let f = self.functions.vkEnumeratePhysicalDevices;
        let handle = self.handle;
        enumerate("vkEnumeratePhysicalDevices", |count, data| {
            // SAFETY: two-call contract.
            unsafe { f(handle, count, data) }
        })
    }

    #[must_use]
    pub fn device_properties(&self, physical_device: vk::PhysicalDevice) -> vk::PhysicalDeviceProperties {
        let mut properties = vk::PhysicalDeviceProperties::default();
        // SAFETY: `physical_device` was enumerated from this instance.
        unsafe { (self.functions.vkGetPhysicalDeviceProperties)(physical_device, &mut properties) };
        properties
    }

    #[must_use]
    pub fn device_features(&self, physical_device: vk::PhysicalDevice) -> vk::PhysicalDeviceFeatures {
        let mut features = vk::PhysicalDeviceFeatures::default();
        // SAFETY: `physical_device` was enumerated from this instance.
        unsafe { (self.functions.vkGetPhysicalDeviceFeatures)(physical_device, &mut features) };
        features
    }

    #[must_use]
    pub fn queue_families(&self, physical_device: vk::PhysicalDevice) -> Vec<vk::QueueFamilyProperties> {
        let f = self.functions.vkGetPhysicalDeviceQueueFamilyProperties;
        let families = enumerate("vkGetPhysicalDeviceQueueFamilyProperties", |count, data| {
            // SAFETY: two-call contract.
            unsafe { f(physical_device, count, data) };
            vk::Result::SUCCESS
        });
        // The command has no failure path.
        families.unwrap_or_default()
    }

    pub fn device_extensions(&self, physical_device: vk::PhysicalDevice) -> Result<Vec<vk::ExtensionProperties>> {
        let f = self.functions.vkEnumerateDeviceExtensionProperties;
        enumerate("vkEnumerateDeviceExtensionProperties", |count, data| {
            // SAFETY: two-call contract.
            unsafe { f(physical_device, ptr::null(), count, data) }
        })
    }

    /// Picks the first physical device with a queue family matching
    /// `settings.queue_flags()`, or checks the one at `settings.device_index`.
    pub fn select_physical_device(&self, settings: &BootstrapSettings) -> Result<PhysicalDeviceSelection> {
        let devices = self.physical_devices()?;
        if devices.is_empty() {
            return Err(BootError::NoPhysicalDevice);
        }

        let candidates: &[vk::PhysicalDevice] = match settings.device_index {
            Some(index) if index >= devices.len() => {
                return Err(BootError::DeviceIndexOutOfRange {
                    index,
                    count: devices.len(),
                });
            }
            Some(index) => &devices[index..=index],
            None => &devices,
        };

        let flags = settings.queue_flags();
        for &physical_device in candidates {
            let properties = self.device_properties(physical_device);
            let families = self.queue_families(physical_device);
            let name = properties.device_name_as_c_str().ok().map(|n| n.to_string_lossy().into_owned());
            match select_queue_family(&families, flags) {
                Some(queue_family_index) => {
                    log::info!(
                        "Selected physical device '{}' (queue family {queue_family_index})",
                        name.as_deref().unwrap_or("<unnamed>")
                    );
                    return Ok(PhysicalDeviceSelection {
                        physical_device,
                        properties,
                        queue_family_index,
                    });
                }
                None => log::debug!(
                    "Skipping '{}': no queue family with {flags:?}",
                    name.as_deref().unwrap_or("<unnamed>")
                ),
            }
        }

        Err(BootError::NoSuitableDevice(flags))
    }
}

impl Drop for Instance<'_> {
    fn drop(&mut self) {
        log::info!("Destroying Vulkan instance");
        // SAFETY: every child object borrows `self`, so none is alive here.
        unsafe { (self.functions.vkDestroyInstance)(self.handle, ptr::null()) };
    }
}

impl std::fmt::Debug for Instance<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instance")
            .field("handle", &self.handle)
            .field("enabled_extensions", &self.enabled_extensions)
            .finish_non_exhaustive()
    }
}
