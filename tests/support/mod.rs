//! In-process fake Vulkan driver.
//!
//! Provides a `vkGetInstanceProcAddr` that hands out stub commands, so the
//! loader and bootstrap code can run without a GPU. State lives in a
//! thread-local because every test runs on its own thread.

#![allow(dead_code)]

use std::cell::RefCell;
use std::ffi::{CStr, c_char};

use vkboot::vk::{self, Handle};
use vkboot::Entry;

pub const COMPUTE_DEVICE: u64 = 0x2001;
pub const GRAPHICS_DEVICE: u64 = 0x2002;
pub const INSTANCE: u64 = 0x1000;
pub const DEVICE: u64 = 0x3000;
pub const QUEUE: u64 = 0x4000;

pub const INSTANCE_EXTENSIONS: &[(&str, u32)] = &[("VK_KHR_surface", 25), ("VK_EXT_debug_utils", 2)];
pub const DEVICE_EXTENSIONS: &[(&str, u32)] = &[("VK_KHR_swapchain", 70)];

#[derive(Debug, Default, Clone)]
pub struct FakeState {
    /// Entry point the driver pretends not to know.
    pub missing: Option<&'static str>,
    pub physical_device_count: Option<usize>,
    pub created_instances: u32,
    pub destroyed_instances: u32,
    pub created_devices: u32,
    pub destroyed_devices: u32,
    pub instance_extension_count: u32,
    pub device_extension_count: u32,
    pub requested_queue_family: Option<u32>,
    pub application_version: u32,
}

thread_local! {
    static STATE: RefCell<FakeState> = RefCell::new(FakeState::default());
}

pub fn state() -> FakeState {
    STATE.with(|s| s.borrow().clone())
}

pub fn set_missing(name: &'static str) {
    STATE.with(|s| s.borrow_mut().missing = Some(name));
}

pub fn set_physical_device_count(count: usize) {
    STATE.with(|s| s.borrow_mut().physical_device_count = Some(count));
}

fn with_state<R>(f: impl FnOnce(&mut FakeState) -> R) -> R {
    STATE.with(|s| f(&mut s.borrow_mut()))
}

/// Routes library logging through the test harness; `RUST_LOG` applies.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Entry backed by the fake driver.
pub fn entry() -> Entry<'static> {
    init_logging();
    unsafe { Entry::from_get_instance_proc_addr(fake_get_instance_proc_addr) }.expect("fake global tier")
}

pub fn extension(name: &str, spec_version: u32) -> vk::ExtensionProperties {
    let mut props = vk::ExtensionProperties {
        spec_version,
        ..Default::default()
    };
    write_name(&mut props.extension_name, name);
    props
}

fn write_name(dst: &mut [c_char], name: &str) {
    for (d, s) in dst.iter_mut().zip(name.bytes()) {
        *d = s as c_char;
    }
}

fn void(f: *const ()) -> vk::PFN_vkVoidFunction {
    Some(unsafe { std::mem::transmute::<*const (), unsafe extern "system" fn()>(f) })
}

unsafe fn fill<T: Copy>(src: &[T], count: *mut u32, data: *mut T) -> vk::Result {
    unsafe {
        if data.is_null() {
            *count = src.len() as u32;
            return vk::Result::SUCCESS;
        }
        let n = (*count as usize).min(src.len());
        std::ptr::copy_nonoverlapping(src.as_ptr(), data, n);
        *count = n as u32;
        if n < src.len() { vk::Result::INCOMPLETE } else { vk::Result::SUCCESS }
    }
}

fn is_missing(name: &CStr) -> bool {
    with_state(|s| s.missing.is_some_and(|m| m.as_bytes() == name.to_bytes()))
}

pub unsafe extern "system" fn fake_get_instance_proc_addr(
    _instance: vk::Instance,
    p_name: *const c_char,
) -> vk::PFN_vkVoidFunction {
    let name = unsafe { CStr::from_ptr(p_name) };
    if is_missing(name) {
        return None;
    }
    match name.to_bytes() {
        b"vkEnumerateInstanceExtensionProperties" => void(fake_enumerate_instance_extensions as *const ()),
        b"vkEnumerateInstanceLayerProperties" => void(fake_enumerate_instance_layers as *const ()),
        b"vkCreateInstance" => void(fake_create_instance as *const ()),
        b"vkDestroyInstance" => void(fake_destroy_instance as *const ()),
        b"vkEnumeratePhysicalDevices" => void(fake_enumerate_physical_devices as *const ()),
        b"vkGetPhysicalDeviceProperties" => void(fake_get_physical_device_properties as *const ()),
        b"vkGetPhysicalDeviceFeatures" => void(fake_get_physical_device_features as *const ()),
        b"vkGetPhysicalDeviceQueueFamilyProperties" => void(fake_get_queue_family_properties as *const ()),
        b"vkCreateDevice" => void(fake_create_device as *const ()),
        b"vkGetDeviceProcAddr" => void(fake_get_device_proc_addr as *const ()),
        b"vkEnumerateDeviceExtensionProperties" => void(fake_enumerate_device_extensions as *const ()),
        b"vkGetPhysicalDeviceSurfaceSupportKHR"
        | b"vkGetPhysicalDeviceSurfaceCapabilitiesKHR"
        | b"vkGetPhysicalDeviceSurfaceFormatsKHR"
        | b"vkDestroySurfaceKHR" => void(fake_noop as *const ()),
        _ => None,
    }
}

pub unsafe extern "system" fn fake_get_device_proc_addr(
    _device: vk::Device,
    p_name: *const c_char,
) -> vk::PFN_vkVoidFunction {
    let name = unsafe { CStr::from_ptr(p_name) };
    if is_missing(name) {
        return None;
    }
    match name.to_bytes() {
        b"vkDestroyDevice" => void(fake_destroy_device as *const ()),
        b"vkGetDeviceQueue" => void(fake_get_device_queue as *const ()),
        b"vkDeviceWaitIdle" => void(fake_device_wait_idle as *const ()),
        b"vkCreateSwapchainKHR" | b"vkDestroySwapchainKHR" | b"vkGetSwapchainImagesKHR" => {
            void(fake_noop as *const ())
        }
        _ => None,
    }
}

unsafe extern "system" fn fake_noop() {}

unsafe extern "system" fn fake_enumerate_instance_extensions(
    _layer: *const c_char,
    count: *mut u32,
    data: *mut vk::ExtensionProperties,
) -> vk::Result {
    let props: Vec<_> = INSTANCE_EXTENSIONS.iter().map(|&(n, v)| extension(n, v)).collect();
    unsafe { fill(&props, count, data) }
}

unsafe extern "system" fn fake_enumerate_instance_layers(
    count: *mut u32,
    data: *mut vk::LayerProperties,
) -> vk::Result {
    let mut layer = vk::LayerProperties::default();
    write_name(&mut layer.layer_name, "VK_LAYER_KHRONOS_validation");
    unsafe { fill(&[layer], count, data) }
}

unsafe extern "system" fn fake_create_instance(
    info: *const vk::InstanceCreateInfo<'_>,
    _allocator: *const vk::AllocationCallbacks<'_>,
    instance: *mut vk::Instance,
) -> vk::Result {
    unsafe {
        let info = &*info;
        let app = &*info.p_application_info;
        with_state(|s| {
            s.created_instances += 1;
            s.instance_extension_count = info.enabled_extension_count;
            s.application_version = app.application_version;
        });
        *instance = vk::Instance::from_raw(INSTANCE);
    }
    vk::Result::SUCCESS
}

unsafe extern "system" fn fake_destroy_instance(
    _instance: vk::Instance,
    _allocator: *const vk::AllocationCallbacks<'_>,
) {
    with_state(|s| s.destroyed_instances += 1);
}

unsafe extern "system" fn fake_enumerate_physical_devices(
    _instance: vk::Instance,
    count: *mut u32,
    data: *mut vk::PhysicalDevice,
) -> vk::Result {
    let all = [
        vk::PhysicalDevice::from_raw(COMPUTE_DEVICE),
        vk::PhysicalDevice::from_raw(GRAPHICS_DEVICE),
    ];
    let n = with_state(|s| s.physical_device_count).unwrap_or(all.len());
    unsafe { fill(&all[..n], count, data) }
}

unsafe extern "system" fn fake_get_physical_device_properties(
    physical_device: vk::PhysicalDevice,
    properties: *mut vk::PhysicalDeviceProperties,
) {
    let mut props = vk::PhysicalDeviceProperties {
        api_version: vk::make_api_version(0, 1, 3, 0),
        ..Default::default()
    };
    let name = if physical_device.as_raw() == COMPUTE_DEVICE {
        "Fake Compute Device"
    } else {
        "Fake Graphics Device"
    };
    write_name(&mut props.device_name, name);
    unsafe { *properties = props };
}

unsafe extern "system" fn fake_get_physical_device_features(
    _physical_device: vk::PhysicalDevice,
    features: *mut vk::PhysicalDeviceFeatures,
) {
    unsafe { *features = vk::PhysicalDeviceFeatures::default() };
}

unsafe extern "system" fn fake_get_queue_family_properties(
    physical_device: vk::PhysicalDevice,
    count: *mut u32,
    data: *mut vk::QueueFamilyProperties,
) {
    let family = |queue_flags, queue_count| vk::QueueFamilyProperties {
        queue_flags,
        queue_count,
        ..Default::default()
    };
    let families = if physical_device.as_raw() == COMPUTE_DEVICE {
        vec![family(vk::QueueFlags::COMPUTE | vk::QueueFlags::TRANSFER, 1)]
    } else {
        vec![
            family(vk::QueueFlags::TRANSFER, 1),
            family(vk::QueueFlags::GRAPHICS | vk::QueueFlags::COMPUTE, 2),
        ]
    };
    let _ = unsafe { fill(&families, count, data) };
}

unsafe extern "system" fn fake_create_device(
    _physical_device: vk::PhysicalDevice,
    info: *const vk::DeviceCreateInfo<'_>,
    _allocator: *const vk::AllocationCallbacks<'_>,
    device: *mut vk::Device,
) -> vk::Result {
    unsafe {
        let info = &*info;
        let queue = &*info.p_queue_create_infos;
        with_state(|s| {
            s.created_devices += 1;
            s.device_extension_count = info.enabled_extension_count;
            s.requested_queue_family = Some(queue.queue_family_index);
        });
        *device = vk::Device::from_raw(DEVICE);
    }
    vk::Result::SUCCESS
}

unsafe extern "system" fn fake_enumerate_device_extensions(
    _physical_device: vk::PhysicalDevice,
    _layer: *const c_char,
    count: *mut u32,
    data: *mut vk::ExtensionProperties,
) -> vk::Result {
    let props: Vec<_> = DEVICE_EXTENSIONS.iter().map(|&(n, v)| extension(n, v)).collect();
    unsafe { fill(&props, count, data) }
}

unsafe extern "system" fn fake_destroy_device(_device: vk::Device, _allocator: *const vk::AllocationCallbacks<'_>) {
    with_state(|s| s.destroyed_devices += 1);
}

unsafe extern "system" fn fake_get_device_queue(
    _device: vk::Device,
    _family: u32,
    _index: u32,
    queue: *mut vk::Queue,
) {
    unsafe { *queue = vk::Queue::from_raw(QUEUE) };
}

unsafe extern "system" fn fake_device_wait_idle(_device: vk::Device) -> vk::Result {
    vk::Result::SUCCESS
}
