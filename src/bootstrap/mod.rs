//! Instance and device bootstrap.
//!
//! The flow is linear: open the library, enumerate instance extensions,
//! create an [`Instance`], pick a physical device and queue family, create a
//! [`Device`]. Teardown happens in reverse through `Drop`.

pub mod device;
pub mod instance;
pub mod queue;

use ash::vk;

use crate::errors::{Result, check};

pub use device::Device;
pub use instance::{Instance, PhysicalDeviceSelection};
pub use queue::select_queue_family;

/// Runs a Vulkan two-call enumeration: once for the count, once to fill.
///
/// `VK_INCOMPLETE` on the fill call is reported as an error.
pub(crate) fn enumerate<T, F>(call: &'static str, mut f: F) -> Result<Vec<T>>
where
    T: Default + Clone,
    F: FnMut(*mut u32, *mut T) -> vk::Result,
{
    let mut count = 0u32;
    check(f(&mut count, std::ptr::null_mut()), call)?;
    if count == 0 {
        return Ok(Vec::new());
    }

    let mut items = vec![T::default(); count as usize];
    check(f(&mut count, items.as_mut_ptr()), call)?;
    items.truncate(count as usize);
    Ok(items)
}
