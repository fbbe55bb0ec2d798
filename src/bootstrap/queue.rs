use ash::vk;

/// Index of the first queue family that has queues and supports all of `flags`.
#[must_use]
pub fn select_queue_family(families: &[vk::QueueFamilyProperties], flags: vk::QueueFlags) -> Option<u32> {
    families
        .iter()
        .position(|family| family.queue_count > 0 && family.queue_flags.contains(flags))
        .map(|index| index as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family(flags: vk::QueueFlags, queue_count: u32) -> vk::QueueFamilyProperties {
        vk::QueueFamilyProperties {
            queue_flags: flags,
            queue_count,
            ..Default::default()
        }
    }

    #[test]
    fn picks_first_match() {
        let families = [
            family(vk::QueueFlags::TRANSFER, 2),
            family(vk::QueueFlags::GRAPHICS | vk::QueueFlags::COMPUTE, 1),
            family(vk::QueueFlags::GRAPHICS, 4),
        ];
        assert_eq!(select_queue_family(&families, vk::QueueFlags::GRAPHICS), Some(1));
    }

    #[test]
    fn requires_every_flag() {
        let families = [family(vk::QueueFlags::GRAPHICS, 1), family(vk::QueueFlags::COMPUTE, 1)];
        let both = vk::QueueFlags::GRAPHICS | vk::QueueFlags::COMPUTE;
        assert_eq!(select_queue_family(&families, both), None);
    }

    #[test]
    fn skips_empty_families() {
        let families = [family(vk::QueueFlags::COMPUTE, 0), family(vk::QueueFlags::COMPUTE, 1)];
        assert_eq!(select_queue_family(&families, vk::QueueFlags::COMPUTE), Some(1));
    }
}
