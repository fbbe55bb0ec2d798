use std::io::BufRead;

use vkboot::loader::extension_name;
use vkboot::{BootstrapSettings, Device, Instance, VulkanLibrary, Version};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let settings = BootstrapSettings::from_args()?;
    let library = VulkanLibrary::open(settings.library_path.as_deref())?;
    let entry = library.entry()?;

    let extensions = entry.enumerate_instance_extensions()?;
    for extension in &extensions {
        let name = extension_name(extension).map(|name| name.to_string_lossy());
        println!("{} - {}", name.as_deref().unwrap_or("<invalid>"), extension.spec_version);
    }

    if settings.wait_for_enter {
        std::io::stdin().lock().read_line(&mut String::new())?;
    }

    let instance = Instance::create(&entry, &settings, &extensions)?;
    log::info!("Instance ready: {:?}", instance.handle());

    for (index, physical_device) in instance.physical_devices()?.into_iter().enumerate() {
        let properties = instance.device_properties(physical_device);
        let name = properties.device_name_as_c_str().ok().map(|name| name.to_string_lossy());
        println!(
            "[{index}] {} (API {}, {} queue families)",
            name.as_deref().unwrap_or("<unnamed>"),
            Version::from_vk(properties.api_version),
            instance.queue_families(physical_device).len()
        );
    }

    let selection = instance.select_physical_device(&settings)?;
    let device = Device::create(&instance, &selection, &settings)?;
    println!(
        "Using '{}', queue family {}",
        selection.device_name(),
        device.queue_family_index()
    );
    log::info!("Device ready: {:?}, queue {:?}", device.handle(), device.queue());
    log::info!("Tearing down device and instance");

    Ok(())
}
