use std::io::BufRead;

use vkboot::loader::extension_name;
use vkboot::{BootstrapSettings, Instance, VulkanLibrary};

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

    Ok(())
}
