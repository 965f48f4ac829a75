pub mod category;
pub mod products;

use catalog_kernel::ModuleRegistry;

/// Register all catalog modules with the registry
pub fn register_all(registry: &mut ModuleRegistry) {
    registry.register(products::create_module());
    registry.register(category::create_module());
}
