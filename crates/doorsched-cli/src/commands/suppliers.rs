use doorsched_core::error::ScheduleError;
use doorsched_core::supplier::registry::SupplierRegistry;
use doorsched_core::supplier::Supplier;

pub fn list() -> Result<(), ScheduleError> {
    let registry = SupplierRegistry::builtin()?;

    println!("Supplier layouts (auto-detected in this order):\n");
    for name in registry.names() {
        let Some(supplier) = Supplier::from_name(name) else {
            continue;
        };
        let profile = supplier.profile();
        let detect = if profile.detect_keywords.is_empty() {
            "(fallback)".to_string()
        } else {
            profile.detect_keywords.join(", ")
        };
        let tables = if profile.tables { "tables + lines" } else { "lines" };
        println!("  {:<10} {:<16} detect: {}", name, tables, detect);
    }

    Ok(())
}
