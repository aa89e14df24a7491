//! Unit tests for the in-memory registry's idempotent contract.

use rstest::{fixture, rstest};

use crate::registry::adapters::memory::InMemoryToolFunctionRegistry;
use crate::registry::domain::{CommandBinding, RegisteredFunction, ToolFunctionDefinition};
use crate::registry::ports::{ToolFunctionRegistry, ToolFunctionRegistryError};

#[fixture]
fn registry() -> InMemoryToolFunctionRegistry {
    InMemoryToolFunctionRegistry::new()
}

fn function(name: &str, command: &str) -> RegisteredFunction {
    RegisteredFunction::new(
        ToolFunctionDefinition::new(name, format!("Executes '{command}'")),
        CommandBinding::new(command),
    )
}

#[rstest]
fn register_reports_newness(registry: InMemoryToolFunctionRegistry) {
    assert!(
        registry
            .register(function("list_reminders", "remind ls"))
            .expect("register should succeed")
    );
    assert!(
        !registry
            .register(function("list_reminders", "remind ls"))
            .expect("re-register should succeed"),
        "re-registering the same name replaces, not duplicates"
    );
    assert_eq!(registry.list().expect("list should succeed").len(), 1);
}

#[rstest]
fn re_register_replaces_the_binding(registry: InMemoryToolFunctionRegistry) {
    registry
        .register(function("show_status", "status"))
        .expect("register should succeed");
    registry
        .register(function("show_status", "health"))
        .expect("re-register should succeed");

    let found = registry
        .find_by_name("show_status")
        .expect("lookup should succeed")
        .expect("function should exist");
    assert_eq!(found.binding.command_name, "health");
}

#[rstest]
fn unregister_is_idempotent(registry: InMemoryToolFunctionRegistry) {
    registry
        .register(function("show_status", "status"))
        .expect("register should succeed");

    assert!(registry.unregister("show_status").expect("unregister should succeed"));
    assert!(
        !registry.unregister("show_status").expect("second unregister should succeed"),
        "unregistering an absent name is a no-op"
    );
}

#[rstest]
fn blank_function_names_are_rejected(registry: InMemoryToolFunctionRegistry) {
    let error = registry
        .register(function("  ", "status"))
        .expect_err("blank name should be rejected");
    assert!(matches!(
        error,
        ToolFunctionRegistryError::InvalidDefinition(_)
    ));
}

#[rstest]
fn list_is_ordered_by_name(registry: InMemoryToolFunctionRegistry) {
    registry
        .register(function("zeta", "z"))
        .expect("register should succeed");
    registry
        .register(function("alpha", "a"))
        .expect("register should succeed");

    let names: Vec<String> = registry
        .list()
        .expect("list should succeed")
        .into_iter()
        .map(|entry| entry.definition.name)
        .collect();
    assert_eq!(names, ["alpha", "zeta"]);
}
