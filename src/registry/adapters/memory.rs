//! In-memory tool function registry adapter.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::registry::domain::RegisteredFunction;
use crate::registry::ports::{
    ToolFunctionRegistry, ToolFunctionRegistryError, ToolFunctionRegistryResult,
};

/// Thread-safe in-memory tool function registry.
#[derive(Debug, Clone, Default)]
pub struct InMemoryToolFunctionRegistry {
    functions: Arc<RwLock<HashMap<String, RegisteredFunction>>>,
}

impl InMemoryToolFunctionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn unavailable(err: impl std::fmt::Display) -> ToolFunctionRegistryError {
    ToolFunctionRegistryError::Unavailable(err.to_string())
}

impl ToolFunctionRegistry for InMemoryToolFunctionRegistry {
    fn register(&self, function: RegisteredFunction) -> ToolFunctionRegistryResult<bool> {
        if function.name().trim().is_empty() {
            return Err(ToolFunctionRegistryError::InvalidDefinition(
                "function name must not be empty".to_owned(),
            ));
        }
        let mut functions = self.functions.write().map_err(unavailable)?;
        let name = function.name().to_owned();
        Ok(functions.insert(name, function).is_none())
    }

    fn unregister(&self, function_name: &str) -> ToolFunctionRegistryResult<bool> {
        let mut functions = self.functions.write().map_err(unavailable)?;
        Ok(functions.remove(function_name).is_some())
    }

    fn find_by_name(
        &self,
        function_name: &str,
    ) -> ToolFunctionRegistryResult<Option<RegisteredFunction>> {
        let functions = self.functions.read().map_err(unavailable)?;
        Ok(functions.get(function_name).cloned())
    }

    fn list(&self) -> ToolFunctionRegistryResult<Vec<RegisteredFunction>> {
        let functions = self.functions.read().map_err(unavailable)?;
        let mut listed: Vec<_> = functions.values().cloned().collect();
        listed.sort_by(|left, right| left.definition.name.cmp(&right.definition.name));
        Ok(listed)
    }
}
