use crate::domain::ports::PackageCalculator;
use std::collections::HashMap;
use std::sync::Arc;

/// Named package calculation hooks, looked up by `method.package_calculation`.
#[derive(Clone, Default)]
pub struct PackageHookRegistry {
    hooks: HashMap<String, Arc<dyn PackageCalculator>>,
}

impl PackageHookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, name: impl Into<String>, hook: impl PackageCalculator + 'static) -> Self {
        self.hooks.insert(name.into(), Arc::new(hook));
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn PackageCalculator>> {
        self.hooks.get(name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.hooks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for PackageHookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageHookRegistry")
            .field("hooks", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Order, OrderShipment, RateRequest};

    fn decline(_: RateRequest, _: &Order, _: &OrderShipment) -> Option<RateRequest> {
        None
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = PackageHookRegistry::new()
            .register("decline", decline)
            .register("passthrough", |request: RateRequest, _: &Order, _: &OrderShipment| {
                Some(request)
            });

        assert!(registry.get("decline").is_some());
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.names(), vec!["decline", "passthrough"]);
    }
}
