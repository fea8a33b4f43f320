//! Per-bean lifecycle bookkeeping: which beans are under construction (for
//! cycle detection), which singletons are ready (the instance store), the
//! order singletons were created in (for reverse-order destruction), and
//! whether the container has been closed.

use crate::bean::{BeanAnyPtr, BeanDescriptor, LifecycleHook};
use crate::error::BeanResolutionError;
use fxhash::{FxHashMap, FxHashSet};
use tracing::{debug, info};

struct DestructionRecord {
    name: String,
    instance: BeanAnyPtr,
    pre_destroy: Option<LifecycleHook>,
}

#[derive(Default)]
pub(crate) struct LifecycleManager {
    instances: FxHashMap<String, BeanAnyPtr>,
    creation_order: Vec<DestructionRecord>,
    under_construction: FxHashSet<String>,
    closed: bool,
}

impl LifecycleManager {
    pub(crate) fn ensure_open(&self) -> Result<(), BeanResolutionError> {
        if self.closed {
            Err(BeanResolutionError::ContainerClosed)
        } else {
            Ok(())
        }
    }

    pub(crate) fn cached(&self, name: &str) -> Option<BeanAnyPtr> {
        self.instances.get(name).cloned()
    }

    /// Marks a bean as under construction. Re-entering a name already being
    /// constructed means the dependency graph has a cycle.
    pub(crate) fn begin_construction(&mut self, name: &str) -> Result<(), BeanResolutionError> {
        if !self.under_construction.insert(name.to_string()) {
            return Err(BeanResolutionError::DependencyCycle(name.to_string()));
        }

        Ok(())
    }

    /// Clears the under-construction mark. A failed construction thus leaves
    /// the bean unrequested, allowing a later retry.
    pub(crate) fn end_construction(&mut self, name: &str) {
        self.under_construction.remove(name);
    }

    pub(crate) fn store_singleton(&mut self, descriptor: &BeanDescriptor, instance: BeanAnyPtr) {
        debug!("Created singleton bean: {}", descriptor.name);

        self.instances
            .insert(descriptor.name.clone(), instance.clone());
        self.creation_order.push(DestructionRecord {
            name: descriptor.name.clone(),
            instance,
            pre_destroy: descriptor.pre_destroy.clone(),
        });
    }

    /// Destroys all tracked singletons in reverse creation order, invoking
    /// pre-destroy hooks exactly once. Idempotent - the creation log is
    /// drained on the first call.
    pub(crate) fn close(&mut self) {
        if self.closed {
            return;
        }

        self.closed = true;

        info!(
            "Closing container - destroying {} singleton bean(s)...",
            self.creation_order.len()
        );

        for record in self.creation_order.drain(..).rev() {
            debug!("Destroying bean: {}", record.name);

            if let Some(pre_destroy) = &record.pre_destroy {
                pre_destroy(&record.instance);
            }
        }

        self.instances.clear();
    }
}

#[cfg(test)]
mod tests {
    use crate::bean::{identity_cast, BeanAnyPtr, BeanDescriptor, BeanPtr};
    use crate::error::BeanResolutionError;
    use crate::lifecycle::LifecycleManager;
    use std::sync::{Arc, Mutex};

    fn create_descriptor(name: &str, destroyed: &Arc<Mutex<Vec<String>>>) -> BeanDescriptor {
        let destroyed = destroyed.clone();
        let hook_name = name.to_string();

        BeanDescriptor::builder::<i8>(name, identity_cast::<i8>)
            .with_constructor(|_| Ok(BeanPtr::new(0i8) as BeanAnyPtr))
            .with_pre_destroy(move |_| destroyed.lock().unwrap().push(hook_name.clone()))
            .build()
            .unwrap()
    }

    #[test]
    fn should_cache_stored_singletons() {
        let destroyed = Default::default();
        let mut lifecycle = LifecycleManager::default();
        let instance = BeanPtr::new(0i8) as BeanAnyPtr;

        assert!(lifecycle.cached("a").is_none());

        lifecycle.store_singleton(&create_descriptor("a", &destroyed), instance.clone());

        assert!(BeanPtr::ptr_eq(&lifecycle.cached("a").unwrap(), &instance));
    }

    #[test]
    fn should_detect_construction_reentry() {
        let mut lifecycle = LifecycleManager::default();

        lifecycle.begin_construction("a").unwrap();
        assert!(matches!(
            lifecycle.begin_construction("a").unwrap_err(),
            BeanResolutionError::DependencyCycle(name) if name == "a"
        ));

        lifecycle.end_construction("a");
        lifecycle.begin_construction("a").unwrap();
    }

    #[test]
    fn should_destroy_in_reverse_creation_order_once() {
        let destroyed = Arc::new(Mutex::new(vec![]));
        let mut lifecycle = LifecycleManager::default();
        let instance = BeanPtr::new(0i8) as BeanAnyPtr;

        lifecycle.store_singleton(&create_descriptor("a", &destroyed), instance.clone());
        lifecycle.store_singleton(&create_descriptor("b", &destroyed), instance);

        lifecycle.close();
        lifecycle.close();

        assert_eq!(
            *destroyed.lock().unwrap(),
            vec!["b".to_string(), "a".to_string()]
        );
        assert!(lifecycle.ensure_open().is_err());
        assert!(lifecycle.cached("a").is_none());
    }
}
