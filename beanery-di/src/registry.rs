//! Functionality related to registering bean definitions. The
//! [container](crate::container) creates instances based on those
//! definitions, which are registered explicitly during a setup phase.

use crate::bean::BeanDescriptor;
use crate::error::BeanDefinitionError;
use fxhash::FxHashMap;
#[cfg(test)]
use mockall::automock;
use std::any::TypeId;

pub type BeanDefinitionRegistryPtr = Box<dyn BeanDefinitionRegistry + Send + Sync>;

/// A registry of bean definitions which can be used when requesting instances
/// from a [BeanContainer](crate::container::BeanContainer).
#[cfg_attr(test, automock)]
pub trait BeanDefinitionRegistry {
    /// Adds a new definition. Bean names are unique, so registering a
    /// duplicate name is an error.
    fn register(&mut self, descriptor: BeanDescriptor) -> Result<(), BeanDefinitionError>;

    /// Returns the definition with given name.
    fn descriptor_by_name(&self, name: &str) -> Option<BeanDescriptor>;

    /// Returns all registered definitions satisfying given capability.
    fn descriptors_by_capability(&self, capability: TypeId) -> Vec<BeanDescriptor>;

    /// Checks if there's a definition with given name.
    fn is_name_registered(&self, name: &str) -> bool;
}

/// [BeanDefinitionRegistry] backed by plain in-memory maps.
#[derive(Default, Clone, Debug)]
pub struct StaticBeanDefinitionRegistry {
    definitions: FxHashMap<TypeId, Vec<BeanDescriptor>>,
    names: FxHashMap<String, (TypeId, usize)>,
}

impl BeanDefinitionRegistry for StaticBeanDefinitionRegistry {
    fn register(&mut self, descriptor: BeanDescriptor) -> Result<(), BeanDefinitionError> {
        if self.names.contains_key(&descriptor.name) {
            return Err(BeanDefinitionError::DuplicateBeanName(descriptor.name));
        }

        let entries = self.definitions.entry(descriptor.capability).or_default();
        self.names
            .insert(descriptor.name.clone(), (descriptor.capability, entries.len()));
        entries.push(descriptor);

        Ok(())
    }

    fn descriptor_by_name(&self, name: &str) -> Option<BeanDescriptor> {
        self.names
            .get(name)
            .and_then(|(capability, index)| {
                self.definitions
                    .get(capability)
                    .and_then(|descriptors| descriptors.get(*index))
            })
            .cloned()
    }

    fn descriptors_by_capability(&self, capability: TypeId) -> Vec<BeanDescriptor> {
        self.definitions
            .get(&capability)
            .cloned()
            .unwrap_or_default()
    }

    #[inline]
    fn is_name_registered(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }
}
