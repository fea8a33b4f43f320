//! Core functionality for creating bean instances. The [BeanContainer] is the
//! public facade composing the definition registry, the resolver and the
//! lifecycle manager: register descriptors during setup, request beans by
//! capability/qualifier or by name, then close the container to destroy the
//! singletons it owns.

use crate::bean::{
    BeanAnyPtr, BeanDescriptor, BeanPtr, CastFunction, DependencyRequest, ResolvedDependencies,
    Scope,
};
use crate::error::{BeanDefinitionError, BeanResolutionError};
use crate::lifecycle::LifecycleManager;
use crate::registry::{
    BeanDefinitionRegistry, BeanDefinitionRegistryPtr, StaticBeanDefinitionRegistry,
};
use crate::resolver;
use std::any::{type_name, TypeId};
use tracing::debug;

/// A container with an explicit lifetime, created and closed by its owner.
/// Mutating operations take `&mut self`, so one container serves one control
/// flow at a time; instances themselves are shared pointers and may outlive
/// requests (or, for prototypes, the container).
pub struct BeanContainer {
    registry: BeanDefinitionRegistryPtr,
    lifecycle: LifecycleManager,
}

impl Default for BeanContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl BeanContainer {
    /// Creates an empty container backed by a
    /// [StaticBeanDefinitionRegistry](crate::registry::StaticBeanDefinitionRegistry).
    pub fn new() -> Self {
        Self::with_registry(Box::<StaticBeanDefinitionRegistry>::default())
    }

    /// Creates an empty container backed by given registry.
    pub fn with_registry(registry: BeanDefinitionRegistryPtr) -> Self {
        Self {
            registry,
            lifecycle: LifecycleManager::default(),
        }
    }

    /// Adds a new bean definition.
    pub fn register(&mut self, descriptor: BeanDescriptor) -> Result<(), BeanDefinitionError> {
        self.registry.register(descriptor)
    }

    /// Returns the instance of the single bean satisfying capability `T`.
    pub fn bean<T: ?Sized + 'static>(&mut self) -> Result<BeanPtr<T>, BeanResolutionError> {
        self.bean_internal(None)
    }

    /// Returns the instance of the bean satisfying capability `T` tagged with
    /// given qualifier.
    pub fn bean_with_qualifier<T: ?Sized + 'static>(
        &mut self,
        qualifier: &str,
    ) -> Result<BeanPtr<T>, BeanResolutionError> {
        self.bean_internal(Some(qualifier))
    }

    /// Returns the instance of the bean with given name, cast to its
    /// capability `T`.
    pub fn bean_by_name<T: ?Sized + 'static>(
        &mut self,
        name: &str,
    ) -> Result<BeanPtr<T>, BeanResolutionError> {
        let (instance, cast) = self.instance_by_name(name)?;
        Self::cast_instance(instance, cast)
    }

    /// Type-erased version of [BeanContainer::bean_by_name].
    pub fn instance_by_name(
        &mut self,
        name: &str,
    ) -> Result<(BeanAnyPtr, CastFunction), BeanResolutionError> {
        self.lifecycle.ensure_open()?;

        let descriptor = self
            .registry
            .descriptor_by_name(name)
            .ok_or_else(|| BeanResolutionError::NoSuchBeanName(name.to_string()))?;

        self.instance_for(&descriptor)
    }

    /// Destroys all singletons this container created, in reverse creation
    /// order, invoking their pre-destroy hooks exactly once. Any later bean
    /// request fails with [BeanResolutionError::ContainerClosed]. Closing an
    /// already closed container is a no-op.
    pub fn close(&mut self) {
        self.lifecycle.close();
    }

    fn bean_internal<T: ?Sized + 'static>(
        &mut self,
        qualifier: Option<&str>,
    ) -> Result<BeanPtr<T>, BeanResolutionError> {
        self.lifecycle.ensure_open()?;

        let descriptor = resolver::resolve(
            &*self.registry,
            TypeId::of::<T>(),
            type_name::<T>(),
            qualifier,
        )?;
        let (instance, cast) = self.instance_for(&descriptor)?;

        Self::cast_instance(instance, cast)
    }

    fn instance_for(
        &mut self,
        descriptor: &BeanDescriptor,
    ) -> Result<(BeanAnyPtr, CastFunction), BeanResolutionError> {
        // only singletons are ever cached
        if let Some(instance) = self.lifecycle.cached(&descriptor.name) {
            return Ok((instance, descriptor.cast));
        }

        self.lifecycle.begin_construction(&descriptor.name)?;
        let result = self.construct(descriptor);
        self.lifecycle.end_construction(&descriptor.name);

        let instance = result?;

        if descriptor.scope == Scope::Singleton {
            self.lifecycle.store_singleton(descriptor, instance.clone());
        }

        Ok((instance, descriptor.cast))
    }

    fn construct(
        &mut self,
        descriptor: &BeanDescriptor,
    ) -> Result<BeanAnyPtr, BeanResolutionError> {
        debug!("Constructing bean: {}", descriptor.name);

        let mut resolved = Vec::with_capacity(descriptor.dependencies.len());
        for request in &descriptor.dependencies {
            resolved.push(self.resolve_dependency(request)?);
        }

        let instance = (descriptor.constructor)(&ResolvedDependencies::new(&resolved)).map_err(
            |source| BeanResolutionError::BeanConstruction {
                name: descriptor.name.clone(),
                source,
            },
        )?;

        if let Some(post_construct) = &descriptor.post_construct {
            post_construct(&instance);
        }

        Ok(instance)
    }

    fn resolve_dependency(
        &mut self,
        request: &DependencyRequest,
    ) -> Result<(BeanAnyPtr, CastFunction), BeanResolutionError> {
        let descriptor = resolver::resolve(
            &*self.registry,
            request.capability,
            request.capability_name,
            request.qualifier.as_deref(),
        )?;

        self.instance_for(&descriptor)
    }

    fn cast_instance<T: ?Sized + 'static>(
        instance: BeanAnyPtr,
        cast: CastFunction,
    ) -> Result<BeanPtr<T>, BeanResolutionError> {
        cast(instance)
            .ok()
            .and_then(|boxed| boxed.downcast::<BeanPtr<T>>().ok())
            .map(|ptr| *ptr)
            .ok_or_else(|| BeanResolutionError::IncompatibleBean(type_name::<T>().to_string()))
    }
}
