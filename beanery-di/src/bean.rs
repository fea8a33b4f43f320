//! One of the basic blocks of the container is a [BeanDescriptor] - the
//! declarative metadata for a single bean: its unique name, the capability it
//! satisfies (usually a `dyn Trait`), its [Scope], an optional qualifier tag
//! disambiguating multiple implementations of the same capability, the
//! ordered dependencies to inject, and optional lifecycle hooks.
//!
//! Descriptors are built explicitly at setup time with
//! [BeanDescriptor::builder] - there is no scanning or derive magic:
//!
//! ```
//! use beanery_di::bean::{identity_cast, BeanAnyPtr, BeanDescriptor, BeanPtr, Scope};
//!
//! struct Stopwatch;
//!
//! let descriptor = BeanDescriptor::builder::<Stopwatch>("stopwatch", identity_cast::<Stopwatch>)
//!     .with_scope(Scope::Prototype)
//!     .with_constructor(|_| Ok(BeanPtr::new(Stopwatch) as BeanAnyPtr))
//!     .build()
//!     .unwrap();
//! # let _ = descriptor;
//! ```

use crate::error::{BeanDefinitionError, BeanResolutionError, ErrorPtr};
use derivative::Derivative;
use std::any::{type_name, Any, TypeId};
use std::sync::Arc;

/// Shared pointer to a constructed bean instance.
pub type BeanPtr<T> = Arc<T>;

/// Type-erased [BeanPtr].
pub type BeanAnyPtr = BeanPtr<dyn Any + Send + Sync>;

/// Converts a type-erased instance to a `Box<BeanPtr<T>>` for the capability
/// `T` the bean was registered under, itself boxed as `Box<dyn Any>`. This
/// two-step dance is needed since it's impossible to downcast an `Any`
/// pointer directly to a `dyn Trait` pointer.
pub type CastFunction = fn(instance: BeanAnyPtr) -> Result<Box<dyn Any>, BeanAnyPtr>;

/// Constructor for type-erased instances. Receives the bean's dependencies,
/// already resolved in declaration order.
pub type ConstructorFn =
    Arc<dyn Fn(&ResolvedDependencies) -> Result<BeanAnyPtr, ErrorPtr> + Send + Sync>;

/// Callback invoked on an instance after construction or before destruction.
pub type LifecycleHook = Arc<dyn Fn(&BeanAnyPtr) + Send + Sync>;

/// Instance sharing policy for a bean.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Scope {
    /// One shared instance, owned by the container for its entire lifetime
    /// and destroyed on container close.
    Singleton,
    /// A fresh instance on every request. The container never tracks nor
    /// destroys prototype instances - ownership passes to the caller.
    Prototype,
}

/// A single dependency to inject: a capability plus an optional qualifier.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DependencyRequest {
    pub capability: TypeId,
    pub capability_name: &'static str,
    pub qualifier: Option<String>,
}

impl DependencyRequest {
    pub fn new<T: ?Sized + 'static>(qualifier: Option<&str>) -> Self {
        Self {
            capability: TypeId::of::<T>(),
            capability_name: type_name::<T>(),
            qualifier: qualifier.map(str::to_string),
        }
    }
}

/// Declarative metadata for a bean registered in a definition registry.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct BeanDescriptor {
    /// Unique name across the registry.
    pub name: String,

    /// The capability (interface) this bean satisfies, used as the primary
    /// resolution key.
    pub capability: TypeId,

    /// Human-readable capability name for diagnostics.
    pub capability_name: &'static str,

    pub scope: Scope,

    /// Secondary tag disambiguating multiple implementations of the same
    /// capability.
    pub qualifier: Option<String>,

    /// Dependencies to resolve and inject, in constructor order.
    pub dependencies: Vec<DependencyRequest>,

    #[derivative(Debug = "ignore")]
    pub constructor: ConstructorFn,

    /// Invoked once per instance, after dependency injection completes and
    /// before the instance is returned to the requester.
    #[derivative(Debug = "ignore")]
    pub post_construct: Option<LifecycleHook>,

    /// Invoked once per singleton instance during container close. Never
    /// invoked for prototypes.
    #[derivative(Debug = "ignore")]
    pub pre_destroy: Option<LifecycleHook>,

    #[derivative(Debug = "ignore")]
    pub cast: CastFunction,
}

impl BeanDescriptor {
    /// Starts building a descriptor for a bean satisfying capability `T`,
    /// with given unique name and a [CastFunction] to `T`. The default scope
    /// is [Scope::Singleton].
    pub fn builder<T: ?Sized + 'static>(name: &str, cast: CastFunction) -> BeanDescriptorBuilder {
        BeanDescriptorBuilder {
            name: name.to_string(),
            capability: TypeId::of::<T>(),
            capability_name: type_name::<T>(),
            scope: Scope::Singleton,
            qualifier: None,
            dependencies: vec![],
            constructor: None,
            post_construct: None,
            pre_destroy: None,
            cast,
        }
    }
}

/// Builder for [BeanDescriptor]s. See [BeanDescriptor::builder].
pub struct BeanDescriptorBuilder {
    name: String,
    capability: TypeId,
    capability_name: &'static str,
    scope: Scope,
    qualifier: Option<String>,
    dependencies: Vec<DependencyRequest>,
    constructor: Option<ConstructorFn>,
    post_construct: Option<LifecycleHook>,
    pre_destroy: Option<LifecycleHook>,
    cast: CastFunction,
}

impl BeanDescriptorBuilder {
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_qualifier(mut self, qualifier: &str) -> Self {
        self.qualifier = Some(qualifier.to_string());
        self
    }

    /// Declares a dependency on the single bean satisfying capability `T`.
    pub fn with_dependency<T: ?Sized + 'static>(mut self) -> Self {
        self.dependencies.push(DependencyRequest::new::<T>(None));
        self
    }

    /// Declares a dependency on the bean satisfying capability `T` tagged
    /// with given qualifier.
    pub fn with_qualified_dependency<T: ?Sized + 'static>(mut self, qualifier: &str) -> Self {
        self.dependencies
            .push(DependencyRequest::new::<T>(Some(qualifier)));
        self
    }

    pub fn with_constructor(
        mut self,
        constructor: impl Fn(&ResolvedDependencies) -> Result<BeanAnyPtr, ErrorPtr>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.constructor = Some(Arc::new(constructor));
        self
    }

    pub fn with_post_construct(mut self, hook: impl Fn(&BeanAnyPtr) + Send + Sync + 'static) -> Self {
        self.post_construct = Some(Arc::new(hook));
        self
    }

    pub fn with_pre_destroy(mut self, hook: impl Fn(&BeanAnyPtr) + Send + Sync + 'static) -> Self {
        self.pre_destroy = Some(Arc::new(hook));
        self
    }

    pub fn build(self) -> Result<BeanDescriptor, BeanDefinitionError> {
        let constructor = self
            .constructor
            .ok_or(BeanDefinitionError::MissingConstructor(self.name.clone()))?;

        Ok(BeanDescriptor {
            name: self.name,
            capability: self.capability,
            capability_name: self.capability_name,
            scope: self.scope,
            qualifier: self.qualifier,
            dependencies: self.dependencies,
            constructor,
            post_construct: self.post_construct,
            pre_destroy: self.pre_destroy,
            cast: self.cast,
        })
    }
}

/// View over a bean's dependencies resolved by the container, in declaration
/// order, passed to the bean's constructor.
pub struct ResolvedDependencies<'a> {
    resolved: &'a [(BeanAnyPtr, CastFunction)],
}

impl<'a> ResolvedDependencies<'a> {
    pub(crate) fn new(resolved: &'a [(BeanAnyPtr, CastFunction)]) -> Self {
        Self { resolved }
    }

    /// Returns the dependency declared at `index`, cast to its capability `T`.
    pub fn get<T: ?Sized + 'static>(&self, index: usize) -> Result<BeanPtr<T>, ErrorPtr> {
        let (instance, cast) = self
            .resolved
            .get(index)
            .ok_or_else(|| Arc::new(BeanResolutionError::MissingDependency(index)) as ErrorPtr)?;

        cast(instance.clone())
            .ok()
            .and_then(|boxed| boxed.downcast::<BeanPtr<T>>().ok())
            .map(|ptr| *ptr)
            .ok_or_else(|| {
                Arc::new(BeanResolutionError::IncompatibleBean(
                    type_name::<T>().to_string(),
                )) as ErrorPtr
            })
    }

    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

/// Ready-made [CastFunction] for beans registered under their concrete type
/// instead of a `dyn Trait` capability.
pub fn identity_cast<T: Send + Sync + 'static>(
    instance: BeanAnyPtr,
) -> Result<Box<dyn Any>, BeanAnyPtr> {
    instance
        .downcast::<T>()
        .map(|instance| Box::new(instance) as Box<dyn Any>)
}

#[cfg(test)]
mod tests {
    use crate::bean::{
        identity_cast, BeanAnyPtr, BeanDescriptor, BeanPtr, CastFunction, ResolvedDependencies,
        Scope,
    };
    use crate::error::BeanDefinitionError;

    struct TestBean(i32);

    #[test]
    fn should_build_descriptor_with_defaults() {
        let descriptor =
            BeanDescriptor::builder::<TestBean>("test_bean", identity_cast::<TestBean>)
                .with_constructor(|_| Ok(BeanPtr::new(TestBean(1)) as BeanAnyPtr))
                .build()
                .unwrap();

        assert_eq!(descriptor.name, "test_bean");
        assert_eq!(descriptor.scope, Scope::Singleton);
        assert!(descriptor.qualifier.is_none());
        assert!(descriptor.dependencies.is_empty());
    }

    #[test]
    fn should_reject_descriptor_without_constructor() {
        assert_eq!(
            BeanDescriptor::builder::<TestBean>("test_bean", identity_cast::<TestBean>)
                .build()
                .unwrap_err(),
            BeanDefinitionError::MissingConstructor("test_bean".to_string())
        );
    }

    #[test]
    fn should_track_qualified_dependencies_in_order() {
        let descriptor =
            BeanDescriptor::builder::<TestBean>("test_bean", identity_cast::<TestBean>)
                .with_dependency::<i8>()
                .with_qualified_dependency::<u8>("tag")
                .with_constructor(|_| Ok(BeanPtr::new(TestBean(1)) as BeanAnyPtr))
                .build()
                .unwrap();

        assert_eq!(descriptor.dependencies.len(), 2);
        assert_eq!(descriptor.dependencies[0].qualifier, None);
        assert_eq!(
            descriptor.dependencies[1].qualifier,
            Some("tag".to_string())
        );
    }

    #[test]
    fn should_access_resolved_dependencies_by_index() {
        let resolved = [(
            BeanPtr::new(TestBean(42)) as BeanAnyPtr,
            identity_cast::<TestBean> as CastFunction,
        )];
        let dependencies = ResolvedDependencies::new(&resolved);

        assert_eq!(dependencies.len(), 1);
        assert_eq!(dependencies.get::<TestBean>(0).unwrap().0, 42);
        assert!(dependencies.get::<TestBean>(1).is_err());
        assert!(dependencies.get::<i8>(0).is_err());
    }
}
