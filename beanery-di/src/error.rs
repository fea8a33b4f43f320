use std::error::Error;
use std::sync::Arc;
use thiserror::Error;

/// Type-erased error pointer for propagating collaborator failures, e.g. from
/// bean constructors.
pub type ErrorPtr = Arc<dyn Error + Send + Sync>;

/// Errors related to registering bean definitions.
#[derive(Error, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum BeanDefinitionError {
    #[error("Attempted to register a duplicated bean with name: {0}")]
    DuplicateBeanName(String),
    #[error("Bean descriptor '{0}' is missing a constructor")]
    MissingConstructor(String),
}

/// Errors related to resolving and creating bean instances.
#[derive(Error, Clone, Debug)]
pub enum BeanResolutionError {
    #[error("Cannot find a bean for capability '{capability}' with qualifier {qualifier:?}")]
    NoSuchBean {
        capability: String,
        qualifier: Option<String>,
    },
    #[error("Multiple beans {candidates:?} satisfy capability '{capability}' with qualifier {qualifier:?}")]
    AmbiguousResolution {
        capability: String,
        qualifier: Option<String>,
        candidates: Vec<String>,
    },
    #[error("Cannot find a bean named: {0}")]
    NoSuchBeanName(String),
    #[error("Dependency cycle detected involving bean: {0}")]
    DependencyCycle(String),
    #[error("Bean requested from a closed container")]
    ContainerClosed,
    #[error("Tried to cast a bean to incompatible type: {0}")]
    IncompatibleBean(String),
    #[error("No resolved dependency at index {0}")]
    MissingDependency(usize),
    #[error("Error constructing bean '{name}': {source}")]
    BeanConstruction { name: String, source: ErrorPtr },
}
