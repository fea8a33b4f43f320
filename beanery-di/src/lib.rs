//! A minimal bean container: beans are registered as explicit descriptors and
//! resolved by capability (usually a `dyn Trait`) with an optional qualifier
//! tag. Supports [singleton and prototype scopes](bean::Scope) and
//! post-construct/pre-destroy lifecycle hooks with deterministic ordering.
//!
//! ```
//! use beanery_di::bean::{identity_cast, BeanAnyPtr, BeanDescriptor, BeanPtr};
//! use beanery_di::container::BeanContainer;
//!
//! struct Greeter;
//!
//! let mut container = BeanContainer::new();
//! container
//!     .register(
//!         BeanDescriptor::builder::<Greeter>("greeter", identity_cast::<Greeter>)
//!             .with_constructor(|_| Ok(BeanPtr::new(Greeter) as BeanAnyPtr))
//!             .build()
//!             .unwrap(),
//!     )
//!     .unwrap();
//!
//! let greeter = container.bean::<Greeter>().unwrap();
//! # let _ = greeter;
//! container.close();
//! ```

pub mod bean;
pub mod container;
pub mod error;
mod lifecycle;
pub mod registry;
pub mod resolver;
