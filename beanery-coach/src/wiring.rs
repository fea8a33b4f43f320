//! Setup-time wiring: the descriptor table registering the coaching beans.
//! This is the explicit, code-based equivalent of a declarative
//! configuration file.

use crate::coach::{Coach, CoachPtr, TennisCoach};
use crate::fortune::{
    FileFortuneService, FixedFortuneService, FortuneService, FortuneServicePtr,
};
use beanery_di::bean::{BeanAnyPtr, BeanDescriptor, BeanPtr, Scope};
use beanery_di::container::BeanContainer;
use beanery_di::error::{BeanDefinitionError, ErrorPtr};
use std::any::Any;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Qualifier tag of the file-backed fortune provider.
pub const FILE_QUALIFIER: &str = "file";

/// Qualifier tag of the fixed-list fortune provider.
pub const FIXED_QUALIFIER: &str = "fixed";

fn file_fortune_cast(instance: BeanAnyPtr) -> Result<Box<dyn Any>, BeanAnyPtr> {
    instance
        .downcast::<FileFortuneService>()
        .map(|instance| Box::new(instance as FortuneServicePtr) as Box<dyn Any>)
}

fn fixed_fortune_cast(instance: BeanAnyPtr) -> Result<Box<dyn Any>, BeanAnyPtr> {
    instance
        .downcast::<FixedFortuneService>()
        .map(|instance| Box::new(instance as FortuneServicePtr) as Box<dyn Any>)
}

fn coach_cast(instance: BeanAnyPtr) -> Result<Box<dyn Any>, BeanAnyPtr> {
    instance
        .downcast::<TennisCoach>()
        .map(|instance| Box::new(instance as CoachPtr) as Box<dyn Any>)
}

/// Registers both fortune providers (qualifiers [FILE_QUALIFIER] and
/// [FIXED_QUALIFIER]) and a singleton coach wired to the file-backed one,
/// reading its fortunes from `fortune_file`. The file is only touched when
/// the coach (or the provider) is first requested.
pub fn register_coaching_beans(
    container: &mut BeanContainer,
    fortune_file: &Path,
) -> Result<(), BeanDefinitionError> {
    let path = fortune_file.to_path_buf();

    container.register(
        BeanDescriptor::builder::<dyn FortuneService + Send + Sync>(
            "file_fortune_service",
            file_fortune_cast,
        )
        .with_qualifier(FILE_QUALIFIER)
        .with_constructor(move |_| {
            FileFortuneService::from_file(&path)
                .map(|service| BeanPtr::new(service) as BeanAnyPtr)
                .map_err(|error| Arc::new(error) as ErrorPtr)
        })
        .build()?,
    )?;

    container.register(
        BeanDescriptor::builder::<dyn FortuneService + Send + Sync>(
            "fixed_fortune_service",
            fixed_fortune_cast,
        )
        .with_qualifier(FIXED_QUALIFIER)
        .with_constructor(|_| Ok(BeanPtr::new(FixedFortuneService) as BeanAnyPtr))
        .build()?,
    )?;

    container.register(
        BeanDescriptor::builder::<dyn Coach + Send + Sync>("tennis_coach", coach_cast)
            .with_qualified_dependency::<dyn FortuneService + Send + Sync>(FILE_QUALIFIER)
            .with_constructor(|dependencies| {
                let fortune_service =
                    dependencies.get::<dyn FortuneService + Send + Sync>(0)?;
                Ok(BeanPtr::new(TennisCoach::new(fortune_service)) as BeanAnyPtr)
            })
            .with_post_construct(|_| debug!("TennisCoach is ready for practice"))
            .with_pre_destroy(|_| debug!("TennisCoach is leaving the court"))
            .build()?,
    )?;

    Ok(())
}

/// Registers the fixed-list fortune provider and a prototype-scoped coach
/// wired to it - every request yields a fresh coach the container never
/// tracks nor destroys.
pub fn register_prototype_coach(
    container: &mut BeanContainer,
) -> Result<(), BeanDefinitionError> {
    container.register(
        BeanDescriptor::builder::<dyn FortuneService + Send + Sync>(
            "fixed_fortune_service",
            fixed_fortune_cast,
        )
        .with_qualifier(FIXED_QUALIFIER)
        .with_constructor(|_| Ok(BeanPtr::new(FixedFortuneService) as BeanAnyPtr))
        .build()?,
    )?;

    container.register(
        BeanDescriptor::builder::<dyn Coach + Send + Sync>("prototype_coach", coach_cast)
            .with_scope(Scope::Prototype)
            .with_qualified_dependency::<dyn FortuneService + Send + Sync>(FIXED_QUALIFIER)
            .with_constructor(|dependencies| {
                let fortune_service =
                    dependencies.get::<dyn FortuneService + Send + Sync>(0)?;
                Ok(BeanPtr::new(TennisCoach::new(fortune_service)) as BeanAnyPtr)
            })
            .build()?,
    )?;

    Ok(())
}
