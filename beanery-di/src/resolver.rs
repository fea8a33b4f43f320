//! Selection of a single bean definition for a requested capability and
//! optional qualifier.

use crate::bean::BeanDescriptor;
use crate::error::BeanResolutionError;
use crate::registry::BeanDefinitionRegistry;
use itertools::Itertools;
use std::any::TypeId;

/// Picks the definition satisfying given capability and qualifier.
///
/// With a qualifier, only definitions tagged with exactly that qualifier are
/// considered. Without one, all definitions for the capability are. In both
/// cases resolution succeeds only when exactly one candidate remains: zero
/// candidates is [BeanResolutionError::NoSuchBean], more than one is
/// [BeanResolutionError::AmbiguousResolution].
pub fn resolve(
    registry: &dyn BeanDefinitionRegistry,
    capability: TypeId,
    capability_name: &str,
    qualifier: Option<&str>,
) -> Result<BeanDescriptor, BeanResolutionError> {
    let candidates = registry
        .descriptors_by_capability(capability)
        .into_iter()
        .filter(|descriptor| match qualifier {
            Some(qualifier) => descriptor.qualifier.as_deref() == Some(qualifier),
            None => true,
        })
        .collect_vec();

    if candidates.len() > 1 {
        return Err(BeanResolutionError::AmbiguousResolution {
            capability: capability_name.to_string(),
            qualifier: qualifier.map(str::to_string),
            candidates: candidates
                .iter()
                .map(|descriptor| descriptor.name.clone())
                .collect_vec(),
        });
    }

    candidates
        .into_iter()
        .next()
        .ok_or_else(|| BeanResolutionError::NoSuchBean {
            capability: capability_name.to_string(),
            qualifier: qualifier.map(str::to_string),
        })
}
