//! Configuration extraction
//!
//! A configuration is the `[.build]+target` suffix that contexts of
//! different projects share. It starts at the first `.` of a context, or at
//! the first `+` when there is no `.`.

use crate::core::context::{BUILD_TYPE_DELIMITER, TARGET_TYPE_DELIMITER};
use crate::error::{Result, SolutionError};

/// Configuration suffix of a context, if it has one
pub fn configuration_of(context: &str) -> Option<&str> {
    context
        .find(BUILD_TYPE_DELIMITER)
        .or_else(|| context.find(TARGET_TYPE_DELIMITER))
        .map(|idx| &context[idx..])
}

/// Unique configurations of a catalog, in first-occurrence order
///
/// With a filter only configurations containing it are kept, and an empty
/// result is an error. Without a filter an empty result is fine.
pub fn list_configurations(catalog: &[String], filter: Option<&str>) -> Result<Vec<String>> {
    let filter = filter.filter(|f| !f.is_empty());
    let mut configurations: Vec<String> = Vec::new();

    for config in catalog.iter().filter_map(|c| configuration_of(c)) {
        if filter.is_some_and(|f| !config.contains(f)) {
            continue;
        }
        if !configurations.iter().any(|c| c == config) {
            configurations.push(config.to_string());
        }
    }

    if configurations.is_empty() {
        if let Some(filter) = filter {
            tracing::error!("no configuration was found with filter '{filter}'");
            return Err(SolutionError::not_found(format!(
                "no configuration was found with filter '{filter}'"
            )));
        }
        tracing::info!("no configuration found");
    }

    Ok(configurations)
}

/// Contexts of `catalog` whose configuration equals `configuration`
///
/// Catalog order is preserved.
pub fn contexts_for_configuration(catalog: &[String], configuration: &str) -> Vec<String> {
    catalog
        .iter()
        .filter(|c| configuration_of(c) == Some(configuration))
        .cloned()
        .collect()
}
