//! Context selection
//!
//! Turns the user's intent (one context, one configuration, or everything)
//! into the ordered list of contexts to build.

use crate::core::configuration::contexts_for_configuration;
use crate::core::context::validate_context;
use crate::core::options::BuildOptions;
use crate::error::{Result, SolutionError};

/// Select the contexts to build from `catalog`
///
/// The result is always a subset of `catalog` in catalog order:
///
/// - `context` set: the validated, canonical context alone
/// - neither set: the whole catalog
/// - `configuration` set: every context whose configuration equals it
pub fn select_contexts(options: &BuildOptions, catalog: &[String]) -> Result<Vec<String>> {
    options.check_exclusive()?;

    if let Some(context) = &options.context {
        return Ok(vec![validate_context(catalog, context)?]);
    }

    let Some(configuration) = &options.configuration else {
        return Ok(catalog.to_vec());
    };

    let selected = contexts_for_configuration(catalog, configuration);
    if selected.is_empty() {
        tracing::error!("no context found for configuration '{configuration}'");
        return Err(SolutionError::not_found(format!(
            "no context found for configuration '{configuration}'"
        )));
    }
    Ok(selected)
}
