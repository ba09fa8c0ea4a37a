//! Test utilities
//!
//! Generators for proptest, and a recording command runner that stands in
//! for the external tools.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// Generate a context token (no `.` or `+`)
    pub fn token() -> impl Strategy<Value = String> {
        "[A-Za-z][A-Za-z0-9_-]{0,12}"
    }

    /// Generate a well-formed context string, with or without build type
    pub fn context_string() -> impl Strategy<Value = String> {
        (token(), proptest::option::of(token()), token()).prop_map(|(project, build, target)| {
            match build {
                Some(build) => format!("{project}.{build}+{target}"),
                None => format!("{project}+{target}"),
            }
        })
    }

    /// Generate a catalog of contexts drawn from a small vocabulary, so
    /// that configurations repeat across projects
    pub fn catalog() -> impl Strategy<Value = Vec<String>> {
        let project = prop_oneof![Just("App"), Just("Lib"), Just("Test")];
        let build = prop_oneof![Just(None), Just(Some("Debug")), Just(Some("Release"))];
        let target = prop_oneof![Just("Board"), Just("Sim")];
        proptest::collection::vec((project, build, target), 0..12).prop_map(|entries| {
            let mut contexts: Vec<String> = Vec::new();
            for (project, build, target) in entries {
                let context = match build {
                    Some(build) => format!("{project}.{build}+{target}"),
                    None => format!("{project}+{target}"),
                };
                if !contexts.contains(&context) {
                    contexts.push(context);
                }
            }
            contexts
        })
    }
}

#[cfg(test)]
pub mod fakes {
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    use crate::config::defaults::BIN_EXTENSION;
    use crate::error::{Result, SolutionError};
    use crate::infra::process::{tool_name, CommandRunner};
    use crate::infra::tools::ToolPaths;

    /// One recorded tool invocation
    #[derive(Debug, Clone)]
    pub struct Call {
        pub program: PathBuf,
        pub tool: String,
        pub args: Vec<String>,
        pub quiet: bool,
    }

    impl Call {
        /// Tool name followed by its arguments
        pub fn line(&self) -> String {
            format!("{} {}", self.tool, self.args.join(" "))
        }
    }

    /// Runner that records calls and answers from canned responses
    ///
    /// Responses and failures are keyed by a substring of the call line.
    #[derive(Default)]
    pub struct RecordingRunner {
        calls: RefCell<Vec<Call>>,
        responses: Vec<(String, String)>,
        failures: Vec<String>,
    }

    impl RecordingRunner {
        pub fn new() -> Self {
            Self::default()
        }

        /// Answer calls whose line contains `pattern` with `output`
        #[must_use]
        pub fn respond(mut self, pattern: &str, output: &str) -> Self {
            self.responses.push((pattern.to_string(), output.to_string()));
            self
        }

        /// Fail calls whose line contains `pattern`
        #[must_use]
        pub fn fail_on(mut self, pattern: &str) -> Self {
            self.failures.push(pattern.to_string());
            self
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        /// Lines of all calls made so far
        pub fn lines(&self) -> Vec<String> {
            self.calls.borrow().iter().map(Call::line).collect()
        }
    }

    impl CommandRunner for RecordingRunner {
        fn execute(&self, program: &Path, args: &[String], quiet: bool) -> Result<String> {
            let call = Call {
                program: program.to_path_buf(),
                tool: tool_name(program),
                args: args.to_vec(),
                quiet,
            };
            let line = call.line();
            self.calls.borrow_mut().push(call);

            if self.failures.iter().any(|p| line.contains(p.as_str())) {
                return Err(SolutionError::ToolExecution {
                    tool: tool_name(program),
                    message: "exit status 1".to_string(),
                });
            }

            Ok(self
                .responses
                .iter()
                .find(|(p, _)| line.contains(p.as_str()))
                .map(|(_, out)| out.clone())
                .unwrap_or_default())
        }
    }

    /// Temporary tool directory containing empty stand-ins for `tools`
    pub fn tool_dir(tools: &[&str]) -> (TempDir, ToolPaths) {
        let dir = TempDir::new().unwrap();
        for tool in tools {
            std::fs::write(dir.path().join(format!("{tool}{BIN_EXTENSION}")), "").unwrap();
        }
        let paths = ToolPaths::new(dir.path());
        (dir, paths)
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_token_generator(token in token()) {
            prop_assert!(!token.is_empty());
            prop_assert!(!token.contains('.') && !token.contains('+'));
        }

        #[test]
        fn test_context_string_generator(context in context_string()) {
            prop_assert_eq!(context.matches('+').count(), 1);
        }

        #[test]
        fn test_catalog_generator_is_unique(catalog in catalog()) {
            let mut sorted = catalog.clone();
            sorted.sort();
            sorted.dedup();
            prop_assert_eq!(sorted.len(), catalog.len());
        }
    }
}
