//! Solution build orchestration
//!
//! Sequences a solution build: resolve the contexts to build, optionally
//! install missing packs, convert the solution once, then hand each
//! selected context to the per-project builder. The first failure ends the
//! run; nothing already done is undone.

use std::path::{Path, PathBuf};

use crate::core::catalog::{CompilerTool, ContextOrder};
use crate::core::configuration::list_configurations;
use crate::core::context::parse_context;
use crate::core::index::locate_descriptor;
use crate::core::layout::{self, ContextDirs};
use crate::core::options::BuildOptions;
use crate::core::packs::install_missing_packs;
use crate::core::phase::{BuildPhase, PhaseTracker};
use crate::core::project::{ProjectBuildRequest, ProjectBuilder};
use crate::core::selector::select_contexts;
use crate::error::{Result, SolutionError};
use crate::infra::process::CommandRunner;
use crate::infra::tools::ToolPaths;

/// Resolved selection for one build run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Full catalog in declaration order
    pub catalog: Vec<String>,
    /// Contexts to build, in catalog order
    pub contexts: Vec<String>,
    /// Options with the requested context in canonical form
    pub options: BuildOptions,
}

/// Outcome of a successful build
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Contexts that were selected
    pub selected: Vec<String>,
    /// Packs installed before conversion
    pub installed_packs: Vec<String>,
    /// Contexts handed to the project builder, in order
    pub processed: Vec<String>,
    /// Phases the build went through
    pub phases: Vec<BuildPhase>,
}

/// Drives one solution through list and build operations
pub struct SolutionBuilder<'a> {
    runner: &'a dyn CommandRunner,
    tools: &'a ToolPaths,
    solution: PathBuf,
    options: BuildOptions,
}

impl<'a> SolutionBuilder<'a> {
    /// Create a builder for `solution`
    ///
    /// The runner is expected to carry the tool environment prepared by
    /// [`ToolPaths::child_environment`].
    pub fn new(
        runner: &'a dyn CommandRunner,
        tools: &'a ToolPaths,
        solution: impl Into<PathBuf>,
        options: BuildOptions,
    ) -> Self {
        Self {
            runner,
            tools,
            solution: solution.into(),
            options,
        }
    }

    /// Solution file this builder works on
    pub fn solution(&self) -> &Path {
        &self.solution
    }

    fn compiler<'s>(&'s self, options: &'s BuildOptions) -> CompilerTool<'s> {
        CompilerTool::new(self.runner, self.tools, &self.solution, options)
    }

    /// List the solution's contexts, echoing the tool output
    pub fn list_contexts(&self, quiet: bool, order: ContextOrder) -> Result<Vec<String>> {
        self.compiler(&self.options).list_contexts(quiet, order)
    }

    /// List the toolchains, echoing the tool output
    pub fn list_toolchains(&self, quiet: bool) -> Result<Vec<String>> {
        self.compiler(&self.options).list_toolchains(quiet)
    }

    /// Unique configurations of the solution, narrowed by the filter option
    ///
    /// The filter is applied to configurations here, not passed on to the
    /// compiler tool.
    pub fn list_configurations(&self) -> Result<Vec<String>> {
        let unfiltered = self.options.without_filter();
        let catalog = self
            .compiler(&unfiltered)
            .list_contexts(true, ContextOrder::Natural)
            .map_err(|e| {
                tracing::error!("processing configurations list failed");
                e
            })?;
        list_configurations(&catalog, self.options.filter.as_deref())
    }

    /// Resolve the contexts to build
    ///
    /// Conflicting options fail before any tool runs.
    pub fn select(&self) -> Result<Selection> {
        self.options.check_exclusive()?;

        let catalog = self
            .compiler(&self.options)
            .list_contexts(true, ContextOrder::Declaration)
            .map_err(|e| {
                tracing::error!("error getting list of contexts: {e}");
                e
            })?;

        let contexts = select_contexts(&self.options, &catalog)?;

        let options = match &self.options.context {
            Some(_) => BuildOptions {
                context: contexts.first().cloned(),
                ..self.options.clone()
            },
            None => self.options.clone(),
        };

        Ok(Selection {
            catalog,
            contexts,
            options,
        })
    }

    /// Build the selected contexts
    pub fn build(&self, project_builder: &dyn ProjectBuilder) -> Result<BuildReport> {
        let mut tracker = PhaseTracker::new();
        tracing::debug!("tool directory: {}", self.tools.bin_path.display());

        match self.run_phases(project_builder, &mut tracker) {
            Ok(mut report) => {
                tracker.advance(BuildPhase::Done);
                report.phases = tracker.history().to_vec();
                Ok(report)
            }
            Err(e) => {
                tracing::error!("build failed during {}: {e}", tracker.current());
                tracker.advance(BuildPhase::Failed);
                Err(e)
            }
        }
    }

    fn run_phases(
        &self,
        project_builder: &dyn ProjectBuilder,
        tracker: &mut PhaseTracker,
    ) -> Result<BuildReport> {
        let selection = self.select()?;
        tracker.advance(BuildPhase::Selected);

        let compiler = self.compiler(&selection.options);
        let convert_args = compiler.args_for(&["convert"])?;

        let mut report = BuildReport {
            selected: selection.contexts.clone(),
            ..BuildReport::default()
        };

        if selection.options.packs {
            report.installed_packs = install_missing_packs(&compiler, self.runner, self.tools)
                .map_err(|e| {
                    tracing::error!("error installing missing packs: {e}");
                    e
                })?;
            tracker.advance(BuildPhase::PacksInstalled);
        }

        compiler.execute(&convert_args, selection.options.quiet)?;
        tracker.advance(BuildPhase::Converted);

        for (i, context) in selection.contexts.iter().enumerate() {
            tracker.advance(BuildPhase::Processing(i));
            self.process_context(&selection.options, context, project_builder)?;
            report.processed.push(context.clone());
        }

        Ok(report)
    }

    /// Locate the descriptor of one context and build it
    pub fn process_context(
        &self,
        options: &BuildOptions,
        context: &str,
        project_builder: &dyn ProjectBuilder,
    ) -> Result<()> {
        let message = format!("Processing context: \"{context}\"");
        if !options.quiet {
            println!("{}", "=".repeat(message.len()));
            println!("{message}");
        }
        tracing::debug!("{message}");

        if options.output_overrides_dirs() {
            if let Some(output) = &options.output {
                tracing::warn!(
                    "output files are generated under: \"{}\". \
                     Options --outdir and --intdir shall be ignored.",
                    output.display()
                );
            }
        }

        let index_file = layout::index_file(&self.solution, options)?;
        let descriptor = locate_descriptor(&index_file, context)?;
        let item = parse_context(context)?;
        let dirs = ContextDirs::for_descriptor(&descriptor, &item);

        tracing::debug!("outdir: {}", dirs.out_dir.display());
        tracing::debug!("intdir: {}", dirs.int_dir.display());

        let request = ProjectBuildRequest::derive(options, context, descriptor, dirs);
        project_builder.build(&request).map_err(|e| {
            tracing::error!("error processing '{}': {e}", request.descriptor.display());
            SolutionError::ProjectBuild {
                descriptor: request.descriptor.clone(),
                source: Box::new(e),
            }
        })
    }
}
