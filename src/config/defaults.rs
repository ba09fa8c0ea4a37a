//! Default configuration values

/// Application name used in directory paths
pub const APP_NAME: &str = "solbuild";

/// Global settings file name
pub const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the config directory
pub const ENV_CONFIG_DIR: &str = "SOLBUILD_CONFIG_DIR";

/// Environment variable overriding the tool directory
pub const ENV_BIN_PATH: &str = "SOLBUILD_BIN_PATH";

/// Environment variable the compiler tool reads its toolchain settings from
pub const ENV_COMPILER_ROOT: &str = "CMSIS_COMPILER_ROOT";

/// Solution-to-descriptor compiler tool
pub const CSOLUTION_TOOL: &str = "csolution";

/// Pack installer tool
pub const CPACKGET_TOOL: &str = "cpackget";

/// Per-project builder tool
pub const PROJECT_BUILDER_TOOL: &str = "cbuildgen";

/// Extension of generated per-context descriptors
pub const DESCRIPTOR_EXTENSION: &str = "cprj";

/// Executable suffix on this platform
#[cfg(windows)]
pub const BIN_EXTENSION: &str = ".exe";

/// Executable suffix on this platform
#[cfg(not(windows))]
pub const BIN_EXTENSION: &str = "";
