// Version information for the AI overview node

/// Semantic version number
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name as published
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get version string for logs
pub fn get_version_string() -> String {
    format!("{} v{}", NAME, VERSION)
}
