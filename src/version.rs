//! Build identification shown by `--version` and logged at startup.

/// Release version. Packaging can stamp a different value through the
/// `AQUA_VERSION` environment variable at build time.
pub const VERSION: &str = match option_env!("AQUA_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// `<package> <version>`, as written to the startup log.
pub fn version_line() -> String {
    format!("{} {VERSION}", env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_line_names_the_package() {
        assert!(!VERSION.is_empty());
        assert_eq!(version_line(), format!("aqua {VERSION}"));
    }
}
