pub mod deps;
pub mod package;
pub mod uninstall;

pub use deps::{DependencyInstaller, PipInstaller};
pub use package::{install, install_many, install_package, update};
pub use uninstall::uninstall;

use crate::errors::{Result, StoreError};
use crate::resolve::PackageAddress;
use std::fs;
use std::path::Path;

/// A package name is a single address segment that is not hidden.
pub(crate) fn validate_package_name(name: &str) -> Result<&str> {
    let name = name.trim();
    let addr = PackageAddress::parse(name)?;
    if addr.segments().len() != 1 || name.starts_with('.') {
        return Err(StoreError::Validation(format!("invalid package name {name:?}")));
    }
    Ok(name)
}

pub(crate) fn remove_package_dir(dir: &Path) -> Result<()> {
    fs::remove_dir_all(dir).map_err(|e| StoreError::fs(dir, e))
}

#[cfg(test)]
mod tests {
    use super::validate_package_name;

    #[test]
    fn package_names() {
        assert_eq!(validate_package_name(" editor ").unwrap(), "editor");
        assert!(validate_package_name("editor.main").is_err());
        assert!(validate_package_name("").is_err());
        assert!(validate_package_name("../x").is_err());
    }
}
