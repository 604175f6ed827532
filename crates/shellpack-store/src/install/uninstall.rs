use super::{remove_package_dir, validate_package_name};
use crate::errors::{Result, StoreError};
use crate::spinner::with_spinner;
use crate::store::Store;
use log::{error, info};

/// Remove a package's directory tree.
pub fn uninstall(store: &Store, name: &str) -> Result<()> {
    let name = validate_package_name(name)?;
    let dir = store.package_dir(name);
    if !dir.is_dir() {
        return Err(StoreError::NotInstalled(name.to_string()));
    }

    info!("uninstalling {name}");
    with_spinner(store.is_quiet(), &format!("Removing {name}"), || {
        remove_package_dir(&dir)
    })
    .inspect_err(|e| error!("uninstalling {name} failed: {e}"))?;

    info!("{name} uninstalled");
    Ok(())
}
