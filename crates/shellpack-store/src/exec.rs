//! Launch a package entry file as a child process.

use crate::errors::{Result, StoreError};
use crate::resolve::resolve;
use crate::store::Store;
use crate::types::RunOutcome;
use log::{debug, error, info};
use std::env;
use std::ffi::OsStr;
use std::process::Command;

/// Set in every launched child. A front end seeing it must not start another
/// interactive session.
pub const REENTRANCY_MARKER: &str = "SHELLPACK_SUBPROCESS";

/// True when this process was itself launched by `run`.
pub fn is_nested_session() -> bool {
    env::var_os(REENTRANCY_MARKER).is_some_and(|v| v == OsStr::new("1"))
}

/// Resolve `address` and run `<interpreter> <entry> <argv...>`, waiting for
/// the child. A non-zero child exit is reported, not treated as an error.
pub fn run<S: AsRef<OsStr>>(store: &Store, address: &str, argv: &[S]) -> Result<RunOutcome> {
    let Some(entry) = resolve(store, address) else {
        error!("nothing to run at {address}");
        return Err(StoreError::NotFound(address.to_string()));
    };

    let nested = is_nested_session();
    info!("running {address} from {}", entry.display());
    if nested {
        debug!("already inside a launched package; launching directly");
    }

    let interpreter = &store.layout().interpreter;
    let mut cmd = Command::new(interpreter);
    cmd.arg(&entry).args(argv).env(REENTRANCY_MARKER, "1");

    let status = cmd.status().map_err(|e| {
        error!("failed to launch {interpreter} for {address}: {e}");
        StoreError::Msg(format!("failed to launch {interpreter}: {e}"))
    })?;

    let exit_code = status.code();
    if status.success() {
        info!("{address} exited successfully");
    } else {
        info!("{address} exited with code {:?}", exit_code);
    }

    Ok(RunOutcome {
        entry,
        exit_code,
        nested,
    })
}
