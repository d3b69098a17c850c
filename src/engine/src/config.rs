//! The one operator-facing knob this core has: where the store lives on
//! disk. Everything else (transport, CLI, logging subscriber setup) is an
//! external collaborator's concern.

use std::path::{Path, PathBuf};

use tskv_error::Result;

/// Configuration for opening the backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub path: PathBuf,
}

impl Config {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Opens the production RocksDB-backed store at `self.path`, creating
    /// the directory and its column families if they don't exist yet.
    #[cfg(feature = "rocks")]
    pub fn open_store(&self) -> Result<tskv_storage::RocksStore> {
        tskv_storage::RocksStore::open(&self.path)
    }

    /// Opens the store and wraps it in a fresh [`crate::StateMachine`], the
    /// way a consensus driver bootstraps the core against a store directory.
    #[cfg(feature = "rocks")]
    pub fn open_state_machine(&self) -> Result<crate::StateMachine<tskv_storage::RocksStore>> {
        Ok(crate::StateMachine::new(self.open_store()?))
    }
}

/// Test-only helper following the common `default_for_test()` convention for
/// small config types. Returns both the config and the backing [`tempfile::TempDir`]
/// guard; the directory is removed when the guard is dropped, so callers
/// must keep it alive for as long as the config is in use.
#[cfg(test)]
pub fn config_for_test() -> (Config, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("failed to create temp dir for test config");
    let config = Config::new(dir.path());
    (config, dir)
}

impl AsRef<Path> for Config {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

#[cfg(all(test, feature = "rocks"))]
mod tests {
    use super::*;

    #[test]
    fn open_state_machine_opens_a_usable_rocksdb_backed_store() {
        let (config, _dir) = config_for_test();
        let mut sm = config.open_state_machine().expect("store should open");

        sm.init_chain();
        sm.begin_block();
        assert_eq!(sm.info().data, "");
        sm.end_block();
        sm.commit();
    }
}
