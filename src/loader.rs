//! Module loading.
//!
//! Loads a Python source file into an isolated, uniquely named module
//! entry. Every successful load is registered under a synthetic
//! collision-resistant name so loading the same path twice in one
//! process never collides; a failed load rolls its registration back
//! before the error surfaces.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::parser::{parse_module, ParsedModule};

/// Process-wide registry of loaded modules: synthetic name -> path.
static REGISTRY: Lazy<Mutex<HashMap<String, PathBuf>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// A successfully loaded module and its enumerable symbol table.
#[derive(Debug, Clone)]
pub struct LoadedModule {
    /// Synthetic registry name, unique per load
    pub name: String,

    /// Path the module was loaded from
    pub path: PathBuf,

    /// Parsed module surface
    pub module: ParsedModule,
}

/// Load a Python source file from `path`.
///
/// The path must reference an existing `.py` file; any parse failure in
/// the module body is reported as a single load error wrapping the
/// parser's message.
pub fn load_module(path: &Path) -> Result<LoadedModule> {
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    if path.extension().and_then(|e| e.to_str()) != Some("py") {
        return Err(Error::NotPythonSource(path.to_path_buf()));
    }

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("module");
    let name = format!("{stem}_{}", &Uuid::new_v4().simple().to_string()[..8]);

    REGISTRY.lock().insert(name.clone(), path.to_path_buf());

    let result = fs::read_to_string(path)
        .map_err(Error::from)
        .and_then(|source| {
            parse_module(&source)
                .map_err(|e| Error::Load { path: path.to_path_buf(), message: e.to_string() })
        });

    match result {
        Ok(module) => {
            tracing::debug!(module = %name, path = ?path, "Loaded module");
            Ok(LoadedModule { name, path: path.to_path_buf(), module })
        }
        Err(e) => {
            // Roll back the partial registration before surfacing
            REGISTRY.lock().remove(&name);
            Err(e)
        }
    }
}

/// Number of modules currently registered.
pub fn registered_count() -> usize {
    REGISTRY.lock().len()
}

/// Whether a module with the given synthetic name is registered.
pub fn is_registered(name: &str) -> bool {
    REGISTRY.lock().contains_key(name)
}
