//! # Workbook Files
//!
//! A workbook lives in a single pretty-printed JSON file. Saving never leaves
//! a half-written workbook behind: the JSON goes to a sibling staging file
//! (`shop.json` → `shop.json.saving`), is flushed to disk, and only then
//! replaces the original.
//!
//! Loading accepts bare exports without a `meta` header and refuses files
//! stamped with a schema this build cannot read (another major release, or a
//! newer `0.x` minor).
//!
//! ```rust,no_run
//! use pricing_core::file_io::{load_workbook, save_workbook};
//! use std::path::Path;
//!
//! let path = Path::new("filacost.json");
//! let mut workbook = load_workbook(path)?;
//! workbook.set_final_price(1700000000100, 1700000000001, 2.49);
//! save_workbook(&workbook, path)?;
//! # Ok::<(), pricing_core::errors::PricingError>(())
//! ```

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::{PricingError, PricingResult};
use crate::workbook::{Workbook, SCHEMA_VERSION};

/// Sibling file the JSON is written to before it replaces `path`.
fn staging_path(path: &Path) -> PathBuf {
    let mut staged = path.as_os_str().to_owned();
    staged.push(".saving");
    PathBuf::from(staged)
}

/// Map an I/O failure on `path` into a [`PricingError::FileError`].
fn io_err<'a>(operation: &'a str, path: &'a Path) -> impl FnOnce(io::Error) -> PricingError + 'a {
    move |e| PricingError::file_error(operation, path.display().to_string(), e.to_string())
}

/// Write `workbook` to `path`, replacing any previous file in one step.
pub fn save_workbook(workbook: &Workbook, path: &Path) -> PricingResult<()> {
    let bytes = serde_json::to_vec_pretty(workbook)?;
    let staged = staging_path(path);

    let write_staged = || -> PricingResult<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&staged)
            .map_err(io_err("create staging file", &staged))?;
        file.write_all(&bytes).map_err(io_err("write staging file", &staged))?;
        file.sync_all().map_err(io_err("flush staging file", &staged))
    };

    if let Err(e) = write_staged().and_then(|()| fs::rename(&staged, path).map_err(io_err("replace", path))) {
        let _ = fs::remove_file(&staged);
        return Err(e);
    }

    info!(path = %path.display(), bytes = bytes.len(), "saved workbook");
    Ok(())
}

/// Read a workbook from `path`.
///
/// Fails with `FileError` when the file cannot be read, `SerializationError`
/// when it is not a workbook, and `VersionMismatch` when its schema is newer
/// or from another major release.
pub fn load_workbook(path: &Path) -> PricingResult<Workbook> {
    let contents = fs::read_to_string(path).map_err(io_err("read", path))?;

    let workbook: Workbook = serde_json::from_str(&contents).map_err(|e| PricingError::SerializationError {
        reason: format!("{} is not a workbook: {}", path.display(), e),
    })?;
    check_schema(&workbook.meta.version)?;

    debug!(
        path = %path.display(),
        version = %workbook.meta.version,
        printers = workbook.printers.len(),
        filaments = workbook.filaments.len(),
        projects = workbook.projects.len(),
        channels = workbook.channels.len(),
        prices = workbook.project_prices.len(),
        "loaded workbook"
    );
    Ok(workbook)
}

/// `(major, minor)` of a `major.minor[.patch]` schema version.
fn schema_release(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.trim().split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next().map_or(Some(0), |m| m.parse().ok())?;
    Some((major, minor))
}

fn check_schema(file_version: &str) -> PricingResult<()> {
    let readable = match (schema_release(file_version), schema_release(SCHEMA_VERSION)) {
        (Some((file_major, file_minor)), Some((major, minor))) => {
            file_major == major && (major != 0 || file_minor <= minor)
        }
        _ => false,
    };

    if readable {
        Ok(())
    } else {
        Err(PricingError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Channel, Printer};
    use crate::sanitize::parse_amount;
    use tempfile::TempDir;

    fn shop() -> Workbook {
        let mut workbook = Workbook::new();
        workbook.printers.push(Printer {
            id: 1,
            name: "MK4".to_string(),
            power_consumption: 0.2,
            cost: 500.0,
            maintenance_cost: 120.0,
            hours_per_day: 8.0,
        });
        workbook.channels.push(Channel {
            id: 2,
            name: "Direct".to_string(),
            profit_percentage: 20.0,
        });
        workbook.set_final_price(3, 1, 4.5);
        workbook
    }

    #[test]
    fn test_staging_path_is_a_sibling() {
        let staged = staging_path(Path::new("/shop/filacost.json"));
        assert_eq!(staged, Path::new("/shop/filacost.json.saving"));
    }

    #[test]
    fn test_saved_workbook_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shop.json");

        let workbook = shop();
        save_workbook(&workbook, &path).unwrap();

        let loaded = load_workbook(&path).unwrap();
        assert_eq!(loaded, workbook);
        assert_eq!(loaded.final_price(3, 1), 4.5);
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn test_save_replaces_previous_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shop.json");
        fs::write(&path, "stale contents that are much longer than a workbook would ever need to be").unwrap();

        save_workbook(&shop(), &path).unwrap();
        assert_eq!(load_workbook(&path).unwrap().printers.len(), 1);
    }

    #[test]
    fn test_save_into_missing_directory_fails_cleanly() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nowhere").join("shop.json");

        let err = save_workbook(&shop(), &path).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn test_infinite_price_input_survives_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shop.json");

        let mut workbook = shop();
        workbook.set_final_price(3, 1, parse_amount("inf"));
        workbook.set_final_price(4, 1, f64::INFINITY);
        save_workbook(&workbook, &path).unwrap();

        let loaded = load_workbook(&path).unwrap();
        assert_eq!(loaded.final_price(3, 1), 0.0);
        assert_eq!(loaded.final_price(4, 1), 0.0);
        assert_eq!(loaded.printers, workbook.printers);
    }

    #[test]
    fn test_load_null_prices_from_older_saves() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shop.json");
        fs::write(&path, r#"{ "projectPrices": { "3-1": null, "4-1": "2.5" } }"#).unwrap();

        let loaded = load_workbook(&path).unwrap();
        assert_eq!(loaded.final_price(3, 1), 0.0);
        assert_eq!(loaded.final_price(4, 1), 2.5);
    }

    #[test]
    fn test_load_headerless_export() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.json");
        fs::write(
            &path,
            r#"{ "globalConfig": { "energyCost": 0.3 }, "printers": [], "filaments": [], "projects": [], "channels": [] }"#,
        )
        .unwrap();

        let loaded = load_workbook(&path).unwrap();
        assert_eq!(loaded.global_config.energy_cost, 0.3);
        assert_eq!(loaded.meta.version, SCHEMA_VERSION);
    }

    #[test]
    fn test_load_failures() {
        let dir = TempDir::new().unwrap();
        let missing = load_workbook(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(missing.error_code(), "FILE_ERROR");

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert_eq!(load_workbook(&broken).unwrap_err().error_code(), "SERIALIZATION_ERROR");

        let future = dir.path().join("future.json");
        fs::write(
            &future,
            r#"{ "meta": { "version": "0.9.0", "modified": "2026-01-01T00:00:00Z" } }"#,
        )
        .unwrap();
        assert_eq!(load_workbook(&future).unwrap_err().error_code(), "VERSION_MISMATCH");
    }

    #[test]
    fn test_schema_release_parsing() {
        assert_eq!(schema_release("0.1.0"), Some((0, 1)));
        assert_eq!(schema_release("2"), Some((2, 0)));
        assert_eq!(schema_release("garbage"), None);
        assert_eq!(schema_release("1.x"), None);
    }

    #[test]
    fn test_check_schema() {
        assert!(check_schema(SCHEMA_VERSION).is_ok());
        assert!(check_schema("0.1.7").is_ok());
        assert!(check_schema("0.0.3").is_ok());
        assert!(check_schema("1.0.0").is_err());
        assert!(check_schema("0.2.0").is_err());
        assert!(check_schema("garbage").is_err());
    }
}
