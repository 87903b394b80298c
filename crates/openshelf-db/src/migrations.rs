use std::fs;
use std::path::{Path, PathBuf};

use openshelf_common::{Error, Result};
use rusqlite::Connection;
use tracing::info;

const SCRIPT_EXTENSION: &str = "sql";
const VERSION_DELIMITER: &str = "__";

/// Produces a fresh transactional connection to the persistent store on
/// demand. The runner is agnostic to anything beyond begin/execute/commit/
/// rollback, all of which `rusqlite::Connection` provides.
pub trait ConnectionFactory {
    fn connect(&self) -> Result<Connection>;
}

/// Connection factory backed by a SQLite database file.
pub struct SqliteDatabase {
    path: PathBuf,
}

impl SqliteDatabase {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ConnectionFactory for SqliteDatabase {
    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)
            .map_err(|e| Error::Database(format!("failed to open database: {e}")))?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .map_err(|e| Error::Database(format!("failed to set pragmas: {e}")))?;

        Ok(conn)
    }
}

/// A migration script discovered on disk, parsed from a
/// `{version}__{name}.sql` filename.
#[derive(Debug, Clone)]
pub struct MigrationScript {
    pub version: u32,
    pub name: String,
    pub path: PathBuf,
}

/// Applies every `.sql` script in `dir` with `version >= start_version`, in
/// ascending version order, inside a single transaction.
///
/// All filenames are parsed before the transaction is opened, so a malformed
/// version prefix fails the run before any script has a chance to execute.
/// Any execution or read failure rolls the whole run back; the store is left
/// exactly as it was before the call.
pub fn run_migration(
    dir: &Path,
    factory: &dyn ConnectionFactory,
    start_version: u32,
) -> Result<()> {
    let scripts = discover_scripts(dir)?;

    let mut conn = factory.connect()?;
    let tx = conn
        .transaction()
        .map_err(|e| Error::Database(format!("failed to begin migration transaction: {e}")))?;

    for script in &scripts {
        if script.version < start_version {
            info!("skipping migration {}", script.path.display());
            continue;
        }

        let sql = fs::read_to_string(&script.path)?;
        info!("executing migration {}", script.path.display());
        // Dropping `tx` on this error path rolls the partial run back.
        tx.execute_batch(&sql).map_err(|e| Error::MigrationScript {
            file: script_file_name(&script.path),
            reason: e.to_string(),
        })?;
    }

    tx.commit()
        .map_err(|e| Error::Database(format!("failed to commit migration run: {e}")))?;

    Ok(())
}

/// Enumerates and parses every script directly under `dir` (non-recursive),
/// sorted ascending by version with filename as the tie-break so ordering
/// stays deterministic for equal versions.
fn discover_scripts(dir: &Path) -> Result<Vec<MigrationScript>> {
    if !dir.is_dir() {
        return Err(Error::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut scripts = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(SCRIPT_EXTENSION) {
            continue;
        }
        scripts.push(parse_script(path)?);
    }

    scripts.sort_by(|a, b| {
        a.version
            .cmp(&b.version)
            .then_with(|| a.path.file_name().cmp(&b.path.file_name()))
    });

    Ok(scripts)
}

/// Parses the version prefix out of a script filename. The version is the
/// stem up to the first `__`; a stem with no delimiter must itself be the
/// version, matching the `{version}__{name}.sql` naming scheme.
fn parse_script(path: PathBuf) -> Result<MigrationScript> {
    let file = script_file_name(&path);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::MigrationParse {
            file: file.clone(),
            reason: "filename is not valid UTF-8".into(),
        })?;

    let (token, name) = match stem.split_once(VERSION_DELIMITER) {
        Some((token, name)) => (token, name.to_string()),
        None => (stem, String::new()),
    };

    let version = token.parse::<u32>().map_err(|_| Error::MigrationParse {
        file: file.clone(),
        reason: format!("version prefix {token:?} is not an integer"),
    })?;

    Ok(MigrationScript {
        version,
        name,
        path,
    })
}

fn script_file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|f| f.to_str())
        .unwrap_or_default()
        .to_string()
}
