use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, Error as SqliteError, ffi::ErrorCode};

use crate::{ClientError, ClientResult};

pub const LEDGER_HOME_ENV: &str = "FINWISE_HOME";
pub const USER_ENV: &str = "FINWISE_USER";
pub const DEFAULT_USER_ID: &str = "local";
const DEFAULT_LEDGER_DIR: &str = ".finwise";

/// Writers queue behind each other for this long before `ledger_locked`.
const BUSY_TIMEOUT: Duration = Duration::from_millis(2_000);

pub fn resolve_ledger_home(home_override: Option<&Path>) -> ClientResult<PathBuf> {
    let candidate = match home_override {
        Some(path) => path.to_path_buf(),
        None => {
            if let Some(override_path) = std::env::var_os(LEDGER_HOME_ENV) {
                PathBuf::from(override_path)
            } else if let Some(home_path) = home::home_dir() {
                home_path.join(DEFAULT_LEDGER_DIR)
            } else {
                return Err(ClientError::ledger_init_failed(
                    Path::new("."),
                    "Could not resolve a home directory for ledger initialization.",
                ));
            }
        }
    };

    absolutize(&candidate)
}

/// Explicit user wins, then `FINWISE_USER`, then the single local profile.
pub fn resolve_user_id(user_override: Option<&str>) -> ClientResult<String> {
    let candidate = match user_override {
        Some(value) => value.to_string(),
        None => std::env::var(USER_ENV).unwrap_or_else(|_| DEFAULT_USER_ID.to_string()),
    };
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return Err(ClientError::invalid_argument(
            "User id must be non-empty. Pass `--user <name>` or unset `FINWISE_USER`.",
        ));
    }
    Ok(trimmed.to_string())
}

pub fn ensure_ledger_directory(path: &Path) -> ClientResult<()> {
    fs::create_dir_all(path).map_err(|error| map_io_error(path, &error))?;
    set_private_permissions_best_effort(path);
    Ok(())
}

pub fn ledger_db_path(home: &Path) -> PathBuf {
    home.join("ledger.db")
}

pub fn open_connection(db_path: &Path) -> ClientResult<Connection> {
    let connection =
        Connection::open(db_path).map_err(|error| map_sqlite_error(db_path, &error))?;
    connection
        .busy_timeout(BUSY_TIMEOUT)
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    Ok(connection)
}

pub fn map_io_error(path: &Path, error: &std::io::Error) -> ClientError {
    if error.kind() == std::io::ErrorKind::PermissionDenied {
        return ClientError::ledger_init_permission_denied(path, &error.to_string());
    }

    ClientError::ledger_init_failed(path, &error.to_string())
}

pub fn map_sqlite_error(path: &Path, error: &SqliteError) -> ClientError {
    let error_code = error.sqlite_error_code();

    if matches!(
        error_code,
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked)
    ) {
        return ClientError::ledger_locked(path);
    }

    if matches!(error_code, Some(ErrorCode::NotADatabase)) {
        return ClientError::ledger_corrupt(path);
    }

    if matches!(
        error_code,
        Some(ErrorCode::CannotOpen | ErrorCode::ReadOnly)
    ) {
        return ClientError::ledger_init_permission_denied(path, &error.to_string());
    }

    ClientError::ledger_init_failed(path, &error.to_string())
}

fn absolutize(path: &Path) -> ClientResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|error| ClientError::ledger_init_failed(path, &error.to_string()))
}

#[cfg(unix)]
fn set_private_permissions_best_effort(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o700));
}

#[cfg(not(unix))]
fn set_private_permissions_best_effort(_path: &Path) {}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_USER_ID, ledger_db_path, resolve_ledger_home, resolve_user_id};
    use std::path::Path;

    #[test]
    fn explicit_home_override_is_used_verbatim() {
        let resolved = resolve_ledger_home(Some(Path::new("/tmp/finwise-home")));
        assert!(resolved.is_ok());
        if let Ok(path) = resolved {
            assert_eq!(ledger_db_path(&path), Path::new("/tmp/finwise-home/ledger.db"));
        }
    }

    #[test]
    fn explicit_user_is_trimmed() {
        let resolved = resolve_user_id(Some("  user1 "));
        assert!(resolved.is_ok());
        if let Ok(user) = resolved {
            assert_eq!(user, "user1");
        }
        assert!(resolve_user_id(Some("   ")).is_err());
        assert_ne!(DEFAULT_USER_ID, "");
    }
}
