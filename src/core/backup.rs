use crate::config::Config;
use crate::db::log::{ttlog, ttlog_soft};
use crate::db::pool::DbPool;
use crate::db::settings::{self, LAST_BACKUP_AT};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{confirm, info, success, warning};
use chrono::{DateTime, Duration, Local};
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

/// File name used by the scheduled copy inside `backup_dir`.
pub const AUTO_BACKUP_FILE: &str = "carelog_backup.sqlite";

pub struct BackupLogic;

impl BackupLogic {
    /// Manual backup to `dest_file`, optionally zipped.
    /// Returns the written path, or `None` when the user declined to overwrite.
    pub fn backup(
        pool: &DbPool,
        cfg: &Config,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<Option<PathBuf>> {
        let src = Path::new(&cfg.database);
        let dest = Path::new(dest_file);

        if !src.exists() {
            return Err(AppError::Backup(format!(
                "database not found: {}",
                src.display()
            )));
        }

        let final_path = if compress {
            dest.with_extension("zip")
        } else {
            dest.to_path_buf()
        };

        if final_path.exists()
            && !force
            && !confirm(format!(
                "The file '{}' already exists. Overwrite it?",
                final_path.display()
            ))
        {
            info("Backup cancelled.");
            return Ok(None);
        }

        if let Some(parent) = final_path.parent() {
            fs::create_dir_all(parent)?;
        }

        if compress {
            zip_file(src, &final_path, &entry_name(src))?;
            success(format!("📦 Compressed backup created: {}", final_path.display()));
        } else {
            fs::copy(src, &final_path)?;
            success(format!("Backup created: {}", final_path.display()));
        }

        settings::set(pool, LAST_BACKUP_AT, &Local::now().to_rfc3339())?;
        ttlog(
            &pool.conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        )?;

        Ok(Some(final_path))
    }

    /// Copy the database into the configured backup folder.
    pub fn auto_backup(pool: &DbPool, cfg: &Config) -> AppResult<PathBuf> {
        let dir = cfg
            .backup_path()
            .ok_or_else(|| AppError::Backup("backup_dir is not configured".into()))?;

        let src = Path::new(&cfg.database);
        if !src.exists() {
            return Err(AppError::Backup(format!(
                "database not found: {}",
                src.display()
            )));
        }

        fs::create_dir_all(&dir)?;
        let dest = dir.join(AUTO_BACKUP_FILE);
        fs::copy(src, &dest)?;

        settings::set(pool, LAST_BACKUP_AT, &Local::now().to_rfc3339())?;
        ttlog(
            &pool.conn,
            "backup",
            &dest.to_string_lossy(),
            "Automatic backup",
        )?;

        Ok(dest)
    }

    /// Whether the scheduled copy is due: configured, and either never
    /// taken or older than `backup_interval_hours`.
    pub fn is_due(pool: &DbPool, cfg: &Config) -> AppResult<bool> {
        if cfg.backup_path().is_none() {
            return Ok(false);
        }

        let last = settings::get(pool, LAST_BACKUP_AT)?
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok());

        Ok(match last {
            None => true,
            Some(at) => {
                let age = Local::now().signed_duration_since(at);
                age >= Duration::hours(i64::from(cfg.backup_interval_hours))
            }
        })
    }

    /// Run the scheduled copy when due. Never fails the caller.
    pub fn run_if_due(pool: &DbPool, cfg: &Config) {
        match Self::is_due(pool, cfg) {
            Ok(false) => {}
            Ok(true) => match Self::auto_backup(pool, cfg) {
                Ok(dest) => info(format!("Automatic backup saved to {}", dest.display())),
                Err(e) => {
                    warning(format!("Automatic backup failed: {}", e));
                    ttlog_soft(&pool.conn, "backup", "auto", &format!("failed: {}", e));
                }
            },
            Err(e) => warning(format!("Could not check backup schedule: {}", e)),
        }
    }
}

fn entry_name(src: &Path) -> String {
    src.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "database.sqlite".to_string())
}

/// Write `src` as the single entry `entry_name` of a new zip at `dest`.
pub fn zip_file(src: &Path, dest: &Path, entry_name: &str) -> AppResult<PathBuf> {
    let zip_err = |e: zip::result::ZipError| AppError::Backup(e.to_string());

    let file = fs::File::create(dest)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut f = fs::File::open(src)?;
    zip.start_file(entry_name, options).map_err(zip_err)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(zip_err)?;

    Ok(dest.to_path_buf())
}
