use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::archive::ArchiveRecord;
use crate::error::AppError;
use crate::row::OutputRow;
use crate::table::{project_rows, Table};

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportManifest {
    pub manifest_version: u32,
    pub app_version: String,
    pub export_time: String,
    pub row_count: usize,
    pub archive_count: usize,
    pub files: Vec<ExportFileInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportFileInfo {
    pub filename: String,
    pub bytes: u64,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResult {
    pub export_dir: String,
    pub csv_path: String,
    pub row_count: usize,
    pub archive_count: usize,
}

/// `MM_DD` stamp used in the results directory and every file name.
pub fn date_stamp(at: OffsetDateTime) -> String {
    format!("{:02}_{:02}", u8::from(at.month()), at.day())
}

pub fn results_dir_name(date_stamp: &str) -> String {
    format!("ai_audit_results_{date_stamp}")
}

pub fn summary_csv_name(date_stamp: &str) -> String {
    format!("ai_audit_sum_{date_stamp}.csv")
}

fn sha256_file_hex(path: &Path) -> Result<(String, u64), AppError> {
    use sha2::{Digest, Sha256};
    use std::io::Read;

    let mut f = fs::File::open(path).map_err(|e| {
        AppError::new("EXPORT_FILE_OPEN_FAILED", "Failed to open file for hashing")
            .with_details(format!("path={}: {}", path.display(), e))
    })?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    let mut total: u64 = 0;
    loop {
        let n = f.read(&mut buf).map_err(|e| {
            AppError::new("EXPORT_FILE_READ_FAILED", "Failed to read file for hashing")
                .with_details(format!("path={}: {}", path.display(), e))
        })?;
        if n == 0 {
            break;
        }
        total += n as u64;
        hasher.update(&buf[..n]);
    }
    Ok((hex::encode(hasher.finalize()), total))
}

/// Write the projected table as CSV with a header row.
pub fn write_table_csv(path: &Path, table: &Table) -> Result<(), AppError> {
    let csv_err = |e: csv::Error| {
        AppError::new("EXPORT_CSV_WRITE_FAILED", "Failed to write summary CSV")
            .with_details(format!("path={}: {}", path.display(), e))
    };
    let mut wtr = csv::Writer::from_path(path).map_err(csv_err)?;
    wtr.write_record(&table.header).map_err(csv_err)?;
    for row in &table.rows {
        wtr.write_record(row).map_err(csv_err)?;
    }
    wtr.flush().map_err(|e| {
        AppError::new("EXPORT_CSV_WRITE_FAILED", "Failed to flush summary CSV")
            .with_details(format!("path={}: {}", path.display(), e))
    })?;
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        AppError::new("EXPORT_ENCODE_FAILED", "Failed to encode export JSON")
            .with_details(e.to_string())
    })?;
    fs::write(path, json.as_bytes()).map_err(|e| {
        AppError::new("EXPORT_WRITE_FAILED", "Failed to write export file")
            .with_details(format!("path={}: {}", path.display(), e))
    })
}

/// Write one audit run under `{out_root}/ai_audit_results_{date_stamp}`.
///
/// The summary CSV is written first, then one archive JSON per unit, then a manifest hashing
/// every file written. An existing results directory is reused and same-named files are
/// overwritten.
pub fn write_audit_outputs(
    out_root: &Path,
    date_stamp: &str,
    export_time: &str,
    app_version: &str,
    rows: &[OutputRow],
    archives: &[ArchiveRecord],
) -> Result<ExportResult, AppError> {
    let export_dir = out_root.join(results_dir_name(date_stamp));
    fs::create_dir_all(&export_dir).map_err(|e| {
        AppError::new("EXPORT_MKDIR_FAILED", "Failed to create results directory")
            .with_details(format!("path={}: {}", export_dir.display(), e))
    })?;

    let csv_name = summary_csv_name(date_stamp);
    let csv_path = export_dir.join(&csv_name);
    let table = project_rows(rows);
    write_table_csv(&csv_path, &table)?;
    tracing::info!(path = %csv_path.display(), rows = rows.len(), "summary CSV written");

    let mut written: Vec<(String, PathBuf)> = vec![(csv_name, csv_path.clone())];
    for archive in archives {
        let name = archive.file_name(date_stamp);
        let path = export_dir.join(&name);
        write_json(&path, archive)?;
        // A later unit with the same file name overwrites the earlier one.
        if !written.iter().any(|(n, _)| *n == name) {
            written.push((name, path));
        }
    }
    tracing::info!(dir = %export_dir.display(), count = archives.len(), "archive JSON written");

    let mut files = Vec::new();
    for (name, path) in &written {
        let (sha, bytes) = sha256_file_hex(path)?;
        files.push(ExportFileInfo {
            filename: name.clone(),
            bytes,
            sha256: sha,
        });
    }
    files.sort_by(|a, b| a.filename.cmp(&b.filename));

    let manifest = ExportManifest {
        manifest_version: 1,
        app_version: app_version.to_string(),
        export_time: export_time.to_string(),
        row_count: rows.len(),
        archive_count: archives.len(),
        files,
    };
    write_json(&export_dir.join(MANIFEST_FILE), &manifest)?;

    Ok(ExportResult {
        export_dir: export_dir.to_string_lossy().to_string(),
        csv_path: csv_path.to_string_lossy().to_string(),
        row_count: rows.len(),
        archive_count: archives.len(),
    })
}
