use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::error::SnapshotError;
use crate::models::{CrawlResult, NormalizedListing};

/// Byte-order mark so spreadsheet tools pick UTF-8
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Column order of every snapshot file
pub const HEADER: [&str; 11] = [
    "매물번호",
    "매물명",
    "유형",
    "거래유형",
    "전세가",
    "전세가(숫자)",
    "전용면적",
    "공급면적",
    "방향",
    "층수",
    "date",
];

/// Writes a crawl result as a dated CSV snapshot.
///
/// The file is rendered in memory, written next to the target and renamed
/// into place, so readers see either the previous snapshot or the new one.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    bom: bool,
}

impl Default for SnapshotWriter {
    fn default() -> Self {
        Self { bom: true }
    }
}

impl SnapshotWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip the byte-order mark
    pub fn without_bom(mut self) -> Self {
        self.bom = false;
        self
    }

    /// Serialize `result` into the exact bytes that `write` persists
    pub fn render(&self, result: &CrawlResult) -> Result<Vec<u8>, SnapshotError> {
        let mut buf = Vec::new();
        if self.bom {
            buf.extend_from_slice(UTF8_BOM);
        }

        {
            let mut writer = csv::WriterBuilder::new()
                .terminator(csv::Terminator::CRLF)
                .from_writer(&mut buf);

            writer.write_record(HEADER)?;
            for listing in &result.listings {
                writer.write_record(row(listing))?;
            }
            writer.flush()?;
        }

        Ok(buf)
    }

    /// Replace the file at `path` with a snapshot of `result`
    pub async fn write(&self, result: &CrawlResult, path: &Path) -> Result<(), SnapshotError> {
        let bytes = self.render(result)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = temp_path(path);
        if let Err(e) = write_and_rename(&tmp, path, &bytes).await {
            warn!("Snapshot write to {} failed: {}", path.display(), e);
            if tokio::fs::remove_file(&tmp).await.is_ok() {
                debug!("Removed partial file {}", tmp.display());
            }
            return Err(e.into());
        }

        info!(
            rows = result.len(),
            "💾 Saved snapshot to {} ({} bytes)",
            path.display(),
            bytes.len()
        );
        Ok(())
    }
}

fn row(listing: &NormalizedListing) -> [String; 11] {
    [
        listing.article_no.clone(),
        listing.article_name.clone(),
        listing.real_estate_type.clone(),
        listing.trade_type.clone(),
        listing.price_text.clone(),
        listing.price.to_string(),
        listing.exclusive_area.clone(),
        listing.supply_area.clone(),
        listing.direction.clone(),
        listing.floor_info.clone(),
        listing.run_date.format("%Y-%m-%d").to_string(),
    ]
}

/// Sibling path the snapshot is staged at before the rename
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("snapshot"));
    name.push(".tmp");
    path.with_file_name(name)
}

async fn write_and_rename(tmp: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(tmp).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    drop(file);

    tokio::fs::rename(tmp, path).await
}
