use anyhow::Context;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::path::Path;

pub const HEADERS: [&str; 5] = ["id", "kategori_skenario", "detail_skenario", "label", "dialog"];

#[derive(Debug, Clone, Serialize)]
pub struct DialogRecord {
    pub id: u64,
    #[serde(rename = "kategori_skenario")]
    pub category: String,
    #[serde(rename = "detail_skenario")]
    pub detail: String,
    pub label: u8,
    pub dialog: String,
}

/// Append-mode CSV writer for the raw dialogue dataset. The header is
/// written only when the file is first created; each row is flushed
/// individually so an interrupted run leaves whole rows behind.
pub struct DatasetWriter {
    writer: csv::Writer<File>,
}

impl DatasetWriter {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create {}", parent.display()))?;
            }
        }

        let existed = path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open dataset csv {}", path.display()))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if !existed {
            writer.write_record(HEADERS).context("write csv header")?;
            writer.flush()?;
        }

        Ok(Self { writer })
    }

    pub fn append(&mut self, record: &DialogRecord) -> anyhow::Result<()> {
        self.writer
            .serialize(record)
            .with_context(|| format!("serialize dialog {}", record.id))?;
        self.writer.flush().context("flush dataset row")?;
        Ok(())
    }
}
