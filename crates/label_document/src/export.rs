//! Label export in the dataset JSON format.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{annotation::ObjectClass, collection::BoxCollection, DocumentResult};

/// One exported object. Rotation is not modelled and is always written as `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelRecord {
    pub class: ObjectClass,
    pub position: [f32; 3],
    pub dimensions: [f32; 3],
    pub rotation: u32,
}

pub fn export_records(boxes: &BoxCollection) -> Vec<LabelRecord> {
    boxes
        .iter()
        .map(|b| LabelRecord {
            class: b.class,
            position: b.position.to_array(),
            dimensions: b.size.to_array(),
            rotation: 0,
        })
        .collect()
}

/// Pretty-printed JSON array, two-space indented.
pub fn export_json(boxes: &BoxCollection) -> DocumentResult<String> {
    Ok(serde_json::to_string_pretty(&export_records(boxes))?)
}

/// `labels_<unix-millis>.json`
pub fn export_file_name(timestamp_epoch_ms: i64) -> String {
    format!("labels_{timestamp_epoch_ms}.json")
}

pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

/// Write the export into `dir` and return the full path of the new file.
pub fn write_export(
    dir: &Path,
    boxes: &BoxCollection,
    timestamp_epoch_ms: i64,
) -> DocumentResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(timestamp_epoch_ms));
    let mut writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(&mut writer, &export_records(boxes))?;
    writer.flush()?;
    info!(path = %path.display(), boxes = boxes.len(), "exported labels");
    Ok(path)
}
