use crate::app::ports::ReportOutputPort;
use crate::error::Result;
use crate::types::RunResult;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes the run as a single pretty-printed UTF-8 JSON document
pub struct FileReportOutputAdapter {
    path: PathBuf,
}

impl FileReportOutputAdapter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ReportOutputPort for FileReportOutputAdapter {
    fn write(&self, result: &RunResult) -> Result<PathBuf> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, result)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        info!(
            "Wrote {} reviews to {}",
            result.reviews.len(),
            self.path.display()
        );
        Ok(self.path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ReviewRecord, ReviewSource, RunMetadata};

    fn sample_result() -> RunResult {
        RunResult {
            metadata: RunMetadata {
                company_name: "Notion".to_string(),
                start_date: Some("2024-01-01".to_string()),
                end_date: None,
                source: "g2".to_string(),
                total_reviews: 1,
                scrape_date: "2024-05-01T12:00:00.000000Z".to_string(),
                execution_time_seconds: 1.25,
            },
            reviews: vec![ReviewRecord::new(
                "Great wiki",
                "Notion keeps our docs tidy – très bien",
                "2024-02-02",
                4.0,
                ReviewSource::G2,
                "https://www.g2.com/products/notion/reviews?page=1",
            )],
        }
    }

    #[test]
    fn writes_pretty_json_with_metadata_and_reviews() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");
        let written = FileReportOutputAdapter::new(&path).write(&sample_result()).unwrap();
        assert_eq!(written, path);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"metadata\": {"));
        assert!(text.contains("très bien"));

        let parsed: RunResult = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, sample_result());
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(value["metadata"]["end_date"].is_null());
        assert_eq!(value["reviews"][0]["source"], "g2");
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "x".repeat(10_000)).unwrap();
        FileReportOutputAdapter::new(&path).write(&sample_result()).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["metadata"]["total_reviews"], 1);
    }
}
