//! Operator-facing side logs.
//!
//! Two CSV files accompany every run: dimension strings no pattern matched
//! (to be fixed by hand in the source data) and image upload failures. Both
//! are truncated at startup so each run's logs stand alone.

use std::fs::{File, OpenOptions};
use std::path::PathBuf;

use anyhow::Context;
use woomig_core::{AppConfig, UnparsedDimension};

const DIMENSIONS_HEADER: [&str; 4] = ["Line Number", "SKU", "Name", "Dimensions"];
const IMAGE_ERRORS_HEADER: [&str; 5] =
    ["Line Number", "SKU", "Name", "Image URLs", "Error Message"];

pub(crate) struct SideLogs {
    dimensions_path: PathBuf,
    image_errors_path: PathBuf,
}

impl SideLogs {
    /// Truncates both log files and writes their headers.
    pub(crate) fn create(config: &AppConfig) -> anyhow::Result<Self> {
        let logs = Self {
            dimensions_path: config.dimensions_log_path.clone(),
            image_errors_path: config.image_errors_log_path.clone(),
        };
        write_header(&logs.dimensions_path, &DIMENSIONS_HEADER)?;
        write_header(&logs.image_errors_path, &IMAGE_ERRORS_HEADER)?;
        Ok(logs)
    }

    /// Appends one unparsed-dimension record.
    pub(crate) fn append_dimension(&self, record: &UnparsedDimension) -> anyhow::Result<()> {
        append_record(
            &self.dimensions_path,
            &[
                &record.line.to_string(),
                &record.sku,
                &record.name,
                &record.raw,
            ],
        )
    }

    /// Appends one image upload failure.
    pub(crate) fn append_image_error(
        &self,
        line: u64,
        sku: &str,
        name: &str,
        image_urls: &str,
        message: &str,
    ) -> anyhow::Result<()> {
        append_record(
            &self.image_errors_path,
            &[&line.to_string(), sku, name, image_urls, message],
        )
    }
}

fn write_header(path: &PathBuf, header: &[&str]) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("cannot create log {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(header)?;
    writer.flush()?;
    Ok(())
}

fn append_record(path: &PathBuf, fields: &[&str]) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .append(true)
        .open(path)
        .with_context(|| format!("cannot append to log {}", path.display()))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer.write_record(fields)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &tempfile::TempDir) -> AppConfig {
        AppConfig {
            shopify_store: "unused.myshopify.com".to_string(),
            shopify_access_token: "token".to_string(),
            api_version: "2024-07".to_string(),
            request_timeout_secs: 30,
            user_agent: "test".to_string(),
            throttle_ms: 0,
            fallback_vendor: "Fallback".to_string(),
            dimensions_log_path: dir.path().join("dimensions.csv"),
            image_errors_log_path: dir.path().join("image_errors.csv"),
        }
    }

    #[test]
    fn create_truncates_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        std::fs::write(&config.dimensions_log_path, "stale,data\n").unwrap();

        SideLogs::create(&config).unwrap();

        let contents = std::fs::read_to_string(&config.dimensions_log_path).unwrap();
        assert_eq!(contents, "Line Number,SKU,Name,Dimensions\n");
        let contents = std::fs::read_to_string(&config.image_errors_log_path).unwrap();
        assert_eq!(
            contents,
            "Line Number,SKU,Name,Image URLs,Error Message\n"
        );
    }

    #[test]
    fn appended_records_follow_the_header() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        let logs = SideLogs::create(&config).unwrap();

        logs.append_dimension(&UnparsedDimension {
            line: 7,
            sku: "VV-7".to_string(),
            name: "Odd Table".to_string(),
            raw: "tallish".to_string(),
        })
        .unwrap();

        let contents = std::fs::read_to_string(&config.dimensions_log_path).unwrap();
        assert_eq!(
            contents,
            "Line Number,SKU,Name,Dimensions\n7,VV-7,Odd Table,tallish\n"
        );
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        let logs = SideLogs::create(&config).unwrap();

        logs.append_image_error(9, "VV-9", "Chair, teak", "https://a.test/1.jpg", "timed out")
            .unwrap();

        let contents = std::fs::read_to_string(&logs.image_errors_path).unwrap();
        assert!(contents.contains("\"Chair, teak\""));
    }
}
