//! Writing rendered reports to disk.

use std::fs;
use std::path::PathBuf;

use crate::config::OutputConfig;
use crate::error::{ReportError, ReportResult};
use crate::render::{render, RenderOptions};
use crate::types::Job;

/// Path a format is written to: `<dir>/<stem>.<ext>`.
pub fn report_path(output: &OutputConfig, format: crate::render::ReportFormat) -> PathBuf {
    output
        .dir
        .join(format!("{}.{}", output.stem, format.extension()))
}

/// Render every configured format and write it, creating the output
/// directory if needed. Returns the written paths in format order.
///
/// Repeated formats are written once.
pub fn write_reports(
    jobs: &[Job],
    output: &OutputConfig,
    options: &RenderOptions,
) -> ReportResult<Vec<PathBuf>> {
    fs::create_dir_all(&output.dir).map_err(|source| ReportError::Write {
        path: output.dir.clone(),
        source,
    })?;

    let mut written = Vec::with_capacity(output.formats.len());
    for (i, &format) in output.formats.iter().enumerate() {
        if output.formats[..i].contains(&format) {
            continue;
        }

        let path = report_path(output, format);
        let content = render(format, jobs, options)?;
        fs::write(&path, content).map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), ?format, jobs = jobs.len(), "Report written");
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ReportFormat;

    #[test]
    fn test_writes_each_format_once() {
        let dir = tempfile::tempdir().unwrap();
        let output = OutputConfig {
            dir: dir.path().join("nested"),
            stem: "digest".into(),
            formats: vec![ReportFormat::Markdown, ReportFormat::Json, ReportFormat::Markdown],
        };

        let paths = write_reports(&[], &output, &RenderOptions::default()).unwrap();

        assert_eq!(
            paths,
            [dir.path().join("nested/digest.md"), dir.path().join("nested/digest.json")]
        );
        for path in &paths {
            let content = fs::read_to_string(path).unwrap();
            assert!(content.contains("No matching jobs found"));
        }
    }

    #[test]
    fn test_unwritable_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let output = OutputConfig {
            dir: blocker.join("sub"),
            ..OutputConfig::default()
        };

        let err = write_reports(&[], &output, &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, ReportError::Write { .. }));
    }
}
