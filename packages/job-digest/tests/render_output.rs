use chrono::{TimeZone, Utc};
use job_digest::config::{DigestConfig, OutputConfig};
use job_digest::output::write_reports;
use job_digest::render::{render, RenderOptions, ReportFormat};
use job_digest::Job;

fn jobs() -> Vec<Job> {
    vec![
        Job {
            id: "a1".into(),
            title: "Site Reliability Engineer".into(),
            company: "Acme".into(),
            location: "Bengaluru".into(),
            publisher: "Indeed".into(),
            source: "jsearch".into(),
            apply_link: "https://acme.dev/jobs/a1".into(),
            posted_at: Some(Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()),
            description: "Run Kubernetes clusters on AWS.".into(),
        },
        Job {
            id: "b2".into(),
            title: "Platform Engineer".into(),
            company: "Unknown".into(),
            location: String::new(),
            publisher: "example-board".into(),
            source: "example-board".into(),
            apply_link: "#".into(),
            posted_at: None,
            description: String::new(),
        },
    ]
}

#[test]
fn zero_jobs_report_says_so() {
    let options = RenderOptions::default();
    let text = render(ReportFormat::Text, &[], &options).unwrap();
    assert!(text.contains("No matching jobs found"));
}

#[test]
fn rendering_is_byte_identical_across_calls() {
    let options = RenderOptions::from_config(&DigestConfig::default());
    let jobs = jobs();
    for format in [ReportFormat::Text, ReportFormat::Html] {
        let first = render(format, &jobs, &options).unwrap();
        let second = render(format, &jobs.clone(), &options.clone()).unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());
    }
}

#[test]
fn writes_all_preset_formats() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = DigestConfig::preset("platform-72h").unwrap();
    config.output = OutputConfig {
        dir: dir.path().to_path_buf(),
        ..config.output
    };

    let options = RenderOptions::from_config(&config);
    let paths = write_reports(&jobs(), &config.output, &options).unwrap();

    assert_eq!(paths.len(), 4);
    for format in [
        ReportFormat::Text,
        ReportFormat::Markdown,
        ReportFormat::Html,
        ReportFormat::Json,
    ] {
        let path = dir
            .path()
            .join(format!("platform_jobs.{}", format.extension()));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Site Reliability Engineer"), "{}", path.display());
        assert!(content.contains("Platform Engineer"), "{}", path.display());
    }

    let text = std::fs::read_to_string(dir.path().join("platform_jobs.txt")).unwrap();
    assert!(text.contains("Platform/Infrastructure Job Digest (2 roles)"));
    assert!(text.contains("(last 72 hours)"));
}

#[test]
fn default_output_is_jobs_report_txt() {
    let dir = tempfile::tempdir().unwrap();
    let output = OutputConfig {
        dir: dir.path().to_path_buf(),
        ..OutputConfig::default()
    };

    let paths = write_reports(&jobs(), &output, &RenderOptions::default()).unwrap();

    assert_eq!(paths, [dir.path().join("jobs_report.txt")]);
}
