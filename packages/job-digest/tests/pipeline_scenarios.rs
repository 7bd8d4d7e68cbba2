//! End-to-end pipeline behavior: raw records in, final job list out.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use job_digest::config::DigestConfig;
use job_digest::pipeline::JobPipeline;
use job_digest::sources::{collect, JobSource, MockSource};
use job_digest::types::{RawJob, RawRecord, ScrapedCard, MISSING_TITLE};
use serde_json::{json, Value};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
}

fn hours_ago(hours: i64) -> String {
    (now() - TimeDelta::hours(hours)).to_rfc3339()
}

fn devops_only_config() -> DigestConfig {
    let mut config = DigestConfig::default();
    config.filters.max_age_hours = 24;
    config.filters.must_keywords = vec!["devops".to_string()];
    config.filters.excluded_publishers = Vec::new();
    config
}

fn api(value: Value) -> RawRecord {
    RawRecord::from_api_value("jsearch", value).unwrap()
}

fn run(config: &DigestConfig, records: &[RawRecord]) -> Vec<job_digest::Job> {
    JobPipeline::from_config(config, now()).run(records).jobs
}

#[test]
fn recent_matching_job_survives() {
    let record = api(json!({
        "job_title": "Senior DevOps Engineer",
        "job_posted_at_datetime_utc": hours_ago(2),
        "employer_name": "Acme"
    }));

    let jobs = run(&devops_only_config(), &[record]);

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].title, "Senior DevOps Engineer");
    assert_eq!(jobs[0].company, "Acme");
    assert!(jobs[0].has_synthetic_id());
}

#[test]
fn stale_job_is_excluded_by_recency() {
    let record = api(json!({
        "job_title": "Senior DevOps Engineer",
        "job_posted_at_datetime_utc": hours_ago(30),
        "employer_name": "Acme"
    }));

    let output = JobPipeline::from_config(&devops_only_config(), now()).run(&[record]);

    assert!(output.jobs.is_empty());
    assert_eq!(output.stats.rejected.get("recency"), Some(&1));
}

#[test]
fn same_job_id_keeps_the_later_record() {
    let records = [
        api(json!({
            "job_id": "abc",
            "job_title": "DevOps Engineer",
            "employer_name": "First Corp",
            "job_posted_at_datetime_utc": hours_ago(1)
        })),
        api(json!({
            "job_id": "abc",
            "job_title": "DevOps Engineer",
            "employer_name": "Second Corp",
            "job_posted_at_datetime_utc": hours_ago(1)
        })),
    ];

    let output = JobPipeline::from_config(&devops_only_config(), now()).run(&records);

    assert_eq!(output.jobs.len(), 1);
    assert_eq!(output.jobs[0].id, "abc");
    assert_eq!(output.jobs[0].company, "Second Corp");
    assert_eq!(output.stats.duplicates, 1);
}

#[test]
fn stale_later_duplicate_removes_the_listing() {
    let records = [
        api(json!({
            "job_id": "abc",
            "job_title": "DevOps Engineer",
            "employer_name": "First",
            "job_posted_at_datetime_utc": hours_ago(1)
        })),
        api(json!({
            "job_id": "abc",
            "job_title": "DevOps Engineer",
            "employer_name": "Second",
            "job_posted_at_datetime_utc": hours_ago(30)
        })),
    ];

    let output = JobPipeline::from_config(&devops_only_config(), now()).run(&records);

    assert!(output.jobs.is_empty());
    assert_eq!(output.stats.duplicates, 1);
    assert_eq!(output.stats.rejected.get("recency"), Some(&1));
}

#[test]
fn missing_title_uses_sentinel_without_panicking() {
    let mut config = devops_only_config();
    config.filters.must_keywords.clear();

    let record = api(json!({
        "employer_name": "Acme",
        "job_posted_at_datetime_utc": hours_ago(1)
    }));

    let jobs = run(&config, &[record]);

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].title, MISSING_TITLE);
}

#[test]
fn scraped_card_with_relative_age_flows_through() {
    let card = RawRecord::new(
        "example-board",
        RawJob::Scraped(ScrapedCard {
            id: Some("77".into()),
            title: Some("DevOps Engineer".into()),
            company: Some("Board Co".into()),
            posted: Some("3 hours ago".into()),
            ..Default::default()
        }),
    );

    let jobs = run(&devops_only_config(), &[card]);

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id, "example-board:77");
    assert_eq!(jobs[0].publisher, "example-board");
    assert_eq!(jobs[0].posted_at, Some(now() - TimeDelta::hours(3)));
}

#[tokio::test]
async fn collected_records_run_through_pipeline() {
    let record = |id: &str, employer: &str, hours: i64| {
        let Value::Object(map) = json!({
            "job_id": id,
            "job_title": "DevOps Engineer",
            "employer_name": employer,
            "job_publisher": "LinkedIn",
            "job_posted_at_datetime_utc": hours_ago(hours)
        }) else {
            unreachable!()
        };
        RawJob::Api(map)
    };

    let api = MockSource::new("jsearch")
        .with_jobs("DevOps Engineer", vec![record("1", "Acme", 1), record("2", "Old Co", 48)])
        .failing("SRE");
    let board = MockSource::new("board").with_jobs("SRE", vec![record("1", "Acme Updated", 2)]);

    let sources: Vec<Box<dyn JobSource>> = vec![Box::new(api), Box::new(board)];
    let queries = vec!["DevOps Engineer".to_string(), "SRE".to_string()];
    let collected = collect(&sources, &queries, "Bangalore, India", 4).await;

    assert_eq!(collected.failed, 1);
    assert_eq!(collected.records.len(), 3);

    let jobs = run(&devops_only_config(), &collected.records);

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].company, "Acme Updated");
    assert_eq!(jobs[0].source, "board");
}

#[test]
fn limit_applies_after_dedup() {
    let records: Vec<_> = (0..10)
        .map(|i| {
            api(json!({
                "job_id": format!("id-{}", i % 5),
                "job_title": format!("DevOps {}", i),
                "job_posted_at_datetime_utc": hours_ago(1)
            }))
        })
        .collect();

    let mut config = devops_only_config();
    config.max_jobs = 3;
    let output = JobPipeline::from_config(&config, now()).run(&records);

    let ids: Vec<_> = output.jobs.iter().map(|j| j.id.as_str()).collect();
    assert_eq!(ids, ["id-0", "id-1", "id-2"]);
    assert_eq!(output.jobs[0].title, "DevOps 5");
    assert_eq!(output.stats.duplicates, 5);
    assert_eq!(output.stats.truncated, 2);
}
