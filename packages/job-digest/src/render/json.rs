use serde::Serialize;

use super::{build_outreach, no_jobs_message, OutreachMessage, RenderOptions};
use crate::error::ReportResult;
use crate::types::Job;

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    title: String,
    max_age_hours: u32,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    jobs: &'a [Job],
    outreach: Vec<OutreachMessage>,
}

/// Pretty JSON with a trailing newline. Descriptions are kept whole.
pub fn render(jobs: &[Job], options: &RenderOptions) -> ReportResult<String> {
    let report = JsonReport {
        title: options.subject(jobs.len()),
        max_age_hours: options.max_age_hours,
        count: jobs.len(),
        message: jobs
            .is_empty()
            .then(|| no_jobs_message(options.max_age_hours)),
        jobs,
        outreach: build_outreach(jobs, options),
    };

    let mut out = serde_json::to_string_pretty(&report)?;
    out.push('\n');
    Ok(out)
}
