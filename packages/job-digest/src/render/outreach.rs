//! Templated outreach messages, one per job.

use serde::Serialize;

use super::RenderOptions;
use crate::types::Job;

/// `{Name}` is the recipient and is left for the sender to fill in.
pub const DEFAULT_TEMPLATE: &str = "Hi {Name},\n\n\
I came across the *{title}* job at *{company}* via {publisher}. \
I have 3+ years of hands-on experience with AWS, Kubernetes, Docker, Terraform, and CI/CD pipelines.\n\n\
I’d love to explore if I could be a good fit. Can we connect?\n\n\
Regards,\n{candidate}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutreachMessage {
    pub job_id: String,
    pub message: String,
}

/// Fill the template for one job.
///
/// Single pass over the template: substituted values are never scanned
/// again, so a title containing `{company}` stays literal.
pub fn fill_template(template: &str, job: &Job, candidate: &str) -> String {
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];

        let Some(close) = tail.find('}') else {
            rest = tail;
            break;
        };

        let value = match &tail[1..close] {
            "title" => Some(job.title.as_str()),
            "company" => Some(job.company.as_str()),
            "location" => Some(job.location.as_str()),
            "publisher" => Some(job.publisher.as_str()),
            "candidate" => Some(candidate),
            _ => None,
        };

        match value {
            Some(value) => {
                out.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

pub fn build_outreach(jobs: &[Job], options: &RenderOptions) -> Vec<OutreachMessage> {
    jobs.iter()
        .map(|job| OutreachMessage {
            job_id: job.id.clone(),
            message: fill_template(&options.template, job, &options.candidate_name),
        })
        .collect()
}
