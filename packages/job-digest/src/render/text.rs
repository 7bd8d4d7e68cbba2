//! Plain-text digest: an email summary followed by outreach messages.

use std::fmt::Write;

use super::{build_outreach, no_jobs_message, RenderOptions};
use crate::types::Job;

const SEPARATOR_WIDTH: usize = 50;

/// The email body on its own, subject line first.
pub fn email(jobs: &[Job], options: &RenderOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Subject: {}", options.subject(jobs.len()));
    out.push('\n');
    out.push_str("Hi,\n\n");

    if jobs.is_empty() {
        let _ = writeln!(out, "{}", no_jobs_message(options.max_age_hours));
        return out;
    }

    let _ = writeln!(out, "{}\n", options.intro());
    for (i, job) in jobs.iter().enumerate() {
        let _ = write!(
            out,
            "{}. {} — {}\n   Location: {}\n   Source: {}\n   Apply: {}\n   {}\n\n",
            i + 1,
            job.title,
            job.company,
            job.location,
            job.publisher,
            job.apply_link,
            job.display_description(options.description_chars),
        );
    }
    out
}

pub fn render(jobs: &[Job], options: &RenderOptions) -> String {
    let mut out = String::from("=== EMAIL SUMMARY ===\n\n");
    out.push_str(&email(jobs, options));
    out.push_str("\n\n=== LINKEDIN MESSAGES ===\n\n");

    for (i, (job, outreach)) in jobs.iter().zip(build_outreach(jobs, options)).enumerate() {
        let _ = write!(
            out,
            "[{}] {} — {} ({})\nSource: {}\nApply: {}\n\n{}\n\n{}\n\n",
            i + 1,
            job.title,
            job.company,
            job.location,
            job.publisher,
            job.apply_link,
            outreach.message,
            "-".repeat(SEPARATOR_WIDTH),
        );
    }
    out
}
