use std::fmt::Write;

use url::Url;

use super::{build_outreach, no_jobs_message, posted_label, RenderOptions};
use crate::types::Job;

/// Escape characters that would otherwise start Markdown formatting.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '*' | '_' | '`' | '[' | ']' | '<' | '>' | '#' | '|') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Autolink for http(s) links only.
fn apply_link(link: &str) -> String {
    match Url::parse(link) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => format!("<{}>", url),
        _ => escape(link),
    }
}

pub fn render(jobs: &[Job], options: &RenderOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", escape(&options.subject(jobs.len())));

    if jobs.is_empty() {
        let _ = writeln!(out, "{}", no_jobs_message(options.max_age_hours));
        return out;
    }

    let _ = writeln!(out, "{}\n", escape(&options.intro()));

    for (i, job) in jobs.iter().enumerate() {
        let _ = writeln!(out, "## {}. {} — {}\n", i + 1, escape(&job.title), escape(&job.company));
        let _ = writeln!(out, "- **Location:** {}", escape(&job.location));
        let _ = writeln!(out, "- **Source:** {}", escape(&job.publisher));
        let _ = writeln!(out, "- **Posted:** {}", posted_label(job));
        let _ = writeln!(out, "- **Apply:** {}\n", apply_link(&job.apply_link));
        let _ = writeln!(
            out,
            "{}\n",
            escape(&job.display_description(options.description_chars))
        );
    }

    out.push_str("## Outreach messages\n\n");
    for (i, (job, outreach)) in jobs.iter().zip(build_outreach(jobs, options)).enumerate() {
        let _ = writeln!(out, "### [{}] {} — {}\n", i + 1, escape(&job.title), escape(&job.company));
        let _ = writeln!(out, "```text\n{}\n```\n", outreach.message);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fixtures::job;

    #[test]
    fn test_markdown_sections() {
        let out = render(&[job("1", "SRE_Lead", "Acme")], &RenderOptions::default());
        assert!(out.starts_with("# DevOps/SRE Job Digest (1 roles)\n"));
        assert!(out.contains("## 1. SRE\\_Lead — Acme"));
        assert!(out.contains("- **Posted:** 2025-03-10T06:30:00Z"));
        assert!(out.contains("- **Apply:** <https://jobs.example/1>"));
        assert!(out.contains("Kubernetes platform & Terraform modules \\<fast\\>."));
        assert!(out.contains("```text\nHi {Name},"));
    }

    #[test]
    fn test_non_web_links_are_not_autolinked() {
        let mut j = job("1", "SRE", "Acme");
        j.apply_link = "javascript:alert(1)".into();
        let out = render(&[j], &RenderOptions::default());
        assert!(out.contains("- **Apply:** javascript:alert(1)\n"));
        assert!(!out.contains("<javascript:"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("*bold* [x]"), "\\*bold\\* \\[x\\]");
    }
}
