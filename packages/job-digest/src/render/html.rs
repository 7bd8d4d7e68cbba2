use std::fmt::Write;

use url::Url;

use super::{build_outreach, no_jobs_message, posted_label, RenderOptions};
use crate::types::Job;

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Anchor for http(s) links; anything else (`#`, `javascript:`, relative
/// paths) is shown as inert text.
fn apply_anchor(link: &str) -> String {
    match Url::parse(link) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            format!("<a href=\"{}\">Apply</a>", escape(url.as_str()))
        }
        _ => format!("<span class=\"meta\">Apply: {}</span>", escape(link)),
    }
}

const STYLE: &str = "body{font-family:sans-serif;max-width:52rem;margin:2rem auto;line-height:1.45}\
.job{border-bottom:1px solid #ddd;padding:.75rem 0}\
.meta{color:#555;font-size:.9rem}\
pre{white-space:pre-wrap;background:#f6f6f6;padding:.75rem}";

pub fn render(jobs: &[Job], options: &RenderOptions) -> String {
    let title = escape(&options.subject(jobs.len()));
    let mut out = String::new();
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<h1>{title}</h1>\n"
    );

    if jobs.is_empty() {
        let _ = writeln!(out, "<p>{}</p>", no_jobs_message(options.max_age_hours));
        out.push_str("</body>\n</html>\n");
        return out;
    }

    let _ = writeln!(out, "<p>{}</p>", escape(&options.intro()));
    out.push_str("<ol>\n");
    for job in jobs {
        let _ = writeln!(
            out,
            "<li class=\"job\">\n<strong>{}</strong> — {}<br>\n\
             <span class=\"meta\">{} · {} · posted {}</span><br>\n\
             {}\n<p>{}</p>\n</li>",
            escape(&job.title),
            escape(&job.company),
            escape(&job.location),
            escape(&job.publisher),
            posted_label(job),
            apply_anchor(&job.apply_link),
            escape(&job.display_description(options.description_chars)),
        );
    }
    out.push_str("</ol>\n<h2>Outreach messages</h2>\n");

    for (i, (job, outreach)) in jobs.iter().zip(build_outreach(jobs, options)).enumerate() {
        let _ = writeln!(
            out,
            "<h3>[{}] {} — {} ({})</h3>\n<pre>{}</pre>",
            i + 1,
            escape(&job.title),
            escape(&job.company),
            escape(&job.location),
            escape(&outreach.message),
        );
    }

    out.push_str("</body>\n</html>\n");
    out
}
