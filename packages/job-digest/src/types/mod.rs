pub mod job;
pub mod raw;

pub use job::{Job, MISSING_TITLE, NO_APPLY_LINK, SYNTHETIC_ID_PREFIX, UNKNOWN};
pub use raw::{RawJob, RawRecord, ScrapedCard};
