//! Id-based deduplication (last occurrence wins) and result limiting.

use indexmap::IndexMap;

use crate::types::Job;

/// Collapse jobs sharing an id.
///
/// The surviving value for each id is the last one seen, while its position
/// is where the id first appeared. `IndexMap::insert` on an existing key
/// replaces the value in place, which gives exactly that.
pub fn dedup_last_wins(jobs: impl IntoIterator<Item = Job>) -> Vec<Job> {
    let mut unique: IndexMap<String, Job> = IndexMap::new();
    for job in jobs {
        unique.insert(job.id.clone(), job);
    }
    unique.into_values().collect()
}

/// Keep at most `max_jobs`, in the order given. No re-ranking.
pub fn limit(mut jobs: Vec<Job>, max_jobs: usize) -> Vec<Job> {
    jobs.truncate(max_jobs);
    jobs
}

pub fn dedup_and_limit(jobs: impl IntoIterator<Item = Job>, max_jobs: usize) -> Vec<Job> {
    limit(dedup_last_wins(jobs), max_jobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn job(id: &str, company: &str) -> Job {
        Job {
            id: id.into(),
            title: "SRE".into(),
            company: company.into(),
            location: String::new(),
            publisher: "LinkedIn".into(),
            source: "test".into(),
            apply_link: "#".into(),
            posted_at: None,
            description: String::new(),
        }
    }

    #[test]
    fn test_last_occurrence_wins_at_first_position() {
        let out = dedup_last_wins(vec![
            job("a", "First A"),
            job("b", "Only B"),
            job("a", "Second A"),
            job("c", "Only C"),
        ]);

        let view: Vec<_> = out.iter().map(|j| (j.id.as_str(), j.company.as_str())).collect();
        assert_eq!(view, [("a", "Second A"), ("b", "Only B"), ("c", "Only C")]);
    }

    #[test]
    fn test_limit_truncates_in_order() {
        let jobs = vec![job("a", "A"), job("b", "B"), job("c", "C")];
        let ids: Vec<_> = limit(jobs.clone(), 2).into_iter().map(|j| j.id).collect();
        assert_eq!(ids, ["a", "b"]);
        assert!(limit(jobs.clone(), 0).is_empty());
        assert_eq!(limit(jobs, 10).len(), 3);
    }

    #[test]
    fn test_empty_input() {
        assert!(dedup_and_limit(Vec::new(), 5).is_empty());
    }

    fn arb_jobs() -> impl Strategy<Value = Vec<Job>> {
        prop::collection::vec((0u8..8, 0u16..1000), 0..60).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(id, tag)| job(&id.to_string(), &format!("company-{}", tag)))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn dedup_keeps_one_per_id_with_last_value(jobs in arb_jobs()) {
            let distinct: HashSet<_> = jobs.iter().map(|j| j.id.clone()).collect();
            let out = dedup_last_wins(jobs.clone());

            prop_assert_eq!(out.len(), distinct.len());
            for survivor in &out {
                let last = jobs.iter().rev().find(|j| j.id == survivor.id).unwrap();
                prop_assert_eq!(survivor, last);
            }
        }

        #[test]
        fn limited_output_preserves_first_establishment_order(
            jobs in arb_jobs(),
            max_jobs in 0usize..10,
        ) {
            let mut first_seen: Vec<String> = Vec::new();
            for j in &jobs {
                if !first_seen.contains(&j.id) {
                    first_seen.push(j.id.clone());
                }
            }

            let out = dedup_and_limit(jobs, max_jobs);
            let ids: Vec<String> = out.into_iter().map(|j| j.id).collect();

            prop_assert!(ids.len() <= max_jobs);
            prop_assert_eq!(&ids[..], &first_seen[..ids.len()]);
        }
    }
}
