mod common;

use common::fixed_now;
use chrono::Duration;
use proptest::prelude::*;
use sweeper_lib::{RetentionPolicy, TimestampedFolder, Verdict};

fn folder(days_ago: i64, suffix: usize) -> TimestampedFolder {
    let stamp = (fixed_now() - Duration::days(days_ago)).format("%Y%m%d%H%M%S");
    TimestampedFolder::parse(&format!("/srv/drop/acme/{}_{}", stamp, suffix)).unwrap()
}

proptest! {
    #[test]
    fn folders_with_files_are_never_deleted(
        file_count in 1usize..100,
        days_ago in 0i64..4000,
    ) {
        let policy = RetentionPolicy::new(fixed_now());
        let candidate = folder(days_ago, 0);
        let siblings = vec![candidate.clone(), folder(0, 1)];

        let verdict = policy
            .evaluate(&candidate, file_count, || Ok(siblings))
            .unwrap();
        prop_assert_ne!(verdict, Verdict::Delete);
    }

    #[test]
    fn folders_within_the_window_are_never_deleted(
        days_ago in 0i64..=7,
        other_ages in prop::collection::vec(8i64..400, 0..5),
    ) {
        let policy = RetentionPolicy::new(fixed_now());
        let candidate = folder(days_ago, 0);
        let mut siblings = vec![candidate.clone()];
        siblings.extend(
            other_ages
                .iter()
                .enumerate()
                .map(|(i, age)| folder(*age, i + 1)),
        );

        let verdict = policy.evaluate(&candidate, 0, || Ok(siblings)).unwrap();
        prop_assert_ne!(verdict, Verdict::Delete);
    }

    #[test]
    fn the_most_recent_sibling_is_never_deleted(
        ages in prop::collection::vec(8i64..4000, 2..8),
    ) {
        let policy = RetentionPolicy::new(fixed_now());
        let siblings: Vec<TimestampedFolder> = ages
            .iter()
            .enumerate()
            .map(|(i, age)| folder(*age, i))
            .collect();

        let newest_age = *ages.iter().min().unwrap();
        let newest_idx = ages.iter().position(|age| *age == newest_age).unwrap();
        let candidate = siblings[newest_idx].clone();

        let verdict = policy
            .evaluate(&candidate, 0, || Ok(siblings))
            .unwrap();
        prop_assert_ne!(verdict, Verdict::Delete);
    }

    #[test]
    fn lone_folders_are_never_deleted(days_ago in 0i64..4000) {
        let policy = RetentionPolicy::new(fixed_now());
        let candidate = folder(days_ago, 0);

        let verdict = policy
            .evaluate(&candidate, 0, || Ok(vec![candidate.clone()]))
            .unwrap();
        prop_assert_ne!(verdict, Verdict::Delete);
    }

    #[test]
    fn expired_empty_folders_with_a_newer_sibling_are_deleted(
        days_ago in 9i64..4000,
    ) {
        let policy = RetentionPolicy::new(fixed_now());
        let candidate = folder(days_ago, 0);
        let newer = folder(8, 1);

        let verdict = policy
            .evaluate(&candidate, 0, || Ok(vec![candidate.clone(), newer]))
            .unwrap();
        prop_assert_eq!(verdict, Verdict::Delete);
    }
}
