//! The sweep run: walk, evaluate, delete, tally.

use crate::error::Result;
use crate::report::Reporter;
use crate::retention::{
    timestamped_children, RetentionPolicy, TimestampedFolder, Verdict, RETENTION_DAYS,
};
use crate::service::pool::{SessionFactory, SessionPool};
use crate::service::DirectoryService;
use crate::walk::{TreeLines, Walker};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct SweepOptions {
    /// Base path holding the company folders.
    pub root: String,
    /// Evaluate and log without issuing removals.
    pub dry_run: bool,
}

/// Final tallies of one run. Mutated only by the engine, handed to the
/// reporter at run end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepStats {
    pub deleted: usize,
    /// Expired folders retained only because they still contain files.
    pub skipped_with_files: Vec<String>,
}

/// Drives one sweep over the session pool.
///
/// The traversal runs on a dedicated session for its whole duration; sibling
/// listings and removals go through pooled sessions so they never disturb the
/// traversal. Any remote failure aborts the run; tallies gathered before the
/// failure are not reported.
pub struct SweepEngine<'a, F: SessionFactory> {
    pool: &'a mut SessionPool<F>,
    options: SweepOptions,
}

impl<'a, F: SessionFactory> SweepEngine<'a, F> {
    pub fn new(pool: &'a mut SessionPool<F>, options: SweepOptions) -> Self {
        SweepEngine { pool, options }
    }

    pub fn run(&mut self, reporter: &mut dyn Reporter) -> Result<SweepStats> {
        self.run_at(Utc::now(), reporter)
    }

    /// Runs the sweep against an explicit clock.
    pub fn run_at(
        &mut self,
        now: DateTime<Utc>,
        reporter: &mut dyn Reporter,
    ) -> Result<SweepStats> {
        let policy = RetentionPolicy::new(now);
        let root = self.options.root.clone();
        let dry_run = self.options.dry_run;

        let mut traversal = self.pool.connect()?;

        reporter.info("###### Directory Tree ######");
        for line in TreeLines::new(&mut traversal, &root) {
            reporter.info(&line?);
        }

        reporter.info("###### Removing Drop Folders ######");
        reporter.info("\t- empty");
        reporter.info(&format!("\t- older than {} days", RETENTION_DAYS));
        reporter.info("\t- not the only drop folder for the company");
        reporter.info("\t- not the most recent drop folder");

        let mut stats = SweepStats::default();
        let mut walker = Walker::new(&mut traversal, &root);
        while let Some(listing) = walker.next() {
            let listing = listing?;
            let folder = match TimestampedFolder::parse(&listing.path) {
                Some(folder) => folder,
                None => continue,
            };

            let verdict = policy.evaluate(&folder, listing.files.len(), || {
                self.pool
                    .with(|session| timestamped_children(session, &folder.parent))
            })?;

            match verdict {
                Verdict::Delete => {
                    if dry_run {
                        reporter.info(&format!("DRY RUN: would delete {}", listing.path));
                    } else {
                        reporter.info(&format!("Deleting {}", listing.path));
                        self.pool
                            .with(|session| session.remove_dir(&listing.path))?;
                    }
                    stats.deleted += 1;
                }
                Verdict::RetainNonEmpty => {
                    if policy.expired(&folder) {
                        stats.skipped_with_files.push(listing.path.clone());
                    }
                }
                Verdict::RetainTooYoung
                | Verdict::RetainOnlySibling
                | Verdict::RetainNotOldest => {}
            }
        }

        reporter.info(&format!("Deleted {} directories", stats.deleted));
        reporter.info("###### Non-Deleted Full Directories ######");
        for path in &stats.skipped_with_files {
            reporter.info(&format!("Folder with files {}", path));
        }
        reporter.info(&format!(
            "Skipped {} directories",
            stats.skipped_with_files.len()
        ));

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{MemoryDirectoryService, MemorySessionFactory};
    use chrono::TimeZone;

    #[derive(Default)]
    struct Recorder {
        lines: Vec<String>,
    }

    impl Reporter for Recorder {
        fn info(&mut self, message: &str) {
            self.lines.push(message.to_string());
        }
    }

    fn run_sweep(
        factory: &MemorySessionFactory,
        dry_run: bool,
    ) -> (SweepStats, Vec<String>) {
        let mut pool = SessionPool::new(factory.clone());
        let mut engine = SweepEngine::new(
            &mut pool,
            SweepOptions {
                root: "/drop".to_string(),
                dry_run,
            },
        );
        let mut recorder = Recorder::default();
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
        let stats = engine.run_at(now, &mut recorder).unwrap();
        (stats, recorder.lines)
    }

    fn seeded_factory() -> (MemorySessionFactory, MemoryDirectoryService) {
        let factory = MemorySessionFactory::new();
        let session = factory.session();
        (factory, session)
    }

    #[test]
    fn test_older_empty_folder_deleted_newest_kept() {
        let (factory, session) = seeded_factory();
        session.add_dir("/drop/acme/20240101000000_a").unwrap();
        session.add_dir("/drop/acme/20240601000000_b").unwrap();

        let (stats, _) = run_sweep(&factory, false);

        assert_eq!(stats.deleted, 1);
        assert!(stats.skipped_with_files.is_empty());
        assert!(!session.contains("/drop/acme/20240101000000_a"));
        assert!(session.contains("/drop/acme/20240601000000_b"));
    }

    #[test]
    fn test_expired_folder_with_files_is_recorded_not_deleted() {
        let (factory, session) = seeded_factory();
        session
            .add_file("/drop/acme/20240101000000_a/batch.csv", b"1")
            .unwrap();
        session.add_dir("/drop/acme/20240601000000_b").unwrap();

        let (stats, lines) = run_sweep(&factory, false);

        assert_eq!(stats.deleted, 0);
        assert_eq!(
            stats.skipped_with_files,
            vec!["/drop/acme/20240101000000_a".to_string()]
        );
        assert!(session.contains("/drop/acme/20240101000000_a/batch.csv"));
        assert!(lines
            .iter()
            .any(|l| l == "Folder with files /drop/acme/20240101000000_a"));
    }

    #[test]
    fn test_young_folder_with_files_is_not_recorded() {
        let (factory, session) = seeded_factory();
        session
            .add_file("/drop/acme/20240630000000_a/batch.csv", b"1")
            .unwrap();
        session.add_dir("/drop/acme/20240701000000_b").unwrap();

        let (stats, _) = run_sweep(&factory, false);

        assert_eq!(stats.deleted, 0);
        assert!(stats.skipped_with_files.is_empty());
    }

    #[test]
    fn test_lone_folder_survives_regardless_of_age() {
        let (factory, session) = seeded_factory();
        session.add_dir("/drop/acme/20200101000000_a").unwrap();

        let (stats, _) = run_sweep(&factory, false);

        assert_eq!(stats.deleted, 0);
        assert!(session.contains("/drop/acme/20200101000000_a"));
    }

    #[test]
    fn test_non_matching_names_are_skipped_without_evaluation() {
        let (factory, session) = seeded_factory();
        session.add_dir("/drop/acme/archive").unwrap();
        session.add_dir("/drop/acme/2024010100000").unwrap();

        let (stats, _) = run_sweep(&factory, false);

        assert_eq!(stats.deleted, 0);
        assert!(session.contains("/drop/acme/archive"));
        assert!(session.contains("/drop/acme/2024010100000"));
    }

    #[test]
    fn test_deletions_visible_to_later_sibling_lookups() {
        let (factory, session) = seeded_factory();
        session.add_dir("/drop/acme/20240101000000_a").unwrap();
        session.add_dir("/drop/acme/20240102000000_b").unwrap();

        let (stats, _) = run_sweep(&factory, false);

        // a is deleted; by the time b is evaluated it is the only child left.
        assert_eq!(stats.deleted, 1);
        assert!(session.contains("/drop/acme/20240102000000_b"));
    }

    #[test]
    fn test_dry_run_counts_without_removing() {
        let (factory, session) = seeded_factory();
        session.add_dir("/drop/acme/20240101000000_a").unwrap();
        session.add_dir("/drop/acme/20240601000000_b").unwrap();

        let (stats, lines) = run_sweep(&factory, true);

        assert_eq!(stats.deleted, 1);
        assert!(session.contains("/drop/acme/20240101000000_a"));
        assert!(lines
            .iter()
            .any(|l| l == "DRY RUN: would delete /drop/acme/20240101000000_a"));
    }

    #[test]
    fn test_identical_trees_yield_identical_stats() {
        let build = || {
            let (factory, session) = seeded_factory();
            session
                .add_file("/drop/acme/20240101000000_a/batch.csv", b"1")
                .unwrap();
            session.add_dir("/drop/acme/20240201000000_b").unwrap();
            session.add_dir("/drop/acme/20240601000000_c").unwrap();
            factory
        };

        let (first, _) = run_sweep(&build(), false);
        let (second, _) = run_sweep(&build(), false);
        assert_eq!(first, second);
    }

    #[test]
    fn test_final_tallies_are_reported() {
        let (factory, session) = seeded_factory();
        session.add_dir("/drop/acme/20240101000000_a").unwrap();
        session.add_dir("/drop/acme/20240601000000_b").unwrap();

        let (_, lines) = run_sweep(&factory, false);

        assert!(lines.iter().any(|l| l == "Deleted 1 directories"));
        assert!(lines.iter().any(|l| l == "Skipped 0 directories"));
    }
}
