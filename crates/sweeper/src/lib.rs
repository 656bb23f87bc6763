pub mod config;
pub mod engine;
pub mod error;
pub mod report;
pub mod retention;
pub mod service;
pub mod util;
pub mod walk;

pub use config::{Config, Credentials};
pub use engine::{SweepEngine, SweepOptions, SweepStats};
pub use error::{Result, SweepError};
pub use report::{Reporter, RunLog};
pub use retention::{
    timestamped_children, RetentionPolicy, TimestampedFolder, Verdict, RETENTION_DAYS,
};
pub use service::{
    DirectoryService, EntryKind, LocalDirectoryService, LocalSessionFactory,
    MemoryDirectoryService, MemorySessionFactory, RemoteEntry, SessionFactory, SessionPool,
};
pub use walk::{DirectoryListing, TreeLines, Walker};
