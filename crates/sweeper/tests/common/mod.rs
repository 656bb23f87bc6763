use chrono::{DateTime, Duration, TimeZone, Utc};
use sweeper_lib::{MemoryDirectoryService, MemorySessionFactory, Reporter};

pub const ROOT: &str = "/srv/drop";
pub const ARCHIVE: &str = "/srv/drop-logs";

/// The clock every end-to-end test runs against.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap()
}

/// Folder-name timestamp for `days_ago` days before [`fixed_now`].
pub fn stamp(days_ago: i64) -> String {
    (fixed_now() - Duration::days(days_ago))
        .format("%Y%m%d%H%M%S")
        .to_string()
}

pub struct TreeBuilder {
    pub factory: MemorySessionFactory,
    session: MemoryDirectoryService,
}

impl TreeBuilder {
    pub fn new() -> Self {
        let factory = MemorySessionFactory::new();
        let session = factory.session();
        session.add_dir(ROOT).unwrap();
        session.add_dir(ARCHIVE).unwrap();
        TreeBuilder { factory, session }
    }

    pub fn drop_folder(&self, company: &str, name: &str) -> &Self {
        self.session
            .add_dir(&format!("{}/{}/{}", ROOT, company, name))
            .unwrap();
        self
    }

    pub fn drop_folder_with_file(&self, company: &str, name: &str, file: &str) -> &Self {
        self.session
            .add_file(&format!("{}/{}/{}/{}", ROOT, company, name, file), b"data")
            .unwrap();
        self
    }

    pub fn contains(&self, company: &str, name: &str) -> bool {
        self.session
            .contains(&format!("{}/{}/{}", ROOT, company, name))
    }

    pub fn session(&self) -> MemoryDirectoryService {
        self.factory.session()
    }
}

/// Reporter capturing lines for assertions.
#[derive(Default)]
pub struct Recorder {
    pub lines: Vec<String>,
}

impl Reporter for Recorder {
    fn info(&mut self, message: &str) {
        self.lines.push(message.to_string());
    }
}
