use std::fs::File;
use std::io;
use std::path::Path;

/// A single unit of work performed by each worker iteration.
pub trait Operation: Send + Sync + 'static {
    fn perform(&self, path: &Path);
}

/// Open `path` for reading and close the handle immediately.
pub fn open_and_close(path: &Path) -> io::Result<()> {
    File::open(path).map(drop)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OpenAndClose;

impl Operation for OpenAndClose {
    fn perform(&self, path: &Path) {
        // Failed opens still produce an audit record, so they are not reported.
        let _ = open_and_close(path);
    }
}
