// Shared helpers for integration tests

use std::fs;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

/// Create a temp tree with the given `(relative path, contents)` files.
#[allow(dead_code)] // Used in integration tests
pub fn create_tree(files: &[(&str, &[u8])]) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    for (file, contents) in files {
        let path = temp_dir.path().join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
    }
    temp_dir
}

/// Relative, forward-slash form of `path` under `root`.
#[allow(dead_code)] // Used in integration tests
pub fn rel(root: &Path, path: &Path) -> String {
    let root = fs::canonicalize(root).unwrap();
    path.strip_prefix(&root)
        .unwrap()
        .to_string_lossy()
        .replace('\\', "/")
}

/// In-memory log sink for a scoped tracing subscriber.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Run `f` with a WARN-level subscriber writing into this capture.
    #[allow(dead_code)] // Used in integration tests
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        let sink = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }

    #[allow(dead_code)] // Used in integration tests
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
