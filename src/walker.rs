//! Lazy depth-first directory walker.
//!
//! Produces the absolute path of every non-directory entry under a root, one
//! path per pull. Directories are enumerated completely before their next
//! sibling. Siblings are visited in file-name order.
//!
//! Symbolic links are never descended: a link to a directory is skipped and
//! any other link is yielded as a leaf, so link cycles cannot occur.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use futures::stream::{self, Stream};
use thiserror::Error;
use tokio::task::{self, JoinError};
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum TraversalError {
    #[error("Cannot resolve walk root {path}: {source}")]
    Canonicalize {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Cannot list directory {path}: {source}")]
    ListDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Walk error at {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Walk worker for {path} did not complete: {source}")]
    Worker {
        path: PathBuf,
        #[source]
        source: JoinError,
    },
}

impl TraversalError {
    pub fn path(&self) -> &Path {
        match self {
            TraversalError::Canonicalize { path, .. }
            | TraversalError::ListDir { path, .. }
            | TraversalError::Walk { path, .. }
            | TraversalError::Worker { path, .. } => path,
        }
    }

    /// The underlying I/O error, if the failure came from the filesystem.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            TraversalError::Canonicalize { source, .. }
            | TraversalError::ListDir { source, .. }
            | TraversalError::Walk { source, .. } => Some(source),
            TraversalError::Worker { .. } => None,
        }
    }
}

/// Single-pass walker over the files under a root directory.
///
/// No I/O happens until the first call to [`Walker::next`]. Each pull runs one
/// step of the underlying [`WalkDir`] iterator on the blocking pool. After the
/// walk ends, or after it reports an error, every further pull returns `None`.
pub struct Walker {
    state: WalkState,
}

enum WalkState {
    NotStarted(PathBuf),
    Walking {
        root: PathBuf,
        entries: walkdir::IntoIter,
    },
    Done,
}

type Step = Option<Result<PathBuf, TraversalError>>;

impl Walker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Walker {
            state: WalkState::NotStarted(root.into()),
        }
    }

    /// Pull the next file path.
    pub async fn next(&mut self) -> Step {
        let state = std::mem::replace(&mut self.state, WalkState::Done);
        let root = match &state {
            WalkState::Done => return None,
            WalkState::NotStarted(root) | WalkState::Walking { root, .. } => root.clone(),
        };

        match task::spawn_blocking(move || advance(state)).await {
            Ok((state, step)) => {
                self.state = state;
                step
            }
            Err(source) => Some(Err(TraversalError::Worker { path: root, source })),
        }
    }

    /// Drain the walker, stopping at the first error.
    pub async fn collect_paths(mut self) -> Result<Vec<PathBuf>, TraversalError> {
        let mut paths = Vec::new();
        while let Some(path) = self.next().await {
            paths.push(path?);
        }
        Ok(paths)
    }

    /// Adapt the walker into a [`Stream`] of paths.
    pub fn into_stream(self) -> impl Stream<Item = Result<PathBuf, TraversalError>> {
        stream::unfold(self, |mut walker| async move {
            walker.next().await.map(|item| (item, walker))
        })
    }
}

impl fmt::Debug for Walker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            WalkState::NotStarted(root) => format!("not started at {}", root.display()),
            WalkState::Walking { root, .. } => format!("walking {}", root.display()),
            WalkState::Done => "done".to_string(),
        };
        f.debug_struct("Walker").field("state", &state).finish()
    }
}

// Blocking: one step of the walk. Returns the state to resume from.
fn advance(state: WalkState) -> (WalkState, Step) {
    let (root, mut entries) = match state {
        WalkState::Done => return (WalkState::Done, None),
        WalkState::NotStarted(root) => match open(&root) {
            Ok(opened) => opened,
            Err(e) => return (WalkState::Done, Some(Err(e))),
        },
        WalkState::Walking { root, entries } => (root, entries),
    };

    loop {
        let entry = match entries.next() {
            None => return (WalkState::Done, None),
            Some(Err(err)) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.clone());
                let source = io::Error::from(err);
                return (WalkState::Done, Some(Err(TraversalError::Walk { path, source })));
            }
            Some(Ok(entry)) => entry,
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            continue;
        }
        if file_type.is_symlink() && points_to_dir(entry.path()) {
            debug!(path = %entry.path().display(), "Skipping symlinked directory");
            continue;
        }

        return (
            WalkState::Walking { root, entries },
            Some(Ok(entry.into_path())),
        );
    }
}

fn open(root: &Path) -> Result<(PathBuf, walkdir::IntoIter), TraversalError> {
    let root = fs::canonicalize(root).map_err(|source| TraversalError::Canonicalize {
        path: root.to_path_buf(),
        source,
    })?;

    // WalkDir yields a non-directory root as a single entry; require a listable root.
    fs::read_dir(&root).map_err(|source| TraversalError::ListDir {
        path: root.clone(),
        source,
    })?;

    let entries = WalkDir::new(&root)
        .follow_links(false)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter();
    Ok((root, entries))
}

// Dangling or unreadable links count as "not a directory".
fn points_to_dir(link: &Path) -> bool {
    fs::metadata(link).map(|m| m.is_dir()).unwrap_or(false)
}
