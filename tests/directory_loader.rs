mod common;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use common::{create_tree, rel};
use context_ingest::document::{Document, Metadata};
use context_ingest::identity::{hash_document, IdentityModel};
use context_ingest::reader::{DocumentReader, PlainTextReader, ReadError, ReaderRegistry};
use context_ingest::walker::{TraversalError, Walker};
use context_ingest::{DirectoryLoader, LoadError, Settings};
use serde_json::Value;

/// Reads `{"body": "...", ...}` files: `body` becomes the text, the remaining
/// keys become metadata in file order.
struct JsonReader;

#[async_trait]
impl DocumentReader for JsonReader {
    async fn load_data(&self, path: &Path) -> Result<Document, ReadError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ReadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let value: Value = serde_json::from_str(&raw).map_err(|e| ReadError::Other {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let Value::Object(map) = value else {
            return Err(ReadError::Other {
                path: path.to_path_buf(),
                message: "expected a JSON object".into(),
            });
        };

        let mut text = String::new();
        let mut metadata = Metadata::new();
        for (k, v) in map {
            match v {
                Value::String(body) if k == "body" => text = body,
                v => {
                    metadata.insert(k, v);
                }
            }
        }
        Ok(Document::with_metadata(text, metadata))
    }
}

/// Plain-text reader that removes `victim` before reading, so the walk hits
/// a directory that vanished after its parent was listed.
struct DeletingReader {
    victim: PathBuf,
}

#[async_trait]
impl DocumentReader for DeletingReader {
    async fn load_data(&self, path: &Path) -> Result<Document, ReadError> {
        if self.victim.exists() {
            std::fs::remove_dir_all(&self.victim).map_err(|source| ReadError::Io {
                path: self.victim.clone(),
                source,
            })?;
        }
        PlainTextReader.load_data(path).await
    }
}

struct FailingReader {
    calls: AtomicUsize,
}

#[async_trait]
impl DocumentReader for FailingReader {
    async fn load_data(&self, path: &Path) -> Result<Document, ReadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ReadError::Other {
            path: path.to_path_buf(),
            message: "unsupported".into(),
        })
    }
}

#[tokio::test]
async fn end_to_end_hello_world() {
    let tree = create_tree(&[("a.txt", b"hello"), ("sub/b.txt", b"world")]);
    let identity = IdentityModel::new(Settings::new());

    let docs = DirectoryLoader::new().load_data(tree.path()).await.unwrap();

    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].text(), "hello");
    assert_eq!(docs[1].text(), "world");

    for doc in &docs {
        assert!(doc.metadata().is_empty());
        assert_eq!(identity.content(doc), doc.text());
    }

    let id_a = identity.id(&docs[0]);
    let id_b = identity.id(&docs[1]);
    assert_ne!(id_a, id_b);
    assert_eq!(id_a, hash_document("hello", &Metadata::new()));
    assert_eq!(id_b, hash_document("world", &Metadata::new()));
}

#[tokio::test]
async fn order_matches_walker() {
    let tree = create_tree(&[
        ("z.txt", b"z"),
        ("m/2.txt", b"m2"),
        ("m/1/deep.txt", b"deep"),
        ("a.txt", b"a"),
        ("m/0.txt", b"m0"),
    ]);

    let paths = Walker::new(tree.path()).collect_paths().await.unwrap();
    let rels: Vec<String> = paths.iter().map(|p| rel(tree.path(), p)).collect();
    assert_eq!(rels, vec!["a.txt", "m/0.txt", "m/1/deep.txt", "m/2.txt", "z.txt"]);

    let docs = DirectoryLoader::new().load_data(tree.path()).await.unwrap();
    let texts: Vec<&str> = docs.iter().map(Document::text).collect();
    assert_eq!(texts, vec!["a", "m0", "deep", "m2", "z"]);
}

#[tokio::test]
async fn unregistered_extension_uses_plain_text() {
    let tree = create_tree(&[("notes.md", "# Title\n\nbody ✓\n".as_bytes())]);
    let mut loader = DirectoryLoader::new();
    loader.register(".json", Arc::new(JsonReader));

    let docs = loader.load_data(tree.path()).await.unwrap();

    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].text(), "# Title\n\nbody ✓\n");
    assert!(docs[0].metadata().is_empty());
}

#[tokio::test]
async fn registered_extension_is_dispatched() {
    let tree = create_tree(&[
        ("a.json", br#"{"title": "A", "body": "alpha", "rev": 2}"#),
        ("b.txt", b"{\"body\": \"not parsed\"}"),
    ]);
    let identity = IdentityModel::new(Settings::new());

    let mut registry = ReaderRegistry::new();
    registry.register(".json", Arc::new(JsonReader));
    let loader = DirectoryLoader::with_registry(registry);

    let docs = loader.load_data(tree.path()).await.unwrap();

    assert_eq!(docs[0].text(), "alpha");
    assert_eq!(docs[0].metadata().entries_json(), r#"[["title","A"],["rev",2]]"#);
    assert_eq!(identity.content(&docs[0]), "[[\"title\",\"A\"],[\"rev\",2]]\nalpha");

    assert_eq!(docs[1].text(), "{\"body\": \"not parsed\"}");
}

#[tokio::test]
async fn files_without_extension_use_fallback() {
    let tree = create_tree(&[("README", b"readme"), (".hidden", b"dot"), ("x.", b"dot-end")]);
    let failing = Arc::new(FailingReader {
        calls: AtomicUsize::new(0),
    });
    let mut loader = DirectoryLoader::new();
    loader.register(".txt", failing.clone());

    let docs = loader.load_data(tree.path()).await.unwrap();

    let texts: Vec<&str> = docs.iter().map(Document::text).collect();
    assert_eq!(texts, vec!["dot", "readme", "dot-end"]);
    assert_eq!(failing.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failing_registered_reader_is_not_replaced() {
    let tree = create_tree(&[("a.txt", b"fine"), ("b.pdf", b"plain text really")]);
    let failing = Arc::new(FailingReader {
        calls: AtomicUsize::new(0),
    });
    let mut loader = DirectoryLoader::new();
    loader.register(".pdf", failing.clone());

    let err = loader.load_data(tree.path()).await.unwrap_err();

    match &err {
        LoadError::Read(ReadError::Other { path, message }) => {
            assert!(path.ends_with("b.pdf"));
            assert_eq!(message, "unsupported");
        }
        other => panic!("expected reader failure, got {other:?}"),
    }
    assert!(err.path().ends_with("b.pdf"));
    assert_eq!(failing.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn first_failure_aborts_load() {
    let tree = create_tree(&[
        ("a.txt", b"good"),
        ("b.txt", &[0xff, 0xfe, 0x00]),
        ("c.txt", b"never read"),
    ]);

    let result = DirectoryLoader::new().load_data(tree.path()).await;

    match result {
        Err(LoadError::Read(ReadError::InvalidUtf8 { path, .. })) => {
            assert!(path.ends_with("b.txt"));
        }
        other => panic!("expected InvalidUtf8, got {other:?}"),
    }
}

#[tokio::test]
async fn directory_vanishing_mid_walk_aborts_load() {
    let tree = create_tree(&[("a.txt", b"first"), ("b/c.txt", b"gone"), ("d.txt", b"later")]);
    let mut loader = DirectoryLoader::new();
    loader.register(
        ".txt",
        Arc::new(DeletingReader {
            victim: tree.path().join("b"),
        }),
    );

    let err = loader.load_data(tree.path()).await.unwrap_err();

    match &err {
        LoadError::Traversal(TraversalError::Walk { path, source }) => {
            assert!(path.ends_with("b"), "unexpected path {path:?}");
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected traversal failure for b/, got {other:?}"),
    }
    assert!(err.path().ends_with("b"));
}

#[tokio::test]
async fn missing_root_is_traversal_error() {
    let tree = create_tree(&[]);
    let missing = tree.path().join("does-not-exist");

    let err = DirectoryLoader::new().load_data(&missing).await.unwrap_err();

    assert!(matches!(err, LoadError::Traversal(_)));
    assert_eq!(err.path(), missing.as_path());
}

#[tokio::test]
async fn empty_directory_loads_nothing() {
    let tree = create_tree(&[]);
    let docs = DirectoryLoader::new().load_data(tree.path()).await.unwrap();
    assert!(docs.is_empty());
}

#[tokio::test]
async fn walker_stream_yields_same_paths() {
    use futures::TryStreamExt;

    let tree = create_tree(&[("one.txt", b"1"), ("d/two.txt", b"2")]);

    let from_stream: Vec<_> = Walker::new(tree.path())
        .into_stream()
        .try_collect()
        .await
        .unwrap();
    let from_pull = Walker::new(tree.path()).collect_paths().await.unwrap();

    assert_eq!(from_stream, from_pull);
}
