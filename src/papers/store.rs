//! On-disk topic cache.
//!
//! ```text
//! <root>/
//!   quantum_computing/
//!     papers_info.json
//!   machine_learning/
//!     papers_info.json
//! ```
//!
//! Each file is a JSON object mapping short paper ids to a record. Records
//! written here follow [`PaperInfo`](crate::models::PaperInfo), but records are kept as raw JSON so
//! entries written by other tools survive a merge untouched.
//! There is no global index: lookups by id scan every topic directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde_json::{Map, Value};

use crate::models::Paper;

/// File name used inside every topic directory
pub const PAPERS_FILE: &str = "papers_info.json";

/// Contents of one topic cache file, keyed by short paper id
pub type TopicPapers = Map<String, Value>;

/// Directory name for a topic: lowercased, spaces replaced by underscores
pub fn normalize_topic(topic: &str) -> String {
    topic.to_lowercase().replace(' ', "_")
}

/// Outcome of a lookup across all topics
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The cache root has no entries at all
    NoTopics,
    /// First matching record in directory listing order
    Found(Value),
    /// Topics exist but none contains the id
    NotFound,
}

/// File-backed cache of paper metadata partitioned by topic
#[derive(Debug)]
pub struct TopicStore {
    root: PathBuf,
    // Serializes read-modify-write of topic files within this process.
    write_lock: Mutex<()>,
}

impl TopicStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the cache root if it does not exist
    pub fn initialize(&self) -> io::Result<()> {
        fs::create_dir_all(&self.root)
    }

    pub fn topic_dir(&self, topic: &str) -> PathBuf {
        self.root.join(normalize_topic(topic))
    }

    pub fn topic_file(&self, topic: &str) -> PathBuf {
        self.topic_dir(topic).join(PAPERS_FILE)
    }

    /// Stored papers for `topic`; a missing or unparsable file reads as empty
    pub fn load(&self, topic: &str) -> TopicPapers {
        read_papers(&self.topic_file(topic)).unwrap_or_default()
    }

    /// Merge `papers` into the topic file and return its path.
    ///
    /// Returned ids overwrite their previous records; ids not in `papers`
    /// keep whatever was stored before.
    pub fn merge(&self, topic: &str, papers: &[Paper]) -> io::Result<PathBuf> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let dir = self.topic_dir(topic);
        fs::create_dir_all(&dir)?;

        let path = dir.join(PAPERS_FILE);
        let mut stored = read_papers(&path).unwrap_or_default();
        for paper in papers {
            let record = serde_json::to_value(paper.info()).map_err(io::Error::other)?;
            stored.insert(paper.paper_id.clone(), record);
        }

        let json = serde_json::to_string_pretty(&stored).map_err(io::Error::other)?;
        fs::write(&path, json)?;

        Ok(path)
    }

    /// Find `paper_id` in any topic file.
    ///
    /// Unreadable topic files are logged and skipped. When the same id is
    /// stored under several topics the first directory listed wins, and
    /// listing order is filesystem dependent.
    pub fn find(&self, paper_id: &str) -> io::Result<Lookup> {
        self.initialize()?;

        let entries: Vec<_> = fs::read_dir(&self.root)?.collect::<Result<_, _>>()?;
        if entries.is_empty() {
            return Ok(Lookup::NoTopics);
        }

        for entry in entries {
            let dir = entry.path();
            if !dir.is_dir() {
                continue;
            }

            let file = dir.join(PAPERS_FILE);
            if !file.is_file() {
                continue;
            }

            if let Some(info) = read_papers(&file).and_then(|mut papers| papers.remove(paper_id)) {
                return Ok(Lookup::Found(info));
            }
        }

        Ok(Lookup::NotFound)
    }
}

fn read_papers(path: &Path) -> Option<TopicPapers> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!("Error reading {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(papers)) => Some(papers),
        Ok(_) => {
            tracing::warn!("Ignoring {}: top level is not a JSON object", path.display());
            None
        }
        Err(e) => {
            tracing::warn!("Error parsing {}: {}", path.display(), e);
            None
        }
    }
}
