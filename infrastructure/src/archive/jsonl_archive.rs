//! JSONL file archive for deliberation records.
//!
//! Each completed round is serialized as a single JSON line with an
//! `archived_at` timestamp, appended via a buffered writer. The same file
//! serves memory recall: earlier rounds whose question shares words with the
//! new one are turned into [`RememberedFact`]s. The file is read once at open
//! and mirrored in memory, so recall never blocks on disk.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use council_application::ports::decision_store::{DecisionStore, StoreError};
use council_application::ports::memory_recall::{MemoryRecall, RecallError, RememberedFact};
use council_domain::DeliberationRecord;
use council_domain::core::string::{shared_token_count, tokenize};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

/// One line of the archive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchivedDecision {
    pub archived_at: DateTime<Utc>,
    pub record: DeliberationRecord,
}

/// JSONL decision archive that writes one record per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every record and
/// on `Drop`.
pub struct JsonlDecisionArchive {
    writer: Mutex<BufWriter<File>>,
    /// Every record on disk plus those appended since open
    history: Mutex<Vec<ArchivedDecision>>,
    path: PathBuf,
}

impl JsonlDecisionArchive {
    /// Open the archive for appending.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let history = read_archive(path)?;
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        debug!(
            "Decision archive opened at {} ({} records)",
            path.display(),
            history.len()
        );

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            history: Mutex::new(history),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the archive file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, record: &DeliberationRecord) -> Result<(), StoreError> {
        let archived = ArchivedDecision {
            archived_at: Utc::now(),
            record: record.clone(),
        };
        let line = serde_json::to_string(&archived)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        {
            let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
            writeln!(writer, "{}", line)?;
            writer.flush()?;
        }
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(archived);
        Ok(())
    }

    /// Every readable record, oldest first. Malformed lines are skipped.
    pub fn load(&self) -> Result<Vec<ArchivedDecision>, StoreError> {
        read_archive(&self.path)
    }
}

fn read_archive(path: &Path) -> Result<Vec<ArchivedDecision>, StoreError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut decisions = Vec::new();
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<ArchivedDecision>(&line) {
            Ok(decision) => decisions.push(decision),
            Err(e) => warn!(
                "Skipping malformed line {} of {}: {}",
                number + 1,
                path.display(),
                e
            ),
        }
    }
    Ok(decisions)
}

/// Turn an archived round into a fact for `advisor_id`, scored against `question`
fn remember(
    archived: &ArchivedDecision,
    advisor_id: &str,
    question: &str,
    question_tokens: usize,
) -> Option<RememberedFact> {
    let record = &archived.record;
    let shared = shared_token_count(question, &record.question);
    if shared == 0 || question_tokens == 0 {
        return None;
    }

    let mut content = format!(
        "Earlier question \"{}\" was decided as \"{}\" ({:.0}% confidence)",
        record.question,
        record.decision.recommendation,
        record.decision.confidence * 100.0
    );
    if let Some(own) = record.opinion_of(advisor_id) {
        content.push_str(&format!("; you recommended \"{}\"", own.recommendation));
    }

    Some(
        RememberedFact::new(
            record.topic.clone(),
            content,
            shared as f64 / question_tokens as f64,
        )
        .recorded_at(record.completed_at),
    )
}

#[async_trait]
impl DecisionStore for JsonlDecisionArchive {
    async fn persist(&self, record: &DeliberationRecord) -> Result<(), StoreError> {
        self.append(record)
    }
}

#[async_trait]
impl MemoryRecall for JsonlDecisionArchive {
    async fn recall(
        &self,
        advisor_id: &str,
        question: &str,
        _context: &Map<String, Value>,
        limit: usize,
    ) -> Result<Vec<RememberedFact>, RecallError> {
        let question_tokens = tokenize(question).len();

        let mut facts: Vec<RememberedFact> = self
            .history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter_map(|a| remember(a, advisor_id, question, question_tokens))
            .collect();
        facts.sort_by(|a, b| {
            b.relevance
                .total_cmp(&a.relevance)
                .then_with(|| b.recorded_at.cmp(&a.recorded_at))
        });
        facts.truncate(limit);
        Ok(facts)
    }
}

impl Drop for JsonlDecisionArchive {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
