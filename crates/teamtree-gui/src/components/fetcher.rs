//! Background loading of team JSON documents.
//!
//! Fetching is an external collaborator from the tree engine's point of
//! view: it may race with interaction, and a newer request supersedes
//! any in-flight one. Each request carries a generation number; results
//! from superseded generations are dropped on receipt, so a partial or
//! stale tree is never rendered.

use crossbeam_channel::{Receiver, Sender, unbounded};
use std::path::{Path, PathBuf};
use std::thread;
use teamtree_core::{Node, TreeError, normalize};

#[derive(Debug)]
pub struct FetchMessage {
    pub generation: u64,
    pub path: PathBuf,
    pub result: Result<Node, String>,
}

pub struct TeamFetcher {
    tx: Sender<FetchMessage>,
    rx: Receiver<FetchMessage>,
    generation: u64,
    in_flight: bool,
}

impl TeamFetcher {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            tx,
            rx,
            generation: 0,
            in_flight: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Start loading `path` on a background thread, superseding any
    /// request still in flight.
    pub fn fetch(&mut self, path: PathBuf) {
        self.generation += 1;
        self.in_flight = true;
        let generation = self.generation;
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = load_team(&path).map_err(|e| e.to_string());
            // The app may have shut down; a closed channel is fine.
            let _ = tx.send(FetchMessage {
                generation,
                path,
                result,
            });
        });
    }

    /// Poll for a completed load. Call once per frame.
    ///
    /// Results from superseded generations are discarded here, which is
    /// the whole cancellation story: the thread is left to finish, its
    /// message just never reaches the app.
    pub fn poll(&mut self) -> Option<FetchMessage> {
        while let Ok(msg) = self.rx.try_recv() {
            if msg.generation == self.generation {
                self.in_flight = false;
                return Some(msg);
            }
            tracing::debug!(
                "ignoring stale fetch result for {:?} (generation {} < {})",
                msg.path,
                msg.generation,
                self.generation
            );
        }
        None
    }
}

impl Default for TeamFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Read and normalize one team document.
pub fn load_team(path: &Path) -> Result<Node, TreeError> {
    let text = std::fs::read_to_string(path).map_err(|source| TreeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    normalize(&value).ok_or(TreeError::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::{Duration, Instant};

    fn write_team(name: &str, dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    fn poll_until(fetcher: &mut TeamFetcher) -> FetchMessage {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(msg) = fetcher.poll() {
                return msg;
            }
            assert!(Instant::now() < deadline, "fetch did not complete");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_load_team_normalizes_downline() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_team(
            "team.json",
            &dir,
            r#"{"user_id": 1, "name": "A", "downline": [{"user_id": 2, "name": "B"}]}"#,
        );

        let root = load_team(&path).unwrap();
        assert_eq!(root.member.name, "A");
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn test_load_team_reports_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_team("empty.json", &dir, "null");

        assert!(matches!(load_team(&path), Err(TreeError::Empty)));
    }

    #[test]
    fn test_fetch_delivers_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_team("team.json", &dir, r#"{"id": 1, "name": "Root"}"#);

        let mut fetcher = TeamFetcher::new();
        fetcher.fetch(path.clone());
        assert!(fetcher.is_loading());

        let msg = poll_until(&mut fetcher);
        assert_eq!(msg.path, path);
        assert_eq!(msg.result.unwrap().member.name, "Root");
        assert!(!fetcher.is_loading());
    }

    #[test]
    fn test_fetch_failure_is_reported_not_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let mut fetcher = TeamFetcher::new();
        fetcher.fetch(dir.path().join("missing.json"));

        let msg = poll_until(&mut fetcher);
        assert!(msg.result.is_err());
    }

    #[test]
    fn test_superseded_fetch_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let old = write_team("old.json", &dir, r#"{"id": 1, "name": "Old"}"#);
        let new = write_team("new.json", &dir, r#"{"id": 1, "name": "New"}"#);

        let mut fetcher = TeamFetcher::new();
        fetcher.fetch(old);
        // Give the first load time to land in the channel before it is
        // superseded.
        thread::sleep(Duration::from_millis(100));
        fetcher.fetch(new.clone());

        let msg = poll_until(&mut fetcher);
        assert_eq!(msg.path, new);
        assert_eq!(msg.result.unwrap().member.name, "New");
        // Nothing further queued.
        assert!(fetcher.poll().is_none());
    }
}
