//! Code output files
//!
//! Codes land in plain text files, one backtick-wrapped code per line,
//! opened in append mode. A long-running batch is sharded into numbered
//! files; the first missing index is the next target, which lets a
//! restarted run resume without overwriting earlier shards.

use promo_core::{PromoCode, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

const SHARD_PREFIX: &str = "promo_codes";

/// Writer for promo code output files rooted at one directory
#[derive(Debug, Clone)]
pub struct CodeStore {
    dir: PathBuf,
}

impl CodeStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The single-file variant's fixed target, `promo_codes.txt`
    pub fn fixed_path(&self) -> PathBuf {
        self.dir.join(format!("{SHARD_PREFIX}.txt"))
    }

    /// Path of shard `index`, `promo_codes_<index>.txt`
    pub fn shard_path(&self, index: u32) -> PathBuf {
        self.dir.join(format!("{SHARD_PREFIX}_{index}.txt"))
    }

    /// First shard in `0..limit` that does not exist yet.
    ///
    /// `None` means every shard is already on disk and the batch is
    /// complete; the driver stops rather than overwrite prior output.
    pub fn next_shard(&self, limit: u32) -> Option<PathBuf> {
        (0..limit)
            .map(|i| self.shard_path(i))
            .find(|p| !p.exists())
    }

    /// Append codes to `path`, one backtick-wrapped code per line.
    ///
    /// Creates the file if missing, so a cycle that produced no codes
    /// still consumes its shard. The caller sorts before writing.
    pub fn append_codes(&self, path: &Path, codes: &[PromoCode]) -> Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;

        for code in codes {
            writeln!(file, "`{code}`")?;
        }
        file.flush()?;

        debug!("Wrote {} codes to {}", codes.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn code(raw: &str) -> PromoCode {
        PromoCode::new(raw).unwrap()
    }

    #[test]
    fn next_shard_picks_first_missing_index() {
        let dir = tempfile::tempdir().unwrap();
        let store = CodeStore::new(dir.path());

        for i in 0..3 {
            fs::write(store.shard_path(i), "").unwrap();
        }

        let next = store.next_shard(1000).unwrap();
        assert_eq!(next, store.shard_path(3));
    }

    #[test]
    fn next_shard_fills_holes_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = CodeStore::new(dir.path());

        // A hole at index 1 is the resume target even when later shards exist
        fs::write(store.shard_path(0), "").unwrap();
        fs::write(store.shard_path(2), "").unwrap();

        assert_eq!(store.next_shard(10).unwrap(), store.shard_path(1));
    }

    #[test]
    fn next_shard_none_when_batch_complete() {
        let dir = tempfile::tempdir().unwrap();
        let store = CodeStore::new(dir.path());

        for i in 0..5 {
            fs::write(store.shard_path(i), "").unwrap();
        }

        assert!(store.next_shard(5).is_none());
    }

    #[test]
    fn append_wraps_codes_in_backticks() {
        let dir = tempfile::tempdir().unwrap();
        let store = CodeStore::new(dir.path());
        let path = store.fixed_path();

        store
            .append_codes(&path, &[code("BIKE-1"), code("CUBE-2")])
            .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "`BIKE-1`\n`CUBE-2`\n");
    }

    #[test]
    fn append_keeps_prior_lines() {
        let dir = tempfile::tempdir().unwrap();
        let store = CodeStore::new(dir.path());
        let path = store.fixed_path();

        store.append_codes(&path, &[code("FIRST")]).unwrap();
        store.append_codes(&path, &[code("SECOND")]).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "`FIRST`\n`SECOND`\n");
    }

    #[test]
    fn empty_cycle_still_creates_the_shard() {
        let dir = tempfile::tempdir().unwrap();
        let store = CodeStore::new(dir.path());
        let path = store.shard_path(0);

        store.append_codes(&path, &[]).unwrap();
        assert!(path.exists());
        assert_eq!(store.next_shard(10).unwrap(), store.shard_path(1));
    }
}
