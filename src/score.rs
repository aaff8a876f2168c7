use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub const POINTS_MOVEMENT: u32 = 10;
pub const POINTS_FRUIT_EATEN: u32 = 50;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Score {
    pub current: u32,
    pub record: u32,
}

impl Score {
    pub fn new(record: u32) -> Self {
        Score { current: 0, record }
    }

    pub fn add(&mut self, points: u32) {
        self.current = self.current.saturating_add(points);
    }

    pub fn commit_record(&mut self) -> bool {
        if self.current > self.record {
            self.record = self.current;
            true
        } else {
            false
        }
    }

    pub fn is_record(&self) -> bool {
        self.current >= self.record
    }
}

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("could not access score file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("score file {} does not hold a number: {:?}", .path.display(), .content)]
    Parse { path: PathBuf, content: String },
}

pub trait ScoreStore {
    fn load(&self) -> Result<u32, ScoreError>;
    fn save(&mut self, record: u32) -> Result<(), ScoreError>;
}

#[derive(Clone, Debug)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        FileScoreStore { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> ScoreError {
        ScoreError::Io { path: self.path.clone(), source }
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> Result<u32, ScoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(self.io_error(e)),
        };

        // Older score files end the number with a ';'
        let trimmed = content.trim().trim_end_matches(';');
        trimmed.parse().map_err(|_| ScoreError::Parse { path: self.path.clone(), content })
    }

    fn save(&mut self, record: u32) -> Result<(), ScoreError> {
        fs::write(&self.path, record.to_string()).map_err(|e| self.io_error(e))
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryScoreStore {
    pub record: Option<u32>,
    pub saves: usize,
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Result<u32, ScoreError> {
        Ok(self.record.unwrap_or(0))
    }

    fn save(&mut self, record: u32) -> Result<(), ScoreError> {
        self.record = Some(record);
        self.saves += 1;
        Ok(())
    }
}
