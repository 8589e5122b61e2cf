//! Column-per-scene beat CSV, as kept on disk next to the audio files.
//!
//! Current layout: the header row lists the scenes and row `i` holds each
//! scene's `i`-th beat. An older layout with one row per scene (`scene, t0,
//! t1, ...`) is still read; writes always use the column layout.

use thiserror::Error;

use crate::csv;
use crate::format::format_secs;
use crate::table::BeatTable;

pub const BEATS_FILE: &str = "beat_timestamps.csv";
pub const SCENE_LIST_FILE: &str = "scene_list.txt";

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("scene may not be empty")]
    EmptyScene,
    #[error("scene not in scene list: {0}")]
    UnknownScene(String),
    #[error("scene list is empty")]
    NoScenes,
    #[error("none of the given scenes are in the scene list: {0:?}")]
    NoMatchingScenes(Vec<String>),
    #[error("config has no data rows")]
    EmptyConfig,
    #[error("config is missing column {0}")]
    MissingColumn(&'static str),
    #[error("row {row}: invalid number in {column}: {value:?}")]
    InvalidNumber { row: usize, column: &'static str, value: String },
}

/// Parse `scene_list.txt`: one scene per line, blanks dropped.
pub fn parse_scene_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Where an appended beat landed.
#[derive(Clone, Debug, PartialEq)]
pub struct Appended {
    pub scene: String,
    pub time: String,
    pub beat_row: usize,
    pub scene_col: usize,
}

/// Beats grouped per scene, columns ordered by the scene list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BeatColumns {
    scenes: Vec<String>,
    columns: Vec<Vec<String>>,
}

impl BeatColumns {
    pub fn empty(scenes: Vec<String>) -> Self {
        let columns = vec![Vec::new(); scenes.len()];
        Self { scenes, columns }
    }

    /// Read beat CSV text against the given scene list. A first header cell
    /// of `scene` selects the row layout; any other header is the column
    /// layout. Columns or rows naming scenes outside the list are skipped.
    pub fn read(scenes: Vec<String>, csv_text: &str) -> Self {
        let mut out = Self::empty(scenes);
        let rows = csv::parse(csv_text);
        let Some((header, body)) = rows.split_first() else {
            return out;
        };
        let first = header.first().map(|h| h.trim()).unwrap_or("");

        if first.eq_ignore_ascii_case("scene") {
            for row in body {
                let name = row.first().map(|c| c.trim()).unwrap_or("");
                let Some(idx) = out.index_of(name) else {
                    continue;
                };
                out.columns[idx] = (1..header.len())
                    .map(|j| row.get(j).map(|c| c.trim()).unwrap_or("").to_string())
                    .collect();
            }
        } else {
            for (j, name) in header.iter().enumerate() {
                let Some(idx) = out.index_of(name.trim()) else {
                    log::debug!("Skipping beat column {:?}: not in scene list", name.trim());
                    continue;
                };
                for row in body {
                    let cell = row.get(j).map(|c| c.trim()).unwrap_or("");
                    out.columns[idx].push(cell.to_string());
                }
            }
        }
        out
    }

    /// Build from named columns in order. A repeated name keeps its own
    /// column; lookups by name find the first.
    pub fn from_columns(named: impl IntoIterator<Item = (String, Vec<String>)>) -> Self {
        let (scenes, columns): (Vec<String>, Vec<Vec<String>>) = named.into_iter().unzip();
        Self { scenes, columns }
    }

    pub fn scenes(&self) -> &[String] {
        &self.scenes
    }

    pub fn column(&self, scene: &str) -> Option<&[String]> {
        self.index_of(scene).map(|i| self.columns[i].as_slice())
    }

    fn index_of(&self, scene: &str) -> Option<usize> {
        self.scenes.iter().position(|s| s == scene)
    }

    fn depth(&self) -> usize {
        self.columns.iter().map(Vec::len).max().unwrap_or(0)
    }

    fn padded_rows(&self) -> Vec<Vec<String>> {
        (0..self.depth())
            .map(|i| {
                self.columns
                    .iter()
                    .map(|c| c.get(i).cloned().unwrap_or_default())
                    .collect()
            })
            .collect()
    }

    /// The table as served to the panel.
    pub fn to_table(&self) -> BeatTable {
        BeatTable {
            headers: self.scenes.clone(),
            rows: self
                .padded_rows()
                .into_iter()
                .map(|row| row.into_iter().map(Some).collect())
                .collect(),
        }
    }

    /// Serialize in the column layout. No scenes means no content.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        if self.scenes.is_empty() {
            return out;
        }
        csv::write_record(&mut out, &self.scenes);
        for row in self.padded_rows() {
            csv::write_record(&mut out, &row);
        }
        out
    }

    /// Append a beat at the bottom of `scene`'s column.
    pub fn append(&mut self, scene: &str, time: f64) -> Result<Appended, StoreError> {
        let scene = scene.trim();
        if scene.is_empty() {
            return Err(StoreError::EmptyScene);
        }
        let scene_col = self
            .index_of(scene)
            .ok_or_else(|| StoreError::UnknownScene(scene.to_string()))?;
        let time = format_secs(time);
        let column = &mut self.columns[scene_col];
        let beat_row = column.len();
        column.push(time.clone());
        Ok(Appended { scene: scene.to_string(), time, beat_row, scene_col })
    }

    /// Sort every column ascending and pack it from the top. Blank or
    /// unparsable cells are dropped; values are rewritten to 3 decimals.
    pub fn sort_compact(&mut self) {
        for column in &mut self.columns {
            let mut times: Vec<f64> = column
                .iter()
                .filter_map(|c| c.trim().parse::<f64>().ok())
                .filter(|t| t.is_finite())
                .collect();
            times.sort_by(|a, b| a.total_cmp(b));
            *column = times.into_iter().map(format_secs).collect();
        }
    }

    /// Empty the columns of the named scenes, returning those that existed.
    pub fn clear_scenes(&mut self, names: &[String]) -> Result<Vec<String>, StoreError> {
        if self.scenes.is_empty() {
            return Err(StoreError::NoScenes);
        }
        let wanted: Vec<&str> = names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()).collect();
        let mut removed = Vec::new();
        for name in wanted {
            if let Some(idx) = self.index_of(name) {
                self.columns[idx].clear();
                if !removed.iter().any(|r: &String| r == name) {
                    removed.push(name.to_string());
                }
            }
        }
        if removed.is_empty() {
            return Err(StoreError::NoMatchingScenes(names.to_vec()));
        }
        Ok(removed)
    }
}
