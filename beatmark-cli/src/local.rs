//! Offline maintenance of the beat CSV next to the audio files.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use beatmark_core::generate::{self, BeatsPerBar};
use beatmark_core::store::{parse_scene_list, BeatColumns, BEATS_FILE, SCENE_LIST_FILE};

pub struct BeatFiles {
    dir: PathBuf,
}

impl BeatFiles {
    pub fn new(dir: &Path) -> Self {
        Self { dir: dir.to_path_buf() }
    }

    pub fn beats_path(&self) -> PathBuf {
        self.dir.join(BEATS_FILE)
    }

    pub fn scene_list_path(&self) -> PathBuf {
        self.dir.join(SCENE_LIST_FILE)
    }

    /// A missing scene list reads as empty.
    pub fn scenes(&self) -> Result<Vec<String>> {
        let path = self.scene_list_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        Ok(parse_scene_list(&text))
    }

    /// Scenes must exist; a missing beat file reads as empty columns.
    pub fn load(&self) -> Result<BeatColumns> {
        let scenes = self.scenes()?;
        if scenes.is_empty() {
            bail!("no scenes: create {} first", self.scene_list_path().display());
        }
        let path = self.beats_path();
        if !path.exists() {
            return Ok(BeatColumns::empty(scenes));
        }
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        Ok(BeatColumns::read(scenes, &text))
    }

    pub fn save(&self, columns: &BeatColumns) -> Result<()> {
        let path = self.beats_path();
        std::fs::write(&path, columns.to_csv())
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("Wrote {}", path.display());
        Ok(())
    }
}

pub fn sort(files: &BeatFiles) -> Result<()> {
    if !files.beats_path().exists() {
        bail!("{} not found", files.beats_path().display());
    }
    let mut columns = files.load()?;
    if columns.to_table().rows.is_empty() {
        log::info!("No beat rows, nothing to sort");
        return Ok(());
    }
    columns.sort_compact();
    files.save(&columns)?;
    log::info!("Sorted {} scenes ascending with no gaps", columns.scenes().len());
    Ok(())
}

pub fn delete_scenes(files: &BeatFiles, names: &[String]) -> Result<Vec<String>> {
    let mut columns = files.load()?;
    let removed = columns.clear_scenes(names)?;
    files.save(&columns)?;
    log::info!("Deleted beats of {}", removed.join(", "));
    Ok(removed)
}

pub fn generate(config: &Path, output: &Path, per_bar: BeatsPerBar) -> Result<BeatColumns> {
    let text = std::fs::read_to_string(config)
        .with_context(|| format!("reading config {}", config.display()))?;
    let segments = generate::parse_config(&text)?;
    let columns = generate::generate_columns(&segments, per_bar);
    std::fs::write(output, columns.to_csv())
        .with_context(|| format!("writing {}", output.display()))?;

    println!(
        "Wrote {} with {} scenes ({:?} beats per bar)",
        output.display(),
        segments.len(),
        per_bar
    );
    let table = columns.to_table();
    for (scene, count) in table.counts() {
        println!("  {}: {} beats", scene, count);
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(scenes: &str, beats: Option<&str>) -> (tempfile::TempDir, BeatFiles) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SCENE_LIST_FILE), scenes).unwrap();
        if let Some(b) = beats {
            std::fs::write(dir.path().join(BEATS_FILE), b).unwrap();
        }
        let files = BeatFiles::new(dir.path());
        (dir, files)
    }

    #[test]
    fn sort_rewrites_file() {
        let (_dir, files) = setup("A\nB\n", Some("A,B\n2.0,\n,1.0\n1.0,\n"));
        sort(&files).unwrap();
        let text = std::fs::read_to_string(files.beats_path()).unwrap();
        assert_eq!(text, "A,B\r\n1.000,1.000\r\n2.000,\r\n");
    }

    #[test]
    fn sort_requires_beat_file() {
        let (_dir, files) = setup("A\n", None);
        assert!(sort(&files).is_err());
    }

    #[test]
    fn delete_requires_scene_list() {
        let dir = tempfile::tempdir().unwrap();
        let files = BeatFiles::new(dir.path());
        assert!(delete_scenes(&files, &["A".to_string()]).is_err());
    }

    #[test]
    fn delete_clears_named_columns() {
        let (_dir, files) = setup("A\nB\n", Some("A,B\n1.0,2.0\n"));
        let removed = delete_scenes(&files, &["B".to_string(), "C".to_string()]).unwrap();
        assert_eq!(removed, vec!["B".to_string()]);
        let text = std::fs::read_to_string(files.beats_path()).unwrap();
        assert_eq!(text, "A,B\r\n1.0,\r\n");
    }

    #[test]
    fn delete_keeps_other_columns_under_unlisted_first_header() {
        let (_dir, files) = setup("1-1\n1-2\n", Some("old,1-1,1-2\n9.0,1.0,2.0\n"));
        delete_scenes(&files, &["1-2".to_string()]).unwrap();
        let text = std::fs::read_to_string(files.beats_path()).unwrap();
        assert_eq!(text, "1-1,1-2\r\n1.0,\r\n");
    }

    #[test]
    fn sort_reads_columns_under_unlisted_first_header() {
        let (_dir, files) = setup("1-1\n", Some("old,1-1\n9.0,2.0\n,1.0\n"));
        sort(&files).unwrap();
        let text = std::fs::read_to_string(files.beats_path()).unwrap();
        assert_eq!(text, "1-1\r\n1.000\r\n2.000\r\n");
    }

    #[test]
    fn generate_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(&config, "scene,start_sec,end_sec,bpm\n1-1,0,1,120\n").unwrap();
        let cols = generate(&config, &output, BeatsPerBar::Four).unwrap();
        assert_eq!(cols.column("1-1").unwrap(), ["0.000", "0.500"]);
        assert_eq!(std::fs::read_to_string(output).unwrap(), "1-1\r\n0.000\r\n0.500\r\n");
    }
}
