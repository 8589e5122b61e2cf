//! Evenly spaced beat grids from per-scene tempo settings.

use crate::csv;
use crate::format::format_secs;
use crate::store::{BeatColumns, StoreError};

/// One row of the generator config: a scene spanning `[start_sec, end_sec)`
/// at a fixed tempo.
#[derive(Clone, Debug, PartialEq)]
pub struct TempoSegment {
    pub scene: String,
    pub start_sec: f64,
    pub end_sec: f64,
    pub bpm: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BeatsPerBar {
    #[default]
    Four,
    Eight,
}

impl BeatsPerBar {
    /// Seconds between beats at `bpm`.
    pub fn interval(self, bpm: f64) -> f64 {
        match self {
            BeatsPerBar::Four => 60.0 / bpm,
            BeatsPerBar::Eight => 30.0 / bpm,
        }
    }
}

fn round3(t: f64) -> f64 {
    (t * 1000.0).round() / 1000.0
}

/// Beat times in `[start, end)`, rounded to milliseconds.
pub fn generate_beats(start: f64, end: f64, bpm: f64, per_bar: BeatsPerBar) -> Vec<f64> {
    if !(bpm > 0.0) {
        return Vec::new();
    }
    let interval = per_bar.interval(bpm);
    let mut out = Vec::new();
    let mut t = start;
    while t < end {
        out.push(round3(t));
        t += interval;
    }
    out
}

/// Parse a config CSV with `scene,start_sec,end_sec,bpm` columns (any order,
/// extra columns ignored).
pub fn parse_config(text: &str) -> Result<Vec<TempoSegment>, StoreError> {
    let rows = csv::parse(text);
    let Some((header, body)) = rows.split_first() else {
        return Err(StoreError::EmptyConfig);
    };
    let col = |name: &'static str| {
        header
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(StoreError::MissingColumn(name))
    };
    let (scene_col, start_col, end_col, bpm_col) =
        (col("scene")?, col("start_sec")?, col("end_sec")?, col("bpm")?);

    let mut segments = Vec::new();
    for (i, row) in body.iter().enumerate().filter(|(_, r)| !r.is_empty()) {
        let cell = |j: usize| row.get(j).map(|c| c.trim()).unwrap_or("");
        let num = |j: usize, column: &'static str| {
            cell(j).parse::<f64>().map_err(|_| StoreError::InvalidNumber {
                row: i + 2,
                column,
                value: cell(j).to_string(),
            })
        };
        segments.push(TempoSegment {
            scene: cell(scene_col).to_string(),
            start_sec: num(start_col, "start_sec")?,
            end_sec: num(end_col, "end_sec")?,
            bpm: num(bpm_col, "bpm")?,
        });
    }
    if segments.is_empty() {
        return Err(StoreError::EmptyConfig);
    }
    Ok(segments)
}

/// Build beat columns, one per segment, in config order. Segments sharing a
/// scene name still get a column each.
pub fn generate_columns(segments: &[TempoSegment], per_bar: BeatsPerBar) -> BeatColumns {
    BeatColumns::from_columns(segments.iter().map(|seg| {
        let beats = generate_beats(seg.start_sec, seg.end_sec, seg.bpm, per_bar)
            .into_iter()
            .map(format_secs)
            .collect();
        (seg.scene.clone(), beats)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_beats_per_bar_at_120() {
        let beats = generate_beats(1.0, 3.0, 120.0, BeatsPerBar::Four);
        assert_eq!(beats, vec![1.0, 1.5, 2.0, 2.5]);
    }

    #[test]
    fn eight_beats_halves_interval() {
        let beats = generate_beats(0.0, 1.0, 120.0, BeatsPerBar::Eight);
        assert_eq!(beats, vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn rounds_to_milliseconds() {
        let beats = generate_beats(0.0, 1.0, 90.0, BeatsPerBar::Four);
        assert_eq!(beats, vec![0.0, 0.667]);
    }

    #[test]
    fn non_positive_bpm_yields_nothing() {
        assert!(generate_beats(0.0, 10.0, 0.0, BeatsPerBar::Four).is_empty());
        assert!(generate_beats(0.0, 10.0, -5.0, BeatsPerBar::Four).is_empty());
        assert!(generate_beats(0.0, 10.0, f64::NAN, BeatsPerBar::Four).is_empty());
    }

    #[test]
    fn parses_config_by_column_name() {
        let segs = parse_config("bpm,scene,start_sec,end_sec\n120,1-1,0,2\n60,2-1,5,8\n").unwrap();
        assert_eq!(segs.len(), 2);
        assert_eq!(
            segs[1],
            TempoSegment { scene: "2-1".into(), start_sec: 5.0, end_sec: 8.0, bpm: 60.0 }
        );
    }

    #[test]
    fn config_errors() {
        assert_eq!(parse_config(""), Err(StoreError::EmptyConfig));
        assert_eq!(parse_config("scene,start_sec,end_sec,bpm\n"), Err(StoreError::EmptyConfig));
        assert_eq!(
            parse_config("scene,start_sec,bpm\n1-1,0,60\n"),
            Err(StoreError::MissingColumn("end_sec"))
        );
        assert!(matches!(
            parse_config("scene,start_sec,end_sec,bpm\n1-1,zero,1,60\n"),
            Err(StoreError::InvalidNumber { row: 2, column: "start_sec", .. })
        ));
    }

    #[test]
    fn columns_follow_config_order() {
        let segs = parse_config("scene,start_sec,end_sec,bpm\nB,0,1,120\nA,0,2,60\n").unwrap();
        let cols = generate_columns(&segs, BeatsPerBar::Four);
        assert_eq!(cols.to_csv(), "B,A\r\n0.000,0.000\r\n0.500,1.000\r\n");
    }

    #[test]
    fn repeated_scene_gets_its_own_column() {
        let segs = parse_config("scene,start_sec,end_sec,bpm\nA,0,1,120\nA,5,6,120\n").unwrap();
        let cols = generate_columns(&segs, BeatsPerBar::Four);
        assert_eq!(cols.to_csv(), "A,A\r\n0.000,5.000\r\n0.500,5.500\r\n");
    }
}
