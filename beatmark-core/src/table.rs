use serde::{Deserialize, Serialize};

/// The beat table served by `GET /api/beats`: one column per scene, one row
/// per beat index. Sparse; a cell is blank or null where a scene has fewer
/// beats than the longest column.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BeatTable {
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Option<String>>>,
}

impl BeatTable {
    /// Column index of `scene`, by exact header match.
    pub fn column_index(&self, scene: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == scene)
    }

    /// Number of rows whose cell in `scene`'s column holds a non-blank value.
    /// Unknown scenes count as zero.
    pub fn count_beats(&self, scene: &str) -> usize {
        let Some(col) = self.column_index(scene) else {
            return 0;
        };
        self.rows
            .iter()
            .filter(|row| {
                row.get(col)
                    .and_then(|cell| cell.as_deref())
                    .is_some_and(|cell| !cell.trim().is_empty())
            })
            .count()
    }

    /// Beat counts for every scene, in header order.
    pub fn counts(&self) -> Vec<(String, usize)> {
        self.headers
            .iter()
            .map(|h| (h.clone(), self.count_beats(h)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(json: &str) -> BeatTable {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn counts_non_blank_cells_in_column() {
        let t = table(
            r#"{"headers":["Intro","Outro"],"rows":[["1.0",""],["","2.0"],["3.5","4.0"]]}"#,
        );
        assert_eq!(t.count_beats("Intro"), 2);
        assert_eq!(t.count_beats("Outro"), 2);
    }

    #[test]
    fn unknown_scene_counts_zero() {
        let t = table(r#"{"headers":["Intro"],"rows":[["1.0"]]}"#);
        assert_eq!(t.count_beats("Bridge"), 0);
        assert_eq!(t.count_beats("intro"), 0);
    }

    #[test]
    fn whitespace_null_and_short_rows_are_not_beats() {
        let t = table(r#"{"headers":["A","B"],"rows":[["  ",null],["1.0"],[null,"2.0"]]}"#);
        assert_eq!(t.count_beats("A"), 1);
        assert_eq!(t.count_beats("B"), 1);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let t = table("{}");
        assert!(t.headers.is_empty());
        assert_eq!(t.count_beats("A"), 0);
        assert!(t.counts().is_empty());
    }
}
