//! Commands that talk to a running beat backend.

use anyhow::{bail, Result};
use beatmark_client::BeatmarkClient;
use beatmark_core::feedback::MSG_WRITE_FAILED;
use beatmark_core::BeatTable;

pub async fn print_scenes(client: &BeatmarkClient) -> Result<()> {
    for scene in client.scenes().await? {
        println!("{}", scene);
    }
    Ok(())
}

pub async fn print_wavs(client: &BeatmarkClient) -> Result<()> {
    for file in client.wav_files().await? {
        println!("{}", file);
    }
    Ok(())
}

/// Per-scene counts, restricted to one scene when given. The scene is
/// trimmed and matched exactly, like the panel's counter.
fn select_counts(table: &BeatTable, scene: Option<&str>) -> Vec<(String, usize)> {
    match scene.map(str::trim) {
        Some(s) => vec![(s.to_string(), table.count_beats(s))],
        None => table.counts(),
    }
}

pub async fn print_counts(client: &BeatmarkClient, scene: Option<&str>, json: bool) -> Result<()> {
    let table = client.beats().await?;
    let counts = select_counts(&table, scene);
    if json {
        let map: serde_json::Map<String, serde_json::Value> = counts
            .into_iter()
            .map(|(s, n)| (s, serde_json::Value::from(n)))
            .collect();
        println!("{}", serde_json::Value::Object(map));
    } else {
        for (s, n) in counts {
            println!("{}\t{}", s, n);
        }
    }
    Ok(())
}

pub async fn record(client: &BeatmarkClient, scene: &str, time: f64) -> Result<()> {
    let resp = client.record(scene, time).await?;
    if !resp.ok {
        let msg = resp
            .error
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| MSG_WRITE_FAILED.to_string());
        bail!("{}", msg);
    }
    println!(
        "Recorded {} at {} (row {}, column {})",
        resp.scene.as_deref().unwrap_or(scene),
        resp.time.unwrap_or_else(|| format!("{:.3}", time)),
        resp.beat_row.map_or("?".to_string(), |r| r.to_string()),
        resp.scene_col.map_or("?".to_string(), |c| c.to_string()),
    );
    Ok(())
}
