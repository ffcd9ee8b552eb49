//! Validate a Cutline project snapshot.

use std::path::{Path, PathBuf};

use cutline_project_model::{Project, ProjectSnapshot};

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating project at: {}", path.display());

    let snapshot =
        ProjectSnapshot::load(&path).map_err(|e| anyhow::anyhow!("Failed to load project: {e}"))?;
    let stored_duration = snapshot.duration;
    let project = Project::from_snapshot(snapshot);

    println!("  Tracks: {}", project.tracks.len());
    println!("  Clips: {}", project.clips().count());
    println!(
        "  Format: {}x{} @ {}fps",
        project.width, project.height, project.fps
    );

    let issues = collect_issues(&project, stored_duration);
    if issues.is_empty() {
        println!("  Sources: All present");
        println!("\nProject is valid.");
    } else {
        println!("\nValidation issues:");
        for issue in &issues {
            println!("  - {issue}");
        }
        println!(
            "\n{} issue(s) found. Project may not be fully usable.",
            issues.len()
        );
    }

    Ok(())
}

fn collect_issues(project: &Project, stored_duration: f64) -> Vec<String> {
    let mut issues = Vec::new();

    if (stored_duration - project.duration).abs() > f64::EPSILON {
        issues.push(format!(
            "Stored duration {stored_duration:.2}s differs from computed {:.2}s",
            project.duration
        ));
    }

    for track in &project.tracks {
        let mut clips: Vec<_> = track.clips.iter().collect();
        clips.sort_by(|a, b| a.start.total_cmp(&b.start));
        for pair in clips.windows(2) {
            if pair[1].start < pair[0].end() {
                issues.push(format!(
                    "Clips '{}' and '{}' overlap on track '{}'",
                    pair[0].name, pair[1].name, track.name
                ));
            }
        }

        for clip in &track.clips {
            if clip.start < 0.0 || clip.duration <= 0.0 || clip.offset < 0.0 {
                issues.push(format!(
                    "Clip '{}' has an invalid extent (start {}, duration {}, offset {})",
                    clip.name, clip.start, clip.duration, clip.offset
                ));
            }
            if !is_remote(&clip.source_path) && !Path::new(&clip.source_path).exists() {
                issues.push(format!("Missing source for '{}': {}", clip.name, clip.source_path));
            }
        }
    }

    issues
}

fn is_remote(source: &str) -> bool {
    source.contains("://")
}
