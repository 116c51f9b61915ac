//! Formatting utilities for sizes, durations, and build summaries.

use console::Term;
use owo_colors::OwoColorize;
use pagesmith_core::PipelineReport;
use std::time::Duration;

pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", size as u64, UNITS[unit_idx])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// One row per task: files written, their total size, and run time.
pub fn print_build_summary(report: &PipelineReport) {
    let width = Term::stderr().size().1 as usize;
    let rule = "─".repeat(width.clamp(20, 80));

    eprintln!("\n{}", "Build Summary".bold().underline());
    eprintln!("{rule}");

    let mut total_size = 0;
    for task in &report.tasks {
        let size: u64 = task
            .files
            .iter()
            .filter_map(|file| std::fs::metadata(file).ok())
            .map(|meta| meta.len())
            .sum();
        total_size += size;

        eprintln!(
            "  {} {:<8} {:>4} files {:>10} {}",
            "▸".blue(),
            task.name.bright_white().bold(),
            task.files.len(),
            format_size(size).dimmed(),
            format!("({})", format_duration(task.duration)).dimmed()
        );
    }

    eprintln!("{rule}");
    eprintln!(
        "  {} {} files, {} in {}",
        "Total:".bold(),
        report.files_written(),
        format_size(total_size).green(),
        format_duration(report.duration).green()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesmith_core::TaskReport;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1_572_864), "1.50 MB");
        assert_eq!(format_size(2_147_483_648), "2.00 GB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
    }

    #[test]
    fn test_print_build_summary() {
        let report = PipelineReport {
            tasks: vec![
                TaskReport {
                    name: "style".into(),
                    files: vec!["/nonexistent/main.css".into()],
                    duration: Duration::from_millis(12),
                },
                TaskReport::new("clean"),
            ],
            duration: Duration::from_millis(40),
        };
        print_build_summary(&report);
    }

    #[test]
    fn test_print_build_summary_empty() {
        print_build_summary(&PipelineReport::default());
    }
}
