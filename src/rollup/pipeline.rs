use crate::error::WarnCode;
use crate::rollup::aggregate::total_duration;
use crate::rollup::bucket::{bucket_days, bucket_weeks};
use crate::rollup::category::CategoryClassifier;
use crate::rollup::dates;
use crate::rollup::duration::duration_seconds;
use crate::rollup::models::{NormalizedVideo, RawDayEntry, RawVideo};
use crate::rollup::tree::{HierarchyNode, build_tree};
use crate::rollup::warn::Warning;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RollupStats {
    pub entries: usize,
    pub dropped_entries: usize,
    pub dropped_videos: usize,
    pub videos: usize,
    pub days: usize,
    pub weeks: usize,
    pub watch_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollupOutcome {
    pub tree: HierarchyNode,
    pub warnings: Vec<Warning>,
    pub stats: RollupStats,
}

pub fn normalize_video(
    raw: &RawVideo,
    classifier: &CategoryClassifier,
    warnings: &mut Vec<Warning>,
) -> NormalizedVideo {
    let subject = raw.title.as_deref().unwrap_or("(sin título)");
    NormalizedVideo {
        raw: raw.clone(),
        duration_seconds: duration_seconds(raw.duration_label.as_deref(), subject, warnings),
        category: classifier.classify(raw.tag.as_deref()).to_string(),
    }
}

/// Roll day entries into the week/day/category/video tree. Never fails:
/// entries whose date label cannot be resolved are dropped and reported in
/// `warnings`, as are malformed durations.
pub fn run_rollup(
    entries: &[RawDayEntry],
    reference_date: NaiveDate,
    classifier: &CategoryClassifier,
    root_label: &str,
) -> RollupOutcome {
    let mut warnings = classifier.ambiguity_warnings();
    let mut stats = RollupStats {
        entries: entries.len(),
        ..RollupStats::default()
    };

    let mut dated: Vec<(NaiveDate, Vec<NormalizedVideo>)> = Vec::with_capacity(entries.len());
    for entry in entries {
        let label = entry.date_label.as_deref().unwrap_or("");
        let Some(date) = dates::resolve(label, reference_date) else {
            stats.dropped_entries += 1;
            stats.dropped_videos += entry.videos.len();
            warnings.push(Warning::new(
                WarnCode::W001DateUnresolved,
                "date-resolver",
                if label.trim().is_empty() { "(sin fecha)" } else { label },
                format!("unparseable date label; {} videos dropped", entry.videos.len()),
            ));
            continue;
        };
        let videos: Vec<NormalizedVideo> = entry
            .videos
            .iter()
            .map(|raw| normalize_video(raw, classifier, &mut warnings))
            .collect();
        stats.videos += videos.len();
        dated.push((date, videos));
    }

    let days = bucket_days(dated);
    stats.days = days.len();
    let weeks = bucket_weeks(days);
    stats.weeks = weeks.len();
    stats.watch_seconds = weeks
        .iter()
        .fold(0u64, |acc, week| acc.saturating_add(total_duration(week.videos())));

    RollupOutcome {
        tree: build_tree(&weeks, classifier, root_label),
        warnings,
        stats,
    }
}
