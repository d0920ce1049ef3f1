use crate::rollup::models::NormalizedVideo;

/// Longest video; on equal durations the earliest one is kept. This is a
/// left-to-right scan, never a sort, so tie outcomes follow input order.
pub fn representative<'a, I>(videos: I) -> Option<&'a NormalizedVideo>
where
    I: IntoIterator<Item = &'a NormalizedVideo>,
{
    let mut best: Option<&NormalizedVideo> = None;
    for video in videos {
        match best {
            Some(current) if video.duration_seconds <= current.duration_seconds => {}
            _ => best = Some(video),
        }
    }
    best
}

/// Most frequent category. The count table keeps first-seen order and ties go
/// to the earliest entry in it, not to the alphabetically smallest name.
pub fn dominant_category<'a, I>(videos: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a NormalizedVideo>,
{
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for video in videos {
        match counts
            .iter_mut()
            .find(|(category, _)| *category == video.category)
        {
            Some((_, count)) => *count += 1,
            None => counts.push((video.category.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (category, count) in counts {
        match best {
            Some((_, top)) if count <= top => {}
            _ => best = Some((category, count)),
        }
    }
    best.map(|(category, _)| category)
}

pub fn total_duration<'a, I>(videos: I) -> u64
where
    I: IntoIterator<Item = &'a NormalizedVideo>,
{
    videos
        .into_iter()
        .fold(0u64, |acc, video| acc.saturating_add(video.duration_seconds))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub videos: Vec<&'a NormalizedVideo>,
}

/// Split one day's videos by category, groups ordered by first appearance.
pub fn group_by_category(videos: &[NormalizedVideo]) -> Vec<CategoryGroup<'_>> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
    for video in videos {
        match groups
            .iter_mut()
            .find(|group| group.category == video.category)
        {
            Some(group) => group.videos.push(video),
            None => groups.push(CategoryGroup {
                category: &video.category,
                videos: vec![video],
            }),
        }
    }
    groups
}
