use crate::rollup::aggregate::{CategoryGroup, dominant_category, group_by_category, representative};
use crate::rollup::bucket::{WeekBucket, WeekDay};
use crate::rollup::category::CategoryClassifier;
use crate::rollup::dates::{month_abbreviation, weekday_name};
use crate::rollup::models::NormalizedVideo;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Node of the treemap hierarchy. Leaves carry `value`; internal nodes carry
/// `children` and leave their weight to the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyNode {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metatag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(rename = "videoUrl", skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<HierarchyNode>>,
}

impl HierarchyNode {
    fn branch(
        name: String,
        thumbnail: Option<String>,
        metatag: Option<String>,
        children: Vec<HierarchyNode>,
    ) -> Self {
        Self {
            name,
            thumbnail,
            metatag,
            value: None,
            channel: None,
            video_url: None,
            children: Some(children),
        }
    }

    pub fn children(&self) -> &[HierarchyNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Layout weight: a leaf's own value, or the sum over its subtree.
    pub fn total_value(&self) -> u64 {
        match &self.children {
            None => self.value.unwrap_or(0),
            Some(children) => children
                .iter()
                .fold(0u64, |acc, child| acc.saturating_add(child.total_value())),
        }
    }

    pub fn leaves(&self) -> Vec<&HierarchyNode> {
        let mut out = Vec::new();
        collect_leaves(self, &mut out);
        out
    }
}

fn collect_leaves<'a>(node: &'a HierarchyNode, out: &mut Vec<&'a HierarchyNode>) {
    match &node.children {
        None => out.push(node),
        Some(children) => {
            for child in children {
                collect_leaves(child, out);
            }
        }
    }
}

fn short_date(date: NaiveDate) -> String {
    format!("{} {}", date.day(), month_abbreviation(date))
}

pub fn week_label(start: NaiveDate, end: NaiveDate) -> String {
    if start.year() == end.year() {
        format!("{} - {} {}", short_date(start), short_date(end), end.year())
    } else {
        format!(
            "{} {} - {} {}",
            short_date(start),
            start.year(),
            short_date(end),
            end.year()
        )
    }
}

pub fn day_label(date: NaiveDate) -> String {
    format!("{} {}", weekday_name(date.weekday()), short_date(date))
}

pub fn category_label(category: &str, emoji: Option<&str>) -> String {
    match emoji {
        Some(emoji) => format!("{} {category}", emoji.trim()),
        None => category.to_string(),
    }
}

fn thumbnail_of(video: Option<&NormalizedVideo>) -> Option<String> {
    video.and_then(NormalizedVideo::thumbnail).map(str::to_string)
}

fn dominant_color<'a, I>(videos: I, classifier: &CategoryClassifier) -> Option<String>
where
    I: IntoIterator<Item = &'a NormalizedVideo>,
{
    dominant_category(videos).map(|category| classifier.color_of(category).to_string())
}

fn video_node(video: &NormalizedVideo) -> HierarchyNode {
    HierarchyNode {
        name: video.label().to_string(),
        thumbnail: thumbnail_of(Some(video)),
        metatag: None,
        value: Some(video.duration_seconds),
        channel: video.raw.channel.clone(),
        video_url: video.raw.video_url.clone(),
        children: None,
    }
}

fn category_node(group: &CategoryGroup<'_>, classifier: &CategoryClassifier) -> HierarchyNode {
    HierarchyNode::branch(
        category_label(group.category, classifier.emoji_of(group.category)),
        thumbnail_of(representative(group.videos.iter().copied())),
        Some(classifier.color_of(group.category).to_string()),
        group.videos.iter().map(|video| video_node(video)).collect(),
    )
}

fn day_node(day: &WeekDay, classifier: &CategoryClassifier) -> HierarchyNode {
    HierarchyNode::branch(
        day_label(day.date),
        thumbnail_of(representative(&day.videos)),
        dominant_color(&day.videos, classifier),
        group_by_category(&day.videos)
            .iter()
            .map(|group| category_node(group, classifier))
            .collect(),
    )
}

fn week_node(week: &WeekBucket, classifier: &CategoryClassifier) -> HierarchyNode {
    HierarchyNode::branch(
        week_label(week.start, week.end),
        thumbnail_of(representative(week.videos())),
        dominant_color(week.videos(), classifier),
        week.days
            .iter()
            .map(|day| day_node(day, classifier))
            .collect(),
    )
}

/// Root node whose children are the weeks, in bucket order.
pub fn build_tree(
    weeks: &[WeekBucket],
    classifier: &CategoryClassifier,
    root_label: &str,
) -> HierarchyNode {
    HierarchyNode::branch(
        root_label.to_string(),
        None,
        None,
        weeks
            .iter()
            .filter(|week| !week.days.is_empty())
            .map(|week| week_node(week, classifier))
            .collect(),
    )
}
