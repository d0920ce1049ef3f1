use crate::rollup::dates::{week_end, week_start};
use crate::rollup::models::{DayBucket, NormalizedVideo};
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekDay {
    pub weekday: Weekday,
    pub date: NaiveDate,
    pub videos: Vec<NormalizedVideo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekBucket {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: Vec<WeekDay>,
}

impl WeekBucket {
    fn new(date: NaiveDate) -> Self {
        Self {
            start: week_start(date),
            end: week_end(date),
            days: Vec::new(),
        }
    }

    fn insert(&mut self, bucket: DayBucket) {
        let weekday = bucket.date.weekday();
        debug_assert!(
            self.days.iter().all(|day| day.weekday != weekday),
            "two day buckets on {weekday} of week {}",
            self.start
        );
        self.days.push(WeekDay {
            weekday,
            date: bucket.date,
            videos: bucket.videos,
        });
    }

    /// Leaves of every day, day order first, then insertion order.
    pub fn videos(&self) -> impl Iterator<Item = &NormalizedVideo> {
        self.days.iter().flat_map(|day| day.videos.iter())
    }
}

/// Group videos by calendar date. Buckets keep first-seen order and videos
/// keep insertion order; dates with no videos produce no bucket.
pub fn bucket_days<I>(dated: I) -> Vec<DayBucket>
where
    I: IntoIterator<Item = (NaiveDate, Vec<NormalizedVideo>)>,
{
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();
    let mut buckets: Vec<DayBucket> = Vec::new();
    for (date, videos) in dated {
        if videos.is_empty() {
            continue;
        }
        match index.get(&date) {
            Some(&idx) => buckets[idx].videos.extend(videos),
            None => {
                index.insert(date, buckets.len());
                buckets.push(DayBucket { date, videos });
            }
        }
    }
    buckets
}

/// Group day buckets into Monday-Sunday weeks, first-seen order.
pub fn bucket_weeks(days: Vec<DayBucket>) -> Vec<WeekBucket> {
    let mut index: HashMap<(NaiveDate, NaiveDate), usize> = HashMap::new();
    let mut weeks: Vec<WeekBucket> = Vec::new();
    for day in days {
        let key = (week_start(day.date), week_end(day.date));
        let idx = match index.get(&key) {
            Some(&idx) => idx,
            None => {
                index.insert(key, weeks.len());
                weeks.push(WeekBucket::new(day.date));
                weeks.len() - 1
            }
        };
        weeks[idx].insert(day);
    }
    weeks
}
