//! Group winning movies by producer and reduce their win gaps.
//!
//! ```text
//! Winning movies                    Sorted win years         Intervals
//! ┌──────────────────────────┐      ┌──────────────────┐      ┌─────────────────────┐
//! │ 2015  "X"                │      │ X: 2000,2002,2015│      │ X  2  2000 → 2002   │
//! │ 2000  "X, Y"             │  →   │ Y: 2000,2020     │  →   │ X 13  2002 → 2015   │
//! │ 2002  "X"                │      └──────────────────┘      │ Y 20  2000 → 2020   │
//! │ 2020  "Y"                │                                └─────────────────────┘
//! └──────────────────────────┘
//! ```
//!
//! Producers keep first-seen order; years are sorted per producer before
//! pairing, and same-year wins are kept (yielding a zero interval).

use std::collections::HashMap;

use super::producers::split_producers;
use crate::models::{AwardsResult, IntervalRecord, MovieRecord};

/// Win years per producer, in first-seen producer order.
#[derive(Debug, Clone, Default)]
pub struct ProducerWinYears {
    producers: Vec<(String, Vec<i64>)>,
    index: HashMap<String, usize>,
}

impl ProducerWinYears {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate winning movies in the order given.
    pub fn from_winners<'a>(winners: impl IntoIterator<Item = &'a MovieRecord>) -> Self {
        let mut wins = Self::new();
        for movie in winners {
            wins.add_movie(movie);
        }
        wins
    }

    /// Credit `movie.year` to every producer named on the movie.
    pub fn add_movie(&mut self, movie: &MovieRecord) {
        for producer in split_producers(&movie.producers) {
            self.add_win(producer, movie.year);
        }
    }

    pub fn add_win(&mut self, producer: &str, year: i64) {
        match self.index.get(producer) {
            Some(&i) => self.producers[i].1.push(year),
            None => {
                self.index.insert(producer.to_string(), self.producers.len());
                self.producers.push((producer.to_string(), vec![year]));
            }
        }
    }

    /// Years credited to `producer`, in insertion order.
    pub fn years(&self, producer: &str) -> Option<&[i64]> {
        self.index
            .get(producer)
            .map(|&i| self.producers[i].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[i64])> {
        self.producers
            .iter()
            .map(|(name, years)| (name.as_str(), years.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.producers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.producers.is_empty()
    }

    /// One record per adjacent pair of sorted win years, producer by producer.
    pub fn intervals(&self) -> Vec<IntervalRecord> {
        let mut intervals = Vec::new();

        for (producer, years) in self.iter() {
            if years.len() < 2 {
                continue;
            }

            let mut sorted = years.to_vec();
            sorted.sort();

            for pair in sorted.windows(2) {
                intervals.push(IntervalRecord {
                    producer: producer.to_string(),
                    interval: pair[1].abs_diff(pair[0]),
                    previous_win: pair[0],
                    following_win: pair[1],
                });
            }
        }

        intervals
    }
}

/// Keep every record at the global minimum and maximum interval.
///
/// Relative order is preserved in both lists. An empty input gives empty
/// lists.
pub fn select_extremes(intervals: Vec<IntervalRecord>) -> AwardsResult {
    let Some(first) = intervals.first() else {
        return AwardsResult::default();
    };

    let (mut min, mut max) = (first.interval, first.interval);
    for record in &intervals[1..] {
        min = min.min(record.interval);
        max = max.max(record.interval);
    }

    AwardsResult {
        min: intervals.iter().filter(|r| r.interval == min).cloned().collect(),
        max: intervals.into_iter().filter(|r| r.interval == max).collect(),
    }
}

/// Full aggregation over the winning movies, in store order.
pub fn award_intervals(winners: &[MovieRecord]) -> AwardsResult {
    let wins = ProducerWinYears::from_winners(winners);
    select_extremes(wins.intervals())
}
