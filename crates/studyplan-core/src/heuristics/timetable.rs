//! Weekly study plan generation.
//!
//! A randomized best-effort packer: every day gets a few fixed study slots,
//! each paired with a subject from a per-day shuffle. There is no conflict
//! detection and no weighting by hours; the output replaces the whole
//! timetable.

use chrono::NaiveTime;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::model::{new_id, Subject, TimeBlock, Weekday};

/// A fixed time-of-day slot a study block can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

const SLOT_TABLE: [(u32, u32, u32, u32); 5] = [
    (8, 0, 9, 30),
    (10, 0, 11, 30),
    (13, 0, 14, 30),
    (15, 0, 16, 30),
    (18, 0, 19, 30),
];

/// The five daily study slots.
pub fn default_slots() -> Vec<TimeSlot> {
    SLOT_TABLE
        .iter()
        .filter_map(|&(sh, sm, eh, em)| {
            Some(TimeSlot {
                start: NaiveTime::from_hms_opt(sh, sm, 0)?,
                end: NaiveTime::from_hms_opt(eh, em, 0)?,
            })
        })
        .collect()
}

/// Timetable generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableConfig {
    /// Chance (0.0-1.0) of leaving Saturday, and independently Sunday, empty
    #[serde(default = "default_weekend_skip_probability")]
    pub weekend_skip_probability: f64,
    #[serde(default = "default_min_blocks_per_day")]
    pub min_blocks_per_day: usize,
    #[serde(default = "default_max_blocks_per_day")]
    pub max_blocks_per_day: usize,
}

fn default_weekend_skip_probability() -> f64 {
    0.3
}
fn default_min_blocks_per_day() -> usize {
    2
}
fn default_max_blocks_per_day() -> usize {
    3
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            weekend_skip_probability: default_weekend_skip_probability(),
            min_blocks_per_day: default_min_blocks_per_day(),
            max_blocks_per_day: default_max_blocks_per_day(),
        }
    }
}

impl TimetableConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.weekend_skip_probability) {
            return Err(ValidationError::invalid(
                "timetable.weekend_skip_probability",
                format!("{} is outside 0.0..=1.0", self.weekend_skip_probability),
            ));
        }
        if self.min_blocks_per_day > self.max_blocks_per_day {
            return Err(ValidationError::invalid(
                "timetable.min_blocks_per_day",
                format!(
                    "{} exceeds max_blocks_per_day {}",
                    self.min_blocks_per_day, self.max_blocks_per_day
                ),
            ));
        }
        Ok(())
    }
}

/// Build a fresh weekly plan from the given subjects.
///
/// Returns an empty plan when there are no subjects.
pub fn generate_study_plan<R: Rng + ?Sized>(
    subjects: &[Subject],
    rng: &mut R,
    config: &TimetableConfig,
) -> Vec<TimeBlock> {
    if subjects.is_empty() {
        return Vec::new();
    }

    let slots = default_slots();
    let max_blocks = config.max_blocks_per_day.min(slots.len());
    let min_blocks = config.min_blocks_per_day.min(max_blocks);
    let mut plan = Vec::new();

    for day in Weekday::ALL {
        if day.is_weekend() && rng.gen::<f64>() < config.weekend_skip_probability {
            continue;
        }

        let count = rng.gen_range(min_blocks..=max_blocks);
        let mut day_subjects: Vec<&Subject> = subjects.iter().collect();
        day_subjects.shuffle(rng);
        let mut day_slots = slots.clone();
        day_slots.shuffle(rng);

        for (i, slot) in day_slots.iter().take(count).enumerate() {
            let subject = day_subjects[i % day_subjects.len()];
            plan.push(TimeBlock {
                id: new_id(),
                day,
                start_time: slot.start,
                end_time: slot.end,
                subject: subject.name.clone(),
                subject_color: subject.color.clone(),
                description: Some(format!("Study {}", subject.name)),
            });
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewSubject;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;
    use std::collections::HashSet;

    fn subjects(n: usize) -> Vec<Subject> {
        (0..n)
            .map(|i| NewSubject::new(format!("Subject {i}"), "#10B981", 2, 10.0).into_subject())
            .collect()
    }

    #[test]
    fn default_slots_are_the_five_fixed_windows() {
        let slots = default_slots();
        assert_eq!(slots.len(), 5);
        assert_eq!(slots[0].start, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(slots[4].end, NaiveTime::from_hms_opt(19, 30, 0).unwrap());
        assert!(slots.iter().all(|s| (s.end - s.start).num_minutes() == 90));
    }

    #[test]
    fn empty_subjects_produce_empty_plan() {
        let mut rng = Mcg128Xsl64::seed_from_u64(1);
        assert!(generate_study_plan(&[], &mut rng, &TimetableConfig::default()).is_empty());
    }

    #[test]
    fn weekdays_get_two_or_three_distinct_slots() {
        let subjects = subjects(5);
        let mut rng = Mcg128Xsl64::seed_from_u64(7);
        for _ in 0..50 {
            let plan = generate_study_plan(&subjects, &mut rng, &TimetableConfig::default());
            for day in &Weekday::ALL[..5] {
                let blocks: Vec<_> = plan.iter().filter(|b| b.day == *day).collect();
                assert!((2..=3).contains(&blocks.len()), "{day}: {}", blocks.len());
                let starts: HashSet<_> = blocks.iter().map(|b| b.start_time).collect();
                assert_eq!(starts.len(), blocks.len());
            }
        }
    }

    #[test]
    fn single_subject_fills_every_block() {
        let subjects = subjects(1);
        let mut rng = Mcg128Xsl64::seed_from_u64(3);
        let plan = generate_study_plan(&subjects, &mut rng, &TimetableConfig::default());
        assert!(!plan.is_empty());
        assert!(plan.iter().all(|b| b.subject == "Subject 0"));
        assert!(plan
            .iter()
            .all(|b| b.description.as_deref() == Some("Study Subject 0")));
    }

    #[test]
    fn blocks_within_a_day_use_distinct_subjects_when_enough_exist() {
        let subjects = subjects(5);
        let mut rng = Mcg128Xsl64::seed_from_u64(11);
        let plan = generate_study_plan(&subjects, &mut rng, &TimetableConfig::default());
        for day in Weekday::ALL {
            let names: Vec<_> = plan.iter().filter(|b| b.day == day).map(|b| &b.subject).collect();
            let unique: HashSet<_> = names.iter().collect();
            assert_eq!(unique.len(), names.len());
        }
    }

    #[test]
    fn weekend_is_never_skipped_at_zero_probability() {
        let config = TimetableConfig {
            weekend_skip_probability: 0.0,
            ..Default::default()
        };
        let mut rng = Mcg128Xsl64::seed_from_u64(5);
        let plan = generate_study_plan(&subjects(3), &mut rng, &config);
        assert!(plan.iter().any(|b| b.day == Weekday::Saturday));
        assert!(plan.iter().any(|b| b.day == Weekday::Sunday));
    }

    #[test]
    fn weekend_is_always_skipped_at_full_probability() {
        let config = TimetableConfig {
            weekend_skip_probability: 1.0,
            ..Default::default()
        };
        let mut rng = Mcg128Xsl64::seed_from_u64(5);
        let plan = generate_study_plan(&subjects(3), &mut rng, &config);
        assert!(plan.iter().all(|b| !b.day.is_weekend()));
    }

    #[test]
    fn same_seed_same_plan() {
        let subjects = subjects(4);
        let a = generate_study_plan(
            &subjects,
            &mut Mcg128Xsl64::seed_from_u64(42),
            &TimetableConfig::default(),
        );
        let b = generate_study_plan(
            &subjects,
            &mut Mcg128Xsl64::seed_from_u64(42),
            &TimetableConfig::default(),
        );
        let layout = |plan: &[TimeBlock]| -> Vec<_> {
            plan.iter()
                .map(|b| (b.day, b.start_time, b.subject.clone()))
                .collect()
        };
        assert_eq!(layout(&a), layout(&b));
        assert!(a.iter().zip(&b).all(|(x, y)| x.id != y.id));
    }

    #[test]
    fn block_count_is_capped_by_slot_count() {
        let config = TimetableConfig {
            weekend_skip_probability: 0.0,
            min_blocks_per_day: 9,
            max_blocks_per_day: 9,
        };
        let mut rng = Mcg128Xsl64::seed_from_u64(9);
        let plan = generate_study_plan(&subjects(2), &mut rng, &config);
        assert_eq!(plan.len(), 7 * 5);
    }

    #[test]
    fn config_validation() {
        assert!(TimetableConfig::default().validate().is_ok());
        let bad = TimetableConfig {
            weekend_skip_probability: 1.5,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
        let bad = TimetableConfig {
            min_blocks_per_day: 4,
            max_blocks_per_day: 2,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
