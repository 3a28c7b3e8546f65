//! Task suggestion.
//!
//! Picks the least-complete subjects and drafts one task for each, with a
//! title drawn from subject-specific phrase templates.

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::model::{new_id, Subject, Task, TaskPriority, TaskStatus};

const TOPIC_PLACEHOLDER: &str = "{topic}";

/// Upper bound on tasks suggested per call.
pub const MAX_SUGGESTIONS: usize = 3;

const TITLE_TEMPLATES: &[(&str, &[&str])] = &[
    (
        "Mathematics",
        &[
            "Practice problems on {topic}",
            "Review formulas for {topic}",
            "Complete homework on {topic}",
            "Watch tutorial on {topic}",
        ],
    ),
    (
        "Physics",
        &[
            "Solve {topic} equations",
            "Review laws of {topic}",
            "Lab report preparation",
            "Practice numerical problems on {topic}",
        ],
    ),
    (
        "Chemistry",
        &[
            "Review {topic} reactions",
            "Memorize formulas for {topic}",
            "Practice balancing equations",
            "Study molecular structures",
        ],
    ),
    (
        "English",
        &[
            "Read chapter on {topic}",
            "Write essay draft",
            "Analyze passage from {topic}",
            "Review grammar rules",
        ],
    ),
    (
        "Computer Science",
        &[
            "Practice coding {topic}",
            "Debug programs",
            "Read documentation for {topic}",
            "Build small project using {topic}",
        ],
    ),
];

const FALLBACK_TEMPLATES: &[&str] = &[
    "Review notes on {topic}",
    "Practice problems for {topic}",
    "Read chapter on {topic}",
    "Complete assignment on {topic}",
];

const TOPICS: &[(&str, &[&str])] = &[
    (
        "Mathematics",
        &["Calculus", "Algebra", "Geometry", "Trigonometry", "Statistics"],
    ),
    (
        "Physics",
        &["Mechanics", "Electricity", "Optics", "Thermodynamics", "Waves"],
    ),
    (
        "Chemistry",
        &[
            "Organic Chemistry",
            "Inorganic Chemistry",
            "Physical Chemistry",
            "Biochemistry",
        ],
    ),
    (
        "English",
        &["Literature", "Grammar", "Composition", "Poetry", "Critical Analysis"],
    ),
    (
        "Computer Science",
        &[
            "Algorithms",
            "Data Structures",
            "Programming Languages",
            "Web Development",
            "Databases",
        ],
    ),
];

const FALLBACK_TOPICS: &[&str] = &[
    "Chapter 1",
    "Chapter 2",
    "Advanced Topics",
    "Fundamentals",
    "Key Concepts",
];

fn lookup<'a>(table: &[(&str, &'a [&'a str])], subject: &str, fallback: &'a [&'a str]) -> &'a [&'a str] {
    table
        .iter()
        .find(|(name, _)| *name == subject)
        .map(|(_, entries)| *entries)
        .unwrap_or(fallback)
}

/// Title templates used for a subject.
pub fn title_templates(subject: &str) -> &'static [&'static str] {
    lookup(TITLE_TEMPLATES, subject, FALLBACK_TEMPLATES)
}

/// Topics substituted into a subject's templates.
pub fn topics(subject: &str) -> &'static [&'static str] {
    lookup(TOPICS, subject, FALLBACK_TOPICS)
}

/// Task suggestion settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Number of least-complete subjects that get a suggestion
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default = "default_min_due_days")]
    pub min_due_days: i64,
    #[serde(default = "default_max_due_days")]
    pub max_due_days: i64,
    #[serde(default = "default_min_minutes")]
    pub min_minutes: u32,
    #[serde(default = "default_max_minutes")]
    pub max_minutes: u32,
    /// Completion ratio below which a suggestion is High
    #[serde(default = "default_high_ratio_below")]
    pub high_ratio_below: f64,
    /// Completion ratio below which a suggestion is at least Medium
    #[serde(default = "default_medium_ratio_below")]
    pub medium_ratio_below: f64,
}

fn default_count() -> usize {
    3
}
fn default_min_due_days() -> i64 {
    1
}
fn default_max_due_days() -> i64 {
    7
}
fn default_min_minutes() -> u32 {
    30
}
fn default_max_minutes() -> u32 {
    90
}
fn default_high_ratio_below() -> f64 {
    0.3
}
fn default_medium_ratio_below() -> f64 {
    0.6
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            min_due_days: default_min_due_days(),
            max_due_days: default_max_due_days(),
            min_minutes: default_min_minutes(),
            max_minutes: default_max_minutes(),
            high_ratio_below: default_high_ratio_below(),
            medium_ratio_below: default_medium_ratio_below(),
        }
    }
}

impl SuggestionConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=MAX_SUGGESTIONS).contains(&self.count) {
            return Err(ValidationError::invalid(
                "suggestions.count",
                format!("{} is outside 1..={MAX_SUGGESTIONS}", self.count),
            ));
        }
        if self.min_due_days < 0 || self.min_due_days > self.max_due_days {
            return Err(ValidationError::invalid(
                "suggestions.min_due_days",
                format!(
                    "{}..={} is not a valid day range",
                    self.min_due_days, self.max_due_days
                ),
            ));
        }
        if self.min_minutes == 0 || self.min_minutes > self.max_minutes {
            return Err(ValidationError::invalid(
                "suggestions.min_minutes",
                format!(
                    "{}..={} is not a valid minute range",
                    self.min_minutes, self.max_minutes
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.high_ratio_below)
            || !(0.0..=1.0).contains(&self.medium_ratio_below)
        {
            return Err(ValidationError::invalid(
                "suggestions.high_ratio_below",
                "ratio thresholds must lie within 0.0..=1.0",
            ));
        }
        Ok(())
    }
}

/// Subjects ordered from least to most complete.
///
/// The sort is stable: subjects with equal ratios keep their input order.
pub fn rank_by_completion(subjects: &[Subject]) -> Vec<&Subject> {
    let mut ranked: Vec<&Subject> = subjects.iter().collect();
    ranked.sort_by(|a, b| a.completion_ratio().total_cmp(&b.completion_ratio()));
    ranked
}

/// Priority of a task suggested for `subject`. First matching rule wins:
/// rank 3 or low completion is High, rank 2 or partial completion is Medium.
pub fn suggested_priority(subject: &Subject, config: &SuggestionConfig) -> TaskPriority {
    let ratio = subject.completion_ratio();
    if subject.priority == 3 || ratio < config.high_ratio_below {
        TaskPriority::High
    } else if subject.priority == 2 || ratio < config.medium_ratio_below {
        TaskPriority::Medium
    } else {
        TaskPriority::Low
    }
}

/// Draft a task title for the named subject.
pub fn task_title<R: Rng + ?Sized>(subject: &str, rng: &mut R) -> String {
    let template = title_templates(subject)
        .choose(rng)
        .copied()
        .unwrap_or(FALLBACK_TEMPLATES[0]);
    let topic = topics(subject).choose(rng).copied().unwrap_or(FALLBACK_TOPICS[0]);
    template.replacen(TOPIC_PLACEHOLDER, topic, 1)
}

/// Draft one new task for each of the least-complete subjects.
pub fn suggest_tasks<R: Rng + ?Sized>(
    subjects: &[Subject],
    rng: &mut R,
    now: DateTime<Utc>,
    config: &SuggestionConfig,
) -> Vec<Task> {
    let today = now.date_naive();
    rank_by_completion(subjects)
        .into_iter()
        .take(config.count)
        .map(|subject| {
            let due_in = rng.gen_range(config.min_due_days..=config.max_due_days);
            Task {
                id: new_id(),
                title: task_title(&subject.name, rng),
                subject: subject.name.clone(),
                subject_color: subject.color.clone(),
                priority: suggested_priority(subject, config),
                status: TaskStatus::ToDo,
                due_date: today + Duration::days(due_in),
                estimated_minutes: rng.gen_range(config.min_minutes..=config.max_minutes),
                notes: None,
                created_at: now,
                completed_at: None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewSubject;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;

    fn subject(name: &str, rank: u8, completed: f64, total: f64) -> Subject {
        NewSubject::new(name, "#F59E0B", rank, total)
            .with_completed_hours(completed)
            .into_subject()
    }

    #[test]
    fn high_rank_is_high_priority() {
        let s = subject("Mathematics", 3, 1.0, 100.0);
        assert_eq!(suggested_priority(&s, &SuggestionConfig::default()), TaskPriority::High);
    }

    #[test]
    fn nearly_done_low_rank_is_low_priority() {
        let s = subject("English", 1, 90.0, 100.0);
        assert_eq!(suggested_priority(&s, &SuggestionConfig::default()), TaskPriority::Low);
    }

    #[test]
    fn priority_rules_apply_in_order() {
        let config = SuggestionConfig::default();
        // Low completion beats a low rank.
        assert_eq!(suggested_priority(&subject("A", 1, 10.0, 100.0), &config), TaskPriority::High);
        assert_eq!(suggested_priority(&subject("B", 2, 90.0, 100.0), &config), TaskPriority::Medium);
        assert_eq!(suggested_priority(&subject("C", 1, 50.0, 100.0), &config), TaskPriority::Medium);
        assert_eq!(suggested_priority(&subject("D", 1, 60.0, 100.0), &config), TaskPriority::Low);
    }

    #[test]
    fn unplanned_subject_is_treated_as_complete() {
        let s = subject("Art", 1, 0.0, 0.0);
        assert_eq!(suggested_priority(&s, &SuggestionConfig::default()), TaskPriority::Low);
    }

    #[test]
    fn ranking_is_stable_for_ties() {
        let subjects = vec![
            subject("First", 1, 5.0, 10.0),
            subject("Second", 1, 1.0, 10.0),
            subject("Third", 1, 5.0, 10.0),
            subject("Unplanned", 1, 0.0, 0.0),
        ];
        let names: Vec<_> = rank_by_completion(&subjects)
            .into_iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, ["Second", "First", "Third", "Unplanned"]);
    }

    #[test]
    fn known_subject_uses_its_own_templates() {
        let mut rng = Mcg128Xsl64::seed_from_u64(1);
        for _ in 0..20 {
            let title = task_title("Physics", &mut rng);
            let from_template = title_templates("Physics").iter().any(|t| {
                let (prefix, suffix) = t.split_once(TOPIC_PLACEHOLDER).unwrap_or((*t, ""));
                title.starts_with(prefix) && title.ends_with(suffix)
            });
            assert!(from_template, "unexpected title {title}");
            assert!(!title.contains(TOPIC_PLACEHOLDER));
        }
    }

    #[test]
    fn unknown_subject_falls_back_to_generic_templates() {
        assert_eq!(title_templates("Astronomy"), FALLBACK_TEMPLATES);
        assert_eq!(topics("Astronomy"), FALLBACK_TOPICS);
        assert_eq!(topics("Computer Science")[0], "Algorithms");
    }

    #[test]
    fn template_lookup_matches_names_exactly() {
        assert_eq!(topics("mathematics"), FALLBACK_TOPICS);
        assert_eq!(topics(" Physics "), FALLBACK_TOPICS);
        assert_eq!(title_templates("ENGLISH"), FALLBACK_TEMPLATES);
        assert_ne!(topics("Mathematics"), FALLBACK_TOPICS);
    }

    #[test]
    fn suggests_one_task_for_each_of_three_least_complete() {
        let subjects = vec![
            subject("Mathematics", 3, 12.0, 40.0),
            subject("Physics", 2, 8.0, 35.0),
            subject("Chemistry", 2, 10.0, 30.0),
            subject("English", 1, 6.0, 25.0),
            subject("Computer Science", 3, 15.0, 45.0),
        ];
        let now = Utc::now();
        let mut rng = Mcg128Xsl64::seed_from_u64(99);
        let tasks = suggest_tasks(&subjects, &mut rng, now, &SuggestionConfig::default());

        let names: Vec<_> = tasks.iter().map(|t| t.subject.as_str()).collect();
        assert_eq!(names, ["Physics", "English", "Mathematics"]);
        for task in &tasks {
            let days = (task.due_date - now.date_naive()).num_days();
            assert!((1..=7).contains(&days));
            assert!((30..=90).contains(&task.estimated_minutes));
            assert_eq!(task.status, TaskStatus::ToDo);
            assert_eq!(task.created_at, now);
            assert!(task.validate().is_ok());
        }
    }

    #[test]
    fn fewer_subjects_than_count_yields_fewer_tasks() {
        let subjects = vec![subject("Mathematics", 3, 1.0, 10.0)];
        let mut rng = Mcg128Xsl64::seed_from_u64(2);
        let tasks = suggest_tasks(&subjects, &mut rng, Utc::now(), &SuggestionConfig::default());
        assert_eq!(tasks.len(), 1);
        assert!(suggest_tasks(&[], &mut rng, Utc::now(), &SuggestionConfig::default()).is_empty());
    }

    #[test]
    fn config_validation() {
        assert!(SuggestionConfig::default().validate().is_ok());
        let bad = SuggestionConfig {
            min_minutes: 0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
        let bad = SuggestionConfig {
            min_due_days: 8,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn count_is_bounded_to_three() {
        for count in 1..=MAX_SUGGESTIONS {
            let ok = SuggestionConfig {
                count,
                ..Default::default()
            };
            assert!(ok.validate().is_ok());
        }
        for count in [0, MAX_SUGGESTIONS + 1, 10] {
            let bad = SuggestionConfig {
                count,
                ..Default::default()
            };
            assert!(bad.validate().is_err(), "count {count}");
        }
    }
}
