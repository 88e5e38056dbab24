use crate::dates::{day_display, week_id_of};
use serde::{Deserialize, Serialize};
use time::{Date, Duration, Weekday};

/// Color sentinel marking an anchor as a "significant day" highlight.
pub(crate) const GOLDEN: &str = "golden";

/// Color sentinel for an explicit reset back to no color.
pub(crate) const TRANSPARENT: &str = "transparent";

pub(crate) const ANCHORS_PER_DAY: usize = 3;

/// Fixed placeholder labels, one per anchor slot.
pub(crate) const ANCHOR_LABELS: [&str; ANCHORS_PER_DAY] =
    ["morning intention", "daily movement", "evening rest"];

pub(crate) const WEEKDAYS: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

/// A single intention slot on a day.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct Anchor {
    pub(crate) text: String,
    pub(crate) description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) color: Option<String>,
}

impl Anchor {
    pub(crate) fn empty() -> Anchor {
        Anchor {
            text: String::new(),
            description: String::new(),
            color: Some(TRANSPARENT.to_owned()),
        }
    }

    pub(crate) fn is_golden(&self) -> bool {
        self.color.as_deref() == Some(GOLDEN)
    }
}

/// Reserved extension point; round-trip preserved, never populated by any
/// current flow.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct Task {
    pub(crate) id: String,
    pub(crate) text: String,
    pub(crate) completed: bool,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct Day {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) date: String,
    pub(crate) anchors: [Anchor; ANCHORS_PER_DAY],
    pub(crate) tasks: Vec<Task>,
}

impl Day {
    pub(crate) fn apply(&mut self, patch: DayPatch) {
        if let Some(anchors) = patch.anchors {
            self.anchors = anchors;
        }
        if let Some(tasks) = patch.tasks {
            self.tasks = tasks;
        }
    }
}

/// Partial day payload merged into the matching `Day` by id.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct DayPatch {
    pub(crate) anchors: Option<[Anchor; ANCHORS_PER_DAY]>,
    pub(crate) tasks: Option<Vec<Task>>,
}

/// A full week of days, Monday through Sunday in fixed order.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct Week {
    days: Vec<Day>,
}

impl Week {
    /// Synthesizes the default empty week starting at `monday`.
    pub(crate) fn fresh(monday: Date) -> Week {
        let week_id = week_id_of(monday);
        let days = WEEKDAYS
            .into_iter()
            .enumerate()
            .map(|(idx, weekday)| {
                let date = monday
                    .checked_add(Duration::days(idx as i64))
                    .expect("week fits in the supported calendar range");
                Day {
                    id: format!("{week_id}_{}", weekday.to_string().to_lowercase()),
                    name: weekday.to_string(),
                    date: day_display(date),
                    anchors: std::array::from_fn(|_| Anchor::empty()),
                    tasks: Vec::new(),
                }
            })
            .collect();
        Week { days }
    }

    pub(crate) fn days(&self) -> &[Day] {
        &self.days
    }

    pub(crate) fn days_mut(&mut self) -> &mut [Day] {
        &mut self.days
    }

    pub(crate) fn day_named(&self, name: &str) -> Option<&Day> {
        self.days.iter().find(|day| day.name == name)
    }
}
