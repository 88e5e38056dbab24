use crate::dates::week_start_of;
use crate::store::{KeyValue, StoreError, WeekStore};
use crate::week::{Anchor, DayPatch, Week};
use time::Date;

/// The currently open week and the store it is persisted in.  All edits go
/// through [`Planner::update_day`], which merges a partial day payload and
/// writes the whole week back.
#[derive(Debug)]
pub(crate) struct Planner<S> {
    store: WeekStore<S>,
    monday: Date,
    week: Week,
}

impl<S: KeyValue> Planner<S> {
    pub(crate) fn open(store: WeekStore<S>, date: Date) -> Result<Planner<S>, StoreError> {
        let monday = week_start_of(date);
        let week = store.load(monday)?;
        Ok(Planner {
            store,
            monday,
            week,
        })
    }

    pub(crate) fn monday(&self) -> Date {
        self.monday
    }

    pub(crate) fn week(&self) -> &Week {
        &self.week
    }

    pub(crate) fn anchor(&self, day: usize, slot: usize) -> &Anchor {
        &self.week.days()[day].anchors[slot]
    }

    /// Switches to the week containing `date`, loading or synthesizing it.
    pub(crate) fn select_week(&mut self, date: Date) -> Result<(), StoreError> {
        self.monday = week_start_of(date);
        self.week = self.store.load(self.monday)?;
        Ok(())
    }

    /// Merges `patch` into the day matching `day_id`, then persists the
    /// whole week.  An unknown id still triggers the save.
    pub(crate) fn update_day(&mut self, day_id: &str, patch: DayPatch) -> Result<(), StoreError> {
        if let Some(day) = self.week.days_mut().iter_mut().find(|day| day.id == day_id) {
            day.apply(patch);
        }
        self.store.save(self.monday, &self.week)
    }

    pub(crate) fn set_anchor_text(
        &mut self,
        day: usize,
        slot: usize,
        text: String,
    ) -> Result<(), StoreError> {
        self.patch_anchor(day, slot, |anchor| anchor.text = text)
    }

    pub(crate) fn set_anchor_description(
        &mut self,
        day: usize,
        slot: usize,
        description: String,
    ) -> Result<(), StoreError> {
        self.patch_anchor(day, slot, |anchor| anchor.description = description)
    }

    pub(crate) fn set_anchor_color(
        &mut self,
        day: usize,
        slot: usize,
        color: &str,
    ) -> Result<(), StoreError> {
        self.patch_anchor(day, slot, |anchor| anchor.color = Some(color.to_owned()))
    }

    fn patch_anchor<F>(&mut self, day: usize, slot: usize, edit: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Anchor),
    {
        let day_record = &self.week.days()[day];
        let mut anchors = day_record.anchors.clone();
        edit(&mut anchors[slot]);
        let day_id = day_record.id.clone();
        self.update_day(
            &day_id,
            DayPatch {
                anchors: Some(anchors),
                ..DayPatch::default()
            },
        )
    }

    pub(crate) fn is_golden(&self, date: Date) -> Result<bool, StoreError> {
        self.store.is_golden(date)
    }
}
