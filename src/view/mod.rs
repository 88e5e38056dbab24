mod color;
mod editor;
mod month;
mod week;
pub(crate) use self::color::ColorMenu;
pub(crate) use self::editor::{DescriptionView, LineEditor, TextEditor};
pub(crate) use self::month::{MonthState, MonthView};
pub(crate) use self::week::WeekView;
