//! Week generation, navigation state, and terminal rendering for a
//! horizontally-scrolling week strip calendar.
//!
//! The date and week logic in [`calendar::dates`], [`calendar::lookup`], and
//! [`calendar::navigator`] has no dependency on the terminal;
//! [`calendar::widget`] draws a [`calendar::StripNavigator`] with `ratatui`.
pub mod calendar;
