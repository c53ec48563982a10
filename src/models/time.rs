//! Weekly time model.
//!
//! Class meetings recur weekly, so time is represented as a day of the week
//! plus minutes from midnight on that day.
//!
//! # Interval Semantics
//! Every [`TimeSlot`] is half-open: `[start, end)`. A class ending at 10:00
//! and another starting at 10:00 do not conflict.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ScheduleError;

/// Minutes in a day. Slot ends may equal this value (class ending at midnight).
pub const MINUTES_PER_DAY: u16 = 1440;

/// A day of the week.
///
/// Ordered Monday first; this order drives conflict reporting and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    #[serde(alias = "M")]
    Mon,
    #[serde(alias = "Tu")]
    Tue,
    #[serde(alias = "W")]
    Wed,
    #[serde(alias = "Th")]
    Thu,
    #[serde(alias = "F")]
    Fri,
    #[serde(alias = "Sa")]
    Sat,
    #[serde(alias = "Su")]
    Sun,
}

impl Weekday {
    /// All days, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Three-letter symbol ("Mon").
    pub fn symbol(self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }

    /// Full English name ("Monday").
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Weekday {
    type Err = ScheduleError;

    /// Accepts symbols ("Mon"), full names, and catalog abbreviations
    /// ("M", "Tu", "W", "Th", "F", "Sa", "Su"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let day = match s.trim().to_ascii_lowercase().as_str() {
            "m" | "mon" | "monday" => Weekday::Mon,
            "tu" | "tue" | "tues" | "tuesday" => Weekday::Tue,
            "w" | "wed" | "wednesday" => Weekday::Wed,
            "th" | "thu" | "thur" | "thurs" | "thursday" => Weekday::Thu,
            "f" | "fri" | "friday" => Weekday::Fri,
            "sa" | "sat" | "saturday" => Weekday::Sat,
            "su" | "sun" | "sunday" => Weekday::Sun,
            other => return Err(ScheduleError::invalid(format!("Unknown day: {other:?}"))),
        };
        Ok(day)
    }
}

/// One contiguous meeting interval `[start_minute, end_minute)` on a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    /// Start (minutes from midnight, inclusive).
    pub start_minute: u16,
    /// End (minutes from midnight, exclusive).
    pub end_minute: u16,
}

impl TimeSlot {
    /// Creates a slot. Well-formedness is checked at catalog ingestion,
    /// see [`TimeSlot::is_well_formed`].
    pub fn new(start_minute: u16, end_minute: u16) -> Self {
        Self {
            start_minute,
            end_minute,
        }
    }

    /// Creates a slot from clock times, e.g. `TimeSlot::hm(9, 0, 9, 50)`.
    pub fn hm(start_hour: u16, start_min: u16, end_hour: u16, end_min: u16) -> Self {
        Self::new(start_hour * 60 + start_min, end_hour * 60 + end_min)
    }

    /// Length in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> u16 {
        self.end_minute.saturating_sub(self.start_minute)
    }

    /// Whether `start < end` and the slot lies within one day.
    pub fn is_well_formed(&self) -> bool {
        self.start_minute < self.end_minute && self.end_minute <= MINUTES_PER_DAY
    }

    /// Whether two slots overlap (half-open; touching endpoints do not).
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_minute < other.end_minute && other.start_minute < self.end_minute
    }

    /// The shared interval of two slots, if they overlap.
    pub fn intersection(&self, other: &Self) -> Option<TimeSlot> {
        let start = self.start_minute.max(other.start_minute);
        let end = self.end_minute.min(other.end_minute);
        if start < end {
            Some(TimeSlot::new(start, end))
        } else {
            None
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            format_minutes(self.start_minute),
            format_minutes(self.end_minute)
        )
    }
}

/// Renders minutes from midnight as a 12-hour clock time ("9:05 AM").
pub fn format_minutes(minutes: u16) -> String {
    let hours = (minutes / 60) % 24;
    let mins = minutes % 60;
    let period = if hours < 12 { "AM" } else { "PM" };
    let display_hour = match hours {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!("{display_hour}:{mins:02} {period}")
}

/// Recurring weekly meeting pattern: day → slots on that day.
///
/// An empty pattern marks an unscheduled section (independent study,
/// thesis, arranged).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyPattern {
    days: BTreeMap<Weekday, Vec<TimeSlot>>,
}

impl WeeklyPattern {
    /// Creates an empty (unscheduled) pattern.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a slot on a day.
    pub fn with_slot(mut self, day: Weekday, slot: TimeSlot) -> Self {
        self.add_slot(day, slot);
        self
    }

    /// Adds the same slot on each listed day (e.g. MWF 9:00-9:50).
    pub fn with_days(mut self, days: &[Weekday], slot: TimeSlot) -> Self {
        for &day in days {
            self.add_slot(day, slot);
        }
        self
    }

    /// Adds a slot, keeping slots on the day ordered by start.
    pub fn add_slot(&mut self, day: Weekday, slot: TimeSlot) {
        let slots = self.days.entry(day).or_default();
        slots.push(slot);
        slots.sort_by_key(|s| (s.start_minute, s.end_minute));
    }

    /// Slots on a given day (empty if none).
    pub fn slots_on(&self, day: Weekday) -> &[TimeSlot] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Days with at least one slot, Monday first.
    pub fn meeting_days(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.days
            .iter()
            .filter(|(_, slots)| !slots.is_empty())
            .map(|(&day, _)| day)
    }

    /// Whether the section meets on the given day.
    pub fn meets_on(&self, day: Weekday) -> bool {
        !self.slots_on(day).is_empty()
    }

    /// All `(day, slot)` pairs, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &TimeSlot)> + '_ {
        self.days
            .iter()
            .flat_map(|(&day, slots)| slots.iter().map(move |s| (day, s)))
    }

    /// Whether there are no meeting times at all.
    pub fn is_empty(&self) -> bool {
        self.days.values().all(Vec::is_empty)
    }

    /// Earliest start minute on any day.
    pub fn earliest_start(&self) -> Option<u16> {
        self.iter().map(|(_, s)| s.start_minute).min()
    }

    /// Latest end minute on any day.
    pub fn latest_end(&self) -> Option<u16> {
        self.iter().map(|(_, s)| s.end_minute).max()
    }

    /// Total weekly meeting minutes.
    pub fn weekly_minutes(&self) -> u32 {
        self.iter().map(|(_, s)| u32::from(s.duration_minutes())).sum()
    }

    /// First overlap between two patterns, scanning days in week order.
    ///
    /// Returns the day and the intersected interval.
    ///
    /// # Complexity
    /// O(days × slots_a × slots_b).
    pub fn first_overlap(&self, other: &Self) -> Option<(Weekday, TimeSlot)> {
        for (day, mine) in &self.days {
            let theirs = other.slots_on(*day);
            for a in mine {
                for b in theirs {
                    if let Some(shared) = a.intersection(b) {
                        return Some((*day, shared));
                    }
                }
            }
        }
        None
    }

    /// Whether any slot of `self` overlaps any slot of `other` on a shared day.
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.first_overlap(other).is_some()
    }
}

/// Preferred time-of-day bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    /// Starts before noon.
    Morning,
    /// Starts from noon until 17:00.
    Afternoon,
    /// Starts at 17:00 or later.
    Evening,
    /// No preference.
    #[default]
    Flexible,
}

impl TimeOfDay {
    const NOON: u16 = 12 * 60;
    const EVENING: u16 = 17 * 60;

    /// Whether a meeting starting at `minute` falls in this bucket.
    pub fn contains_start(self, minute: u16) -> bool {
        match self {
            TimeOfDay::Morning => minute < Self::NOON,
            TimeOfDay::Afternoon => (Self::NOON..Self::EVENING).contains(&minute),
            TimeOfDay::Evening => minute >= Self::EVENING,
            TimeOfDay::Flexible => true,
        }
    }

    /// Whether every meeting of the pattern starts in this bucket.
    ///
    /// An empty pattern fits any bucket.
    pub fn fits(self, pattern: &WeeklyPattern) -> bool {
        pattern.iter().all(|(_, s)| self.contains_start(s.start_minute))
    }
}
