/// Options which tune how a [`Cron`](crate::Cron) expression is evaluated.
///
/// Options are a part of the serialized form of [`Cron`](crate::Cron), but every field has a default,
/// so an input string alone is enough to reconstruct an instance.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CronOptions {
    /// How the length of February is determined by `L`, `LW` and `nL` lookups.
    pub february: February,
}

impl CronOptions {
    /// Returns options with the specified treatment of February.
    pub fn with_february(self, february: February) -> Self {
        Self { february }
    }
}

/// Length of February used to find the last (week)day of the month.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum February {
    /// 29 days in leap years, 28 otherwise.
    #[default]
    LeapAware,
    /// Always 28 days, the way legacy schedules were evaluated.
    AlwaysShort,
}
