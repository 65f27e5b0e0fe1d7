use time::{error::IndeterminateOffset, Date, OffsetDateTime, UtcOffset};

/// Source of the current calendar day
pub(crate) trait Clock {
    fn today(&self) -> Date;
}

/// Reads the system clock in the local time zone.
///
/// The UTC offset is looked up once at construction, as determining it later
/// can fail once other threads exist.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct LocalClock {
    offset: UtcOffset,
}

impl LocalClock {
    pub(crate) fn new() -> Result<LocalClock, IndeterminateOffset> {
        UtcOffset::current_local_offset().map(|offset| LocalClock { offset })
    }
}

impl Clock for LocalClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_utc().to_offset(self.offset).date()
    }
}

/// A clock stuck on a single day
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FixedClock(pub(crate) Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}
