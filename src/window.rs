use std::collections::VecDeque;
use std::iter::successors;
use std::num::NonZeroUsize;
use thiserror::Error;
use time::Date;

/// How many days the window covers around "today" when first built, and how
/// many days each extension adds
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct WindowSpan {
    pub(crate) past: usize,
    pub(crate) future: usize,
    pub(crate) step: NonZeroUsize,
}

const DEFAULT_STEP: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(n) => n,
    None => panic!("extension step must be nonzero"),
};

impl Default for WindowSpan {
    fn default() -> WindowSpan {
        WindowSpan {
            past: 7,
            future: 35,
            step: DEFAULT_STEP,
        }
    }
}

/// The run of days currently materialized for display.
///
/// Invariant: `days` is non-empty, strictly ascending, and contiguous (each
/// element is the day after the one before it).
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DateWindow {
    days: VecDeque<Date>,
    span: WindowSpan,
    state: ExtensionState,
}

impl DateWindow {
    pub(crate) fn initialize(today: Date, span: WindowSpan) -> DateWindow {
        let mut days = VecDeque::with_capacity(span.past + span.future + 1);
        for d in iter_days_before(today).take(span.past) {
            days.push_front(d);
        }
        days.push_back(today);
        days.extend(iter_days_after(today).take(span.future));
        DateWindow {
            days,
            span,
            state: ExtensionState::Idle,
        }
    }

    pub(crate) fn first(&self) -> Date {
        self.days[0]
    }

    pub(crate) fn last(&self) -> Date {
        self.days[self.days.len() - 1]
    }

    pub(crate) fn len(&self) -> usize {
        self.days.len()
    }

    pub(crate) fn get(&self, index: usize) -> Option<Date> {
        self.days.get(index).copied()
    }

    // Contiguity means the position of a day is just its distance from the
    // first day.
    pub(crate) fn index_of(&self, day: Date) -> Option<usize> {
        let offset = (day - self.first()).whole_days();
        usize::try_from(offset)
            .ok()
            .filter(|&i| i < self.days.len())
    }

    pub(crate) fn contains(&self, day: Date) -> bool {
        self.index_of(day).is_some()
    }

    pub(crate) fn is_extending(&self) -> bool {
        self.state == ExtensionState::Extending
    }

    /// Handle a signal that `day` has appeared on screen.
    ///
    /// If `day` is the first or last day of the window, the window enters the
    /// `Extending` state and the run of days to add is returned; the caller is
    /// expected to hand it back to [`DateWindow::apply`] once the current
    /// render pass is over.  Further requests are rejected until then.
    pub(crate) fn request_extension(&mut self, day: Date) -> Result<Extension, ExtendError> {
        if self.is_extending() {
            return Err(ExtendError::Busy);
        }
        let step = self.span.step.get();
        let extension = if day == self.first() {
            let mut run = iter_days_before(day).take(step).collect::<Vec<_>>();
            run.reverse();
            Extension::Before(run)
        } else if day == self.last() {
            Extension::After(iter_days_after(day).take(step).collect())
        } else {
            return Err(ExtendError::NotAnEdge(day));
        };
        if extension.is_empty() {
            return Err(ExtendError::OutOfTime);
        }
        self.state = ExtensionState::Extending;
        Ok(extension)
    }

    pub(crate) fn apply(&mut self, extension: Extension) {
        match extension {
            Extension::Before(run) => {
                debug_assert!(
                    run.last().and_then(|d| d.next_day()) == Some(self.first()),
                    "prepended run should end the day before the window starts"
                );
                for d in run.into_iter().rev() {
                    self.days.push_front(d);
                }
            }
            Extension::After(run) => {
                debug_assert!(
                    run.first().and_then(|d| d.previous_day()) == Some(self.last()),
                    "appended run should start the day after the window ends"
                );
                self.days.extend(run);
            }
        }
        self.state = ExtensionState::Idle;
    }

    /// Request and immediately apply an extension for `day`.  The app itself
    /// always defers the apply step through its task queue.
    #[cfg(test)]
    pub(crate) fn on_edge_reached(&mut self, day: Date) -> Result<(), ExtendError> {
        let extension = self.request_extension(day)?;
        self.apply(extension);
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum ExtensionState {
    #[default]
    Idle,
    Extending,
}

/// A run of days, in ascending order, waiting to be added to one end of a
/// [`DateWindow`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Extension {
    Before(Vec<Date>),
    After(Vec<Date>),
}

impl Extension {
    pub(crate) fn days(&self) -> &[Date] {
        match self {
            Extension::Before(run) | Extension::After(run) => run,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.days().is_empty()
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum ExtendError {
    #[error("an extension is already pending")]
    Busy,
    #[error("{0} is not at either end of the window")]
    NotAnEdge(Date),
    #[error("reached the end of time")]
    OutOfTime,
}

fn iter_days_after(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day()).skip(1)
}

fn iter_days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day()).skip(1)
}
