use std::collections::VecDeque;

/// First-in, first-out queue of work deferred until the current event handler
/// and render pass have finished
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct TaskQueue<T>(VecDeque<T>);

impl<T> TaskQueue<T> {
    pub(crate) fn new() -> TaskQueue<T> {
        TaskQueue(VecDeque::new())
    }

    pub(crate) fn push(&mut self, task: T) {
        self.0.push_back(task);
    }

    pub(crate) fn pop(&mut self) -> Option<T> {
        self.0.pop_front()
    }
}

impl<T> Default for TaskQueue<T> {
    fn default() -> TaskQueue<T> {
        TaskQueue::new()
    }
}
