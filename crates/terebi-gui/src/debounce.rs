//! Generation-counter debouncing for rapidly changing inputs.

use std::time::Duration;

use iced::Task;

/// Delays propagation of a changing value until it has been quiet for a
/// fixed period.
///
/// Each [`debounce`](Debouncer::debounce) call supersedes any pending
/// emission by bumping the generation; the returned task sleeps for the
/// delay and then surfaces its generation. The consumer applies an
/// emission only when [`is_current`](Debouncer::is_current) says it is
/// the latest, which implements cancel-and-reschedule without having to
/// abort in-flight timers. Dropping the owner simply orphans pending
/// emissions.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: u64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
        }
    }

    /// Register a new input value. Returns a task that emits this
    /// change's generation after the quiet period.
    pub fn debounce<M>(&mut self, to_message: impl Fn(u64) -> M + Send + 'static) -> Task<M>
    where
        M: Send + 'static,
    {
        self.generation += 1;
        let generation = self.generation;
        let delay = self.delay;
        Task::perform(
            async move {
                tokio::time::sleep(delay).await;
                generation
            },
            to_message,
        )
    }

    /// Whether an emitted generation is still the most recent input.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}
