//! Uniform random selection of one event.

use otd_core::HistoricalFact;
use rand::Rng;

use crate::types::HistoryEvent;

/// Picks one usable event uniformly at random using the thread-local RNG.
///
/// Returns `None` when no event has text.
#[must_use]
pub fn select_fact(events: Vec<HistoryEvent>) -> Option<HistoricalFact> {
    let mut rng = rand::rng();
    select_fact_with(events, &mut rng)
}

/// Same as [`select_fact`] with a caller-supplied RNG.
pub fn select_fact_with<R: Rng + ?Sized>(
    events: Vec<HistoryEvent>,
    rng: &mut R,
) -> Option<HistoricalFact> {
    let mut usable: Vec<HistoryEvent> = events
        .into_iter()
        .filter(HistoryEvent::is_usable)
        .collect();
    if usable.is_empty() {
        return None;
    }

    let index = rng.random_range(0..usable.len());
    let event = usable.swap_remove(index);
    Some(HistoricalFact::new(
        event.year,
        event.text.unwrap_or_default(),
    ))
}
