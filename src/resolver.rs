// Passenger resolution for passenger-type scoped queries

use crate::ledger::{PassengerId, PriceLedger};
use tracing::debug;

/// Id of the first passenger in ledger order whose type code matches.
pub fn resolve_passenger(ledger: &PriceLedger, pax_type: &str) -> Option<PassengerId> {
    ledger
        .lines()
        .iter()
        .find(|line| line.code == pax_type)
        .map(|line| line.passenger_id)
}

// Decides which passengers of a type take part in passenger-scoped sums
pub trait PassengerResolver: Send + Sync {
    // An empty selection means every passenger-scoped query is zero/empty
    fn resolve(&self, ledger: &PriceLedger, pax_type: &str) -> Vec<PassengerId>;
}

/// Selects only the first-encountered passenger of the requested type.
///
/// A variant with two adults is priced as if it contained one: the second
/// adult's lines never reach `total_pax_cost("ADT")`. This is the behavior
/// of the reservation system clients this SDK replaces, and it answers
/// "what does one passenger of this type pay".
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMatchResolver;

impl PassengerResolver for FirstMatchResolver {
    fn resolve(&self, ledger: &PriceLedger, pax_type: &str) -> Vec<PassengerId> {
        let resolved = resolve_passenger(ledger, pax_type);
        debug!(pax_type, ?resolved, "resolved first passenger of type");
        resolved.into_iter().collect()
    }
}

/// Selects every distinct passenger of the requested type, in encounter order.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllOfTypeResolver;

impl PassengerResolver for AllOfTypeResolver {
    fn resolve(&self, ledger: &PriceLedger, pax_type: &str) -> Vec<PassengerId> {
        let mut ids = Vec::new();
        for line in ledger.lines().iter().filter(|line| line.code == pax_type) {
            if !ids.contains(&line.passenger_id) {
                ids.push(line.passenger_id);
            }
        }
        debug!(pax_type, count = ids.len(), "resolved all passengers of type");
        ids
    }
}
