use crate::ledger::{MonetaryValue, TaxLine};

/// Collapses taxes that carry an equal amount and currency, keeping the
/// first occurrence of each. Tax code and owner are not part of the key.
pub fn dedupe_taxes<'a, I>(taxes: I) -> Vec<TaxLine>
where
    I: IntoIterator<Item = &'a TaxLine>,
{
    let mut accepted: Vec<TaxLine> = Vec::new();
    for tax in taxes {
        if !contains_value(&accepted, &tax.value) {
            accepted.push(tax.clone());
        }
    }
    accepted
}

fn contains_value(accepted: &[TaxLine], value: &MonetaryValue) -> bool {
    accepted.iter().any(|tax| tax.value == *value)
}
