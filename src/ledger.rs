// Price ledger: the decoded, read-only view of one priced variant

use crate::error::PricingError;

pub type PassengerId = u32;
pub type SegmentId = u32;

/// An amount together with its currency code.
///
/// Equality is exact on both fields. `10.0 USD` and `10.00 USD` are equal,
/// `10.0 USD` and `10.0 usd` are not.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonetaryValue {
    pub amount: f64,
    pub currency: String,
}

impl MonetaryValue {
    pub fn new(amount: f64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaxLine {
    pub owner: String,
    pub code: String,
    pub value: MonetaryValue,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FareCode {
    pub code: String,
    pub base_code: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FareDetail {
    pub remark: String,
    // Kept in the protocol-native format
    pub expiry_date: String,
    pub value: MonetaryValue,
    pub code: FareCode,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PaymentInfo {
    pub form_of_payment: String,
    pub currency: String,
    pub amount: f64,
}

// Informational <price> attributes, carried through untouched
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceDetails {
    pub orig_code: String,
    pub count: u32,
    pub fare_calculation: String,
    pub baggage: String,
    pub ticket: String,
    pub validating_company: String,
    pub brand: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct VatInfo {
    pub rate: Option<f64>,
    pub amount: Option<MonetaryValue>,
}

/// One charge entry tied to a segment and a passenger.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceLine {
    pub segment_id: SegmentId,
    pub passenger_id: PassengerId,
    // Passenger-type code, e.g. "ADT", "CHD", "INF"
    pub code: String,
    pub currency: String,
    pub fare: FareDetail,
    pub taxes: Vec<TaxLine>,
    pub payment: PaymentInfo,
    pub details: PriceDetails,
    pub total: f64,
    pub vat: Option<VatInfo>,
}

/// Whole-variant grand total as reported by the reservation system.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VariantTotal {
    pub currency: String,
    pub amount: f64,
}

/// Price lines of one variant plus its authoritative grand total.
///
/// The ledger is built once from a decoded response and never mutated
/// afterwards, so it can be shared between any number of readers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceLedger {
    lines: Vec<PriceLine>,
    variant_total: VariantTotal,
}

impl PriceLedger {
    pub fn new(lines: Vec<PriceLine>, variant_total: VariantTotal) -> Self {
        Self {
            lines,
            variant_total,
        }
    }

    pub fn lines(&self) -> &[PriceLine] {
        &self.lines
    }

    pub fn variant_total(&self) -> &VariantTotal {
        &self.variant_total
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Distinct price line currencies in encounter order.
    pub fn currencies(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for line in &self.lines {
            if !seen.contains(&line.currency.as_str()) {
                seen.push(line.currency.as_str());
            }
        }
        seen
    }

    /// Opt-in check that every price line shares one currency.
    ///
    /// Aggregation queries never call this; a mixed-currency ledger still
    /// produces plain numeric sums.
    pub fn ensure_single_currency(&self) -> Result<(), PricingError> {
        let currencies = self.currencies();
        match currencies.as_slice() {
            [] | [_] => Ok(()),
            [expected, found, ..] => Err(PricingError::CurrencyMismatch {
                expected: expected.to_string(),
                found: found.to_string(),
            }),
        }
    }
}
