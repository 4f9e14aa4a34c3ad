// Aggregation engine: passenger and variant level totals over a price ledger

use crate::dedup::dedupe_taxes;
use crate::ledger::{PriceLedger, PriceLine, TaxLine, VariantTotal, VatInfo};
use crate::resolver::{FirstMatchResolver, PassengerResolver};

/// Fare, tax and total for one passenger type.
#[derive(Debug, Clone, PartialEq)]
pub struct PassengerCostSummary {
    pub pax_type: String,
    pub fare: f64,
    pub taxes: f64,
    pub total: f64,
}

/// Read-only queries over a borrowed [`PriceLedger`].
///
/// Passenger-scoped queries first ask the resolver which passengers of the
/// requested type take part, then work on the lines whose type code matches
/// and whose passenger id was selected. Unknown type codes produce zero sums
/// and empty lists. Variant-scoped queries look at every line.
///
/// Amounts are summed as-is: currencies are neither checked nor converted.
/// Use [`PriceLedger::ensure_single_currency`] when that matters.
#[derive(Debug, Clone)]
pub struct PricingEngine<'a, R: PassengerResolver = FirstMatchResolver> {
    ledger: &'a PriceLedger,
    resolver: R,
}

impl<'a> PricingEngine<'a> {
    pub fn new(ledger: &'a PriceLedger) -> Self {
        Self::with_resolver(ledger, FirstMatchResolver)
    }
}

impl<'a, R: PassengerResolver> PricingEngine<'a, R> {
    pub fn with_resolver(ledger: &'a PriceLedger, resolver: R) -> Self {
        Self { ledger, resolver }
    }

    pub fn ledger(&self) -> &'a PriceLedger {
        self.ledger
    }

    // Lines of the resolved passengers of this type, in ledger order
    fn pax_lines(&self, pax_type: &str) -> Vec<&'a PriceLine> {
        let passenger_ids = self.resolver.resolve(self.ledger, pax_type);
        if passenger_ids.is_empty() {
            return Vec::new();
        }

        self.ledger
            .lines()
            .iter()
            .filter(|line| line.code == pax_type && passenger_ids.contains(&line.passenger_id))
            .collect()
    }

    pub fn total_pax_cost(&self, pax_type: &str) -> f64 {
        self.pax_lines(pax_type)
            .iter()
            .fold(0.0, |acc, line| acc + line.total)
    }

    pub fn fare_pax_cost(&self, pax_type: &str) -> f64 {
        self.pax_lines(pax_type)
            .iter()
            .fold(0.0, |acc, line| acc + line.fare.value.amount)
    }

    // Every tax line counts here, value duplicates included
    pub fn taxes_pax_cost(&self, pax_type: &str) -> f64 {
        sum_taxes(self.pax_lines(pax_type).into_iter())
    }

    pub fn raw_tax_pax(&self, pax_type: &str) -> Vec<TaxLine> {
        let lines = self.pax_lines(pax_type);
        dedupe_taxes(lines.iter().flat_map(|line| line.taxes.iter()))
    }

    /// One entry per matching line, including lines without VAT.
    pub fn raw_vat_pax(&self, pax_type: &str) -> Vec<Option<&'a VatInfo>> {
        self.pax_lines(pax_type)
            .into_iter()
            .map(|line| line.vat.as_ref())
            .collect()
    }

    pub fn taxes_variant_cost(&self) -> f64 {
        sum_taxes(self.ledger.lines().iter())
    }

    pub fn fare_variant_cost(&self) -> f64 {
        self.ledger
            .lines()
            .iter()
            .fold(0.0, |acc, line| acc + line.fare.value.amount)
    }

    /// The grand total reported by the reservation system, not a sum of
    /// line totals. Variant level discounts and rounding make them differ.
    pub fn total_variant_cost(&self) -> &'a VariantTotal {
        self.ledger.variant_total()
    }

    pub fn pax_summary(&self, pax_type: &str) -> PassengerCostSummary {
        PassengerCostSummary {
            pax_type: pax_type.to_string(),
            fare: self.fare_pax_cost(pax_type),
            taxes: self.taxes_pax_cost(pax_type),
            total: self.total_pax_cost(pax_type),
        }
    }

    // One summary per distinct passenger type, in ledger order
    pub fn summaries(&self) -> Vec<PassengerCostSummary> {
        let mut pax_types: Vec<&str> = Vec::new();
        for line in self.ledger.lines() {
            if !pax_types.contains(&line.code.as_str()) {
                pax_types.push(line.code.as_str());
            }
        }

        pax_types
            .into_iter()
            .map(|pax_type| self.pax_summary(pax_type))
            .collect()
    }
}

fn sum_taxes<'a>(lines: impl Iterator<Item = &'a PriceLine>) -> f64 {
    lines
        .flat_map(|line| line.taxes.iter())
        .fold(0.0, |acc, tax| acc + tax.value.amount)
}

impl PriceLedger {
    /// Engine with first-match passenger resolution.
    pub fn engine(&self) -> PricingEngine<'_> {
        PricingEngine::new(self)
    }

    pub fn engine_with<R: PassengerResolver>(&self, resolver: R) -> PricingEngine<'_, R> {
        PricingEngine::with_resolver(self, resolver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{FareDetail, MonetaryValue, PassengerId};
    use crate::resolver::AllOfTypeResolver;
    use test_case::test_case;

    fn line(passenger_id: PassengerId, code: &str, fare: f64, total: f64) -> PriceLine {
        PriceLine {
            segment_id: 1,
            passenger_id,
            code: code.to_string(),
            currency: "USD".to_string(),
            fare: FareDetail {
                value: MonetaryValue::new(fare, "USD"),
                ..Default::default()
            },
            total,
            ..Default::default()
        }
    }

    fn tax(code: &str, amount: f64) -> TaxLine {
        TaxLine {
            owner: "UT".to_string(),
            code: code.to_string(),
            value: MonetaryValue::new(amount, "USD"),
        }
    }

    fn variant_total(amount: f64) -> VariantTotal {
        VariantTotal {
            currency: "USD".to_string(),
            amount,
        }
    }

    // Adult on two segments, child on two segments
    fn family_ledger() -> PriceLedger {
        let mut adt_1 = line(1, "ADT", 70.0, 80.0);
        adt_1.taxes = vec![tax("YQ", 6.0), tax("RU", 4.0)];
        adt_1.vat = Some(VatInfo {
            rate: Some(20.0),
            amount: Some(MonetaryValue::new(2.0, "USD")),
        });
        let mut adt_2 = line(1, "ADT", 30.0, 40.0);
        adt_2.segment_id = 2;
        adt_2.taxes = vec![tax("YQ", 6.0), tax("ZZ", 4.0)];

        let mut chd_1 = line(2, "CHD", 35.0, 40.0);
        chd_1.taxes = vec![tax("YQ", 5.0)];
        let mut chd_2 = line(2, "CHD", 15.0, 20.0);
        chd_2.segment_id = 2;
        chd_2.taxes = vec![tax("YQ", 5.0)];

        PriceLedger::new(vec![adt_1, chd_1, adt_2, chd_2], variant_total(175.0))
    }

    #[test_case("ADT", 120.0, 100.0, 20.0; "#1 adult")]
    #[test_case("CHD", 60.0, 50.0, 10.0; "#2 child")]
    #[test_case("INF", 0.0, 0.0, 0.0; "#3 absent type")]
    fn test_pax_costs(pax_type: &str, total: f64, fare: f64, taxes: f64) {
        let ledger = family_ledger();
        let engine = ledger.engine();
        assert_eq!(engine.total_pax_cost(pax_type), total);
        assert_eq!(engine.fare_pax_cost(pax_type), fare);
        assert_eq!(engine.taxes_pax_cost(pax_type), taxes);
    }

    #[test]
    fn test_zero_on_absence() {
        let ledger = family_ledger();
        let engine = ledger.engine();
        assert_eq!(engine.total_pax_cost("INF"), 0.0);
        assert_eq!(engine.fare_pax_cost("INF"), 0.0);
        assert_eq!(engine.taxes_pax_cost("INF"), 0.0);
        assert!(engine.raw_tax_pax("INF").is_empty());
        assert!(engine.raw_vat_pax("INF").is_empty());
    }

    #[test]
    fn test_empty_ledger() {
        let ledger = PriceLedger::default();
        let engine = ledger.engine();
        assert_eq!(engine.total_pax_cost("ADT"), 0.0);
        assert_eq!(engine.taxes_variant_cost(), 0.0);
        assert_eq!(engine.fare_variant_cost(), 0.0);
        assert!(engine.summaries().is_empty());
    }

    #[test]
    fn test_passenger_isolation() {
        let ledger = PriceLedger::new(
            vec![line(1, "ADT", 90.0, 100.0), line(2, "CHD", 45.0, 50.0)],
            variant_total(150.0),
        );
        let engine = ledger.engine();
        assert_eq!(engine.total_pax_cost("ADT"), 100.0);
        assert_eq!(engine.total_pax_cost("CHD"), 50.0);
    }

    #[test]
    fn test_first_match_scoping() {
        let ledger = PriceLedger::new(
            vec![line(10, "ADT", 90.0, 100.0), line(20, "ADT", 140.0, 150.0)],
            variant_total(250.0),
        );
        assert_eq!(ledger.engine().total_pax_cost("ADT"), 100.0);
        assert_eq!(ledger.engine().fare_pax_cost("ADT"), 90.0);
    }

    #[test]
    fn test_all_of_type_resolver_sums_every_passenger() {
        let ledger = PriceLedger::new(
            vec![line(10, "ADT", 90.0, 100.0), line(20, "ADT", 140.0, 150.0)],
            variant_total(250.0),
        );
        let engine = ledger.engine_with(AllOfTypeResolver);
        assert_eq!(engine.total_pax_cost("ADT"), 250.0);
        assert_eq!(engine.fare_pax_cost("ADT"), 230.0);
    }

    #[test]
    fn test_all_of_type_resolver_taxes_and_vat() {
        let adult_vat = VatInfo {
            rate: Some(20.0),
            amount: Some(MonetaryValue::new(2.0, "USD")),
        };
        let second_vat = VatInfo {
            rate: Some(20.0),
            amount: Some(MonetaryValue::new(1.0, "USD")),
        };

        let mut first = line(10, "ADT", 90.0, 100.0);
        first.taxes = vec![tax("YQ", 6.0), tax("RU", 4.0)];
        first.vat = Some(adult_vat.clone());
        let mut second = line(20, "ADT", 140.0, 150.0);
        second.taxes = vec![tax("YQ", 6.0), tax("ZZ", 3.0)];
        let mut second_return = line(20, "ADT", 40.0, 45.0);
        second_return.segment_id = 2;
        second_return.taxes = vec![tax("RU", 2.0)];
        second_return.vat = Some(second_vat.clone());
        let ledger = PriceLedger::new(vec![first, second, second_return], variant_total(295.0));

        let all = ledger.engine_with(AllOfTypeResolver);
        assert_eq!(all.taxes_pax_cost("ADT"), 21.0);
        assert_eq!(
            all.raw_tax_pax("ADT"),
            vec![tax("YQ", 6.0), tax("RU", 4.0), tax("ZZ", 3.0), tax("RU", 2.0)]
        );
        assert_eq!(
            all.raw_vat_pax("ADT"),
            vec![Some(&adult_vat), None, Some(&second_vat)]
        );

        // First match only sees passenger 10
        let first_match = ledger.engine();
        assert_eq!(first_match.taxes_pax_cost("ADT"), 10.0);
        assert_eq!(first_match.raw_tax_pax("ADT"), vec![tax("YQ", 6.0), tax("RU", 4.0)]);
        assert_eq!(first_match.raw_vat_pax("ADT"), vec![Some(&adult_vat)]);
    }

    #[test]
    fn test_segments_compose_additively() {
        let mut second = line(7, "ADT", 30.0, 40.0);
        second.segment_id = 2;
        let ledger = PriceLedger::new(vec![line(7, "ADT", 70.0, 80.0), second], variant_total(120.0));
        assert_eq!(ledger.engine().total_pax_cost("ADT"), 120.0);
    }

    #[test]
    fn test_raw_tax_pax_deduplicates_by_value() {
        let mut first = line(1, "ADT", 0.0, 0.0);
        first.taxes = vec![tax("YQ", 10.0), tax("YR", 10.0)];
        let mut second = line(1, "ADT", 0.0, 0.0);
        second.segment_id = 2;
        second.taxes = vec![tax("ZZ", 5.0)];
        let ledger = PriceLedger::new(vec![first, second], variant_total(0.0));

        let raw = ledger.engine().raw_tax_pax("ADT");
        assert_eq!(raw, vec![tax("YQ", 10.0), tax("ZZ", 5.0)]);
        // Sums do not deduplicate
        assert_eq!(ledger.engine().taxes_pax_cost("ADT"), 25.0);
    }

    #[test]
    fn test_raw_tax_pax_across_segments() {
        let ledger = family_ledger();
        let raw = ledger.engine().raw_tax_pax("ADT");
        assert_eq!(raw, vec![tax("YQ", 6.0), tax("RU", 4.0)]);
    }

    #[test]
    fn test_raw_vat_pax_keeps_absent_entries() {
        let ledger = family_ledger();
        let vats = ledger.engine().raw_vat_pax("ADT");
        assert_eq!(vats.len(), 2);
        assert_eq!(vats[0].and_then(|vat| vat.rate), Some(20.0));
        assert!(vats[1].is_none());

        assert_eq!(ledger.engine().raw_vat_pax("CHD"), vec![None, None]);
    }

    #[test]
    fn test_variant_costs_ignore_passenger_filtering() {
        let ledger = PriceLedger::new(
            vec![line(1, "ADT", 100.0, 110.0), line(2, "CHD", 50.0, 55.0)],
            variant_total(165.0),
        );
        let engine = ledger.engine();
        assert_eq!(engine.fare_variant_cost(), 150.0);
        assert_eq!(engine.fare_pax_cost("ADT"), 100.0);

        let family = family_ledger();
        assert_eq!(family.engine().taxes_variant_cost(), 30.0);
        assert_eq!(family.engine().fare_variant_cost(), 150.0);
    }

    #[test]
    fn test_total_variant_cost_is_pass_through() {
        let ledger = family_ledger();
        let line_sum: f64 = ledger.lines().iter().map(|line| line.total).sum();
        assert_eq!(line_sum, 180.0);
        assert_eq!(ledger.engine().total_variant_cost(), &variant_total(175.0));
    }

    #[test]
    fn test_queries_are_idempotent() {
        let ledger = family_ledger();
        let engine = ledger.engine();
        let first = (
            engine.total_pax_cost("ADT").to_bits(),
            engine.taxes_pax_cost("ADT").to_bits(),
            engine.raw_tax_pax("ADT"),
        );
        for _ in 0..3 {
            let again = (
                engine.total_pax_cost("ADT").to_bits(),
                engine.taxes_pax_cost("ADT").to_bits(),
                engine.raw_tax_pax("ADT"),
            );
            assert_eq!(again, first);
        }
        assert_eq!(ledger, family_ledger());
    }

    #[test]
    fn test_mixed_currency_sums_are_numeric() {
        let mut eur = line(2, "CHD", 50.0, 60.0);
        eur.currency = "EUR".to_string();
        let ledger = PriceLedger::new(vec![line(1, "ADT", 100.0, 110.0), eur], variant_total(170.0));
        assert_eq!(ledger.engine().fare_variant_cost(), 150.0);
        assert!(ledger.ensure_single_currency().is_err());
    }

    #[test]
    fn test_summaries_per_pax_type() {
        let ledger = family_ledger();
        let summaries = ledger.engine().summaries();
        assert_eq!(
            summaries,
            vec![
                PassengerCostSummary {
                    pax_type: "ADT".to_string(),
                    fare: 100.0,
                    taxes: 20.0,
                    total: 120.0,
                },
                PassengerCostSummary {
                    pax_type: "CHD".to_string(),
                    fare: 50.0,
                    taxes: 10.0,
                    total: 60.0,
                },
            ]
        );
    }

    #[test]
    fn test_concurrent_readers() {
        let ledger = family_ledger();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| ledger.engine().total_pax_cost("ADT")))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), 120.0);
            }
        });
    }
}
