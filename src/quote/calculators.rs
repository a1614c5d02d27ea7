//! Core quote calculation functions.
//!
//! Pure functions for pricing math - no I/O, no logging, no hidden state.
//! Same input always produces the same `Quote`; the function is total and
//! cannot fail, so malformed form input degrades to an all-defaults quote
//! (which lands on the minimum price).

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

use crate::quote::responses::{Breakdown, Quote, MIN_PRICE_APPLIED};

/// Travel cost per driven kilometer (billed round trip).
pub const EUR_PER_KM: Decimal = dec!(1.00);
/// Flat setup fee, always charged.
pub const SETUP_FEE: Decimal = dec!(40);
/// Minimum total ever charged; overrides a lower subtotal.
pub const MIN_PRICE: Decimal = dec!(125);
/// Ladder fee for work above 6 m without scaffold.
pub const LADDER_FEE: Decimal = dec!(40);
/// Scaffold ("Steiger") fee for guard work above 5 m.
pub const SCAFFOLD_FEE: Decimal = dec!(340);

/// Which rate table applies to the job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    FirstClean,
    RepeatClean,
}

impl ServiceType {
    /// Normalize the form value. Anything other than the exact repeat-clean
    /// label falls back to first clean; there is no invalid-input path.
    pub fn from_wire(raw: &str) -> Self {
        if raw == "Folgereinigung" {
            ServiceType::RepeatClean
        } else {
            ServiceType::FirstClean
        }
    }

    pub fn wire_name(&self) -> &'static str {
        match self {
            ServiceType::FirstClean => "Erstreinigung",
            ServiceType::RepeatClean => "Folgereinigung",
        }
    }

    fn bands(&self) -> &'static [RateBand; 5] {
        match self {
            ServiceType::FirstClean => &FIRST_CLEAN_BANDS,
            ServiceType::RepeatClean => &REPEAT_CLEAN_BANDS,
        }
    }
}

/// A height interval mapping to a fixed per-meter unit price.
///
/// Bounds are inclusive on both ends, exactly as the legacy table had them.
/// The gaps between bands (e.g. 3.99 < h < 4) are intentional and resolved
/// by the fallback rule in [`band_price`].
#[derive(Debug, Clone, Copy)]
pub struct RateBand {
    pub min: Decimal,
    pub max: Decimal,
    pub price: Decimal,
}

const FIRST_CLEAN_BANDS: [RateBand; 5] = [
    RateBand { min: dec!(2), max: dec!(3.99), price: dec!(5) },
    RateBand { min: dec!(4), max: dec!(5.99), price: dec!(7) },
    RateBand { min: dec!(6), max: dec!(7.99), price: dec!(9) },
    RateBand { min: dec!(8), max: dec!(9.99), price: dec!(12) },
    RateBand { min: dec!(10), max: dec!(999), price: dec!(15) },
];

const REPEAT_CLEAN_BANDS: [RateBand; 5] = [
    RateBand { min: dec!(2), max: dec!(3.99), price: dec!(4) },
    RateBand { min: dec!(4), max: dec!(5.99), price: dec!(5) },
    RateBand { min: dec!(6), max: dec!(7.99), price: dec!(7) },
    RateBand { min: dec!(8), max: dec!(9.99), price: dec!(10) },
    RateBand { min: dec!(10), max: dec!(999), price: dec!(15) },
];

/// Normalized calculation input. Produced by
/// [`QuoteRequest::normalize`](crate::quote::requests::QuoteRequest::normalize);
/// all fields are non-negative and guard footages are already zeroed when no
/// guard work is requested, so the arithmetic below carries no conditionals
/// for missing data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteInput {
    pub service: ServiceType,
    pub linear_meters: Decimal,
    pub height_meters: Decimal,
    pub distance_km: Decimal,
    pub guard_requested: bool,
    pub guard_clean_meters: Decimal,
    pub guard_mount_meters: Decimal,
    pub guard_demount_meters: Decimal,
}

impl Default for QuoteInput {
    fn default() -> Self {
        Self {
            service: ServiceType::FirstClean,
            linear_meters: Decimal::ZERO,
            height_meters: Decimal::ZERO,
            distance_km: Decimal::ZERO,
            guard_requested: false,
            guard_clean_meters: Decimal::ZERO,
            guard_mount_meters: Decimal::ZERO,
            guard_demount_meters: Decimal::ZERO,
        }
    }
}

/// Round to specified decimal places, half-up (midpoint away from zero).
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use rinnenklar_web::quote::round_money;
///
/// assert_eq!(round_money(dec!(1.005), 2), dec!(1.01)); // half-up to the cent
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Look up the per-meter unit price for a given eave height.
///
/// Finds the first band whose inclusive range contains the height. If none
/// matches (height below 2, beyond 999, or inside a bound gap), the LAST
/// band's price applies. Fallback-to-last-band is legacy behavior that must
/// be preserved exactly; it is not fallback-to-first-band.
pub fn band_price(service: ServiceType, height_meters: Decimal) -> Decimal {
    let bands = service.bands();
    bands
        .iter()
        .find(|band| height_meters >= band.min && height_meters <= band.max)
        .unwrap_or(&bands[bands.len() - 1])
        .price
}

/// Calculate a full itemized quote from a normalized request.
///
/// Guard line items are priced at the same per-meter rate as the base
/// cleaning band; that coupling is intentional. Scaffold takes precedence
/// over ladder, and at most one of the two fees is ever charged.
pub fn calculate_quote(input: &QuoteInput) -> Quote {
    let rate = band_price(input.service, input.height_meters);

    let base = input.linear_meters * rate;
    let travel = input.distance_km * dec!(2) * EUR_PER_KM;
    let setup = SETUP_FEE;

    let guard_clean = input.guard_clean_meters * rate;
    let guard_mount = input.guard_mount_meters * rate;
    let guard_demount = input.guard_demount_meters * rate;

    let guard_footage =
        input.guard_clean_meters + input.guard_mount_meters + input.guard_demount_meters;
    let needs_scaffold = input.guard_requested
        && input.height_meters > dec!(5)
        && guard_footage > Decimal::ZERO;

    let steiger = if needs_scaffold { SCAFFOLD_FEE } else { Decimal::ZERO };
    let ladder = if !needs_scaffold && input.height_meters > dec!(6) {
        LADDER_FEE
    } else {
        Decimal::ZERO
    };

    let subtotal =
        base + travel + setup + guard_clean + guard_mount + guard_demount + steiger + ladder;
    let minimum_applied = subtotal < MIN_PRICE;
    let total = if minimum_applied { MIN_PRICE } else { subtotal };

    let warnings = if minimum_applied {
        vec![MIN_PRICE_APPLIED.to_string()]
    } else {
        Vec::new()
    };

    Quote {
        total: round_money(total, 2),
        breakdown: Breakdown {
            rate,
            distance_km: round_money(input.distance_km, 2),
            base: round_money(base, 2),
            travel: round_money(travel, 2),
            setup: round_money(setup, 2),
            guard_clean: round_money(guard_clean, 2),
            guard_mount: round_money(guard_mount, 2),
            guard_demount: round_money(guard_demount, 2),
            steiger: round_money(steiger, 2),
            ladder: round_money(ladder, 2),
            subtotal: round_money(subtotal, 2),
            minimum_applied,
        },
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(service: ServiceType, lfm: Decimal, height: Decimal, km: Decimal) -> QuoteInput {
        QuoteInput {
            service,
            linear_meters: lfm,
            height_meters: height,
            distance_km: km,
            ..QuoteInput::default()
        }
    }

    fn guard_input(
        height: Decimal,
        clean: Decimal,
        mount: Decimal,
        demount: Decimal,
    ) -> QuoteInput {
        QuoteInput {
            service: ServiceType::FirstClean,
            height_meters: height,
            guard_requested: true,
            guard_clean_meters: clean,
            guard_mount_meters: mount,
            guard_demount_meters: demount,
            ..QuoteInput::default()
        }
    }

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_half_up() {
        assert_eq!(round_money(dec!(1.005), 2), dec!(1.01));
        assert_eq!(round_money(dec!(1.015), 2), dec!(1.02));
        assert_eq!(round_money(dec!(2.675), 2), dec!(2.68));
        assert_eq!(round_money(dec!(1.004), 2), dec!(1.00));
    }

    #[test]
    fn test_round_money_non_midpoint() {
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
        assert_eq!(round_money(dec!(0), 2), dec!(0));
    }

    // ==================== band_price tests ====================

    #[test]
    fn test_band_price_first_clean_bands() {
        assert_eq!(band_price(ServiceType::FirstClean, dec!(2)), dec!(5));
        assert_eq!(band_price(ServiceType::FirstClean, dec!(3.99)), dec!(5));
        assert_eq!(band_price(ServiceType::FirstClean, dec!(4)), dec!(7));
        assert_eq!(band_price(ServiceType::FirstClean, dec!(6)), dec!(9));
        assert_eq!(band_price(ServiceType::FirstClean, dec!(8)), dec!(12));
        assert_eq!(band_price(ServiceType::FirstClean, dec!(10)), dec!(15));
        assert_eq!(band_price(ServiceType::FirstClean, dec!(999)), dec!(15));
    }

    #[test]
    fn test_band_price_repeat_clean_bands() {
        assert_eq!(band_price(ServiceType::RepeatClean, dec!(3)), dec!(4));
        assert_eq!(band_price(ServiceType::RepeatClean, dec!(5)), dec!(5));
        assert_eq!(band_price(ServiceType::RepeatClean, dec!(7)), dec!(7));
        assert_eq!(band_price(ServiceType::RepeatClean, dec!(9.99)), dec!(10));
        assert_eq!(band_price(ServiceType::RepeatClean, dec!(11)), dec!(15));
    }

    #[test]
    fn test_band_price_fallback_is_last_band() {
        // Below the lowest band, beyond the highest, or inside a bound gap:
        // the LAST band's price applies, never the first band's.
        assert_eq!(band_price(ServiceType::FirstClean, dec!(0)), dec!(15));
        assert_eq!(band_price(ServiceType::FirstClean, dec!(1.99)), dec!(15));
        assert_eq!(band_price(ServiceType::FirstClean, dec!(3.995)), dec!(15));
        assert_eq!(band_price(ServiceType::FirstClean, dec!(1000)), dec!(15));
        assert_eq!(band_price(ServiceType::RepeatClean, dec!(0)), dec!(15));
    }

    #[test]
    fn test_band_price_monotone_within_table() {
        for service in [ServiceType::FirstClean, ServiceType::RepeatClean] {
            let heights = [dec!(3), dec!(5), dec!(7), dec!(9), dec!(11)];
            let rates: Vec<Decimal> = heights
                .iter()
                .map(|h| band_price(service, *h))
                .collect();
            for pair in rates.windows(2) {
                assert!(pair[0] < pair[1], "rates not increasing: {:?}", rates);
            }
        }
    }

    // ==================== calculate_quote tests ====================

    #[test]
    fn test_quote_below_floor_applies_minimum() {
        // 10 lfm at height 5 (rate 7) plus 5 km: 70 + 10 + 40 = 120 < 125
        let quote = calculate_quote(&input(
            ServiceType::FirstClean,
            dec!(10),
            dec!(5),
            dec!(5),
        ));
        assert_eq!(quote.total, dec!(125.00));
        assert_eq!(quote.breakdown.subtotal, dec!(120.00));
        assert!(quote.breakdown.minimum_applied);
        assert_eq!(quote.warnings, vec![MIN_PRICE_APPLIED.to_string()]);
    }

    #[test]
    fn test_quote_guard_work_at_height_charges_scaffold() {
        let mut q = guard_input(dec!(8), dec!(5), dec!(5), dec!(0));
        q.linear_meters = dec!(20);
        q.distance_km = dec!(10);
        let quote = calculate_quote(&q);

        assert_eq!(quote.breakdown.rate, dec!(12));
        assert_eq!(quote.breakdown.base, dec!(240.00));
        assert_eq!(quote.breakdown.travel, dec!(20.00));
        assert_eq!(quote.breakdown.guard_clean, dec!(60.00));
        assert_eq!(quote.breakdown.guard_mount, dec!(60.00));
        assert_eq!(quote.breakdown.guard_demount, dec!(0));
        assert_eq!(quote.breakdown.steiger, dec!(340.00));
        assert_eq!(quote.breakdown.ladder, dec!(0));
        assert_eq!(quote.total, dec!(760.00));
        assert!(quote.warnings.is_empty());
    }

    #[test]
    fn test_quote_tall_job_without_guard_charges_ladder() {
        let quote = calculate_quote(&input(
            ServiceType::RepeatClean,
            dec!(15),
            dec!(7),
            dec!(0),
        ));
        assert_eq!(quote.breakdown.rate, dec!(7));
        assert_eq!(quote.breakdown.ladder, dec!(40.00));
        assert_eq!(quote.breakdown.steiger, dec!(0));
        assert_eq!(quote.total, dec!(185.00));
    }

    #[test]
    fn test_quote_all_defaults_is_setup_plus_floor() {
        let quote = calculate_quote(&QuoteInput::default());
        // Height 0 matches no band; the fallback rate applies but the base
        // is zero anyway. Only the setup fee remains, then the floor.
        assert_eq!(quote.breakdown.rate, dec!(15));
        assert_eq!(quote.breakdown.subtotal, dec!(40.00));
        assert_eq!(quote.total, dec!(125.00));
        assert!(quote.breakdown.minimum_applied);
    }

    #[test]
    fn test_scaffold_needs_positive_guard_footage() {
        // Guard requested at height, but no guard meters: ladder, not scaffold.
        let quote = calculate_quote(&guard_input(dec!(8), dec!(0), dec!(0), dec!(0)));
        assert_eq!(quote.breakdown.steiger, dec!(0));
        assert_eq!(quote.breakdown.ladder, dec!(40.00));
    }

    #[test]
    fn test_scaffold_needs_height_above_five() {
        // Guard work at exactly 5 m: neither scaffold (h > 5 fails) nor
        // ladder (h > 6 fails).
        let quote = calculate_quote(&guard_input(dec!(5), dec!(10), dec!(0), dec!(0)));
        assert_eq!(quote.breakdown.steiger, dec!(0));
        assert_eq!(quote.breakdown.ladder, dec!(0));

        let quote = calculate_quote(&guard_input(dec!(5.5), dec!(10), dec!(0), dec!(0)));
        assert_eq!(quote.breakdown.steiger, dec!(340.00));
        assert_eq!(quote.breakdown.ladder, dec!(0));
    }

    #[test]
    fn test_equipment_fees_are_mutually_exclusive() {
        let heights = [dec!(0), dec!(3), dec!(5), dec!(5.5), dec!(6), dec!(7), dec!(12)];
        let footages = [dec!(0), dec!(4)];
        for guard in [false, true] {
            for height in heights {
                for footage in footages {
                    let mut q = guard_input(height, footage, dec!(0), dec!(0));
                    q.guard_requested = guard;
                    if !guard {
                        q.guard_clean_meters = Decimal::ZERO;
                    }
                    let quote = calculate_quote(&q);
                    assert!(
                        quote.breakdown.steiger.is_zero() || quote.breakdown.ladder.is_zero(),
                        "both fees charged at height {height}, guard {guard}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_quote_is_referentially_transparent() {
        let q = guard_input(dec!(7.5), dec!(3), dec!(2), dec!(1));
        assert_eq!(calculate_quote(&q), calculate_quote(&q));
    }

    #[test]
    fn test_floor_invariant_across_grid() {
        for lfm in [dec!(0), dec!(5), dec!(12), dec!(40)] {
            for height in [dec!(0), dec!(3), dec!(6.5), dec!(10)] {
                for km in [dec!(0), dec!(8), dec!(25)] {
                    let quote =
                        calculate_quote(&input(ServiceType::RepeatClean, lfm, height, km));
                    if quote.breakdown.minimum_applied {
                        assert_eq!(quote.total, MIN_PRICE);
                        assert!(quote.breakdown.subtotal < MIN_PRICE);
                        assert_eq!(quote.warnings, vec![MIN_PRICE_APPLIED.to_string()]);
                    } else {
                        assert_eq!(quote.total, quote.breakdown.subtotal);
                        assert!(quote.warnings.is_empty());
                    }
                }
            }
        }
    }
}
