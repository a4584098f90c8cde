use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

use crate::entities::course_price::PriceTier;

/// Per-player service prices in whole VND.
pub const RENT_CLUBS_FEE_VND: i64 = 1_200_000;
pub const CADDY_FEE_VND: i64 = 500_000;
pub const CART_FEE_VND: i64 = 700_000;
pub const INSURANCE_FEE_VND: i64 = 100_000;

/// Bookings must be placed at least this far ahead of the tee time.
pub const MIN_LEAD_MINUTES: i64 = 30;
/// Cancellations are rejected closer than this to the tee time.
pub const CANCEL_CUTOFF_HOURS: i64 = 24;

/// Tee times start at 05:30 and run half-hourly until 18:00.
const FIRST_SLOT_MINUTES: u32 = 5 * 60 + 30;
const LAST_SLOT_MINUTES: u32 = 18 * 60;

/// Pick the pricing tier for a tee time. Twilight (from 14:00) wins over
/// the weekend rate.
pub fn tier_for_tee_time(date: NaiveDate, time: NaiveTime) -> PriceTier {
    if time.hour() >= 14 {
        PriceTier::Twilight
    } else if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        PriceTier::Weekend
    } else {
        PriceTier::Weekday
    }
}

/// Parse a free-text discount note like "-30%" or "30%" into a fraction.
/// Empty or unparsable notes mean no discount.
pub fn parse_discount_note(note: &str) -> f64 {
    let cleaned = note.trim().replace('%', "").replace('-', "");
    if cleaned.is_empty() {
        return 0.0;
    }
    cleaned.parse::<f64>().map(|pct| pct / 100.0).unwrap_or(0.0)
}

/// Rack price minus the note's percentage discount, truncated to whole VND.
pub fn discounted_price(rack_price_vnd: i64, discount_note: Option<&str>) -> i64 {
    let discount = discount_note.map(parse_discount_note).unwrap_or(0.0);
    (rack_price_vnd as f64 * (1.0 - discount)) as i64
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceSelection {
    pub caddy: bool,
    pub cart: bool,
    pub rent_clubs: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeBreakdown {
    pub green_fee: i64,
    pub services_fee: i64,
    pub insurance_fee: i64,
    pub total_amount: i64,
}

impl FeeBreakdown {
    /// Green fee plus per-player add-ons. Insurance is always charged.
    pub fn compute(unit_price_vnd: i64, players: i32, services: ServiceSelection) -> Self {
        let players = i64::from(players);
        let green_fee = unit_price_vnd * players;

        let mut services_fee = 0;
        if services.caddy {
            services_fee += CADDY_FEE_VND * players;
        }
        if services.cart {
            services_fee += CART_FEE_VND * players;
        }
        if services.rent_clubs {
            services_fee += RENT_CLUBS_FEE_VND * players;
        }

        let insurance_fee = INSURANCE_FEE_VND * players;

        Self {
            green_fee,
            services_fee,
            insurance_fee,
            total_amount: green_fee + services_fee + insurance_fee,
        }
    }
}

/// A tee time can be booked only if it is at least MIN_LEAD_MINUTES ahead.
pub fn tee_time_bookable(now: NaiveDateTime, play: NaiveDateTime) -> bool {
    play.signed_duration_since(now).num_minutes() >= MIN_LEAD_MINUTES
}

/// A booking can be cancelled only up to CANCEL_CUTOFF_HOURS before play.
pub fn cancellation_allowed(now: NaiveDateTime, play: NaiveDateTime) -> bool {
    play.signed_duration_since(now).num_hours() >= CANCEL_CUTOFF_HOURS
}

/// Half-hourly tee slots from 05:30 through 18:00, formatted "HH:MM".
pub fn tee_time_slots() -> Vec<String> {
    (FIRST_SLOT_MINUTES..=LAST_SLOT_MINUTES)
        .step_by(30)
        .map(|m| format!("{:02}:{:02}", m / 60, m % 60))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn tier_boundary_at_1400() {
        // 2025-06-11 is a Wednesday
        let wed = date(2025, 6, 11);
        assert_eq!(tier_for_tee_time(wed, time(13, 59)), PriceTier::Weekday);
        assert_eq!(tier_for_tee_time(wed, time(14, 0)), PriceTier::Twilight);
    }

    #[test]
    fn tier_friday_vs_saturday() {
        let fri = date(2025, 6, 13);
        let sat = date(2025, 6, 14);
        let sun = date(2025, 6, 15);
        assert_eq!(tier_for_tee_time(fri, time(9, 0)), PriceTier::Weekday);
        assert_eq!(tier_for_tee_time(sat, time(9, 0)), PriceTier::Weekend);
        assert_eq!(tier_for_tee_time(sun, time(9, 0)), PriceTier::Weekend);
    }

    #[test]
    fn twilight_wins_over_weekend() {
        let sat = date(2025, 6, 14);
        assert_eq!(tier_for_tee_time(sat, time(15, 30)), PriceTier::Twilight);
    }

    #[test]
    fn discount_note_parsing() {
        assert_eq!(parse_discount_note("-30%"), 0.30);
        assert_eq!(parse_discount_note("30%"), 0.30);
        assert_eq!(parse_discount_note(" -15% "), 0.15);
        assert_eq!(parse_discount_note(""), 0.0);
        assert_eq!(parse_discount_note("n/a"), 0.0);
    }

    #[test]
    fn discounted_price_truncates_to_whole_vnd() {
        assert_eq!(discounted_price(2_000_000, Some("-30%")), 1_400_000);
        assert_eq!(discounted_price(2_000_000, None), 2_000_000);
        assert_eq!(discounted_price(1_000_001, Some("-50%")), 500_000);
    }

    #[test]
    fn fee_breakdown_without_services() {
        let fees = FeeBreakdown::compute(1_400_000, 2, ServiceSelection::default());
        assert_eq!(fees.green_fee, 2_800_000);
        assert_eq!(fees.services_fee, 0);
        assert_eq!(fees.insurance_fee, 200_000);
        assert_eq!(fees.total_amount, 3_000_000);
    }

    #[test]
    fn fee_breakdown_with_all_services() {
        let all = ServiceSelection {
            caddy: true,
            cart: true,
            rent_clubs: true,
        };
        let fees = FeeBreakdown::compute(1_000_000, 3, all);
        assert_eq!(fees.green_fee, 3_000_000);
        // (500k + 700k + 1200k) * 3
        assert_eq!(fees.services_fee, 7_200_000);
        assert_eq!(fees.insurance_fee, 300_000);
        assert_eq!(fees.total_amount, 10_500_000);
    }

    #[test]
    fn fee_breakdown_handles_large_flights() {
        // Group bookings beyond a standard four-ball are accepted
        let caddy_only = ServiceSelection {
            caddy: true,
            ..Default::default()
        };
        let fees = FeeBreakdown::compute(1_500_000, 8, caddy_only);
        assert_eq!(fees.green_fee, 12_000_000);
        assert_eq!(fees.services_fee, 4_000_000);
        assert_eq!(fees.insurance_fee, 800_000);
        assert_eq!(fees.total_amount, 16_800_000);
    }

    #[test]
    fn booking_lead_time_window() {
        let now = date(2025, 6, 11).and_time(time(10, 0));
        assert!(!tee_time_bookable(now, date(2025, 6, 10).and_time(time(10, 0))));
        assert!(!tee_time_bookable(now, date(2025, 6, 11).and_time(time(10, 29))));
        assert!(tee_time_bookable(now, date(2025, 6, 11).and_time(time(10, 30))));
    }

    #[test]
    fn cancellation_cutoff_window() {
        let now = date(2025, 6, 11).and_time(time(10, 0));
        assert!(!cancellation_allowed(now, date(2025, 6, 12).and_time(time(9, 59))));
        assert!(cancellation_allowed(now, date(2025, 6, 12).and_time(time(10, 0))));
    }

    #[test]
    fn slots_run_half_hourly() {
        let slots = tee_time_slots();
        assert_eq!(slots.first().map(String::as_str), Some("05:30"));
        assert_eq!(slots.last().map(String::as_str), Some("18:00"));
        assert_eq!(slots.len(), 26);
    }
}
