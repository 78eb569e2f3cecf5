//! Report metrics aggregated from a unit's measurements.
//!
//! Output is independent of input order: records are put into a canonical
//! order before any floating point summation, so the same set of readings
//! always produces bit-identical metrics.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::Measurement;

// ---

/// Per-day aggregate. `volume` and `uvc_hours` are sums for the day,
/// temperature is averaged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyData {
    // ---
    pub date: NaiveDate,
    pub volume: f64,
    pub avg_temperature: f64,
    pub uvc_hours: f64,
}

/// Period-level metrics for a report or dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetrics {
    // ---
    pub total_volume: f64,
    pub avg_volume: f64,
    pub max_volume: f64,
    pub avg_temperature: f64,
    pub total_uvc_hours: f64,
    pub daily_data: Vec<DailyData>,
}

#[derive(Default)]
struct DayAccumulator {
    volume: f64,
    temperature: f64,
    uvc_hours: f64,
    count: u32,
}

fn canonical_order(a: &Measurement, b: &Measurement) -> Ordering {
    // ---
    a.timestamp
        .cmp(&b.timestamp)
        .then_with(|| {
            a.timestamp
                .offset()
                .local_minus_utc()
                .cmp(&b.timestamp.offset().local_minus_utc())
        })
        .then_with(|| a.volume.total_cmp(&b.volume))
        .then_with(|| a.temperature.total_cmp(&b.temperature))
        .then_with(|| a.uvc_hours.total_cmp(&b.uvc_hours))
}

/// Reduce measurements into period totals, averages and a day-sorted series.
///
/// Days are the calendar dates of each timestamp in its own offset. An empty
/// input yields all zeros and an empty `daily_data`.
pub fn aggregate_measurements(measurements: &[Measurement]) -> ReportMetrics {
    // ---
    let mut ordered: Vec<&Measurement> = measurements.iter().collect();
    ordered.sort_by(|a, b| canonical_order(a, b));

    let mut days: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();
    let mut total_volume = 0.0;
    let mut total_temperature = 0.0;
    let mut total_uvc_hours = 0.0;
    let mut max_volume: Option<f64> = None;

    for m in &ordered {
        let day = days.entry(m.timestamp.date_naive()).or_default();
        day.volume += m.volume;
        day.temperature += m.temperature;
        day.uvc_hours += m.uvc_hours;
        day.count += 1;

        total_volume += m.volume;
        total_temperature += m.temperature;
        total_uvc_hours += m.uvc_hours;
        max_volume = Some(max_volume.map_or(m.volume, |max: f64| max.max(m.volume)));
    }

    // Empty periods divide by one so averages come out as zero
    let divisor = ordered.len().max(1) as f64;

    let daily_data = days
        .into_iter()
        .map(|(date, day)| DailyData {
            date,
            volume: day.volume,
            avg_temperature: day.temperature / f64::from(day.count.max(1)),
            uvc_hours: day.uvc_hours,
        })
        .collect();

    ReportMetrics {
        total_volume,
        avg_volume: total_volume / divisor,
        max_volume: max_volume.unwrap_or(0.0),
        avg_temperature: total_temperature / divisor,
        total_uvc_hours,
        daily_data,
    }
}

/// Select the measurements of a report period: `start` inclusive, `end`
/// exclusive. A missing bound leaves that side open.
pub fn filter_range(
    measurements: &[Measurement],
    start: Option<DateTime<FixedOffset>>,
    end: Option<DateTime<FixedOffset>>,
) -> Vec<Measurement> {
    // ---
    measurements
        .iter()
        .filter(|m| start.map_or(true, |s| m.timestamp >= s))
        .filter(|m| end.map_or(true, |e| m.timestamp < e))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use proptest::prelude::*;

    fn create_test_measurement(ts: &str, volume: f64, temperature: f64, uvc: f64) -> Measurement {
        // ---
        Measurement {
            timestamp: DateTime::parse_from_rfc3339(ts).unwrap(),
            volume,
            temperature,
            uvc_hours: uvc,
        }
    }

    fn sample() -> Vec<Measurement> {
        // ---
        vec![
            create_test_measurement("2025-03-02T09:00:00Z", 30.0, 18.0, 2.0),
            create_test_measurement("2025-03-01T08:00:00Z", 10.0, 20.0, 1.0),
            create_test_measurement("2025-03-01T20:00:00Z", 20.0, 22.0, 1.0),
        ]
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_input() {
        // ---
        let metrics = aggregate_measurements(&[]);

        assert_eq!(metrics, ReportMetrics::default());
        assert_eq!(metrics.avg_volume, 0.0);
        assert!(metrics.daily_data.is_empty());
    }

    #[test]
    fn test_period_totals() {
        // ---
        let metrics = aggregate_measurements(&sample());

        assert_eq!(metrics.total_volume, 60.0);
        assert_eq!(metrics.avg_volume, 20.0);
        assert_eq!(metrics.max_volume, 30.0);
        assert_eq!(metrics.avg_temperature, 20.0);
        assert_eq!(metrics.total_uvc_hours, 4.0);
    }

    #[test]
    fn test_daily_volume_is_summed_and_temperature_averaged() {
        // ---
        let metrics = aggregate_measurements(&sample());

        assert_eq!(
            metrics.daily_data,
            vec![
                DailyData {
                    date: date(2025, 3, 1),
                    volume: 30.0,
                    avg_temperature: 21.0,
                    uvc_hours: 2.0,
                },
                DailyData {
                    date: date(2025, 3, 2),
                    volume: 30.0,
                    avg_temperature: 18.0,
                    uvc_hours: 2.0,
                },
            ]
        );
    }

    #[test]
    fn test_days_use_timestamp_offset() {
        // ---
        // 23:30 at -05:00 is already the next day in UTC; it must stay on the 1st
        let metrics = aggregate_measurements(&[create_test_measurement(
            "2025-03-01T23:30:00-05:00",
            5.0,
            20.0,
            0.5,
        )]);

        assert_eq!(metrics.daily_data.len(), 1);
        assert_eq!(metrics.daily_data[0].date, date(2025, 3, 1));
    }

    #[test]
    fn test_max_volume_with_negative_readings() {
        // ---
        let metrics = aggregate_measurements(&[
            create_test_measurement("2025-03-01T08:00:00Z", -4.0, 20.0, 0.0),
            create_test_measurement("2025-03-01T09:00:00Z", -2.0, 20.0, 0.0),
        ]);

        assert_eq!(metrics.max_volume, -2.0);
    }

    #[test]
    fn test_json_field_names() {
        // ---
        let json = serde_json::to_value(aggregate_measurements(&sample())).unwrap();

        assert_eq!(json["totalVolume"], 60.0);
        assert_eq!(json["totalUvcHours"], 4.0);
        assert_eq!(json["dailyData"][0]["date"], "2025-03-01");
        assert_eq!(json["dailyData"][0]["avgTemperature"], 21.0);
    }

    #[test]
    fn test_filter_range_bounds() {
        // ---
        let data = sample();
        let start = DateTime::parse_from_rfc3339("2025-03-01T20:00:00Z").unwrap();
        let end = DateTime::parse_from_rfc3339("2025-03-02T09:00:00Z").unwrap();

        let selected = filter_range(&data, Some(start), Some(end));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].volume, 20.0);

        assert_eq!(filter_range(&data, None, None).len(), 3);
        assert_eq!(filter_range(&data, Some(start), None).len(), 2);
    }

    fn arb_measurement() -> impl Strategy<Value = Measurement> {
        // ---
        (0i64..5_000_000, 0.0f64..1000.0, -5.0f64..40.0, 0.0f64..24.0).prop_map(
            |(secs, volume, temperature, uvc_hours)| Measurement {
                timestamp: DateTime::from_timestamp(1_735_689_600 + secs, 0)
                    .unwrap()
                    .fixed_offset(),
                volume,
                temperature,
                uvc_hours,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_order_independent(
            (data, shuffled) in prop::collection::vec(arb_measurement(), 0..40)
                .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
        ) {
            prop_assert_eq!(aggregate_measurements(&data), aggregate_measurements(&shuffled));
        }

        #[test]
        fn prop_idempotent_and_sorted(data in prop::collection::vec(arb_measurement(), 0..40)) {
            let first = aggregate_measurements(&data);
            let second = aggregate_measurements(&data);
            prop_assert_eq!(&first, &second);
            prop_assert!(first.daily_data.windows(2).all(|w| w[0].date < w[1].date));
        }
    }
}
