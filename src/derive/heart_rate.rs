//! Heart-rate zones by the Karvonen (heart-rate reserve) method.

use serde::{Deserialize, Serialize};

/// Upper bound of zones 1..4 as a fraction of heart-rate reserve.
const ZONE_UPPER_FRACTIONS: [f64; 4] = [0.60, 0.70, 0.80, 0.90];

const ZONE_NAMES: [&str; 5] = ["Recovery", "Aerobic Base", "Tempo", "Threshold", "Maximum"];

/// One training zone in beats per minute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateZone {
    pub zone: u8,
    pub name: String,
    pub min: f64,
    pub max: f64,
}

impl HeartRateZone {
    pub fn contains(&self, bpm: f64) -> bool {
        bpm >= self.min && bpm < self.max
    }
}

/// Age-predicted maximum heart rate (`220 - age`).
pub fn max_hr_for_age(age: u32) -> u32 {
    220u32.saturating_sub(age)
}

/// Five contiguous zones between `resting_hr` and `max_hr`.
///
/// Zone 1 starts at `resting_hr`, zone 5 ends exactly at `max_hr`, and each
/// zone's `max` equals the next zone's `min`. Inner bounds sit at 60/70/80/90%
/// of the reserve above resting. Returns `None` unless `resting_hr < max_hr`.
pub fn karvonen_zones(resting_hr: u32, max_hr: u32) -> Option<Vec<HeartRateZone>> {
    if resting_hr >= max_hr {
        return None;
    }
    let resting = f64::from(resting_hr);
    let reserve = f64::from(max_hr - resting_hr);

    let mut bounds = Vec::with_capacity(6);
    bounds.push(resting);
    bounds.extend(ZONE_UPPER_FRACTIONS.iter().map(|f| resting + reserve * f));
    bounds.push(f64::from(max_hr));

    let zones = bounds
        .windows(2)
        .zip(ZONE_NAMES)
        .enumerate()
        .map(|(i, (pair, name))| HeartRateZone {
            zone: (i + 1) as u8,
            name: name.to_string(),
            min: pair[0],
            max: pair[1],
        })
        .collect();
    Some(zones)
}

/// Zone number (1-5) for a reading, if it falls inside the zones.
pub fn zone_for(zones: &[HeartRateZone], bpm: f64) -> Option<u8> {
    match zones.last() {
        Some(last) if bpm == last.max => Some(last.zone),
        _ => zones.iter().find(|z| z.contains(bpm)).map(|z| z.zone),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zones_are_contiguous_and_anchored() {
        for (resting, max) in [(60, 190), (45, 200), (80, 81), (70, 171)] {
            let zones = karvonen_zones(resting, max).unwrap();
            assert_eq!(zones.len(), 5);
            assert_eq!(zones[0].min, f64::from(resting));
            assert_eq!(zones[4].max, f64::from(max));
            for n in 0..4 {
                assert_eq!(zones[n].max, zones[n + 1].min, "zone {} gap", n + 1);
            }
            for zone in &zones {
                assert!(zone.min < zone.max, "zone {} not increasing", zone.zone);
            }
        }
    }

    #[test]
    fn inner_bounds_follow_reserve() {
        let zones = karvonen_zones(60, 190).unwrap();
        // reserve 130
        assert!((zones[0].max - 138.0).abs() < 1e-9);
        assert!((zones[1].max - 151.0).abs() < 1e-9);
        assert!((zones[2].max - 164.0).abs() < 1e-9);
        assert!((zones[3].max - 177.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_range_has_no_zones() {
        assert!(karvonen_zones(190, 190).is_none());
        assert!(karvonen_zones(200, 150).is_none());
    }

    #[test]
    fn max_hr_from_age() {
        assert_eq!(max_hr_for_age(30), 190);
        assert_eq!(max_hr_for_age(250), 0);
    }

    #[test]
    fn zone_lookup() {
        let zones = karvonen_zones(60, 190).unwrap();
        assert_eq!(zone_for(&zones, 60.0), Some(1));
        assert_eq!(zone_for(&zones, 150.0), Some(2));
        assert_eq!(zone_for(&zones, 190.0), Some(5));
        assert_eq!(zone_for(&zones, 40.0), None);
    }
}
