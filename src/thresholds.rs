//! Published operating bands for each sensor channel.
//!
//! Reference data only: `/predict` never checks readings against it.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::models::Channel;

// ---

/// Inclusive `(low, high)` range.
pub type Band = (i32, i32);

/// Normal range plus three progressively wider abnormal bands.
///
/// Each abnormal level is a pair of ranges: below normal, then above normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ChannelThresholds {
    pub normal: Band,
    pub level1: [Band; 2],
    pub level2: [Band; 2],
    pub level3: [Band; 2],
}

/// Channel thresholds in feature order, serialized as a JSON object keyed by
/// channel name.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdTable(&'static [(Channel, ChannelThresholds)]);

impl Serialize for ThresholdTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // ---
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (channel, thresholds) in self.0 {
            map.serialize_entry(channel.name(), thresholds)?;
        }
        map.end()
    }
}

const fn bands(
    normal: Band,
    level1: [Band; 2],
    level2: [Band; 2],
    level3: [Band; 2],
) -> ChannelThresholds {
    ChannelThresholds {
        normal,
        level1,
        level2,
        level3,
    }
}

pub const THRESHOLDS: ThresholdTable = ThresholdTable(&[
    (
        Channel::EngineLoad,
        bands((20, 80), [(0, 20), (80, 100)], [(0, 10), (90, 100)], [(0, 5), (95, 100)]),
    ),
    (
        Channel::Map,
        bands((20, 40), [(10, 20), (40, 50)], [(5, 10), (50, 60)], [(0, 5), (60, 100)]),
    ),
    (
        Channel::EngineRpm,
        bands(
            (800, 4000),
            [(500, 800), (4000, 5000)],
            [(300, 500), (5000, 6000)],
            [(0, 300), (6000, 10000)],
        ),
    ),
    (
        Channel::Maf,
        bands((5, 30), [(0, 5), (30, 40)], [(0, 2), (40, 50)], [(0, 0), (50, 100)]),
    ),
    (
        Channel::CatalystTemp,
        bands(
            (400, 700),
            [(300, 400), (700, 800)],
            [(200, 300), (800, 900)],
            [(0, 200), (900, 1000)],
        ),
    ),
    (
        Channel::IntakeAirTemp,
        bands(
            (-20, 50),
            [(-40, -20), (50, 60)],
            [(-60, -40), (60, 80)],
            [(-100, -60), (80, 100)],
        ),
    ),
    (
        Channel::ThrottlePos,
        bands((10, 90), [(0, 10), (90, 100)], [(0, 5), (95, 100)], [(0, 0), (100, 100)]),
    ),
    (
        Channel::CoolantTemp,
        bands(
            (75, 105),
            [(70, 75), (105, 110)],
            [(60, 70), (110, 120)],
            [(0, 60), (120, 150)],
        ),
    ),
]);

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_channel_has_thresholds() {
        // ---
        assert_eq!(THRESHOLDS.0.len(), Channel::ALL.len());
        for channel in Channel::ALL {
            assert!(
                THRESHOLDS.0.iter().any(|(c, _)| *c == channel),
                "{channel} missing"
            );
        }
    }

    #[test]
    fn test_table_follows_feature_order() {
        // ---
        let order: Vec<Channel> = THRESHOLDS.0.iter().map(|(c, _)| *c).collect();
        assert_eq!(order, Channel::ALL.to_vec());
    }

    #[test]
    fn test_abnormal_bands_flank_normal_range() {
        // ---
        for (channel, t) in THRESHOLDS.0 {
            for level in [t.level1, t.level2, t.level3] {
                assert!(level[0].1 <= t.normal.0, "{channel} low band overlaps normal");
                assert!(level[1].0 >= t.normal.1, "{channel} high band overlaps normal");
            }
        }
    }

    #[test]
    fn test_serialized_shape() {
        // ---
        let value = serde_json::to_value(THRESHOLDS).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 8);

        assert_eq!(
            value["Coolant_temp"],
            json!({
                "normal": [75, 105],
                "level1": [[70, 75], [105, 110]],
                "level2": [[60, 70], [110, 120]],
                "level3": [[0, 60], [120, 150]]
            })
        );
        assert_eq!(value["Intake_air_temp"]["level3"], json!([[-100, -60], [80, 100]]));
    }
}
