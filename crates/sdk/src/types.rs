use serde::{Deserialize, Serialize};

use crate::error::{SdkError, SdkResult};

/// Display orientation, restricted to the four values the device
/// accepts. Anything else is rejected before the native call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Orientation {
    pub fn from_degrees(degrees: i32) -> SdkResult<Self> {
        match degrees {
            0 => Ok(Orientation::Deg0),
            90 => Ok(Orientation::Deg90),
            180 => Ok(Orientation::Deg180),
            270 => Ok(Orientation::Deg270),
            _ => Err(SdkError::InvalidArgument(
                "orientation must be 0, 90, 180, or 270".to_string(),
            )),
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Orientation::Deg0 => 0,
            Orientation::Deg90 => 90,
            Orientation::Deg180 => 180,
            Orientation::Deg270 => 270,
        }
    }
}

/// Physical screen description as reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenMetrics {
    pub horizontal_pixels: i32,
    pub vertical_pixels: i32,
    pub horizontal_dpi: i32,
    pub vertical_dpi: i32,
    pub aspect_ratio: f64,
}

/// Hardware identifiers returned by `hardware_id`, from the PDL
/// headers.
pub mod hardware {
    pub const UNKNOWN: i32 = -1;
    pub const PRE: i32 = 101;
    pub const PRE_PLUS: i32 = 102;
    pub const PIXI: i32 = 201;
    pub const VEER: i32 = 301;
    pub const PRE_2: i32 = 401;
    pub const PRE_3: i32 = 501;
    pub const TOUCHPAD: i32 = 601;
}

/// Custom user-event numbers the SDK posts for sensor updates.
pub mod events {
    pub const GPS_UPDATE: i32 = 1;
    pub const GPS_FAILURE: i32 = 2;
    pub const COMPASS: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_accepts_the_four_legal_angles() {
        for degrees in [0, 90, 180, 270] {
            assert_eq!(
                Orientation::from_degrees(degrees).unwrap().degrees(),
                degrees
            );
        }
    }

    #[test]
    fn orientation_rejects_everything_else() {
        for degrees in [-90, 45, 91, 360] {
            assert!(Orientation::from_degrees(degrees).is_err());
        }
    }

    #[test]
    fn screen_metrics_serialize_camel_case() {
        let metrics = ScreenMetrics {
            horizontal_pixels: 1024,
            vertical_pixels: 768,
            horizontal_dpi: 132,
            vertical_dpi: 132,
            aspect_ratio: 1.33,
        };
        let json = serde_json::to_value(metrics).unwrap();
        assert_eq!(json["horizontalPixels"], 1024);
        assert_eq!(json["verticalDpi"], 132);
    }
}
