use chrono::{Local, Timelike};
use serde::Deserialize;

/// Wall-clock time as shown on a 12-hour dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    /// Hour of the half day, `0..=11`.
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl ClockReading {
    pub fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour: hour % 12,
            minute,
            second,
        }
    }

    pub fn from_time<T: Timelike>(time: &T) -> Self {
        Self::new(time.hour(), time.minute(), time.second())
    }
}

pub trait TimeSource {
    fn now(&self) -> ClockReading;
}

/// Local wall clock of the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> ClockReading {
        ClockReading::from_time(&Local::now())
    }
}

/// Whether the hour and minute hands move between whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandMotion {
    /// The hour hand advances with the minutes and the minute hand with the seconds.
    #[default]
    Sweep,
    /// Hour and minute hands jump only when their own unit changes.
    Stepped,
}

/// Hand rotations in degrees, clockwise from 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub hour: f32,
    pub minute: f32,
    pub second: f32,
}

impl HandAngles {
    pub fn new(reading: ClockReading, motion: HandMotion) -> Self {
        let hour = reading.hour as f32;
        let minute = reading.minute as f32;
        let second = reading.second as f32;

        let (hour_position, minute_position) = match motion {
            HandMotion::Sweep => (hour + minute / 60.0, minute + second / 60.0),
            HandMotion::Stepped => (hour, minute),
        };

        Self {
            hour: hour_position * 360.0 / 12.0,
            minute: minute_position * 360.0 / 60.0,
            second: second * 360.0 / 60.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn reading_folds_hours_onto_twelve() {
        let time = NaiveTime::from_hms_opt(15, 42, 7).expect("valid time");
        assert_eq!(ClockReading::from_time(&time), ClockReading::new(3, 42, 7));

        let noon = NaiveTime::from_hms_opt(12, 0, 0).expect("valid time");
        assert_eq!(ClockReading::from_time(&noon).hour, 0);
    }

    #[test]
    fn second_hand_moves_six_degrees_per_second() {
        for second in 0..60 {
            let angles = HandAngles::new(ClockReading::new(0, 0, second), HandMotion::Sweep);
            assert_eq!(angles.second, second as f32 * 6.0);
        }
    }

    #[test]
    fn stepped_hour_hand_ignores_minutes() {
        for hour in 0..12 {
            for minute in [0, 15, 30, 59] {
                let reading = ClockReading::new(hour, minute, 45);
                let angles = HandAngles::new(reading, HandMotion::Stepped);
                assert_eq!(angles.hour, hour as f32 * 30.0);
                assert_eq!(angles.minute, minute as f32 * 6.0);
            }
        }
    }

    #[test]
    fn sweeping_hands_advance_with_smaller_units() {
        let angles = HandAngles::new(ClockReading::new(3, 30, 30), HandMotion::Sweep);

        assert!((angles.hour - 105.0).abs() < 1e-4);
        assert!((angles.minute - 183.0).abs() < 1e-4);
        assert_eq!(angles.second, 180.0);
    }

    #[test]
    fn hand_motion_deserializes_lowercase() {
        let motion: HandMotion = serde_json::from_str("\"stepped\"").expect("valid motion");
        assert_eq!(motion, HandMotion::Stepped);
    }
}
