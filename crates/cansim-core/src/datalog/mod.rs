//! Raw-signal datalog
//!
//! Records the individual named samples the sampler takes on every
//! emission, as integer and float series, so a session can be exported for
//! offline analysis. The log is bounded; once full the oldest samples are
//! dropped.

use std::collections::VecDeque;
use std::io::{self, Write};

use crate::telemetry::DataPoint;

/// Maximum samples to keep per value kind before dropping the oldest
const MAX_POINTS: usize = 10_000;

/// Bounded in-memory recorder for raw signal samples.
///
/// Integer-valued and float-valued signals are kept in separate series,
/// each in append (i.e. timestamp) order.
#[derive(Debug, Default)]
pub struct SignalLog {
    int_points: VecDeque<DataPoint<i32>>,
    float_points: VecDeque<DataPoint<f64>>,
}

impl SignalLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            int_points: VecDeque::new(),
            float_points: VecDeque::new(),
        }
    }

    /// Append an integer-valued sample.
    pub fn push_int(&mut self, point: DataPoint<i32>) {
        if self.int_points.len() >= MAX_POINTS {
            self.int_points.pop_front();
        }
        self.int_points.push_back(point);
    }

    /// Append a float-valued sample.
    pub fn push_float(&mut self, point: DataPoint<f64>) {
        if self.float_points.len() >= MAX_POINTS {
            self.float_points.pop_front();
        }
        self.float_points.push_back(point);
    }

    /// Total number of recorded samples.
    pub fn len(&self) -> usize {
        self.int_points.len() + self.float_points.len()
    }

    /// Whether the log holds no samples.
    pub fn is_empty(&self) -> bool {
        self.int_points.is_empty() && self.float_points.is_empty()
    }

    /// Integer-valued samples, in append order.
    pub fn int_points(&self) -> impl Iterator<Item = &DataPoint<i32>> {
        self.int_points.iter()
    }

    /// Float-valued samples, in append order.
    pub fn float_points(&self) -> impl Iterator<Item = &DataPoint<f64>> {
        self.float_points.iter()
    }

    /// Discard all recorded samples.
    pub fn clear(&mut self) {
        self.int_points.clear();
        self.float_points.clear();
    }

    /// Write all samples as `signal, value, time` CSV lines, merged across
    /// both series in timestamp order. Float values use the same fixed
    /// 4-decimal formatting as the stream layouts.
    pub fn write_csv<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let mut ints = self.int_points.iter().peekable();
        let mut floats = self.float_points.iter().peekable();

        loop {
            // Ties go to the integer series so samples from one emission
            // stay grouped the way they were recorded.
            let take_int = match (ints.peek(), floats.peek()) {
                (Some(i), Some(f)) => i.timestamp <= f.timestamp,
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (None, None) => break,
            };
            if take_int {
                let p = ints.next().unwrap();
                writeln!(writer, "{}, {}, {:.4}", p.signal, p.value, p.timestamp)?;
            } else {
                let p = floats.next().unwrap();
                writeln!(writer, "{}, {:.4}, {:.4}", p.signal, p.value, p.timestamp)?;
            }
        }

        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::signals;

    #[test]
    fn test_log_push_and_clear() {
        let mut log = SignalLog::new();
        assert!(log.is_empty());

        log.push_int(DataPoint::new(signals::GEAR_POS_ACTUAL, 0.1, 2));
        log.push_float(DataPoint::new(signals::ENGINE_SPEED, 0.1, 1850.0));
        assert_eq!(log.len(), 2);

        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_log_is_bounded() {
        let mut log = SignalLog::new();
        for i in 0..(MAX_POINTS + 5) {
            log.push_int(DataPoint::new(signals::GEAR_POS_ACTUAL, i as f64, 1));
        }
        assert_eq!(log.int_points().count(), MAX_POINTS);
        // Oldest samples were dropped first.
        assert_eq!(log.int_points().next().unwrap().timestamp, 5.0);
    }

    #[test]
    fn test_csv_export_merges_by_timestamp() {
        let mut log = SignalLog::new();
        log.push_float(DataPoint::new(signals::ENGINE_SPEED, 0.1, 900.0));
        log.push_int(DataPoint::new(signals::GEAR_POS_ACTUAL, 0.1, 1));
        log.push_float(DataPoint::new(signals::ENGINE_SPEED, 0.2, 950.0));

        let mut buf = Vec::new();
        log.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "GearPosActual, 1, 0.1000\nEngineSpeed, 900.0000, 0.1000\nEngineSpeed, 950.0000, 0.2000\n"
        );
    }
}
