//! DHT11 temperature/humidity sensor
//!
//! Single-wire protocol on an open-drain pin with pull-up:
//!
//! - Host pulls the line low for at least 18 ms, then releases it
//! - Sensor answers with 80 µs low, 80 µs high
//! - 40 data bits follow, MSB first. Each bit is 50 µs low then a high
//!   pulse of 26-28 µs (0) or 70 µs (1)
//!
//! # Frame
//!
//! | Byte | Content |
//! |------|---------|
//! | 0 | Humidity, integer part (%) |
//! | 1 | Humidity, decimal part (always 0 on DHT11) |
//! | 2 | Temperature, integer part (°C); bit 7 is a sign bit on some clones |
//! | 3 | Temperature, decimal part |
//! | 4 | Checksum: low byte of the sum of bytes 0-3 |
//!
//! Pulse widths are measured against a free-running microsecond clock,
//! so the cost of each pin poll does not skew the bit decision.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use hygrostat_core::traits::{ClimateSensor, Sample, SensorError};

/// Host start pulse length (ms)
const START_PULSE_MS: u32 = 18;

/// Longest wait for any line transition (µs)
const EDGE_TIMEOUT_US: u32 = 100;

/// High pulses longer than this are a 1 bit (µs)
const ONE_THRESHOLD_US: u32 = 40;

/// Frame length in bytes
pub const FRAME_LEN: usize = 5;

/// Shortest gap the sensor needs between two reads (ms)
pub const MIN_READ_INTERVAL_MS: u32 = 1_000;

/// DHT11 errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dht11Error<E> {
    /// No answer to the start pulse, or the line stopped toggling
    Timeout,
    /// Frame checksum mismatch
    Checksum,
    /// Pin error
    Bus(E),
}

impl<E> From<Dht11Error<E>> for SensorError {
    fn from(e: Dht11Error<E>) -> Self {
        match e {
            Dht11Error::Timeout => SensorError::Timeout,
            Dht11Error::Checksum => SensorError::Checksum,
            Dht11Error::Bus(_) => SensorError::Bus,
        }
    }
}

/// Decode a raw 40-bit frame
pub fn decode_frame(frame: &[u8; FRAME_LEN]) -> Result<Sample, SensorError> {
    let sum = frame[..4]
        .iter()
        .fold(0u8, |acc, byte| acc.wrapping_add(*byte));
    if sum != frame[4] {
        return Err(SensorError::Checksum);
    }

    let magnitude = (frame[2] & 0x7F) as i16;
    let celsius = if frame[2] & 0x80 != 0 {
        -magnitude
    } else {
        magnitude
    };

    Ok(Sample::new(celsius, frame[0]))
}

/// DHT11 on a bidirectional pin
///
/// `P` must be an open-drain output that can also be read back. `C`
/// returns a monotonic timestamp in microseconds.
pub struct Dht11<P, D, C> {
    pin: P,
    delay: D,
    now_us: C,
}

impl<P, D, C, E> Dht11<P, D, C>
where
    P: InputPin<Error = E> + OutputPin<Error = E>,
    D: DelayNs,
    C: FnMut() -> u64,
{
    /// Create a new driver; the line is released (idle high)
    pub fn new(mut pin: P, delay: D, now_us: C) -> Self {
        let _ = pin.set_high();
        Self { pin, delay, now_us }
    }

    /// Read one raw frame
    pub fn read_frame(&mut self) -> Result<[u8; FRAME_LEN], Dht11Error<E>> {
        // Start pulse
        self.pin.set_low().map_err(Dht11Error::Bus)?;
        self.delay.delay_ms(START_PULSE_MS);
        self.pin.set_high().map_err(Dht11Error::Bus)?;

        // Response: low, high, then the first bit's low
        self.wait_for(false)?;
        self.wait_for(true)?;
        self.wait_for(false)?;

        let mut frame = [0u8; FRAME_LEN];
        for byte in frame.iter_mut() {
            for _ in 0..8 {
                self.wait_for(true)?;
                let high_us = self.wait_for(false)?;
                *byte = (*byte << 1) | (high_us > ONE_THRESHOLD_US) as u8;
            }
        }

        Ok(frame)
    }

    /// Read and decode one sample
    pub fn read_sample(&mut self) -> Result<Sample, Dht11Error<E>> {
        let frame = self.read_frame()?;
        decode_frame(&frame).map_err(|_| Dht11Error::Checksum)
    }

    /// Release the pin, delay and clock
    pub fn release(self) -> (P, D, C) {
        (self.pin, self.delay, self.now_us)
    }

    /// Poll until the line reads `high`
    ///
    /// Returns the time waited (µs), measured on the clock.
    fn wait_for(&mut self, high: bool) -> Result<u32, Dht11Error<E>> {
        let start = (self.now_us)();
        loop {
            let level = self.pin.is_high().map_err(Dht11Error::Bus)?;
            let elapsed_us = (self.now_us)().saturating_sub(start);
            if level == high {
                return Ok(elapsed_us.min(u32::MAX as u64) as u32);
            }
            if elapsed_us >= EDGE_TIMEOUT_US as u64 {
                return Err(Dht11Error::Timeout);
            }
            self.delay.delay_us(1);
        }
    }
}

impl<P, D, C, E> ClimateSensor for Dht11<P, D, C>
where
    P: InputPin<Error = E> + OutputPin<Error = E>,
    D: DelayNs,
    C: FnMut() -> u64,
{
    fn read(&mut self) -> Result<Sample, SensorError> {
        self.read_sample().map_err(SensorError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use std::cell::Cell;
    use std::boxed::Box;
    use std::rc::Rc;
    use std::vec::Vec;

    fn frame(humidity: u8, temp: u8) -> [u8; FRAME_LEN] {
        let sum = humidity.wrapping_add(temp);
        [humidity, 0, temp, 0, sum]
    }

    #[test]
    fn test_decode_frame() {
        let sample = decode_frame(&frame(45, 23)).unwrap();
        assert_eq!(sample.celsius, 23);
        assert_eq!(sample.humidity, 45);
    }

    #[test]
    fn test_decode_bad_checksum() {
        let mut raw = frame(45, 23);
        raw[4] ^= 1;
        assert_eq!(decode_frame(&raw), Err(SensorError::Checksum));
    }

    #[test]
    fn test_decode_checksum_wraps() {
        // 200 + 10 + 100 = 310 -> 54
        let raw = [200, 10, 100, 0, 54];
        assert!(decode_frame(&raw).is_ok());
    }

    #[test]
    fn test_decode_negative_temperature() {
        let sample = decode_frame(&frame(50, 0x81)).unwrap();
        assert_eq!(sample.celsius, -1);
    }

    /// Simulated single-wire line
    ///
    /// The host drives the line until it releases it; from then on the
    /// level follows a scripted waveform over a shared microsecond clock.
    #[derive(Clone)]
    struct Line {
        clock: Rc<Cell<u64>>,
        driven_low: Rc<Cell<bool>>,
        released_at: Rc<Cell<Option<u64>>>,
        /// (duration µs, level) segments after release
        waveform: Rc<Vec<(u64, bool)>>,
    }

    impl Line {
        fn answering(frame: &[u8; FRAME_LEN]) -> Self {
            let mut waveform = Vec::new();
            waveform.push((25, true));
            waveform.push((80, false));
            waveform.push((80, true));
            for byte in frame {
                for bit in (0..8).rev() {
                    waveform.push((50, false));
                    let high = if byte & (1 << bit) != 0 { 70 } else { 27 };
                    waveform.push((high, true));
                }
            }
            waveform.push((50, false));
            Self::with_waveform(waveform)
        }

        fn with_waveform(waveform: Vec<(u64, bool)>) -> Self {
            Self {
                clock: Rc::new(Cell::new(0)),
                driven_low: Rc::new(Cell::new(false)),
                released_at: Rc::new(Cell::new(None)),
                waveform: Rc::new(waveform),
            }
        }

        fn level(&self) -> bool {
            if self.driven_low.get() {
                return false;
            }
            let Some(start) = self.released_at.get() else {
                return true;
            };
            let mut t = self.clock.get() - start;
            for &(duration, level) in self.waveform.iter() {
                if t < duration {
                    return level;
                }
                t -= duration;
            }
            // Pull-up after the frame
            true
        }
    }

    impl embedded_hal::digital::ErrorType for Line {
        type Error = Infallible;
    }

    impl InputPin for Line {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.level())
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.level())
        }
    }

    impl OutputPin for Line {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.driven_low.set(true);
            self.released_at.set(None);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            if self.driven_low.get() {
                self.driven_low.set(false);
                self.released_at.set(Some(self.clock.get()));
            }
            Ok(())
        }
    }

    /// Delay advancing the shared clock
    ///
    /// `cost_us` models how long one poll really takes on target: every
    /// delay call burns that much on top of the requested time.
    struct Clock {
        now: Rc<Cell<u64>>,
        cost_us: u64,
    }

    impl DelayNs for Clock {
        fn delay_ns(&mut self, ns: u32) {
            let us = (ns as u64).div_ceil(1000);
            self.now.set(self.now.get() + us + self.cost_us);
        }
    }

    type TestSensor = Dht11<Line, Clock, Box<dyn FnMut() -> u64>>;

    fn sensor_with_cost(line: &Line, cost_us: u64) -> TestSensor {
        let now = line.clock.clone();
        let clock = Clock {
            now: line.clock.clone(),
            cost_us,
        };
        Dht11::new(line.clone(), clock, Box::new(move || now.get()))
    }

    fn sensor(line: &Line) -> TestSensor {
        sensor_with_cost(line, 0)
    }

    #[test]
    fn test_read_full_exchange() {
        let raw = frame(61, 24);
        let line = Line::answering(&raw);
        let mut dht = sensor(&line);

        assert_eq!(dht.read_frame(), Ok(raw));
    }

    #[test]
    fn test_read_sample_through_trait() {
        let line = Line::answering(&frame(38, 19));
        let mut dht = sensor(&line);

        let sample = ClimateSensor::read(&mut dht).unwrap();
        assert_eq!(sample, Sample::new(19, 38));
    }

    #[test]
    fn test_start_pulse_held() {
        let line = Line::answering(&frame(38, 19));
        let mut dht = sensor(&line);
        dht.read_frame().unwrap();

        // Released no earlier than the start pulse length
        assert!(line.released_at.get().unwrap() >= START_PULSE_MS as u64 * 1000);
    }

    #[test]
    fn test_slow_polling_still_decodes_ones() {
        // Each poll takes 3 µs: a 70 µs pulse is only ~23 polls long
        let raw = frame(0xFF, 0xFF);
        let line = Line::answering(&raw);
        let mut dht = sensor_with_cost(&line, 2);

        assert_eq!(dht.read_frame(), Ok(raw));
    }

    #[test]
    fn test_silent_sensor_times_out() {
        // Line never leaves the pull-up level
        let line = Line::with_waveform(Vec::new());
        let mut dht = sensor(&line);

        assert_eq!(dht.read_frame(), Err(Dht11Error::Timeout));
        assert_eq!(ClimateSensor::read(&mut dht), Err(SensorError::Timeout));
    }

    #[test]
    fn test_corrupted_frame_rejected() {
        let mut raw = frame(61, 24);
        raw[4] = raw[4].wrapping_add(1);
        let line = Line::answering(&raw);
        let mut dht = sensor(&line);

        assert_eq!(ClimateSensor::read(&mut dht), Err(SensorError::Checksum));
    }
}
