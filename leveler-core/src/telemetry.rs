//! Line-oriented telemetry parsing for the serial diagnostic link.
//!
//! The host sends free-form text lines; any line carrying the `Pitch:` marker
//! is expected to contain a pitch angle in radians which we convert to
//! degrees. Everything else is reported back verbatim as unrecognized.

use heapless::String;

use crate::convert::degrees_from_radians;

/// Maximum accepted line length. Bytes past this are dropped until the next
/// terminator; the truncated line is still reported.
pub const LINE_CAPACITY: usize = 128;

/// Marker that introduces a radian pitch value in a telemetry line.
pub const PITCH_MARKER: &str = "Pitch:";

/// Outcome of parsing one completed telemetry line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TelemetryReading<'a> {
    /// The line carried a `Pitch:` value.
    Pitch { radians: f32, degrees: f32 },
    /// No marker (or an unparsable value); original text preserved.
    Unrecognized(&'a str),
}

/// Accumulates bytes into terminator-delimited lines.
///
/// `\r` and `\n` both terminate; a terminator with nothing buffered (as in
/// the second half of `\r\n`) yields no line. Non-ASCII bytes are discarded.
pub struct LineAccumulator {
    buf: String<LINE_CAPACITY>,
    complete: bool,
}

impl LineAccumulator {
    pub const fn new() -> Self {
        Self {
            buf: String::new(),
            complete: false,
        }
    }

    /// Feed one byte. Returns the completed line when `byte` terminates a
    /// non-empty one; the line stays valid until the next call.
    pub fn push(&mut self, byte: u8) -> Option<&str> {
        if self.complete {
            self.buf.clear();
            self.complete = false;
        }
        match byte {
            b'\r' | b'\n' => {
                if self.buf.is_empty() {
                    None
                } else {
                    self.complete = true;
                    Some(self.buf.as_str())
                }
            }
            b if b.is_ascii() => {
                // Push fails once the buffer is full; excess is dropped.
                let _ = self.buf.push(b as char);
                None
            }
            _ => None,
        }
    }
}

impl Default for LineAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Interpret one completed line.
pub fn parse_line(line: &str) -> TelemetryReading<'_> {
    if let Some(idx) = line.find(PITCH_MARKER) {
        let value = line[idx + PITCH_MARKER.len()..].trim_start_matches(' ');
        if let Ok(radians) = value.trim_end().parse::<f32>() {
            return TelemetryReading::Pitch {
                radians,
                degrees: degrees_from_radians(radians),
            };
        }
    }
    TelemetryReading::Unrecognized(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crlf_yields_a_single_line() {
        let mut acc = LineAccumulator::new();
        for &b in b"abc" {
            assert_eq!(acc.push(b), None);
        }
        assert_eq!(acc.push(b'\r'), Some("abc"));
        // The trailing `\n` hits an empty buffer and produces nothing more.
        assert_eq!(acc.push(b'\n'), None);
    }

    #[test]
    fn empty_lines_produce_nothing() {
        let mut acc = LineAccumulator::new();
        for &b in b"\r\n\r\n" {
            assert_eq!(acc.push(b), None);
        }
    }

    #[test]
    fn overlong_line_is_truncated_not_split() {
        let mut acc = LineAccumulator::new();
        for _ in 0..200 {
            assert_eq!(acc.push(b'x'), None);
        }
        let line = acc.push(b'\n').unwrap();
        assert_eq!(line.len(), LINE_CAPACITY);
        // Ready for the next line afterwards.
        assert_eq!(acc.push(b'o'), None);
        assert_eq!(acc.push(b'k'), None);
        assert_eq!(acc.push(b'\n'), Some("ok"));
    }

    #[test]
    fn marker_with_garbage_value_is_unrecognized() {
        assert_eq!(
            parse_line("Pitch: not-a-number"),
            TelemetryReading::Unrecognized("Pitch: not-a-number")
        );
    }
}
