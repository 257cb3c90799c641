//! IEEE 1364 value change dump (VCD) recorder.
//!
//! Writes a single `harness` scope holding one wire per core pin. The first dump
//! emits every value inside `$dumpvars`; later dumps emit only the pins that changed.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use super::WaveformRecorder;
use crate::common::error::TraceError;
use crate::core::PinSnapshot;

/// Signals in declaration order: name, width in bits, VCD identifier.
const SIGNALS: [(&str, u32, char); 9] = [
    ("clock", 1, '!'),
    ("reset", 1, '"'),
    ("data_in", 16, '#'),
    ("ack", 1, '$'),
    ("byte_select", 2, '%'),
    ("address", 16, '&'),
    ("write_enable", 1, '\''),
    ("data_out", 16, '('),
    ("finished", 1, ')'),
];

fn sample(pins: &PinSnapshot) -> [u16; 9] {
    let i = &pins.inputs;
    let o = &pins.outputs;
    [
        i.clock as u16,
        i.reset as u16,
        i.data_in,
        i.ack as u16,
        o.byte_select.bits() as u16,
        o.address.val(),
        o.write_enable as u16,
        o.data_out,
        o.finished as u16,
    ]
}

/// VCD writer over any byte sink.
#[derive(Debug)]
pub struct VcdRecorder<W: Write> {
    out: Option<W>,
    last_time: Option<u64>,
    last_values: Option<[u16; 9]>,
}

impl VcdRecorder<BufWriter<File>> {
    /// Creates (or truncates) `path` and writes the VCD header to it.
    ///
    /// # Errors
    ///
    /// Returns `TraceError::Io` if the file cannot be created or written.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        debug!(path = %path.display(), "waveform opened");
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> VcdRecorder<W> {
    /// Wraps `out` and writes the VCD header.
    ///
    /// # Errors
    ///
    /// Returns `TraceError::Io` if the header cannot be written.
    pub fn new(mut out: W) -> Result<Self, TraceError> {
        writeln!(out, "$version primsim {} $end", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "$timescale 1ps $end")?;
        writeln!(out, "$scope module harness $end")?;
        for (name, width, id) in SIGNALS {
            writeln!(out, "$var wire {width} {id} {name} $end")?;
        }
        writeln!(out, "$upscope $end")?;
        writeln!(out, "$enddefinitions $end")?;
        Ok(Self {
            out: Some(out),
            last_time: None,
            last_values: None,
        })
    }

    /// Returns `true` once `close` has been called.
    pub const fn is_closed(&self) -> bool {
        self.out.is_none()
    }

    fn write_value(out: &mut W, width: u32, id: char, value: u16) -> Result<(), TraceError> {
        if width == 1 {
            writeln!(out, "{value}{id}")?;
        } else {
            writeln!(out, "b{value:b} {id}")?;
        }
        Ok(())
    }
}

impl<W: Write> WaveformRecorder for VcdRecorder<W> {
    fn dump(&mut self, time_ps: u64, pins: &PinSnapshot) -> Result<(), TraceError> {
        let out = self.out.as_mut().ok_or(TraceError::Closed)?;
        if let Some(last) = self.last_time.filter(|&last| time_ps <= last) {
            return Err(TraceError::NonMonotonic {
                time: time_ps,
                last,
            });
        }

        let values = sample(pins);
        writeln!(out, "#{time_ps}")?;
        match self.last_values {
            None => {
                writeln!(out, "$dumpvars")?;
                for ((_, width, id), value) in SIGNALS.iter().zip(values) {
                    Self::write_value(out, *width, *id, value)?;
                }
                writeln!(out, "$end")?;
            }
            Some(prev) => {
                for (((_, width, id), value), old) in SIGNALS.iter().zip(values).zip(prev) {
                    if value != old {
                        Self::write_value(out, *width, *id, value)?;
                    }
                }
            }
        }

        self.last_time = Some(time_ps);
        self.last_values = Some(values);
        Ok(())
    }

    fn close(&mut self) -> Result<(), TraceError> {
        let mut out = self.out.take().ok_or(TraceError::Closed)?;
        out.flush()?;
        debug!(last_time = ?self.last_time, "waveform closed");
        Ok(())
    }
}
