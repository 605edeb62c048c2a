//! Line-oriented telemetry link over any byte writer.
//!
//! On the device the writer is the console UART (`stdout`), shared with the
//! log output; receivers pick out lines that start with `DATA,`.

use std::io::Write;

use log::trace;

use crate::app::ports::TelemetryLink;
use crate::error::CommsError;

pub struct SerialLink<W> {
    writer: W,
}

impl<W: Write> SerialLink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TelemetryLink for SerialLink<W> {
    fn emit_line(&mut self, line: &str) -> Result<(), CommsError> {
        self.writer
            .write_all(line.as_bytes())
            .and_then(|()| self.writer.write_all(b"\n"))
            .and_then(|()| self.writer.flush())
            .map_err(|_| CommsError::SerialWriteFailed)?;
        trace!("serial <- {line}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn appends_newline() {
        let mut link = SerialLink::new(Vec::new());
        link.emit_line("DATA,5,Empty").unwrap();
        link.emit_line("DATA,4,Fill").unwrap();
        assert_eq!(link.into_inner(), b"DATA,5,Empty\nDATA,4,Fill\n");
    }

    #[test]
    fn write_error_maps_to_comms_error() {
        let mut link = SerialLink::new(BrokenPipe);
        assert_eq!(link.emit_line("x"), Err(CommsError::SerialWriteFailed));
    }
}
