//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => {
                info!("START | gates closed");
            }
            AppEvent::OccupancyChanged {
                free_slots,
                occupancy,
            } => {
                let mut cells = [' '; 5];
                for (cell, filled) in cells.iter_mut().zip(occupancy.iter()) {
                    *cell = if filled { '#' } else { '.' };
                }
                let map: String = cells.iter().collect();
                info!("SLOTS | free={free_slots} | [{map}]");
            }
            AppEvent::GateActuated { gate, angle } => {
                info!("GATE  | {gate} servo -> {angle}\u{00b0}");
            }
            AppEvent::GateChanged { gate, from, to } => {
                info!("GATE  | {gate} {from} -> {to}");
            }
            AppEvent::FacilityFull => {
                info!("FULL  | entry refused, no free slot");
            }
            AppEvent::TelemetrySent(frame) => {
                debug!("TELEM | free={} sent", frame.free_slots);
            }
            AppEvent::DeviceFault(err) => {
                warn!("FAULT | {err}");
            }
        }
    }
}
