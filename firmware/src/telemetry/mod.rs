//! Mirrors coordinator telemetry to defmt (target) or stdout (host).
//!
//! The coordinator records events into its own ring; after every tick the
//! runtime forwards whatever is new so bring-up logs show the bridge's
//! decisions as they happen.

use bridge_core::telemetry::{EventId, TelemetryRecord, TelemetryRecorder};

/// Tracks which coordinator records have already been logged.
pub struct TelemetryDrain {
    next: EventId,
}

impl TelemetryDrain {
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Logs every record newer than the previous call and returns how many
    /// were emitted.
    pub fn forward<const CAPACITY: usize>(
        &mut self,
        recorder: &TelemetryRecorder<CAPACITY>,
    ) -> usize {
        let mut emitted = 0;
        for record in recorder.since(self.next) {
            emit_log(record);
            emitted += 1;
        }
        self.next = recorder.next_id();
        emitted
    }
}

impl Default for TelemetryDrain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "none")]
fn emit_log(record: &TelemetryRecord) {
    defmt::info!(
        "telemetry #{} t={}ms {}",
        record.id,
        record.tick,
        defmt::Display2Format(&record.event)
    );
}

#[cfg(not(target_os = "none"))]
fn emit_log(record: &TelemetryRecord) {
    println!("telemetry #{} t={}ms {}", record.id, record.tick, record.event);
}
