//! Status reporting task
//!
//! Receives the status snapshot published after every tick and logs it
//! when anything other than the countdown changed.

use defmt::*;

use retrax_core::StatusSnapshot;

use crate::channels::STATUS;

/// Status task
#[embassy_executor::task]
pub async fn status_task() {
    info!("Status task started");

    let mut last: Option<StatusSnapshot> = None;

    loop {
        let status = STATUS.wait().await;
        if last.is_some_and(|prev| same_except_countdown(&prev, &status)) {
            continue;
        }
        info!(
            "Status: state={} moves retracted={} extended={} remaining={:?} fault={}",
            status.state.name(),
            status.counters.retracted,
            status.counters.extended,
            status.remaining_ms,
            status.actuator_fault
        );
        last = Some(status);
    }
}

fn same_except_countdown(a: &StatusSnapshot, b: &StatusSnapshot) -> bool {
    a.state == b.state
        && a.indication == b.indication
        && a.counters == b.counters
        && a.calibrating == b.calibrating
        && a.actuator_fault == b.actuator_fault
}
