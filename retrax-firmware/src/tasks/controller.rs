//! Main controller task
//!
//! Once per tick: folds the queued input frames into a snapshot, runs
//! the state machine, executes the resulting command round against the
//! plant and publishes indication and status.

use defmt::*;
use embassy_time::{with_timeout, Duration};

use retrax_core::actuator::CommandBatch;
use retrax_core::config::{MoveCounters, TimingConfig};
use retrax_core::input::Snapshot;
use retrax_core::traits::ActuatorError;
use retrax_core::Controller;

use super::tick::{now_ms, TICK_SIGNAL};
use crate::board::BoardPlant;
use crate::channels::{FACTORY_RESET, INDICATION, INPUT_CHANNEL, PERSIST_REQUEST, STATUS};

/// Upper bound for a single actuator call
const ACTUATOR_TIMEOUT: Duration = Duration::from_millis(50);

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(timing: TimingConfig, counters: MoveCounters, mut plant: BoardPlant) {
    info!("Controller task started");
    info!(
        "Timing: move timeout {}s, delay to middle {}s",
        timing.move_timeout_s, timing.delay_to_middle_s
    );

    let (mut controller, boot) = Controller::new(timing, counters, now_ms());
    execute(&mut controller, &boot, &mut plant).await;
    publish(&controller, now_ms());

    let mut snapshot = Snapshot::default();

    loop {
        let now = TICK_SIGNAL.wait().await;

        while let Ok(frame) = INPUT_CHANNEL.try_receive() {
            snapshot.absorb(&frame);
        }

        if FACTORY_RESET.try_take().is_some() {
            match controller.reset_counters(&mut plant.store) {
                Ok(()) => info!("Move counters reset"),
                Err(e) => warn!("Move counter reset failed: {:?}", e),
            }
        }

        let outcome = controller.tick(&snapshot, now);
        snapshot.clear_edges();

        if let Some(t) = outcome.transition {
            if t.to.is_fault() {
                warn!("State: {} -> {}", t.from.name(), t.to.name());
            } else {
                info!("State: {} -> {}", t.from.name(), t.to.name());
            }
        }

        let was_faulted = controller.actuator_faulted();
        execute(&mut controller, &outcome.commands, &mut plant).await;
        if controller.actuator_faulted() && !was_faulted {
            error!("Actuator failure latched, forcing no-position");
        }

        if plant.store.take_dirty() {
            PERSIST_REQUEST.signal(());
        }

        publish(&controller, now);
    }
}

/// Execute one command round and close it
async fn execute(controller: &mut Controller, commands: &CommandBatch, plant: &mut BoardPlant) {
    for cmd in commands.iter() {
        let result = match with_timeout(ACTUATOR_TIMEOUT, plant.apply(*cmd)).await {
            Ok(result) => result,
            Err(_) => Err(ActuatorError::Timeout),
        };
        if let Err(e) = result {
            warn!("Command {} failed: {:?}", cmd.name(), e);
        }
        controller.record(*cmd, result);
    }

    let summary = controller.finish_round();
    if !summary.ok() {
        warn!(
            "Round: {} issued, {} failed, {} dropped, {} to retry",
            summary.issued,
            summary.failed,
            summary.dropped,
            controller.pending_retries()
        );
    }
}

fn publish(controller: &Controller, now: u32) {
    INDICATION.signal(controller.indication());
    STATUS.signal(controller.status(now));
}
