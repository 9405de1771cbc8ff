//! UI tick task
//!
//! Fires the scheduler on a fixed period. Each firing runs the engine's
//! processing step to completion before the ticker is awaited again.
//! Firings pass through [`TICK_GUARD`], which any other context that
//! drives the UI must share.

use defmt::*;
use embassy_time::{Duration, Ticker};
use pixie_core::flush::FlushStats;
use pixie_core::scheduler::{TickError, TickGuard, UiScheduler};
use pixie_ui::FocusEngine;

use crate::board::{Buttons, LcdPanel};
use crate::clock::EmbassyClock;

/// The scheduler as wired on this board
pub type Ui = UiScheduler<FocusEngine<'static>, Buttons, LcdPanel>;

/// Admits one UI tick at a time
pub static TICK_GUARD: TickGuard = TickGuard::new();

/// Ticks between periodic status lines
const STATUS_EVERY_TICKS: u32 = 2000;

/// Tick task - drives the UI scheduler
#[embassy_executor::task]
pub async fn ui_tick_task(ui: &'static mut Ui, period_ms: u32) {
    info!("UI tick task started ({} ms period)", period_ms);

    let clock = EmbassyClock;
    let mut ticker = Ticker::every(Duration::from_millis(period_ms as u64));
    let mut last_stats = ui.flush_stats();

    loop {
        ticker.next().await;

        match TICK_GUARD.run(|| ui.tick_now(&clock)) {
            Ok(report) => {
                trace!(
                    "tick {}: +{} ms, scanned={}",
                    report.ticks,
                    report.elapsed_ms,
                    report.scanned
                );
                if report.ticks % STATUS_EVERY_TICKS == 0 {
                    debug!(
                        "UI: {} ms logical, key {}, {}",
                        ui.elapsed_ms(),
                        ui.key_state(),
                        ui.engine().stats()
                    );
                }
            }
            Err(TickError::Reentrant) => {
                error!("Tick entered while another was running");
            }
        }

        let stats = ui.flush_stats();
        report_flush_errors(&last_stats, &stats);
        last_stats = stats;
    }
}

/// Warn when a tick added failed flushes
fn report_flush_errors(before: &FlushStats, after: &FlushStats) {
    let rejected = after.rejected.wrapping_sub(before.rejected);
    let panel_errors = after.panel_errors.wrapping_sub(before.panel_errors);
    if rejected > 0 {
        warn!("{} flush(es) rejected (bad area or short buffer)", rejected);
    }
    if panel_errors > 0 {
        warn!("{} flush(es) hit a panel bus error", panel_errors);
    }
}
