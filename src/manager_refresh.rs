use std::sync::Arc;
use std::time::Duration;
use log::{error, info};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use crate::manager_weather::WeatherManager;
use crate::models::Coordinates;

/// Weather refresh loop
///
/// Refreshes on every tick of the interval and whenever the current location changes.
/// Returns when the location sender is dropped.
///
/// # Arguments
///
/// * 'manager' - weather manager to refresh through
/// * 'location' - receiver for the current location
/// * 'interval' - time between refreshes
pub async fn run_refresh(manager: Arc<WeatherManager>, mut location: watch::Receiver<Option<Coordinates>>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {},
            changed = location.changed() => {
                if changed.is_err() {
                    info!("location provider closed, stopping refresh loop");
                    return;
                }
                info!("current location changed to {:?}", *location.borrow());
            },
        }

        let current = *location.borrow_and_update();
        if let Err(e) = manager.get_weather(current, |_| {}).await {
            error!("failed to refresh weather: {}", e);
        }
    }
}
