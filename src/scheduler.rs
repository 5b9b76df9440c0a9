use std::future::Future;
use std::time::Duration;
use tokio::sync::Notify;
use tracing::info;

/// Run update cycles at a fixed interval until the shutdown signal
/// fires.
///
/// Each cycle runs to completion before the loop sleeps, so the
/// inter-cycle wait is the only suspension point and an interrupt there
/// never leaves a half-written output file. One failed cycle does not
/// stop the next. Tests drive this with millisecond intervals and an
/// injected notify instead of a real Ctrl-C handler.
pub async fn run_cycles<F, Fut>(interval: Duration, shutdown: &Notify, mut cycle: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    loop {
        cycle().await;

        info!("Next update in {:?}", interval);
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = shutdown.notified() => {
                println!("\n👋 Stopped");
                break;
            }
        }
    }
}
