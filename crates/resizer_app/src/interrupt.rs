use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use resizer_logging::resizer_warn;

/// Exit status used when a second Ctrl-C aborts without waiting.
const EXIT_INTERRUPTED: i32 = 130;

/// Set by the first Ctrl-C; the front end turns it into a cancel request.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    requested: Arc<AtomicBool>,
}

impl Interrupt {
    /// Listens for Ctrl-C on a background thread. A second Ctrl-C exits at once.
    pub fn install() -> Self {
        let interrupt = Self::default();
        let listener = interrupt.clone();
        let spawned = thread::Builder::new()
            .name("resizer-signal".to_string())
            .spawn(move || listener.listen());
        if let Err(err) = spawned {
            resizer_warn!("Ctrl-C handling unavailable: {}", err);
        }
        interrupt
    }

    /// Marks an interrupt as received.
    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    /// Returns true once per received interrupt.
    pub fn take(&self) -> bool {
        self.requested.swap(false, Ordering::SeqCst)
    }

    fn listen(&self) {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                resizer_warn!("Ctrl-C handling unavailable: {}", err);
                return;
            }
        };
        runtime.block_on(async {
            if tokio::signal::ctrl_c().await.is_err() {
                return;
            }
            eprintln!("Cancelling; press Ctrl-C again to abort immediately");
            self.request();
            if tokio::signal::ctrl_c().await.is_ok() {
                process::exit(EXIT_INTERRUPTED);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_consumes_the_request() {
        let interrupt = Interrupt::default();
        assert!(!interrupt.take());
        interrupt.clone().request();
        assert!(interrupt.take());
        assert!(!interrupt.take());
    }
}
