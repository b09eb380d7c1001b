//! DVD Shadow entry point
//!
//! In the browser, attaches the shadow to the app container and keeps it
//! running for the page's lifetime. Natively, runs a short headless simulation.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_shadow {
    use std::cell::RefCell;

    use dvd_shadow::ShadowConfig;
    use dvd_shadow::platform::web::{self, ShadowHandle};

    thread_local! {
        static ACTIVE: RefCell<Option<ShadowHandle>> = const { RefCell::new(None) };
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        // Fails only if the host page already installed a logger
        let _ = console_log::init_with_level(log::Level::Info);

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document, shadow disabled");
            return;
        };

        let config = ShadowConfig::load();
        let Some(container) = web::find_container(&document, &config.container_selector) else {
            log::warn!("No container for the shadow");
            return;
        };
        let Some(shadow) = web::create_shadow_element(&document, &container, &config.shadow_class)
        else {
            log::warn!("Could not create shadow element");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        if let Some(handle) = web::start(&container, &shadow, config, seed) {
            log::info!("Shadow running with seed: {}", seed);
            ACTIVE.with(|a| *a.borrow_mut() = Some(handle));
        }
    }

    pub fn stop() {
        let handle = ACTIVE.with(|a| a.borrow_mut().take());
        if let Some(mut handle) = handle {
            handle.stop();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_shadow::run();
}

/// Tear down the shadow (page navigation, unmount)
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn stop_shadow() {
    wasm_shadow::stop();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dvd_shadow::sim::Bounds;
    use dvd_shadow::{Animator, Frame, PositionSink, ShadowConfig};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Logs one line per simulated second
    struct LogSink {
        frames: u32,
    }

    impl PositionSink for LogSink {
        fn present(&mut self, frame: &Frame) {
            self.frames += 1;
            if self.frames % 60 == 0 {
                log::info!(
                    "t={:>2}s  pos=({:>6.1}, {:>6.1})  size={:.0}",
                    self.frames / 60,
                    frame.offset.x,
                    frame.offset.y,
                    frame.size
                );
            }
        }
    }

    env_logger::init();
    log::info!("DVD Shadow (native) starting headless run...");
    log::info!("Browser mode requires the wasm build - run with `trunk serve`");

    let seed = std::env::var("DVD_SHADOW_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let sink = LogSink { frames: 0 };

    let mut animator = match Animator::new(
        ShadowConfig::load(),
        || Some(Bounds::new(400.0, 400.0)),
        sink,
        Pcg32::seed_from_u64(seed),
    ) {
        Ok(a) => a,
        Err(e) => {
            log::error!("Invalid config: {}", e);
            return;
        }
    };

    animator.start();
    let mut bounces = 0;
    for i in 0..5 * 60 {
        let report = animator.frame(f64::from(i) * 1000.0 / 60.0);
        if report.is_some_and(|r| r.bounced()) {
            bounces += 1;
        }
    }
    animator.stop();

    log::info!("Done: seed {}, {} bounces in 5s", seed, bounces);
}
