use leptos::prelude::*;
use storerate::config::ClientConfig;
use storerate_frontend::{App, init_logging};
use tracing::Level;

// Use lol_alloc as the global allocator for smaller WASM size
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    console_error_panic_hook::set_once();

    let config = ClientConfig::from_build_env();
    init_logging(config.as_ref().map_or(Level::INFO, |c| c.log_level));
    match &config {
        Ok(c) => tracing::info!(api = %c.api_base_url, "starting client"),
        Err(e) => tracing::error!(error = %e, "invalid build configuration"),
    }

    mount_to_body(move || view! { <App config=config /> });
}
