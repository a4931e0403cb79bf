use std::{path::Path, sync::Arc};

/// Shared, immutable string. Cloning only bumps a reference count.
pub type ArcStr = Arc<str>;

/// Shared, immutable path.
pub type ArcPath = Arc<Path>;

/// Restores the terminal before printing a panic so the message is not lost
/// inside the alternate screen of the demo host.
pub fn install_panic_hook() -> anyhow::Result<()> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        hook(info);
    }));
    Ok(())
}
