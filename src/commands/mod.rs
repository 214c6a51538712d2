//! Command implementations

mod plan;
mod probe;
mod resolve;

use std::path::PathBuf;

pub use plan::plan;
pub use probe::probe;
pub use resolve::resolve;

use specrun::roots::ResourceRoots;

/// Register every `--root` argument, in order
fn build_roots(paths: &[PathBuf]) -> anyhow::Result<ResourceRoots> {
    let mut roots = ResourceRoots::new();
    for path in paths {
        log::debug!("registering resource root {}", path.display());
        roots.add(path.clone())?;
    }
    Ok(roots)
}
