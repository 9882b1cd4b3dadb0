/// Configuration for an expression search
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    /// Explore each root constant on its own rayon task
    pub parallel: bool,
}

impl SearchConfig {
    pub fn parallel() -> Self {
        Self { parallel: true }
    }
}
