/// Host platform as seen by module resolution: an (OS family, machine
/// architecture) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub family: String,
    pub arch: String,
}

impl Platform {
    pub fn new(family: &str, arch: &str) -> Self {
        Self {
            family: family.to_string(),
            arch: arch.to_string(),
        }
    }

    /// Platform of the running process
    pub fn current() -> Self {
        Self::new(std::env::consts::OS, std::env::consts::ARCH)
    }
}
