mod layout;
mod modules;

pub use layout::RolePaths;
pub use modules::module_path;
