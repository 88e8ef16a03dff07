mod vars;

pub use vars::{is_valid_name, Environment};
