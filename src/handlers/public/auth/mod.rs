pub mod check;
pub mod login;

pub use check::check;
pub use login::{login, logout};
