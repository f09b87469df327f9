mod landing;
mod login;

pub use landing::{AdminHome, Home, Register};
pub use login::Login;
