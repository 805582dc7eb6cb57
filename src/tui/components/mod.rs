// Reusable UI components shared by the views

pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use toast::Toast;
