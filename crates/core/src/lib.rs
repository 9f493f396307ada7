pub mod helpers;
pub mod logging;
pub mod settings;
pub mod view;
