// Services: time source and configuration.

pub mod clock;
pub mod settings_engine;
