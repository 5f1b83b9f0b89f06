pub mod automation;
pub mod bot_service;

pub use automation::AutomationService;
pub use bot_service::{BotService, Flow};
