pub mod analytics_service;
pub mod category_service;
pub mod transaction_service;
pub mod wallet_service;
