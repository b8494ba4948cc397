pub mod category;
pub mod settings;
pub mod summary;
pub mod transaction;
pub mod wallet;
