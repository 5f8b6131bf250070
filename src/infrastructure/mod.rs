pub mod jhora_client;
pub mod symbols;
