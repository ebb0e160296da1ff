// Modules Layer - business modules
//
// - chat: sessions, history and the provider orchestration

pub mod chat;

pub use chat::ChatModule;
