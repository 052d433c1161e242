pub mod clientbound_disconnect;
pub mod clientbound_encryptionrequest;
pub mod clientbound_loginsuccess;
pub mod clientbound_pluginrequest;
pub mod clientbound_setcompression;
pub mod serverbound_encryptionresponse;
pub mod serverbound_loginstart;
pub mod serverbound_pluginresponse;

pub use clientbound_disconnect::ClientBoundLoginDisconnect;
pub use clientbound_encryptionrequest::ClientBoundEncryptionRequest;
pub use clientbound_loginsuccess::ClientBoundLoginSuccess;
pub use clientbound_pluginrequest::ClientBoundPluginRequest;
pub use clientbound_setcompression::ClientBoundSetCompression;
pub use serverbound_encryptionresponse::ServerBoundEncryptionResponse;
pub use serverbound_loginstart::ServerBoundLoginStart;
pub use serverbound_pluginresponse::ServerBoundPluginResponse;
