pub mod inbound;

pub use inbound::SignerListApi;
