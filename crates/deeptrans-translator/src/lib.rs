pub mod adapter;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod prompt;
pub mod request;
pub mod transport;

pub use adapter::WireAdapter;
pub use dispatch::{adapter_for, send_translation};
pub use error::{TransportError, TranslateError};
pub use models::{fetch_models, filter_chat_models};
pub use request::TranslationRequest;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
