pub mod http;
pub mod classifier;
pub mod validator;
pub mod completion;

pub use classifier::{Classifier, HttpClassifier};
pub use completion::{strip_bold, LlmTextCompleter, TextCompleter};
pub use http::build_http_client;
pub use validator::{ImageValidator, LlmImageValidator};
