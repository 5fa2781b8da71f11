pub mod client;
pub mod types;

pub use client::{ClientError, DEFAULT_REQUEST_TIMEOUT, HttpQueryClient, QueryClient, endpoint};
pub use types::{AnswerResult, AskRequest, AskResponse, Question, ServerStatus};
