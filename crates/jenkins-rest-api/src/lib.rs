pub mod error;
pub mod types;
pub mod utils;

pub use error::{
    JenkinsError,
    JenkinsResult,
};
pub use types::{
    ApiError,
    ErrorKind,
    IntegerResponse,
    RequestStatus,
};
pub use utils::RetryPolicy;
