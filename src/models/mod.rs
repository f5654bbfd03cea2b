pub mod submission;

pub use submission::{
    SubmissionRequest,
    SubmissionResponse,
    SubmissionResult,
    ValidSubmission,
    PHONE_PLACEHOLDER,
};
