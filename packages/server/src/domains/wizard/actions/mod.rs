//! Wizard actions - entry-point business logic
//!
//! Called directly from route handlers. Actions take raw route input, run the
//! step guards and return a redirect, a projection or a typed error.

pub mod children;
pub mod review;
pub mod steps;

pub use review::{confirmation, review_application, submit_application, SubmissionPayload};
pub use children::{
    child_step_page, save_child_benefits_question, save_child_dental_benefits,
    save_child_dental_insurance,
};
pub use steps::{
    applicant_step_page, save_answers, save_applicant_information, save_benefits_question,
    save_dental_benefits, save_dental_insurance, save_marital_status, start_application,
    StepError,
};
