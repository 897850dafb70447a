pub mod prelude;

pub mod alphanumeric_product_codes;
pub mod approval_documents;
pub mod comments;
pub mod exam_results;
pub mod numeric_product_codes;
pub mod people;
pub mod profiles;
pub mod queue_state;
pub mod questions;
pub mod user_accounts;
