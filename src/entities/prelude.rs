pub use super::alphanumeric_product_codes::Entity as AlphanumericProductCodes;
pub use super::approval_documents::Entity as ApprovalDocuments;
pub use super::comments::Entity as Comments;
pub use super::exam_results::Entity as ExamResults;
pub use super::numeric_product_codes::Entity as NumericProductCodes;
pub use super::people::Entity as People;
pub use super::profiles::Entity as Profiles;
pub use super::queue_state::Entity as QueueState;
pub use super::questions::Entity as Questions;
pub use super::user_accounts::Entity as UserAccounts;
