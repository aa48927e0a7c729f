//! Referral domain model: records, pagination windows, field mapping and
//! input validation. Shared by the HTTP service, the client, and the cache.

mod fields;
mod pagination;
mod referral;
mod validation;

pub use fields::{ReferralField, REQUIRED_ON_CREATE};
pub use pagination::{ListFilter, Pagination, PaginationPatch, ReferralPage, DEFAULT_PAGE_SIZE};
pub use referral::{
    Referral, ReferralChanges, ReferralDraft, ReferralStatus, UnknownStatus, DEFAULT_COUNTRY,
};
pub use validation::{
    is_valid_email, validate_changes, validate_draft, Assignment, NewReferral, ValidationError,
};
