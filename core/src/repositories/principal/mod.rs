//! Principal lookup, supplied by the external user-management layer.

mod mock;
mod r#trait;

pub use mock::MockPrincipalProvider;
pub use r#trait::PrincipalProvider;
