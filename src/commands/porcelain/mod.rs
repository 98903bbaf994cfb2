//! Porcelain commands (user-facing operations)
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Stage files for commit
//! - `commit`: Create a new commit
//! - `status`: Show working tree status
//! - `diff`: Show unstaged changes
//! - `log`: Show commit history
//! - `branch`: List or create branches
//! - `checkout`: Switch branches
//! - `merge`: Fast-forward the current branch

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod diff;
pub mod init;
pub mod log;
pub mod merge;
pub mod status;
