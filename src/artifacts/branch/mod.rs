pub mod branch_name;

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";

/// Branch checked out by a freshly initialized repository
pub const DEFAULT_BRANCH: &str = "main";
