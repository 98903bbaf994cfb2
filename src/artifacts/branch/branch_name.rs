use crate::artifacts::branch::INVALID_BRANCH_NAME_REGEX;
use crate::errors::{SitError, SitResult};
use std::sync::OnceLock;

pub const REF_PREFIX: &str = "refs/heads/";

/// Full ref path of a branch, e.g. `refs/heads/main`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymRefName(String);

impl SymRefName {
    pub fn new(name: String) -> Self {
        SymRefName(name)
    }

    pub fn as_ref_path(&self) -> &str {
        &self.0
    }

    /// The branch this ref names, if it lives under `refs/heads/`
    pub fn branch_name(&self) -> SitResult<BranchName> {
        match self.0.strip_prefix(REF_PREFIX) {
            Some(name) => BranchName::try_parse(name.to_string()),
            None => Err(SitError::InvalidBranchName(self.0.clone())),
        }
    }
}

impl From<&BranchName> for SymRefName {
    fn from(branch_name: &BranchName) -> Self {
        SymRefName(format!("{REF_PREFIX}{}", branch_name.as_ref()))
    }
}

impl std::fmt::Display for SymRefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> SitResult<Self> {
        static INVALID_NAME: OnceLock<regex::Regex> = OnceLock::new();

        if name.is_empty() {
            return Err(SitError::InvalidBranchName(name));
        }

        let re = INVALID_NAME.get_or_init(|| {
            regex::Regex::new(INVALID_BRANCH_NAME_REGEX).expect("branch name regex is valid")
        });

        if re.is_match(&name) {
            Err(SitError::InvalidBranchName(name))
        } else {
            Ok(Self(name))
        }
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
