use super::string_length::STRING_TOO_SHORT;
use super::{violation, Range, Violations};
use crate::details;
use crate::secret::Secret;

/// 敏感值的最小长度，没有上界
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretMinLength {
    min: usize,
}

impl SecretMinLength {
    pub fn new(min: usize) -> Self {
        Self { min }
    }
}

impl Range for SecretMinLength {
    type Value = Secret;

    fn below_min_border(&self, value: &Secret) -> bool {
        value.len() < self.min
    }

    fn above_max_border(&self, _value: &Secret) -> bool {
        false
    }

    fn min_border_violation(&self) -> Violations {
        violation(STRING_TOO_SHORT, details! { "minLength" => self.min })
    }

    fn max_border_violation(&self) -> Violations {
        Violations::new()
    }
}
