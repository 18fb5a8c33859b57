//! Password strength policy.

use crate::error::PolicyError;

/// Characters counted by [`Rule::Special`].
pub const SPECIAL_CHARACTERS: &str = "!@£$%^&*()_-+={}[]€#:;\"'|\\?/<>,.~`§±";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Minimum number of characters.
    MinLength(usize),
    Uppercase(usize),
    Lowercase(usize),
    /// ASCII digits `0-9` only.
    Digits(usize),
    Special(usize),
}

impl Rule {
    /// Returns the violation message, if any.
    pub fn check(&self, password: &str) -> Option<String> {
        match *self {
            Rule::MinLength(min) => (password.chars().count() < min).then(|| {
                format!("password does not meet the minimum length of {min} characters")
            }),
            Rule::Uppercase(min) => count_rule(password, min, "uppercase letter", char::is_uppercase),
            Rule::Lowercase(min) => count_rule(password, min, "lowercase letter", char::is_lowercase),
            Rule::Digits(min) => count_rule(password, min, "digit", |c| c.is_ascii_digit()),
            Rule::Special(min) => count_rule(password, min, "special character", |c| {
                SPECIAL_CHARACTERS.contains(c)
            }),
        }
    }
}

fn count_rule(
    password: &str,
    min: usize,
    group: &str,
    matches: impl Fn(char) -> bool,
) -> Option<String> {
    let count = password.chars().filter(|&c| matches(c)).count();
    if count >= min {
        return None;
    }
    let plural = if min > 1 { "s" } else { "" };
    Some(format!("password must have at least {min} {group}{plural}"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    rules: Vec<Rule>,
}

impl Default for Policy {
    fn default() -> Self {
        Self::new([
            Rule::MinLength(8),
            Rule::Uppercase(1),
            Rule::Lowercase(1),
            Rule::Digits(1),
            Rule::Special(1),
        ])
    }
}

impl Policy {
    pub fn new(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Replaces every length rule with `min`.
    pub fn with_min_length(mut self, min: usize) -> Self {
        self.rules.retain(|r| !matches!(r, Rule::MinLength(_)));
        self.rules.insert(0, Rule::MinLength(min));
        self
    }

    /// Checks every rule and reports all violations together.
    pub fn check(&self, password: &str) -> Result<(), PolicyError> {
        let violations: Vec<String> = self
            .rules
            .iter()
            .filter_map(|rule| rule.check(password))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(PolicyError::new(violations))
        }
    }
}
