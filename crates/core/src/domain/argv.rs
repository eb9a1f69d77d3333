// Argument vector passed to an external tool

use std::path::Path;

use super::error::BuildError;

/// Ordered command-line tokens for one external tool invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentVector(Vec<String>);

impl ArgumentVector {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, arg: impl Into<String>) {
        self.0.push(arg.into());
    }

    /// Push a flag followed by its value as two separate tokens
    pub fn push_pair(&mut self, flag: &str, value: impl Into<String>) {
        self.0.push(flag.to_string());
        self.0.push(value.into());
    }

    /// Push `path` unchanged; paths that are not UTF-8 are refused rather
    /// than lossily rewritten
    pub fn push_path(&mut self, path: &Path) -> Result<(), BuildError> {
        let token = path
            .to_str()
            .ok_or_else(|| BuildError::NonUtf8Path(path.to_path_buf()))?;
        self.0.push(token.to_string());
        Ok(())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|a| a == token)
    }

    pub fn position(&self, token: &str) -> Option<usize> {
        self.0.iter().position(|a| a == token)
    }

    /// Token right after `flag`, if both are present
    pub fn value_of(&self, flag: &str) -> Option<&str> {
        self.position(flag)
            .and_then(|i| self.0.get(i + 1))
            .map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for ArgumentVector {
    fn from(args: Vec<String>) -> Self {
        Self(args)
    }
}

impl<'a> IntoIterator for &'a ArgumentVector {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for ArgumentVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}
