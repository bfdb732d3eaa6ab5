use super::Session;
use crate::error::{SessionError, SessionResult};

/// Ordered set of unique, non-empty names. Used for both the participant
/// roster and the category list.
#[derive(Debug, Clone)]
pub struct NameList {
    kind: &'static str,
    names: Vec<String>,
}

impl NameList {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            names: Vec::new(),
        }
    }

    /// Append a trimmed name. Matching is exact and case-sensitive.
    pub fn add(&mut self, raw: &str) -> SessionResult<&[String]> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(SessionError::Validation(self.kind));
        }
        if self.contains(name) {
            return Err(SessionError::Duplicate(name.to_string()));
        }
        self.names.push(name.to_string());
        Ok(&self.names)
    }

    /// Remove a name; returns whether it was present
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        self.names.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.names.clone()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }
}

impl Session {
    /// Add a participant (setup only)
    pub fn add_participant(&mut self, name: &str) -> SessionResult<Vec<String>> {
        self.ensure_unlocked("participants")?;
        let roster = self.participants.add(name)?.to_vec();
        self.bump();
        Ok(roster)
    }

    /// Remove a participant (setup only). Unknown names are a no-op.
    pub fn remove_participant(&mut self, name: &str) -> SessionResult<Vec<String>> {
        self.ensure_unlocked("participants")?;
        if self.participants.remove(name) {
            self.bump();
        }
        Ok(self.participants.to_vec())
    }

    /// Add an award category (setup only)
    pub fn add_category(&mut self, name: &str) -> SessionResult<Vec<String>> {
        self.ensure_unlocked("categories")?;
        let categories = self.categories.add(name)?.to_vec();
        self.bump();
        Ok(categories)
    }

    /// Remove an award category (setup only). Unknown names are a no-op.
    pub fn remove_category(&mut self, name: &str) -> SessionResult<Vec<String>> {
        self.ensure_unlocked("categories")?;
        if self.categories.remove(name) {
            self.bump();
        }
        Ok(self.categories.to_vec())
    }

    fn ensure_unlocked(&self, what: &'static str) -> SessionResult<()> {
        if self.phase.is_setup() {
            Ok(())
        } else {
            Err(SessionError::Locked {
                what,
                stage: self.phase.stage(),
            })
        }
    }
}
