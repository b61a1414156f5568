use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::obligation::Obligation;
use crate::errors::EngineError;
use crate::ledger::CategoryMain;

/// A resolved subcategory entry from the category store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subcategory {
    pub id: Uuid,
    pub name: String,
}

/// How an obligation points at its subcategory: either already resolved to an
/// id, or by a name the table can look up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum SubcategoryRef {
    Id(Uuid),
    Name(String),
}

impl SubcategoryRef {
    pub fn describe(&self) -> String {
        match self {
            SubcategoryRef::Id(id) => id.to_string(),
            SubcategoryRef::Name(name) => name.clone(),
        }
    }
}

/// Read-only lookup table `CategoryMain → subcategories`, owned by the
/// external category store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubcategoryTable {
    entries: HashMap<CategoryMain, Vec<Subcategory>>,
}

impl SubcategoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, main: CategoryMain, subcategory: Subcategory) {
        self.entries.entry(main).or_default().push(subcategory);
    }

    pub fn subcategories(&self, main: CategoryMain) -> &[Subcategory] {
        self.entries.get(&main).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Resolves an obligation's subcategory reference against the table.
    ///
    /// Failure is a hard error, never a silent skip: a dropped subcategory
    /// reference would corrupt budget totals invisibly.
    pub fn resolve(&self, obligation: &Obligation) -> Result<&Subcategory, EngineError> {
        let candidates = self.subcategories(obligation.category_main);
        let found = match &obligation.subcategory {
            SubcategoryRef::Id(id) => candidates.iter().find(|sub| sub.id == *id),
            SubcategoryRef::Name(name) => candidates
                .iter()
                .find(|sub| sub.name.eq_ignore_ascii_case(name)),
        };
        found.ok_or_else(|| EngineError::SubcategoryUnresolved {
            obligation_id: obligation.id,
            reference: obligation.subcategory.describe(),
        })
    }
}
