use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One record of the problem catalog, as served by AtCoder Problems.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub id: String,
    /// Group identifier, e.g. `abc300`.
    pub contest_id: String,
    /// Ordinal label inside the contest, e.g. `A` or `Ex`.
    pub problem_index: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Read-only problem list with an id lookup table built once at load time.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    problems: Vec<Problem>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(problems: Vec<Problem>) -> Self {
        let mut kept: Vec<Problem> = Vec::with_capacity(problems.len());
        let mut by_id: HashMap<String, usize> = HashMap::with_capacity(problems.len());
        for p in problems {
            if by_id.contains_key(&p.id) {
                tracing::warn!(id = %p.id, "duplicate problem id in catalog; keeping first");
                continue;
            }
            by_id.insert(p.id.clone(), kept.len());
            kept.push(p);
        }
        Catalog {
            problems: kept,
            by_id,
        }
    }

    /// Decode the provider payload (a JSON array of problems).
    pub fn from_json(text: &str) -> Result<Self> {
        let problems: Vec<Problem> = serde_json::from_str(text)?;
        Ok(Catalog::new(problems))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.problems)?)
    }

    /// Keep only problems whose contest id starts with `prefix`.
    pub fn retain_prefix(self, prefix: &str) -> Self {
        let before = self.problems.len();
        let problems: Vec<Problem> = self
            .problems
            .into_iter()
            .filter(|p| p.contest_id.starts_with(prefix))
            .collect();
        tracing::debug!(before, after = problems.len(), prefix, "filtered catalog");
        Catalog::new(problems)
    }

    pub fn get(&self, id: &str) -> Option<&Problem> {
        self.by_id.get(id).map(|&i| &self.problems[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}
