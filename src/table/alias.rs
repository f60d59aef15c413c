// src/table/alias.rs

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

use crate::error::{Error, Result};

/// Synonym table mapping differently worded row labels onto one canonical
/// label, e.g. `Camera` ← {`Camera`, `CSI Camera`}.
///
/// Construction rejects tables where a synonym belongs to two groups or is
/// itself the canonical label of another group, so [`canonical`] is
/// idempotent and independent of the order groups were declared in.
///
/// [`canonical`]: LabelAliases::canonical
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, Vec<String>>")]
pub struct LabelAliases {
    synonyms: HashMap<String, String>,
}

impl LabelAliases {
    pub fn new<I, S>(groups: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<S>)>,
        S: Into<String>,
    {
        let groups: Vec<(String, Vec<String>)> = groups
            .into_iter()
            .map(|(c, syn)| (c.into(), syn.into_iter().map(Into::into).collect()))
            .collect();

        let mut synonyms: HashMap<String, String> = HashMap::new();
        for (canonical, members) in &groups {
            for member in members {
                if let Some(prev) = synonyms.get(member) {
                    if prev != canonical {
                        return Err(Error::Config(format!(
                            "label `{}` is aliased to both `{}` and `{}`",
                            member, prev, canonical
                        )));
                    }
                }
                synonyms.insert(member.clone(), canonical.clone());
            }
        }

        for (canonical, _) in &groups {
            if let Some(target) = synonyms.get(canonical) {
                if target != canonical {
                    return Err(Error::Config(format!(
                        "canonical label `{}` is itself an alias of `{}`",
                        canonical, target
                    )));
                }
            }
        }

        Ok(Self { synonyms })
    }

    /// Canonical form of `label`; labels outside every group map to
    /// themselves.
    pub fn canonical<'a>(&'a self, label: &'a str) -> &'a str {
        self.synonyms.get(label).map(String::as_str).unwrap_or(label)
    }

    pub fn is_empty(&self) -> bool {
        self.synonyms.is_empty()
    }
}

impl TryFrom<BTreeMap<String, Vec<String>>> for LabelAliases {
    type Error = Error;

    fn try_from(groups: BTreeMap<String, Vec<String>>) -> Result<Self> {
        LabelAliases::new(groups)
    }
}
