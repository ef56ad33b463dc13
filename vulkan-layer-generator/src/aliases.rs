use std::cmp::Ordering;
use std::collections::HashMap;

use log::debug;

const SUFFIX_PRIORITY: &[&str] = &["", "KHR", "EXT"];

fn suffix_rank(suffix: &str) -> usize {
    SUFFIX_PRIORITY
        .iter()
        .position(|s| *s == suffix)
        .unwrap_or(SUFFIX_PRIORITY.len())
}

/// decides which of two names should represent the group. `Less` means `a` wins.
fn compare_names(a: &str, b: &str) -> Ordering {
    let common = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(a, b)| a == b)
        .count();
    suffix_rank(&a[common..])
        .cmp(&suffix_rank(&b[common..]))
        .then_with(|| a.cmp(b))
}

/// union-find over command names. nodes live in an arena and refer to their parent by index.
#[derive(Debug, Default)]
pub struct CommandAliases {
    indices: HashMap<String, usize>,
    names: Vec<String>,
    parents: Vec<Option<usize>>,
}

impl CommandAliases {
    pub fn new() -> Self {
        Self::default()
    }

    fn index_of(&mut self, name: &str) -> usize {
        if let Some(index) = self.indices.get(name) {
            return *index;
        }
        let index = self.names.len();
        self.names.push(name.to_string());
        self.parents.push(None);
        self.indices.insert(name.to_string(), index);
        index
    }

    fn root(&mut self, mut index: usize) -> usize {
        while let Some(parent) = self.parents[index] {
            // path halving
            if let Some(grandparent) = self.parents[parent] {
                self.parents[index] = Some(grandparent);
            }
            index = parent;
        }
        index
    }

    /// registers `name` and, if given, merges it with the group of `alias`.
    pub fn add_alias(&mut self, name: &str, alias: Option<&str>) {
        let a = self.index_of(name);
        let Some(alias) = alias else {
            return;
        };
        let b = self.index_of(alias);
        let (a, b) = (self.root(a), self.root(b));
        if a == b {
            return;
        }
        let (parent, child) = match compare_names(&self.names[a], &self.names[b]) {
            Ordering::Greater => (b, a),
            _ => (a, b),
        };
        debug!(
            "{} is now represented by {}",
            self.names[child], self.names[parent]
        );
        self.parents[child] = Some(parent);
    }

    pub fn representative(&mut self, name: &str) -> Option<&str> {
        let index = *self.indices.get(name)?;
        let root = self.root(index);
        Some(&self.names[root])
    }

    pub fn freeze(mut self) -> FrozenAliases {
        let mut representatives: HashMap<String, String> = HashMap::with_capacity(self.names.len());
        for index in 0..self.names.len() {
            let root = self.root(index);
            representatives.insert(self.names[index].clone(), self.names[root].clone());
        }
        FrozenAliases { representatives }
    }
}

/// the alias forest after the build phase; read only.
#[derive(Debug, Clone, Default)]
pub struct FrozenAliases {
    representatives: HashMap<String, String>,
}

impl FrozenAliases {
    pub fn representative(&self, name: &str) -> Option<&str> {
        self.representatives.get(name).map(String::as_str)
    }

    /// `None` for unregistered names.
    pub fn is_aliased(&self, name: &str) -> Option<bool> {
        self.representative(name)
            .map(|representative| representative != name)
    }
}
