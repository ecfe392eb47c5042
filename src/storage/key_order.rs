use crate::config::KeyOrderPolicy;

/// Creation-order sequence of key names, used for positional lookups (`key(index)`).
///
/// Under [`KeyOrderPolicy::Historical`] every append is recorded, duplicates included,
/// and nothing is ever pruned, so indices stay stable for the lifetime of the storage.
/// Under [`KeyOrderPolicy::Live`] the sequence behaves as an ordered set.
#[derive(Debug, Clone, Default)]
pub struct KeyOrder {
    names: Vec<String>,
    policy: KeyOrderPolicy,
}

impl KeyOrder {
    pub fn new(policy: KeyOrderPolicy) -> Self {
        Self {
            names: Vec::new(),
            policy,
        }
    }

    pub fn policy(&self) -> KeyOrderPolicy {
        self.policy
    }

    pub fn append(&mut self, name: &str) {
        if self.policy == KeyOrderPolicy::Live && self.contains(name) {
            return;
        }
        self.names.push(name.to_string());
    }

    /// Name at `index`, if any.
    pub fn at(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Drops `name` from the sequence. Historical orders are never pruned.
    pub fn prune(&mut self, name: &str) {
        if self.policy == KeyOrderPolicy::Live {
            self.names.retain(|n| n != name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn historical_keeps_duplicates_and_never_prunes() {
        let mut order = KeyOrder::new(KeyOrderPolicy::Historical);
        order.append("a");
        order.append("b");
        order.append("a");
        order.prune("a");
        assert_eq!(order.names(), &["a", "b", "a"]);
        assert_eq!(order.at(2), Some("a"));
        assert_eq!(order.at(3), None);
    }

    #[test]
    fn live_behaves_as_ordered_set() {
        let mut order = KeyOrder::new(KeyOrderPolicy::Live);
        order.append("a");
        order.append("b");
        order.append("a");
        assert_eq!(order.names(), &["a", "b"]);

        order.prune("a");
        assert_eq!(order.at(0), Some("b"));
        assert_eq!(order.names(), &["b"]);

        order.prune("missing");
        assert_eq!(order.names(), &["b"]);
    }
}
