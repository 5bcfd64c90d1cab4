use std::collections::{HashMap, HashSet};

/// Dedup state for one event category (parties or field trips)
#[derive(Debug, Default)]
pub struct CategoryLedger {
    used_as_primary: HashSet<String>,
    used_as_alternate: HashSet<String>,
    used_in_event: HashMap<String, HashSet<String>>, // event name -> primary name keys
}

/// Which eligibility rule an alternate walk applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlternateStage {
    /// Skip anyone already holding a primary slot in the category
    Strict,
    /// Also accept primaries from other events of the category
    Relaxed,
}

impl CategoryLedger {
    pub fn is_primary(&self, key: &str) -> bool {
        self.used_as_primary.contains(key)
    }

    pub fn is_alternate(&self, key: &str) -> bool {
        self.used_as_alternate.contains(key)
    }

    pub fn is_used_in_event(&self, event_name: &str, key: &str) -> bool {
        self.used_in_event
            .get(event_name)
            .map(|keys| keys.contains(key))
            .unwrap_or(false)
    }

    pub fn record_primary(&mut self, event_name: &str, key: String) {
        self.used_in_event
            .entry(event_name.to_string())
            .or_default()
            .insert(key.clone());
        self.used_as_primary.insert(key);
    }

    pub fn record_alternate(&mut self, key: String) {
        self.used_as_alternate.insert(key);
    }
}

/// Whether `key` may be taken as an alternate for `event_name`
pub fn alternate_eligible(ledger: &CategoryLedger, event_name: &str, key: &str, stage: AlternateStage) -> bool {
    let free_of_primaries = match stage {
        AlternateStage::Strict => !ledger.is_primary(key),
        AlternateStage::Relaxed => true,
    };

    free_of_primaries && !ledger.is_used_in_event(event_name, key) && !ledger.is_alternate(key)
}
