//! Near-linear fold using a disjoint-set keyed by message identifier
//!
//! ## Algorithm
//!
//! 1. **Union**: every identifier of a conversation is unioned with that
//!    conversation's first identifier, so co-occurring ids share a root
//! 2. **Group**: walk the input in order and bucket each conversation by
//!    the root of any of its ids
//! 3. **Merge**: the first conversation seen for a root absorbs the rest
//!
//! Surviving conversations keep the relative order of their first member.

use std::collections::HashMap;

use super::disjoint_set::DisjointSet;
use crate::threading::conversation::Conversation;

pub fn fold_union_find(conversations: Vec<Conversation>) -> Vec<Conversation> {
    let capacity = conversations.iter().map(Conversation::len).sum();
    let mut disjoint_set = DisjointSet::with_capacity(capacity);

    // Step 1: union all identifiers that co-occur in one conversation
    for conversation in &conversations {
        let mut message_ids = conversation.message_ids().iter();
        if let Some(first_id) = message_ids.next() {
            let first_index = disjoint_set.insert(first_id);
            for message_id in message_ids {
                let index = disjoint_set.insert(message_id);
                disjoint_set.union(first_index, index);
            }
        }
    }

    // Step 2 + 3: bucket by representative, merging into the first member
    let mut slot_by_root: HashMap<usize, usize> = HashMap::new();
    let mut folded: Vec<Conversation> = Vec::new();

    for conversation in conversations {
        let root = conversation
            .message_ids()
            .iter()
            .next()
            .and_then(|message_id| disjoint_set.find_id(message_id));

        // Empty conversations match nothing and pass through untouched
        let Some(root) = root else {
            folded.push(conversation);
            continue;
        };

        match slot_by_root.get(&root) {
            Some(&slot) => folded[slot].absorb(conversation),
            None => {
                slot_by_root.insert(root, folded.len());
                folded.push(conversation);
            }
        }
    }

    log::debug!(
        "union-find fold: {} distinct ids into {} conversations",
        disjoint_set.len(),
        folded.len()
    );

    folded
}
