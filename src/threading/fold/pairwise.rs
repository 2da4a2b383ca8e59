//! Pairwise fixpoint fold
//!
//! Scans for any two intersecting conversations, merges the later one into
//! the earlier one and drops it, repeating until a whole pass makes no
//! merge. Quadratic, but trivially correct, so it doubles as the reference
//! the union-find fold is checked against.
//!
//! The scan only works out the grouping. Each group is then rebuilt by
//! absorbing its members in input order, the same order the union-find fold
//! uses, so both strategies yield identical conversations.

use crate::threading::conversation::Conversation;

pub fn fold_pairwise(conversations: Vec<Conversation>) -> Vec<Conversation> {
    // Working identifier sets paired with the input positions they cover
    let mut groups: Vec<(Conversation, Vec<usize>)> = conversations
        .iter()
        .enumerate()
        .map(|(index, conversation)| {
            (Conversation::from_ids(conversation.message_ids().iter().cloned()), vec![index])
        })
        .collect();
    let mut passes = 0;

    loop {
        passes += 1;
        let mut merged_any = false;

        let mut i = 0;
        while i < groups.len() {
            let mut j = i + 1;
            while j < groups.len() {
                if groups[i].0.intersects(&groups[j].0) {
                    let (absorbed, members) = groups.remove(j);
                    groups[i].0.absorb(absorbed);
                    groups[i].1.extend(members);
                    merged_any = true;
                    // groups[i] grew, so rescan everything after it
                    j = i + 1;
                } else {
                    j += 1;
                }
            }
            i += 1;
        }

        if !merged_any {
            break;
        }
    }

    log::debug!(
        "pairwise fold: {} conversations after {} passes",
        groups.len(),
        passes
    );

    let mut slots: Vec<Option<Conversation>> = conversations.into_iter().map(Some).collect();

    groups
        .into_iter()
        .filter_map(|(_, mut members)| {
            members.sort_unstable();
            let mut members = members.into_iter().filter_map(|index| slots[index].take());
            let mut folded = members.next()?;
            for conversation in members {
                folded.absorb(conversation);
            }
            Some(folded)
        })
        .collect()
}
