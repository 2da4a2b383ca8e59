//! Conversation data structure for the fold engine
//!
//! A conversation is the set of message identifiers believed to belong to one
//! thread. It starts out seeded from a single message (its own Message-ID plus
//! every identifier in its References chain) and only ever grows by absorbing
//! other conversations during a fold.

use std::collections::HashSet;

/// Input contract for anything that can seed a [`Conversation`].
///
/// Header parsing and normalization happen upstream; implementors only expose
/// already-cleaned identifiers.
pub trait ThreadableMessage {
    /// Mailbox-local identifier, used when no Message-ID is available
    fn mail_id(&self) -> &str;

    /// Message-ID of the message, if it had one
    fn message_id(&self) -> Option<&str>;

    /// Reference chain, oldest ancestor first
    fn references(&self) -> Vec<&str>;

    /// Identifier the message is known by inside a conversation.
    ///
    /// `None` when neither the Message-ID nor the mail id is usable.
    fn own_id(&self) -> Option<&str> {
        self.message_id()
            .filter(|id| !id.is_empty())
            .or_else(|| Some(self.mail_id()).filter(|id| !id.is_empty()))
    }
}

/// One thread-in-progress.
///
/// Two conversations are mergeable when their identifier sets intersect.
/// Each conversation owns its set, so merging one never touches another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    /// Message identifiers known to belong to this thread
    message_ids: HashSet<String>,

    /// Mailbox-local ids of the messages this conversation subsumes,
    /// in the order they were absorbed
    mail_ids: Vec<String>,

    /// Lookup mirror of `mail_ids`
    seen_mail_ids: HashSet<String>,
}

impl Conversation {
    /// Seed a conversation from one message: `{own_id} ∪ {references...}`
    ///
    /// Empty identifiers are skipped, so a message with no usable id and no
    /// references yields an empty conversation that merges with nothing.
    pub fn new<M: ThreadableMessage + ?Sized>(message: &M) -> Self {
        let message_ids: HashSet<String> = message
            .references()
            .into_iter()
            .chain(message.own_id())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();

        let mut conversation = Conversation {
            message_ids,
            ..Conversation::default()
        };
        conversation.push_mail_id(message.mail_id().to_string());
        conversation
    }

    /// Build a conversation straight from a set of identifiers.
    ///
    /// No mail ids are attached. An empty iterator yields an empty
    /// conversation, which never merges with anything.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Conversation {
            message_ids: ids.into_iter().map(Into::into).collect(),
            ..Conversation::default()
        }
    }

    /// Current identifier set
    pub fn message_ids(&self) -> &HashSet<String> {
        &self.message_ids
    }

    /// Mail ids of the messages folded into this conversation
    pub fn mail_ids(&self) -> &[String] {
        &self.mail_ids
    }

    pub fn len(&self) -> usize {
        self.message_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.message_ids.is_empty()
    }

    /// True if the two conversations share at least one identifier
    pub fn intersects(&self, other: &Conversation) -> bool {
        let (small, large) = if self.message_ids.len() <= other.message_ids.len() {
            (&self.message_ids, &other.message_ids)
        } else {
            (&other.message_ids, &self.message_ids)
        };
        small.iter().any(|id| large.contains(id))
    }

    /// Absorb another conversation's identifiers and mail ids.
    ///
    /// Idempotent: merging the same conversation twice changes nothing
    /// the second time.
    pub fn merge_from(&mut self, other: &Conversation) {
        self.message_ids.extend(other.message_ids.iter().cloned());
        for mail_id in &other.mail_ids {
            if !self.seen_mail_ids.contains(mail_id) {
                self.push_mail_id(mail_id.clone());
            }
        }
    }

    /// Same as [`merge_from`](Self::merge_from) but consumes `other`,
    /// avoiding the clones
    pub fn absorb(&mut self, other: Conversation) {
        self.message_ids.extend(other.message_ids);
        for mail_id in other.mail_ids {
            self.push_mail_id(mail_id);
        }
    }

    fn push_mail_id(&mut self, mail_id: String) {
        if !mail_id.is_empty() && self.seen_mail_ids.insert(mail_id.clone()) {
            self.mail_ids.push(mail_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestMessage {
        mail_id: &'static str,
        message_id: Option<&'static str>,
        references: Vec<&'static str>,
    }

    impl ThreadableMessage for TestMessage {
        fn mail_id(&self) -> &str {
            self.mail_id
        }

        fn message_id(&self) -> Option<&str> {
            self.message_id
        }

        fn references(&self) -> Vec<&str> {
            self.references.clone()
        }
    }

    fn ids(conversation: &Conversation) -> Vec<&str> {
        let mut ids: Vec<&str> = conversation.message_ids().iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn test_new_includes_own_id_and_references() {
        let message = TestMessage {
            mail_id: "1",
            message_id: Some("C"),
            references: vec!["A", "B"],
        };

        let conversation = Conversation::new(&message);

        assert_eq!(ids(&conversation), vec!["A", "B", "C"]);
        assert_eq!(conversation.mail_ids(), &["1".to_string()]);
    }

    #[test]
    fn test_new_without_references_is_singleton() {
        let message = TestMessage {
            mail_id: "1",
            message_id: Some("X"),
            references: vec![],
        };

        let conversation = Conversation::new(&message);

        assert_eq!(ids(&conversation), vec!["X"]);
    }

    #[test]
    fn test_new_falls_back_to_mail_id() {
        let message = TestMessage {
            mail_id: "42",
            message_id: None,
            references: vec!["A"],
        };

        let conversation = Conversation::new(&message);

        assert_eq!(ids(&conversation), vec!["42", "A"]);
    }

    #[test]
    fn test_duplicate_references_coalesce() {
        let message = TestMessage {
            mail_id: "1",
            message_id: Some("B"),
            references: vec!["A", "A", "B"],
        };

        assert_eq!(Conversation::new(&message).len(), 2);
    }

    #[test]
    fn test_merge_from_is_idempotent() {
        let mut first = Conversation::from_ids(["A", "B"]);
        let second = Conversation::from_ids(["B", "C"]);

        first.merge_from(&second);
        let after_once = first.clone();
        first.merge_from(&second);

        assert_eq!(first, after_once);
        assert_eq!(ids(&first), vec!["A", "B", "C"]);
        // The source is untouched
        assert_eq!(ids(&second), vec!["B", "C"]);
    }

    #[test]
    fn test_intersects() {
        let a = Conversation::from_ids(["A", "B"]);
        let b = Conversation::from_ids(["B", "C"]);
        let c = Conversation::from_ids(["D"]);
        let empty = Conversation::from_ids(Vec::<String>::new());

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
        assert!(!empty.intersects(&a));
        assert!(!empty.intersects(&empty));
    }

    #[test]
    fn test_absorb_keeps_mail_ids_unique() {
        let mut first = Conversation::new(&TestMessage {
            mail_id: "1",
            message_id: Some("A"),
            references: vec![],
        });
        let second = Conversation::new(&TestMessage {
            mail_id: "2",
            message_id: Some("B"),
            references: vec!["A"],
        });

        first.merge_from(&second);
        first.absorb(second);

        assert_eq!(first.mail_ids(), &["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn test_message_without_usable_id_is_empty() {
        let message = TestMessage {
            mail_id: "",
            message_id: Some(""),
            references: vec![],
        };

        let conversation = Conversation::new(&message);

        assert!(conversation.is_empty());
        assert!(conversation.mail_ids().is_empty());
        assert_eq!(message.own_id(), None);
    }

    #[test]
    fn test_empty_message_id_falls_back_to_mail_id() {
        let message = TestMessage {
            mail_id: "9",
            message_id: Some(""),
            references: vec!["", "A"],
        };

        assert_eq!(message.own_id(), Some("9"));
        assert_eq!(ids(&Conversation::new(&message)), vec!["9", "A"]);
    }
}
