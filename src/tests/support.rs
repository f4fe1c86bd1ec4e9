use crate::node::{Node, Section};

/// Minimal item for exercising the engines: a key plus a body that stands in for content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Item {
    pub key: String,
    pub body: String,
}

impl Node for Item {
    fn key(&self) -> &str {
        &self.key
    }

    fn content_eq(&self, other: &Self) -> bool {
        self == other
    }
}

pub(crate) fn item(key: &str) -> Item {
    Item {
        key: key.to_string(),
        body: String::new(),
    }
}

pub(crate) fn item_with(key: &str, body: &str) -> Item {
    Item {
        key: key.to_string(),
        body: body.to_string(),
    }
}

/// Section `key` with children named `key.0`, `key.1`, ...
pub(crate) fn section(key: &str, children: usize) -> Section<Item, Item> {
    let nodes = (0..children).map(|i| item(&format!("{key}.{i}"))).collect();
    Section::new(item(key), nodes)
}

pub(crate) fn keys<T: Node>(items: &[T]) -> Vec<String> {
    items.iter().map(|i| i.key().to_string()).collect()
}
