//! Image link discovery and rewriting
//!
//! Only one construct is recognized: `![alt](target)`, on a single line. The
//! target is taken exactly as written; nothing is URL-decoded or normalized.
//! A target may contain one level of balanced parentheses, as in
//! `![x](https://host/Foo_(bar).png)`; deeper nesting ends the target early.

use regex::{Captures, Regex};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

static IMAGE_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Captures:
    // 1: everything up to the target, `![alt](`
    // 2: alt text
    // 3: target, with at most one level of nested parentheses
    Regex::new(r"(!\[([^\]\n]*)\]\()((?:[^()\n]|\([^()\n]*\))+)\)").unwrap()
});

/// Mapping from an image target to its replacement.
///
/// Each target is in one of three states:
///
/// - **absent**: the target is unknown and is left as written;
/// - **empty value** (`""`): the target is known but deliberately kept as
///   written. This is *not* a request to delete the entry;
/// - **non-empty value**: the target is replaced by the value.
///
/// Entries keep first-insertion order, so persisted configs stay stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl LinkMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, target: &str) -> bool {
        self.index.contains_key(target)
    }

    /// Stored value for `target`, which may be the empty sentinel
    pub fn get(&self, target: &str) -> Option<&str> {
        self.index
            .get(target)
            .map(|&i| self.entries[i].1.as_str())
    }

    /// The value `target` should be rewritten to, if any
    pub fn replacement(&self, target: &str) -> Option<&str> {
        self.get(target).filter(|value| !value.is_empty())
    }

    /// Set the value for `target`. New targets go to the end; existing ones
    /// keep their position. Returns the previous value.
    pub fn insert(&mut self, target: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let target = target.into();
        let value = value.into();
        match self.index.get(&target) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.index.insert(target.clone(), self.entries.len());
                self.entries.push((target, value));
                None
            }
        }
    }

    /// Add `target` with the empty sentinel unless it is already known
    pub fn insert_if_absent(&mut self, target: impl Into<String>) -> bool {
        let target = target.into();
        if self.contains_key(&target) {
            return false;
        }
        self.insert(target, String::new());
        true
    }

    /// Add every target of `other` that this map lacks, keeping existing values
    pub fn merge_missing(&mut self, other: &LinkMap) {
        for (target, value) in other.iter() {
            if !self.contains_key(target) {
                self.insert(target, value);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LinkMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut links = LinkMap::new();
        for (k, v) in iter {
            links.insert(k, v);
        }
        links
    }
}

impl Serialize for LinkMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (target, value) in self.iter() {
            map.serialize_entry(target, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LinkMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LinkMapVisitor;

        impl<'de> Visitor<'de> for LinkMapVisitor {
            type Value = LinkMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of image targets to replacements")
            }

            fn visit_unit<E>(self) -> Result<LinkMap, E> {
                Ok(LinkMap::new())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<LinkMap, A::Error> {
                let mut links = LinkMap::new();
                while let Some((target, value)) = access.next_entry::<String, Option<String>>()? {
                    links.insert(target, value.unwrap_or_default());
                }
                Ok(links)
            }
        }

        deserializer.deserialize_any(LinkMapVisitor)
    }
}

/// Every distinct image target in `markdown`, mapped to the empty sentinel
pub fn scan_image_links(markdown: &str) -> LinkMap {
    let mut links = LinkMap::new();
    for caps in IMAGE_LINK_RE.captures_iter(markdown) {
        if let Some(target) = caps.get(3) {
            links.insert_if_absent(target.as_str());
        }
    }
    links
}

/// Replace each image target that has a non-empty value in `links`.
///
/// Only the target inside `(...)` changes; alt text, plain links and all other
/// bytes are copied through.
pub fn rewrite_image_links(markdown: &str, links: &LinkMap) -> String {
    IMAGE_LINK_RE
        .replace_all(markdown, |caps: &Captures| match links.replacement(&caps[3]) {
            Some(replacement) => format!("{}{})", &caps[1], replacement),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Point targets at `prefix + target`.
///
/// Without `force` only empty values are filled, so curated replacements
/// survive. With `force` every value is overwritten.
pub fn prefix_links(mut links: LinkMap, prefix: &str, force: bool) -> LinkMap {
    for (target, value) in links.entries.iter_mut() {
        if force || value.is_empty() {
            *value = format!("{prefix}{target}");
        }
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BODY: &str = "![image](./image.png)\n[Google](www.google.com)\n![image](./image-2.png)\n";

    #[test]
    fn test_scan_collects_targets_in_order() {
        let links = scan_image_links(BODY);
        let targets: Vec<_> = links.iter().collect();
        assert_eq!(targets, vec![("./image.png", ""), ("./image-2.png", "")]);
    }

    #[test]
    fn test_scan_deduplicates() {
        let links = scan_image_links("![a](x.png) ![b](y.png) ![c](x.png)");
        assert_eq!(links.keys().collect::<Vec<_>>(), vec!["x.png", "y.png"]);
    }

    #[test]
    fn test_scan_empty_body() {
        let links = scan_image_links("no images, only [a link](b.png)");
        assert!(links.is_empty());
    }

    #[test]
    fn test_scan_keeps_target_verbatim() {
        let links = scan_image_links("![x](./my%20image.png)");
        assert!(links.contains_key("./my%20image.png"));
    }

    #[test]
    fn test_scan_stays_on_one_line() {
        let links = scan_image_links("Press ![ to start\n\nThen [docs](./guide.md) and (x)\n");
        assert!(links.is_empty());

        let links = scan_image_links("![shot](./shot.png\nSee the note (below) for details.\n");
        assert!(links.is_empty());
    }

    #[test]
    fn test_rewrite_ignores_link_after_stray_bang_bracket() {
        let body = "Press ![ to start\n\nThen [docs](./guide.md).\n";
        let links: LinkMap = [("./guide.md", "https://elsewhere/")].into_iter().collect();
        assert_eq!(rewrite_image_links(body, &links), body);
    }

    #[test]
    fn test_target_with_balanced_parens() {
        let body = "![x](https://x/Foo_(bar).png) and ![y](y.png)";
        let links = scan_image_links(body);
        assert_eq!(
            links.keys().collect::<Vec<_>>(),
            vec!["https://x/Foo_(bar).png", "y.png"]
        );

        let links: LinkMap = [("https://x/Foo_(bar).png", "new.png")].into_iter().collect();
        assert_eq!(rewrite_image_links(body, &links), "![x](new.png) and ![y](y.png)");
    }

    #[test]
    fn test_rewrite_selectivity() {
        let links: LinkMap = [("./image.png", "./a/image.png"), ("./image-2.png", "")]
            .into_iter()
            .collect();
        assert_eq!(
            rewrite_image_links(BODY, &links),
            "![image](./a/image.png)\n[Google](www.google.com)\n![image](./image-2.png)\n"
        );
    }

    #[test]
    fn test_rewrite_leaves_plain_links_and_text() {
        let body = "See ./image.png and [it](./image.png) or ![it](./image.png).";
        let links: LinkMap = [("./image.png", "new.png")].into_iter().collect();
        assert_eq!(
            rewrite_image_links(body, &links),
            "See ./image.png and [it](./image.png) or ![it](new.png)."
        );
    }

    #[test]
    fn test_rewrite_preserves_alt_text_matching_target() {
        let links: LinkMap = [("a.png", "b.png")].into_iter().collect();
        assert_eq!(rewrite_image_links("![a.png](a.png)", &links), "![a.png](b.png)");
    }

    #[test]
    fn test_rewrite_unknown_target_untouched() {
        let links: LinkMap = [("other.png", "x.png")].into_iter().collect();
        assert_eq!(rewrite_image_links(BODY, &links), BODY);
    }

    #[test]
    fn test_prefix_fill_missing() {
        let links: LinkMap = [("./image/image.png", "image.png"), ("./image/picture.jpg", "")]
            .into_iter()
            .collect();
        let prefixed = prefix_links(links, "https://host/", false);
        assert_eq!(prefixed.get("./image/image.png"), Some("image.png"));
        assert_eq!(
            prefixed.get("./image/picture.jpg"),
            Some("https://host/./image/picture.jpg")
        );
    }

    #[test]
    fn test_prefix_force_overwrites() {
        let links: LinkMap = [("./image/image.png", "image.png"), ("./image/picture.jpg", "")]
            .into_iter()
            .collect();
        let prefixed = prefix_links(links, "https://host/", true);
        assert_eq!(
            prefixed.iter().collect::<Vec<_>>(),
            vec![
                ("./image/image.png", "https://host/./image/image.png"),
                ("./image/picture.jpg", "https://host/./image/picture.jpg"),
            ]
        );
    }

    #[test]
    fn test_empty_sentinel_is_not_absence() {
        let mut links = LinkMap::new();
        links.insert("kept.png", "");
        assert!(links.contains_key("kept.png"));
        assert_eq!(links.get("kept.png"), Some(""));
        assert_eq!(links.replacement("kept.png"), None);
        assert_eq!(links.get("missing.png"), None);
    }

    #[test]
    fn test_insert_keeps_position() {
        let mut links: LinkMap = [("a", ""), ("b", "")].into_iter().collect();
        assert_eq!(links.insert("a", "z"), Some(String::new()));
        assert_eq!(links.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(links.get("a"), Some("z"));
    }

    #[test]
    fn test_merge_missing_keeps_existing_values() {
        let mut config: LinkMap = [("a.png", "cdn/a.png")].into_iter().collect();
        let scanned: LinkMap = [("b.png", ""), ("a.png", "")].into_iter().collect();
        config.merge_missing(&scanned);
        assert_eq!(
            config.iter().collect::<Vec<_>>(),
            vec![("a.png", "cdn/a.png"), ("b.png", "")]
        );
    }

    #[test]
    fn test_yaml_keeps_document_order() {
        let yaml = "\"./z.png\": \"\"\n\"./a.png\": new.png\n\"./m.png\": ~\n";
        let links: LinkMap = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            links.iter().collect::<Vec<_>>(),
            vec![("./z.png", ""), ("./a.png", "new.png"), ("./m.png", "")]
        );

        let out = serde_yaml::to_string(&links).unwrap();
        let back: LinkMap = serde_yaml::from_str(&out).unwrap();
        assert_eq!(back, links);
    }
}
