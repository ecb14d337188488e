use std::collections::BTreeMap;

/// Mapping from frame identifier (e.g. `"L"`, `"R"`) to absolute URL
///
/// Built once from the frameset root page and never modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameMap {
    frames: BTreeMap<String, String>,
}

impl FrameMap {
    /// Returns the URL registered for a frame identifier
    pub fn get(&self, id: &str) -> Option<&str> {
        self.frames.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame identifiers in sorted order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.frames.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.frames.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FrameMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            frames: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
