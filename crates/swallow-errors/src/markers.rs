use rustc_hash::FxHashMap;
use text_size::TextSize;

const OPEN: &str = "#^";
const CLOSE: &str = "^#";

/// Zero-width named positions written as `#^NAME^#` inside source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markers {
    offsets: FxHashMap<String, TextSize>,
}

impl Markers {
    /// Removes every marker from `text`, returning the clean text and the
    /// offset each marker had in it.
    pub fn extract(text: &str) -> (String, Markers) {
        let mut clean = String::with_capacity(text.len());
        let mut markers = Markers::default();
        let mut rest = text;

        while let Some(start) = rest.find(OPEN) {
            let after_open = &rest[start + OPEN.len()..];
            let Some(end) = after_open.find(CLOSE) else { break };
            let name = &after_open[..end];
            if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                clean.push_str(&rest[..start + OPEN.len()]);
                rest = after_open;
                continue;
            }
            clean.push_str(&rest[..start]);
            markers.offsets.insert(name.to_owned(), TextSize::of(clean.as_str()));
            rest = &after_open[end + CLOSE.len()..];
        }
        clean.push_str(rest);

        (clean, markers)
    }

    pub fn get(&self, name: &str) -> Option<TextSize> {
        self.offsets.get(name).copied()
    }

    /// Markers ordered by offset, then by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, TextSize)> {
        let mut markers: Vec<_> =
            self.offsets.iter().map(|(name, offset)| (name.as_str(), *offset)).collect();
        markers.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(b.0)));
        markers.into_iter()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_markers() {
        let (text, markers) = Markers::extract("#^START^#a ? b :#^DIAG^#");
        assert_eq!(text, "a ? b :");
        assert_eq!(markers.get("START"), Some(0.into()));
        assert_eq!(markers.get("DIAG"), Some(7.into()));
        assert_eq!(markers.iter().map(|(name, _)| name).collect::<Vec<_>>(), vec!["START", "DIAG"]);
    }

    #[test]
    fn leaves_raw_strings_alone() {
        let (text, markers) = Markers::extract("#^X^#\"#^ not a marker \"#");
        assert_eq!(text, "\"#^ not a marker \"#");
        assert_eq!(markers.get("X"), Some(0.into()));
    }
}
