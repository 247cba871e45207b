// src/core/words.rs
// Word iterator over inscription text.
// A word is a maximal run of alphanumeric chars; everything else (spaces,
// editorial brackets, punctuation, slashes) separates words.

pub struct Words<'a> {
    s: &'a str,
    i: usize,
}

impl<'a> Words<'a> {
    pub fn new(s: &'a str) -> Self { Self { s, i: 0 } }
}

impl<'a> Iterator for Words<'a> {
    /// Byte span and text of one word.
    type Item = (usize, usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.s[self.i..];
        let (off, _) = rest.char_indices().find(|(_, c)| c.is_alphanumeric())?;
        let start = self.i + off;
        let len = self.s[start..]
            .char_indices()
            .find(|(_, c)| !c.is_alphanumeric())
            .map(|(j, _)| j)
            .unwrap_or(self.s.len() - start);
        let end = start + len;
        self.i = end;
        Some((start, end, &self.s[start..end]))
    }
}
