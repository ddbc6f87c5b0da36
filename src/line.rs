//! Line representation and text operations

/// A single line of text in a buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    /// The text content (without trailing newline)
    text: String,
}

impl Line {
    /// Create a new empty line
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a line from a string
    pub fn from_string(s: String) -> Self {
        Self { text: s }
    }

    /// Get the text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the line is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether `byte_pos` is a valid insertion/deletion point
    pub fn is_boundary(&self, byte_pos: usize) -> bool {
        self.text.is_char_boundary(byte_pos)
    }

    /// Insert a string at byte position
    pub fn insert_str(&mut self, byte_pos: usize, s: &str) {
        self.text.insert_str(byte_pos, s);
    }

    /// Delete a range of bytes and return the deleted text
    pub fn delete_range(&mut self, start: usize, end: usize) -> String {
        self.text.drain(start..end).collect()
    }

    /// Split the line at byte position, returning the remainder
    pub fn split_off(&mut self, byte_pos: usize) -> Line {
        let remainder = self.text.split_off(byte_pos);
        Line::from_string(remainder)
    }

    /// Append another line's content to this line
    pub fn append(&mut self, other: Line) {
        self.text.push_str(other.text());
    }

    /// Clear the line content
    pub fn clear(&mut self) {
        self.text.clear();
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self::from_string(s.to_string())
    }
}

impl From<String> for Line {
    fn from(s: String) -> Self {
        Self::from_string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line_operations() {
        let mut line = Line::from("Hello");
        assert_eq!(line.text(), "Hello");
        assert_eq!(line.len(), 5);
        assert!(!line.is_empty());

        line.insert_str(5, ", World");
        assert_eq!(line.text(), "Hello, World");
    }

    #[test]
    fn test_boundaries() {
        let line = Line::from("café");
        assert!(line.is_boundary(3));
        assert!(!line.is_boundary(4));
        assert!(line.is_boundary(5));
    }

    #[test]
    fn test_delete_range() {
        let mut line = Line::from("Hello World");
        let deleted = line.delete_range(0, 6);
        assert_eq!(deleted, "Hello ");
        assert_eq!(line.text(), "World");
    }

    #[test]
    fn test_split_and_append() {
        let mut line = Line::from("Hello World");
        let remainder = line.split_off(6);
        assert_eq!(line.text(), "Hello ");
        assert_eq!(remainder.text(), "World");

        line.append(remainder);
        assert_eq!(line.text(), "Hello World");
        line.clear();
        assert!(line.is_empty());
    }
}
