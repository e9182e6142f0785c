//! # Replies
//!
//! Every line a branch sends back is tagged with the branch identifier so the
//! head office can interleave replies from many branches on one console:
//!
//! ```text
//! [Ahmedabad] Stock -> shirts=27, jeans=20
//! ```

use std::fmt;

/// One branch-tagged reply line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Identifier of the branch that produced the reply.
    pub branch: String,

    /// Human-readable message body (no trailing newline).
    pub text: String,
}

impl Reply {
    pub fn new(branch: impl Into<String>, text: impl Into<String>) -> Self {
        Reply {
            branch: branch.into(),
            text: text.into(),
        }
    }
}

impl fmt::Display for Reply {
    /// Renders the wire form: `[branch] text`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.branch, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_form_tags_the_branch() {
        let reply = Reply::new("Surat", "Hello from Surat.");
        assert_eq!(reply.to_string(), "[Surat] Hello from Surat.");
    }
}
