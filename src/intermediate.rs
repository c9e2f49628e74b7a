/// An opaque chemical intermediate, identified by its position in the input list.
///
/// The core never inspects an intermediate beyond its optional display name; any
/// chemistry-specific interpretation is the caller's responsibility.
#[derive(Debug, Clone, PartialEq)]
pub struct Intermediate {
    name: Option<String>,
}

impl Intermediate {
    /// Creates an intermediate with an explicit display name.
    pub fn named(name: impl Into<String>) -> Self {
        Intermediate {
            name: Some(name.into()),
        }
    }

    /// Creates an intermediate with no display name; a positional label is synthesized for it.
    pub fn anonymous() -> Self {
        Intermediate { name: None }
    }

    /// The label to attach to this intermediate's node, falling back to `intermediate-%04d`.
    pub fn label(&self, index: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("intermediate-{index:04}"),
        }
    }
}
